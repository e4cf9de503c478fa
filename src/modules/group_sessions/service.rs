use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::modules::group_sessions::model::{
    CreateGroupSessionDto, GroupSession, GroupSessionFilterParams, UpdateGroupSessionDto,
};
use crate::utils::errors::AppError;

const SELECT: &str = r#"SELECT g.id, g.title, g.description,
       COALESCE(ARRAY_AGG(tg.teacher_id ORDER BY tg.teacher_id)
                FILTER (WHERE tg.teacher_id IS NOT NULL), '{}'::BIGINT[]) AS teacher
  FROM group_sessions g
  LEFT JOIN teacher_group_sessions tg ON tg.group_session_id = g.id"#;

const GROUP_BY: &str = "GROUP BY g.id, g.title, g.description";

fn ordering_clause(param: Option<&str>) -> &'static str {
    match param {
        Some("title") => "g.title ASC, g.id ASC",
        Some("-title") => "g.title DESC, g.id ASC",
        _ => "g.id ASC",
    }
}

fn map_association_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return AppError::field("teacher", "Invalid teacher.");
    }
    AppError::from(err)
}

async fn set_teachers(
    tx: &mut Transaction<'_, Postgres>,
    session_id: i64,
    teacher_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM teacher_group_sessions WHERE group_session_id = $1")
        .bind(session_id)
        .execute(&mut **tx)
        .await?;

    for teacher_id in teacher_ids {
        sqlx::query(
            r#"INSERT INTO teacher_group_sessions (teacher_id, group_session_id)
               VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(teacher_id)
        .bind(session_id)
        .execute(&mut **tx)
        .await
        .map_err(map_association_error)?;
    }

    Ok(())
}

pub struct GroupSessionService;

impl GroupSessionService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateGroupSessionDto) -> Result<GroupSession, AppError> {
        let mut tx = db.begin().await?;

        let session_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO group_sessions (title, description)
               VALUES ($1, $2)
               RETURNING id"#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await?;

        set_teachers(&mut tx, session_id, &dto.teacher).await?;
        tx.commit().await?;

        Self::get_by_id(db, session_id).await
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: GroupSessionFilterParams,
    ) -> Result<Vec<GroupSession>, AppError> {
        let mut where_clause = String::new();
        let mut bind_idx = 0;
        let mut teacher_bind: Option<i64> = None;
        let mut search_bind: Option<String> = None;

        if let Some(teacher_id) = filters.teacher {
            bind_idx += 1;
            where_clause.push_str(&format!(
                " WHERE EXISTS (SELECT 1 FROM teacher_group_sessions x \
                 WHERE x.group_session_id = g.id AND x.teacher_id = ${bind_idx})"
            ));
            teacher_bind = Some(teacher_id);
        }

        if let Some(search) = &filters.search {
            bind_idx += 1;
            let prefix = if where_clause.is_empty() {
                " WHERE"
            } else {
                " AND"
            };
            where_clause.push_str(&format!("{prefix} g.title ILIKE ${bind_idx}"));
            search_bind = Some(format!("%{}%", search));
        }

        let order = ordering_clause(filters.ordering.as_deref());
        let query = format!("{SELECT}{where_clause} {GROUP_BY} ORDER BY {order}");

        let mut sql = sqlx::query_as::<_, GroupSession>(&query);
        if let Some(teacher_id) = teacher_bind {
            sql = sql.bind(teacher_id);
        }
        if let Some(pattern) = &search_bind {
            sql = sql.bind(pattern);
        }

        let sessions = sql.fetch_all(db).await?;
        Ok(sessions)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<GroupSession, AppError> {
        let query = format!("{SELECT} WHERE g.id = $1 {GROUP_BY}");
        let session = sqlx::query_as::<_, GroupSession>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Group session not found")))?;

        Ok(session)
    }

    #[instrument(skip(db, dto))]
    pub async fn replace(
        db: &PgPool,
        id: i64,
        dto: CreateGroupSessionDto,
    ) -> Result<GroupSession, AppError> {
        let mut tx = db.begin().await?;

        let updated = sqlx::query("UPDATE group_sessions SET title = $1, description = $2 WHERE id = $3")
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Group session not found"
            )));
        }

        set_teachers(&mut tx, id, &dto.teacher).await?;
        tx.commit().await?;

        Self::get_by_id(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateGroupSessionDto,
    ) -> Result<GroupSession, AppError> {
        let existing = Self::get_by_id(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.unwrap_or(existing.description);

        let mut tx = db.begin().await?;

        sqlx::query("UPDATE group_sessions SET title = $1, description = $2 WHERE id = $3")
            .bind(&title)
            .bind(&description)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(teacher_ids) = &dto.teacher {
            set_teachers(&mut tx, id, teacher_ids).await?;
        }
        tx.commit().await?;

        Self::get_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM group_sessions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Group session not found"
            )));
        }

        Ok(())
    }
}
