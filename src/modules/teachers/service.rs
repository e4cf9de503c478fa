use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherFilterParams, UpdateTeacherDto,
};
use crate::utils::errors::{AppError, map_unique_violation};

const UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("teachers_phone_key", "phone"),
    ("teachers_email_key", "email"),
];

const SELECT: &str = r#"SELECT t.id, t.first_name, t.last_name, t.phone, t.email,
       t.skype_name, t.about_me,
       COALESCE(ARRAY_AGG(tg.group_session_id ORDER BY tg.group_session_id)
                FILTER (WHERE tg.group_session_id IS NOT NULL), '{}'::BIGINT[]) AS groupsessions
  FROM teachers t
  LEFT JOIN teacher_group_sessions tg ON tg.teacher_id = t.id"#;

const GROUP_BY: &str = "GROUP BY t.id, t.first_name, t.last_name, t.phone, t.email, \
                        t.skype_name, t.about_me";

fn ordering_clause(param: Option<&str>) -> &'static str {
    match param {
        Some("first_name") => "t.first_name ASC, t.id ASC",
        Some("-first_name") => "t.first_name DESC, t.id ASC",
        Some("last_name") => "t.last_name ASC, t.id ASC",
        Some("-last_name") => "t.last_name DESC, t.id ASC",
        _ => "t.id ASC",
    }
}

fn map_association_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return AppError::field("groupsessions", "Invalid group session.");
    }
    AppError::from(err)
}

async fn set_group_sessions(
    tx: &mut Transaction<'_, Postgres>,
    teacher_id: i64,
    session_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM teacher_group_sessions WHERE teacher_id = $1")
        .bind(teacher_id)
        .execute(&mut **tx)
        .await?;

    for session_id in session_ids {
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

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let mut tx = db.begin().await?;

        let teacher_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO teachers (first_name, last_name, phone, email, skype_name, about_me)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id"#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.skype_name)
        .bind(&dto.about_me)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        set_group_sessions(&mut tx, teacher_id, &dto.groupsessions).await?;
        tx.commit().await?;

        Self::get_by_id(db, teacher_id).await
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, filters: TeacherFilterParams) -> Result<Vec<Teacher>, AppError> {
        let mut where_clause = String::new();
        let mut bind_idx = 0;
        let mut text_binds: Vec<String> = Vec::new();
        let mut session_bind: Option<i64> = None;

        if let Some(session_id) = filters.groupsessions {
            bind_idx += 1;
            where_clause.push_str(&format!(
                " WHERE EXISTS (SELECT 1 FROM teacher_group_sessions x \
                 WHERE x.teacher_id = t.id AND x.group_session_id = ${bind_idx})"
            ));
            session_bind = Some(session_id);
        }

        if let Some(search) = &filters.search {
            bind_idx += 1;
            let prefix = if where_clause.is_empty() {
                " WHERE"
            } else {
                " AND"
            };
            where_clause.push_str(&format!(
                "{prefix} (t.first_name ILIKE ${bind_idx} OR t.last_name ILIKE ${bind_idx})"
            ));
            text_binds.push(format!("%{}%", search));
        }

        let order = ordering_clause(filters.ordering.as_deref());
        let query = format!("{SELECT}{where_clause} {GROUP_BY} ORDER BY {order}");

        let mut sql = sqlx::query_as::<_, Teacher>(&query);
        if let Some(session_id) = session_bind {
            sql = sql.bind(session_id);
        }
        for param in &text_binds {
            sql = sql.bind(param);
        }

        let teachers = sql.fetch_all(db).await?;
        Ok(teachers)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Teacher, AppError> {
        let query = format!("{SELECT} WHERE t.id = $1 {GROUP_BY}");
        let teacher = sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto))]
    pub async fn replace(db: &PgPool, id: i64, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let mut tx = db.begin().await?;

        let updated = sqlx::query(
            r#"UPDATE teachers
               SET first_name = $1, last_name = $2, phone = $3, email = $4,
                   skype_name = $5, about_me = $6
               WHERE id = $7"#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.skype_name)
        .bind(&dto.about_me)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        set_group_sessions(&mut tx, id, &dto.groupsessions).await?;
        tx.commit().await?;

        Self::get_by_id(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateTeacherDto) -> Result<Teacher, AppError> {
        let existing = Self::get_by_id(db, id).await?;

        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let phone = dto.phone.unwrap_or(existing.phone);
        let email = dto.email.unwrap_or(existing.email);
        let skype_name = dto.skype_name.unwrap_or(existing.skype_name);
        let about_me = dto.about_me.unwrap_or(existing.about_me);

        let mut tx = db.begin().await?;

        sqlx::query(
            r#"UPDATE teachers
               SET first_name = $1, last_name = $2, phone = $3, email = $4,
                   skype_name = $5, about_me = $6
               WHERE id = $7"#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&phone)
        .bind(&email)
        .bind(&skype_name)
        .bind(&about_me)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        if let Some(session_ids) = &dto.groupsessions {
            set_group_sessions(&mut tx, id, session_ids).await?;
        }
        tx.commit().await?;

        Self::get_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}
