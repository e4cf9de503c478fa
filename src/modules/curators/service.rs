use sqlx::PgPool;
use tracing::instrument;

use crate::modules::curators::model::{CreateCuratorDto, Curator, UpdateCuratorDto};
use crate::utils::errors::{AppError, map_unique_violation};

const UNIQUE_FIELDS: &[(&str, &str)] = &[("curators_phone_key", "phone")];

pub struct CuratorService;

impl CuratorService {
    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateCuratorDto) -> Result<Curator, AppError> {
        let curator = sqlx::query_as::<_, Curator>(
            r#"INSERT INTO curators (name, phone)
               VALUES ($1, $2)
               RETURNING id, name, phone"#,
        )
        .bind(&dto.name)
        .bind(&dto.phone)
        .fetch_one(db)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(curator)
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Curator>, AppError> {
        let curators =
            sqlx::query_as::<_, Curator>("SELECT id, name, phone FROM curators ORDER BY name")
                .fetch_all(db)
                .await?;

        Ok(curators)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Curator, AppError> {
        let curator =
            sqlx::query_as::<_, Curator>("SELECT id, name, phone FROM curators WHERE id = $1")
                .bind(id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Curator not found")))?;

        Ok(curator)
    }

    #[instrument(skip(db))]
    pub async fn replace(db: &PgPool, id: i64, dto: CreateCuratorDto) -> Result<Curator, AppError> {
        let curator = sqlx::query_as::<_, Curator>(
            r#"UPDATE curators
               SET name = $1, phone = $2
               WHERE id = $3
               RETURNING id, name, phone"#,
        )
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Curator not found")))?;

        Ok(curator)
    }

    #[instrument(skip(db))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateCuratorDto) -> Result<Curator, AppError> {
        let existing = Self::get_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let phone = dto.phone.unwrap_or(existing.phone);

        let curator = sqlx::query_as::<_, Curator>(
            r#"UPDATE curators
               SET name = $1, phone = $2
               WHERE id = $3
               RETURNING id, name, phone"#,
        )
        .bind(&name)
        .bind(&phone)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(curator)
    }

    /// Deletes a curator unless any student still references it, in
    /// which case the operation is structurally disallowed (405), not a
    /// validation problem.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let student_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE curator_id = $1")
                .bind(id)
                .fetch_one(db)
                .await?;

        if student_count > 0 {
            return Err(AppError::method_not_allowed(anyhow::anyhow!(
                "Curator cannot be deleted because {} student(s) are assigned to it",
                student_count
            )));
        }

        let result = sqlx::query("DELETE FROM curators WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Curator not found")));
        }

        Ok(())
    }
}
