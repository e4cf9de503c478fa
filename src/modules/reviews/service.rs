use sqlx::PgPool;
use tracing::instrument;

use crate::modules::reviews::model::{CreateReviewDto, Review};
use crate::utils::errors::AppError;

async fn ensure_teacher_exists(db: &PgPool, teacher_id: i64) -> Result<(), AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

    if !exists {
        return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
    }
    Ok(())
}

pub struct ReviewService;

impl ReviewService {
    /// Creates a review for the teacher named in the URL path. The
    /// creation date is set by the database.
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        teacher_id: i64,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        ensure_teacher_exists(db, teacher_id).await?;

        let review = sqlx::query_as::<_, Review>(
            r#"INSERT INTO reviews (teacher_id, name, description)
               VALUES ($1, $2, $3)
               RETURNING id, name, description, date"#,
        )
        .bind(teacher_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        Ok(review)
    }

    /// Lists reviews for one teacher only; there is no cross-teacher
    /// listing.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, teacher_id: i64) -> Result<Vec<Review>, AppError> {
        ensure_teacher_exists(db, teacher_id).await?;

        let reviews = sqlx::query_as::<_, Review>(
            r#"SELECT id, name, description, date
               FROM reviews
               WHERE teacher_id = $1
               ORDER BY id"#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(reviews)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, teacher_id: i64, id: i64) -> Result<Review, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"SELECT id, name, description, date
               FROM reviews
               WHERE id = $1 AND teacher_id = $2"#,
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Review not found")))?;

        Ok(review)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, teacher_id: i64, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND teacher_id = $2")
            .bind(id)
            .bind(teacher_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Review not found")));
        }

        Ok(())
    }
}
