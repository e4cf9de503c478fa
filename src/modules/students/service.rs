use sqlx::PgPool;
use tracing::instrument;

use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::utils::errors::{AppError, map_unique_violation};
use crate::utils::pagination::{PAGE_SIZE, PaginationMeta};

const UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("students_phone_key", "phone"),
    ("students_email_key", "email"),
];

const COLUMNS: &str = "id, course, curator_id, first_name, last_name, phone, email, \
                       skype_name, ielts_module, goal_score, exam_date, package";

/// Maps the `ordering` query parameter to a whitelisted ORDER BY clause.
/// Unknown values fall back to the id order rather than erroring, the
/// same forgiving behavior the original backend had.
fn ordering_clause(param: Option<&str>) -> &'static str {
    match param {
        Some("first_name") => "first_name ASC, id ASC",
        Some("-first_name") => "first_name DESC, id ASC",
        Some("last_name") => "last_name ASC, id ASC",
        Some("-last_name") => "last_name DESC, id ASC",
        Some("course") => "course ASC, id ASC",
        Some("-course") => "course DESC, id ASC",
        _ => "id ASC",
    }
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::field("curator", "Invalid curator.");
        }
        if db_err.is_check_violation() {
            return AppError::field("course", "Ensure this value is greater than or equal to 20.");
        }
    }
    map_unique_violation(err, UNIQUE_FIELDS)
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students
               (course, curator_id, first_name, last_name, phone, email,
                skype_name, ielts_module, goal_score, exam_date, package)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.course)
        .bind(dto.curator)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.skype_name)
        .bind(&dto.ielts_module)
        .bind(dto.goal_score)
        .bind(dto.exam_date)
        .bind(&dto.package)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let page = filters.pagination.page();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        if filters.course.is_some() {
            where_clause.push_str(" WHERE course = $1");
        }

        let count_query = format!("SELECT COUNT(*) FROM students{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(course) = filters.course {
            count_sql = count_sql.bind(course);
        }
        let total = count_sql.fetch_one(db).await?;

        let order = ordering_clause(filters.ordering.as_deref());
        let data_query = format!(
            "SELECT {COLUMNS} FROM students{where_clause} ORDER BY {order} \
             LIMIT {PAGE_SIZE} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Student>(&data_query);
        if let Some(course) = filters.course {
            data_sql = data_sql.bind(course);
        }
        let students = data_sql.fetch_all(db).await?;

        Ok(PaginatedStudentsResponse {
            data: students.into_iter().map(Into::into).collect(),
            meta: PaginationMeta::new(total, page),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn replace(db: &PgPool, id: i64, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"UPDATE students
               SET course = $1, curator_id = $2, first_name = $3, last_name = $4,
                   phone = $5, email = $6, skype_name = $7, ielts_module = $8,
                   goal_score = $9, exam_date = $10, package = $11
               WHERE id = $12
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.course)
        .bind(dto.curator)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.skype_name)
        .bind(&dto.ielts_module)
        .bind(dto.goal_score)
        .bind(dto.exam_date)
        .bind(&dto.package)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateStudentDto) -> Result<Student, AppError> {
        let existing = Self::get_by_id(db, id).await?;

        let course = dto.course.unwrap_or(existing.course);
        let curator_id = dto.curator.unwrap_or(existing.curator_id);
        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let phone = dto.phone.unwrap_or(existing.phone);
        let email = dto.email.unwrap_or(existing.email);
        let skype_name = dto.skype_name.unwrap_or(existing.skype_name);
        let ielts_module = dto.ielts_module.unwrap_or(existing.ielts_module);
        let goal_score = dto.goal_score.unwrap_or(existing.goal_score);
        let exam_date = dto.exam_date.or(existing.exam_date);
        let package = dto.package.unwrap_or(existing.package);

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"UPDATE students
               SET course = $1, curator_id = $2, first_name = $3, last_name = $4,
                   phone = $5, email = $6, skype_name = $7, ielts_module = $8,
                   goal_score = $9, exam_date = $10, package = $11
               WHERE id = $12
               RETURNING {COLUMNS}"#
        ))
        .bind(course)
        .bind(curator_id)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&phone)
        .bind(&email)
        .bind(&skype_name)
        .bind(&ielts_module)
        .bind(goal_score)
        .bind(exam_date)
        .bind(&package)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_whitelist_covers_all_fields() {
        assert_eq!(ordering_clause(Some("first_name")), "first_name ASC, id ASC");
        assert_eq!(
            ordering_clause(Some("-last_name")),
            "last_name DESC, id ASC"
        );
        assert_eq!(ordering_clause(Some("course")), "course ASC, id ASC");
    }

    #[test]
    fn unknown_ordering_falls_back_to_id() {
        assert_eq!(ordering_clause(Some("phone")), "id ASC");
        assert_eq!(ordering_clause(Some("; DROP TABLE students")), "id ASC");
        assert_eq!(ordering_clause(None), "id ASC");
    }
}
