use sqlx::PgPool;

use crate::modules::reports::model::CourseReportRow;
use crate::utils::errors::AppError;

pub struct ReportService;

impl ReportService {
    /// All students enrolled in the given course, ordered by curator name
    /// and then student name.
    pub async fn course_report(pool: &PgPool, course: i32) -> Result<Vec<CourseReportRow>, AppError> {
        let rows = sqlx::query_as::<_, CourseReportRow>(
            r#"
            SELECT c.name AS curator_name,
                   s.first_name, s.last_name, s.phone, s.email,
                   s.skype_name, s.ielts_module, s.goal_score, s.exam_date
            FROM students s
            JOIN curators c ON c.id = s.curator_id
            WHERE s.course = $1
            ORDER BY c.name ASC, s.first_name ASC, s.last_name ASC
            "#,
        )
        .bind(course)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
