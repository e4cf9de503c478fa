use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// One student row in a per-course report, joined with the curator name.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct CourseReportRow {
    pub curator_name: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub skype_name: String,
    pub ielts_module: String,
    #[schema(value_type = String, example = "7.0")]
    pub goal_score: Decimal,
    pub exam_date: Option<NaiveDate>,
}
