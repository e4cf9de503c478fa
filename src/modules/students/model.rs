use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::serde::deserialize_optional_i32;

/// Single-letter IELTS module codes, stored as-is.
pub mod ielts_module {
    pub const GENERAL: &str = "G";
    pub const ACADEMIC: &str = "A";
}

/// Single-letter service package codes.
pub mod package {
    pub const BASIC: &str = "B";
    pub const STANDARD: &str = "S";
    pub const VIP: &str = "V";
}

pub fn validate_ielts_module(value: &str) -> Result<(), ValidationError> {
    match value {
        ielts_module::GENERAL | ielts_module::ACADEMIC => Ok(()),
        _ => Err(ValidationError::new("ielts_module")
            .with_message("Must be one of: G (General), A (Academic).".into())),
    }
}

pub fn validate_package(value: &str) -> Result<(), ValidationError> {
    match value {
        package::BASIC | package::STANDARD | package::VIP => Ok(()),
        _ => Err(ValidationError::new("package")
            .with_message("Must be one of: B (Basic), S (Standard), V (VIP).".into())),
    }
}

/// One decimal place, two digits total, like the original NUMERIC(2, 1).
pub fn validate_goal_score(value: &Decimal) -> Result<(), ValidationError> {
    let in_range = *value >= Decimal::ZERO && *value < Decimal::from(10);
    if !in_range || value.normalize().scale() > 1 {
        return Err(ValidationError::new("goal_score")
            .with_message("Must be between 0.0 and 9.9 with at most one decimal place.".into()));
    }
    Ok(())
}

fn default_ielts_module() -> String {
    ielts_module::GENERAL.to_string()
}

fn default_package() -> String {
    package::STANDARD.to_string()
}

fn default_goal_score() -> Decimal {
    Decimal::new(70, 1) // 7.0
}

#[derive(Debug, FromRow)]
pub struct Student {
    pub id: i64,
    pub course: i32,
    pub curator_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub skype_name: String,
    pub ielts_module: String,
    pub goal_score: Decimal,
    pub exam_date: Option<NaiveDate>,
    pub package: String,
}

/// API representation: scalar fields plus the curator as a hyperlink.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i64,
    pub course: i32,
    pub curator: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub skype_name: String,
    pub ielts_module: String,
    pub goal_score: Decimal,
    pub exam_date: Option<NaiveDate>,
    pub package: String,
}

pub fn curator_url(curator_id: i64) -> String {
    format!("/ielts/curators/{}", curator_id)
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            course: s.course,
            curator: curator_url(s.curator_id),
            first_name: s.first_name,
            last_name: s.last_name,
            phone: s.phone,
            email: s.email,
            skype_name: s.skype_name,
            ielts_module: s.ielts_module,
            goal_score: s.goal_score,
            exam_date: s.exam_date,
            package: s.package,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(range(min = 20, message = "Ensure this value is greater than or equal to 20."))]
    pub course: i32,
    /// Curator id; responses render it as a hyperlink.
    pub curator: i64,
    #[validate(length(min = 1, max = 20, message = "This field may not be blank."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "This field may not be blank."))]
    pub last_name: String,
    #[validate(length(min = 1, max = 40, message = "This field may not be blank."))]
    pub phone: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 40, message = "Ensure this field has no more than 40 characters."))]
    pub skype_name: String,
    #[serde(default = "default_ielts_module")]
    #[validate(custom(function = validate_ielts_module))]
    pub ielts_module: String,
    #[serde(default = "default_goal_score")]
    #[validate(custom(function = validate_goal_score))]
    pub goal_score: Decimal,
    pub exam_date: Option<NaiveDate>,
    #[serde(default = "default_package")]
    #[validate(custom(function = validate_package))]
    pub package: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(range(min = 20, message = "Ensure this value is greater than or equal to 20."))]
    pub course: Option<i32>,
    pub curator: Option<i64>,
    #[validate(length(min = 1, max = 20, message = "This field may not be blank."))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30, message = "This field may not be blank."))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 40, message = "This field may not be blank."))]
    pub phone: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "Ensure this field has no more than 40 characters."))]
    pub skype_name: Option<String>,
    #[validate(custom(function = validate_ielts_module))]
    pub ielts_module: Option<String>,
    #[validate(custom(function = validate_goal_score))]
    pub goal_score: Option<Decimal>,
    // None means unchanged; clearing the date goes through PUT.
    pub exam_date: Option<NaiveDate>,
    #[validate(custom(function = validate_package))]
    pub package: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct StudentFilterParams {
    /// Restricts the listing to one course number.
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    #[param(value_type = Option<i32>)]
    pub course: Option<i32>,
    /// One of first_name, last_name, course; prefix with `-` to reverse.
    pub ordering: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<StudentResponse>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_codes_are_validated() {
        assert!(validate_ielts_module("G").is_ok());
        assert!(validate_ielts_module("A").is_ok());
        assert!(validate_ielts_module("X").is_err());
        assert!(validate_ielts_module("").is_err());
    }

    #[test]
    fn package_codes_are_validated() {
        assert!(validate_package("B").is_ok());
        assert!(validate_package("S").is_ok());
        assert!(validate_package("V").is_ok());
        assert!(validate_package("Q").is_err());
    }

    #[test]
    fn goal_score_accepts_one_decimal_place() {
        assert!(validate_goal_score(&Decimal::new(75, 1)).is_ok()); // 7.5
        assert!(validate_goal_score(&Decimal::new(90, 1)).is_ok()); // 9.0
        assert!(validate_goal_score(&Decimal::ZERO).is_ok());
    }

    #[test]
    fn goal_score_rejects_out_of_range() {
        assert!(validate_goal_score(&Decimal::from(10)).is_err());
        assert!(validate_goal_score(&Decimal::new(-5, 1)).is_err());
        assert!(validate_goal_score(&Decimal::new(755, 2)).is_err()); // 7.55
    }

    #[test]
    fn curator_renders_as_hyperlink() {
        assert_eq!(curator_url(7), "/ielts/curators/7");
    }
}
