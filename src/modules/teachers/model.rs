use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Teacher with its linked group-session ids, as aggregated by the list
/// and detail queries.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub skype_name: String,
    pub about_me: String,
    pub groupsessions: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
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
    #[serde(default)]
    pub about_me: String,
    #[serde(default)]
    pub groupsessions: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
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
    pub about_me: Option<String>,
    /// Replaces the association set when present.
    pub groupsessions: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct TeacherFilterParams {
    /// Restricts to teachers linked to this group session.
    pub groupsessions: Option<i64>,
    /// Case-insensitive substring match over first and last name.
    pub search: Option<String>,
    /// One of first_name, last_name; prefix with `-` to reverse.
    pub ordering: Option<String>,
}
