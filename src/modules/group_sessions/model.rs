use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Group session with its linked teacher ids. The field is called
/// `teacher` (singular) because that is what API clients already key on.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GroupSession {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub teacher: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGroupSessionDto {
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub teacher: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGroupSessionDto {
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Replaces the association set when present.
    pub teacher: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct GroupSessionFilterParams {
    /// Restricts to sessions linked to this teacher.
    pub teacher: Option<i64>,
    /// Case-insensitive substring match over the title.
    pub search: Option<String>,
    /// `title` or `-title`.
    pub ordering: Option<String>,
}
