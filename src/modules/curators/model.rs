use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Curator {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCuratorDto {
    #[validate(length(min = 1, max = 30, message = "This field may not be blank."))]
    pub name: String,
    #[validate(length(min = 1, max = 40, message = "This field may not be blank."))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCuratorDto {
    #[validate(length(min = 1, max = 30, message = "This field may not be blank."))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 40, message = "This field may not be blank."))]
    pub phone: Option<String>,
}
