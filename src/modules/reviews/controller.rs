use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::reviews::model::{CreateReviewDto, Review};
use crate::modules::reviews::service::ReviewService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/ielts/teachers/{teacher_id}/reviews",
    params(("teacher_id" = i64, Path, description = "Teacher ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _user, dto))]
pub async fn create_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(teacher_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = ReviewService::create(&state.db, teacher_id, dto).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/ielts/teachers/{teacher_id}/reviews",
    params(("teacher_id" = i64, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Reviews for this teacher", body = Vec<Review>),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(teacher_id): Path<i64>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = ReviewService::list(&state.db, teacher_id).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    get,
    path = "/ielts/teachers/{teacher_id}/reviews/{id}",
    params(
        ("teacher_id" = i64, Path, description = "Teacher ID"),
        ("id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review details", body = Review),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_review_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((teacher_id, id)): Path<(i64, i64)>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewService::get_by_id(&state.db, teacher_id, id).await?;
    Ok(Json(review))
}

#[utoipa::path(
    delete,
    path = "/ielts/teachers/{teacher_id}/reviews/{id}",
    params(
        ("teacher_id" = i64, Path, description = "Teacher ID"),
        ("id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_review(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path((teacher_id, id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    ReviewService::delete(&state.db, teacher_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
