use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::modules::group_sessions::model::{
    CreateGroupSessionDto, GroupSession, GroupSessionFilterParams, UpdateGroupSessionDto,
};
use crate::modules::group_sessions::service::GroupSessionService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/ielts/group_sessions",
    request_body = CreateGroupSessionDto,
    responses(
        (status = 201, description = "Group session created", body = GroupSession),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an administrator")
    ),
    tag = "Group sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_group_session(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGroupSessionDto>,
) -> Result<(StatusCode, Json<GroupSession>), AppError> {
    let session = GroupSessionService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(
    get,
    path = "/ielts/group_sessions",
    params(GroupSessionFilterParams),
    responses(
        (status = 200, description = "List of group sessions", body = Vec<GroupSession>),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "Group sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_group_sessions(
    State(state): State<AppState>,
    Query(filters): Query<GroupSessionFilterParams>,
) -> Result<Json<Vec<GroupSession>>, AppError> {
    let sessions = GroupSessionService::list(&state.db, filters).await?;
    Ok(Json(sessions))
}

#[utoipa::path(
    get,
    path = "/ielts/group_sessions/{id}",
    params(("id" = i64, Path, description = "Group session ID")),
    responses(
        (status = 200, description = "Group session details", body = GroupSession),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Group session not found")
    ),
    tag = "Group sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_group_session_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GroupSession>, AppError> {
    let session = GroupSessionService::get_by_id(&state.db, id).await?;
    Ok(Json(session))
}

#[utoipa::path(
    put,
    path = "/ielts/group_sessions/{id}",
    params(("id" = i64, Path, description = "Group session ID")),
    request_body = CreateGroupSessionDto,
    responses(
        (status = 200, description = "Group session replaced", body = GroupSession),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Group session not found")
    ),
    tag = "Group sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn replace_group_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CreateGroupSessionDto>,
) -> Result<Json<GroupSession>, AppError> {
    let session = GroupSessionService::replace(&state.db, id, dto).await?;
    Ok(Json(session))
}

#[utoipa::path(
    patch,
    path = "/ielts/group_sessions/{id}",
    params(("id" = i64, Path, description = "Group session ID")),
    request_body = UpdateGroupSessionDto,
    responses(
        (status = 200, description = "Group session updated", body = GroupSession),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Group session not found")
    ),
    tag = "Group sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_group_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateGroupSessionDto>,
) -> Result<Json<GroupSession>, AppError> {
    let session = GroupSessionService::update(&state.db, id, dto).await?;
    Ok(Json(session))
}

#[utoipa::path(
    delete,
    path = "/ielts/group_sessions/{id}",
    params(("id" = i64, Path, description = "Group session ID")),
    responses(
        (status = 204, description = "Group session deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Group session not found")
    ),
    tag = "Group sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_group_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    GroupSessionService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
