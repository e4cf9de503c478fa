use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::modules::curators::model::{CreateCuratorDto, Curator, UpdateCuratorDto};
use crate::modules::curators::service::CuratorService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/ielts/curators",
    request_body = CreateCuratorDto,
    responses(
        (status = 201, description = "Curator created", body = Curator),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an administrator")
    ),
    tag = "Curators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_curator(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCuratorDto>,
) -> Result<(StatusCode, Json<Curator>), AppError> {
    let curator = CuratorService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(curator)))
}

#[utoipa::path(
    get,
    path = "/ielts/curators",
    responses(
        (status = 200, description = "List of curators", body = Vec<Curator>),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "Curators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_curators(State(state): State<AppState>) -> Result<Json<Vec<Curator>>, AppError> {
    let curators = CuratorService::list(&state.db).await?;
    Ok(Json(curators))
}

#[utoipa::path(
    get,
    path = "/ielts/curators/{id}",
    params(("id" = i64, Path, description = "Curator ID")),
    responses(
        (status = 200, description = "Curator details", body = Curator),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Curator not found")
    ),
    tag = "Curators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_curator_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Curator>, AppError> {
    let curator = CuratorService::get_by_id(&state.db, id).await?;
    Ok(Json(curator))
}

#[utoipa::path(
    put,
    path = "/ielts/curators/{id}",
    params(("id" = i64, Path, description = "Curator ID")),
    request_body = CreateCuratorDto,
    responses(
        (status = 200, description = "Curator replaced", body = Curator),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Curator not found")
    ),
    tag = "Curators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn replace_curator(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CreateCuratorDto>,
) -> Result<Json<Curator>, AppError> {
    let curator = CuratorService::replace(&state.db, id, dto).await?;
    Ok(Json(curator))
}

#[utoipa::path(
    patch,
    path = "/ielts/curators/{id}",
    params(("id" = i64, Path, description = "Curator ID")),
    request_body = UpdateCuratorDto,
    responses(
        (status = 200, description = "Curator updated", body = Curator),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Curator not found")
    ),
    tag = "Curators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_curator(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCuratorDto>,
) -> Result<Json<Curator>, AppError> {
    let curator = CuratorService::update(&state.db, id, dto).await?;
    Ok(Json(curator))
}

#[utoipa::path(
    delete,
    path = "/ielts/curators/{id}",
    params(("id" = i64, Path, description = "Curator ID")),
    responses(
        (status = 204, description = "Curator deleted"),
        (status = 404, description = "Curator not found"),
        (status = 405, description = "Curator still referenced by students")
    ),
    tag = "Curators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_curator(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    CuratorService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
