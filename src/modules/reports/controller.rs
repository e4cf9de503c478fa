use axum::{Json, extract::State};
use tracing::instrument;

use crate::modules::reports::model::CourseReportRow;
use crate::modules::reports::service::ReportService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/ielts/course20",
    responses((status = 200, description = "Course 20 student report", body = Vec<CourseReportRow>)),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn course20_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseReportRow>>, AppError> {
    let rows = ReportService::course_report(&state.db, 20).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/ielts/course21",
    responses((status = 200, description = "Course 21 student report", body = Vec<CourseReportRow>)),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn course21_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseReportRow>>, AppError> {
    let rows = ReportService::course_report(&state.db, 21).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/ielts/course22",
    responses((status = 200, description = "Course 22 student report", body = Vec<CourseReportRow>)),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn course22_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseReportRow>>, AppError> {
    let rows = ReportService::course_report(&state.db, 22).await?;
    Ok(Json(rows))
}
