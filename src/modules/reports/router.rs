use axum::{Router, routing::get};

use crate::modules::reports::controller::{course20_report, course21_report, course22_report};
use crate::state::AppState;

/// Legacy per-course report endpoints. Served without authentication.
pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route("/course20", get(course20_report))
        .route("/course21", get(course21_report))
        .route("/course22", get(course22_report))
}
