use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{admin_or_read_only, require_authenticated};
use crate::modules::auth::router::init_auth_router;
use crate::modules::curators::router::init_curators_router;
use crate::modules::group_sessions::router::init_group_sessions_router;
use crate::modules::reports::router::init_reports_router;
use crate::modules::reviews::router::init_reviews_router;
use crate::modules::students::router::init_students_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower::Layer as _;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application service. The router is wrapped in
/// `NormalizePath` so `/ielts/curators/` and `/ielts/curators` hit the
/// same route; the layer has to sit outside the router because layers
/// added with `Router::layer` run after route matching.
pub fn init_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/ielts",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/curators",
                    init_curators_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        admin_or_read_only,
                    )),
                )
                .nest(
                    "/students",
                    init_students_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_authenticated,
                    )),
                )
                .nest(
                    "/teachers",
                    init_teachers_router()
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            admin_or_read_only,
                        ))
                        // Nested after the layer: review access rules differ
                        // per handler, so the reviews router relies on
                        // extractors instead of a blanket layer.
                        .nest("/{teacher_id}/reviews", init_reviews_router()),
                )
                .nest(
                    "/group_sessions",
                    init_group_sessions_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        admin_or_read_only,
                    )),
                )
                .merge(init_reports_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
