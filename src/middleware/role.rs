//! Per-resource access rules.
//!
//! Three rules cover the whole API:
//! - `require_authenticated`: any valid token.
//! - `require_admin`: valid token with the admin flag.
//! - `admin_or_read_only`: safe methods need a valid token, writes need
//!   the admin flag.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Method, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

async fn authenticate(
    state: &AppState,
    req: Request,
) -> Result<(AuthUser, Request), (AppError, Request)> {
    let (mut parts, body) = req.into_parts();
    let result = AuthUser::from_request_parts(&mut parts, state).await;
    let req = Request::from_parts(parts, body);
    match result {
        Ok(user) => Ok((user, req)),
        Err(e) => Err((e, req)),
    }
}

/// Layer for resources every authenticated user may read and write.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match authenticate(&state, req).await {
        Ok((_, req)) => next.run(req).await,
        Err((err, _)) => err.into_response(),
    }
}

/// Layer for admin-only routes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match authenticate(&state, req).await {
        Ok((user, req)) => {
            if !user.is_admin() {
                return AppError::forbidden(anyhow::anyhow!(
                    "Access denied. Administrator privileges required."
                ))
                .into_response();
            }
            next.run(req).await
        }
        Err((err, _)) => err.into_response(),
    }
}

/// Layer implementing the admin-or-read-only rule: GET/HEAD/OPTIONS pass
/// with any valid token, every other method requires the admin flag.
pub async fn admin_or_read_only(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let read_only = is_read_only(req.method());
    match authenticate(&state, req).await {
        Ok((user, req)) => {
            if !read_only && !user.is_admin() {
                return AppError::forbidden(anyhow::anyhow!(
                    "Access denied. Administrator privileges required."
                ))
                .into_response();
            }
            next.run(req).await
        }
        Err((err, _)) => err.into_response(),
    }
}

/// Extractor form of the admin check, for handlers that mix access rules
/// within one route (e.g. review deletion).
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Access denied. Administrator privileges required."
            )));
        }

        Ok(RequireAdmin(auth_user))
    }
}
