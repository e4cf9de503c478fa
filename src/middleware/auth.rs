use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and exposes the
/// authenticated user's claims. Rejection is always 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }

    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(is_admin: bool) -> Claims {
        Claims {
            sub: "42".to_string(),
            email: "test@example.com".to_string(),
            is_admin,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn admin_flag_comes_from_claims() {
        assert!(AuthUser(claims(true)).is_admin());
        assert!(!AuthUser(claims(false)).is_admin());
    }

    #[test]
    fn user_id_parses_sub() {
        assert_eq!(AuthUser(claims(false)).user_id().unwrap(), 42);
    }

    #[test]
    fn extractor_is_cloneable() {
        let user = AuthUser(claims(true));
        let copy = user.clone();
        assert_eq!(copy.email(), user.email());
        assert!(copy.is_admin());
    }

    #[test]
    fn garbage_sub_is_unauthorized() {
        let mut c = claims(false);
        c.sub = "not-a-number".to_string();
        assert!(AuthUser(c).user_id().is_err());
    }
}
