use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::utils::errors::{AppError, map_unique_violation};
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    /// Registers a regular (non-admin) user. Admin accounts are created
    /// through the CLI only.
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let hashed = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (email, password, is_admin)
               VALUES ($1, $2, FALSE)
               RETURNING id, email, password, is_admin, created_at"#,
        )
        .bind(&dto.email)
        .bind(&hashed)
        .fetch_one(db)
        .await
        .map_err(|e| map_unique_violation(e, &[("users_email_key", "email")]))?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_admin, created_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let access_token = create_access_token(user.id, &user.email, user.is_admin, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            user: user.into(),
        })
    }
}
