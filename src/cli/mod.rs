use sqlx::PgPool;

use crate::utils::password::hash_password;

pub mod seeder;

/// Creates (or skips, if the email is taken) an administrator account.
/// Admin accounts can only be created from the command line.
pub async fn create_admin(
    db: &PgPool,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (email, password, is_admin)
         VALUES ($1, $2, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(email)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
