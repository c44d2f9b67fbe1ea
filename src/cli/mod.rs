pub mod seeder;

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Create a superuser account. The role resolver routes superusers to
/// the administrator dashboard before any other check.
pub async fn create_system_admin(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed = hash_password(password).map_err(|e| e.error)?;

    sqlx::query(
        "INSERT INTO users (username, email, password, is_superuser)
         VALUES ($1, $2, $3, TRUE)",
    )
    .bind(username)
    .bind(email)
    .bind(&hashed)
    .execute(pool)
    .await?;

    Ok(())
}
