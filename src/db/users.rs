use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

/// Storage access for user identity records, keyed by unique email.
pub struct UserRepository;

impl UserRepository {
    /// Inserts a new user.
    ///
    /// Duplicate emails are detected through the `users.email` unique
    /// constraint, not a prior read, so concurrent signups with the same
    /// email cannot race past each other; the loser gets
    /// `AppError::DuplicateEmail`.
    pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tx = pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
             RETURNING id, email, password_hash, created_at, updated_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateEmail;
                }
            }
            AppError::from(e)
        })?;

        tx.commit().await?;
        Ok(user)
    }

    /// Looks a user up by email, compared exactly as stored.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
