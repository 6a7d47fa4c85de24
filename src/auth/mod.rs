pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::{Validate, ValidationError};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::{User, UserResponse};

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

lazy_static! {
    // Password policy character classes
    static ref HAS_LETTER: regex::Regex = regex::Regex::new(r"[A-Za-z]").unwrap();
    static ref HAS_DIGIT: regex::Regex = regex::Regex::new(r"\d").unwrap();
    static ref HAS_SPECIAL: regex::Regex =
        regex::Regex::new(r"[!@#$%^&*()_+\-=\[\]{}]").unwrap();
}

/// Validates that a password contains at least one letter, one digit, and
/// one special character from `!@#$%^&*()_+-=[]{}`.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if !HAS_LETTER.is_match(password) {
        let mut err = ValidationError::new("password_letter");
        err.message = Some("Password must contain at least one letter".into());
        return Err(err);
    }
    if !HAS_DIGIT.is_match(password) {
        let mut err = ValidationError::new("password_digit");
        err.message = Some("Password must contain at least one digit".into());
        return Err(err);
    }
    if !HAS_SPECIAL.is_match(password) {
        let mut err = ValidationError::new("password_special");
        err.message = Some("Password must contain at least one special character".into());
        return Err(err);
    }
    Ok(())
}

/// Represents the payload for a new user signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// 8 to 128 characters with at least one letter, one digit, and one
    /// special character.
    #[validate(
        length(min = 8, max = 128),
        custom = "validate_password_strength"
    )]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Response structure after a successful signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub message: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// The JWT for authenticating subsequent requests.
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: String,
}

/// Verifies an email/password pair against the user directory.
///
/// Returns `Ok(None)` for both an unknown email and a wrong password, so the
/// caller cannot tell the two apart (no user enumeration).
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    match UserRepository::find_by_email(pool, email).await? {
        Some(user) => {
            if verify_password(password, &user.password_hash)? {
                Ok(Some(user))
            } else {
                Ok(None)
            }
        }
        None => Ok(None),
    }
}

/// Issues an access token for an authenticated user, with the user's email
/// as the subject claim.
pub fn create_user_token(token_service: &TokenService, user: &User) -> Result<String, AppError> {
    token_service.issue(&user.email)
}
