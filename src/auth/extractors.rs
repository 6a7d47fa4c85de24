use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::Claims;
use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;

/// Resolves the authenticated caller for a handler.
///
/// `AuthMiddleware` validates the bearer token and stores its claims in
/// request extensions; this extractor looks the subject email up in the user
/// directory and yields the full `User` row. A token whose subject no longer
/// exists fails with the same 401 as every other failure on this path, so
/// nothing about the token's validity leaks. The resolved user is the sole
/// source of identity for ownership checks downstream.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let pool = req.app_data::<web::Data<PgPool>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| {
                AppError::Unauthorized("Authentication token validation failed".to_string())
            })?;
            let pool = pool.ok_or_else(|| {
                AppError::InternalServerError("Database pool not configured".to_string())
            })?;

            match UserRepository::find_by_email(&pool, &claims.sub).await? {
                Some(user) => Ok(CurrentUser(user)),
                // The subject was deleted after the token was issued. Do not
                // reveal that the token itself was valid.
                None => Err(AppError::Unauthorized(
                    "Authentication token validation failed".to_string(),
                )
                .into()),
            }
        })
    }
}
