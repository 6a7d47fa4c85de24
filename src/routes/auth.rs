use crate::{
    auth::{
        authenticate_user, create_user_token, hash_password, CurrentUser, LoginRequest,
        LoginResponse, SignupRequest, SignupResponse, TokenService,
    },
    db::users::UserRepository,
    error::AppError,
    models::UserResponse,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. Duplicate emails surface through the storage
/// uniqueness constraint as a 400.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    // Hash password
    let password_hash = hash_password(&signup_data.password)?;

    // Insert new user; a concurrent signup with the same email loses here
    let user = UserRepository::create(&pool, &signup_data.email, &password_hash).await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        user: UserResponse::from(user),
        message: "User registered successfully".to_string(),
    }))
}

/// Login user
///
/// Authenticates a user and returns an access token. The failure response is
/// identical for an unknown email and a wrong password.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    token_service: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    match authenticate_user(&pool, &login_data.email, &login_data.password).await? {
        Some(user) => {
            let access_token = create_user_token(&token_service, &user)?;
            Ok(HttpResponse::Ok().json(LoginResponse {
                user: UserResponse::from(user),
                access_token,
                token_type: "Bearer".to_string(),
            }))
        }
        None => Err(AppError::Unauthorized("Invalid email or password".into())),
    }
}

/// Current user info
///
/// Returns the profile of the caller resolved from the bearer token.
#[get("/me")]
pub async fn me(current_user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(current_user.0)))
}
