//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! handle and represent the error conditions that can occur, from database
//! issues to validation failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly
//! convert application errors into HTTP responses with JSON bodies. It also
//! provides `From` trait implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError`, allowing conversion with the `?` operator.
//!
//! Task-operation failures (not found, create/update/delete failed) map to
//! 400 rather than 404: a caller who does not own a task cannot distinguish
//! "nonexistent" from "not yours", and no response confirms that a task id
//! exists.

use actix_web::{error::ResponseError, http::header, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed: bad credentials, or a missing/invalid/expired
    /// token (HTTP 401 with a `WWW-Authenticate: Bearer` challenge).
    Unauthorized(String),
    /// Request carried no credentials at all (HTTP 403).
    Forbidden(String),
    /// Failed input validation (HTTP 400).
    ValidationError(String),
    /// Signup attempted with an email that is already registered (HTTP 400).
    DuplicateEmail,
    /// Task lookup matched no row for this (id, owner) pair (HTTP 400).
    TaskNotFound,
    /// Task insert did not yield a row (HTTP 400).
    TaskCreateFailed,
    /// Task update changed no rows for this (id, owner) pair (HTTP 400).
    TaskUpdateFailed,
    /// Task delete removed anything other than exactly one row (HTTP 400).
    TaskDeleteFailed,
    /// Error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DuplicateEmail => write!(f, "A user with this email already exists"),
            AppError::TaskNotFound => write!(f, "Task not found"),
            AppError::TaskCreateFailed => write!(f, "Failed to create task"),
            AppError::TaskUpdateFailed => write!(f, "Failed to update task"),
            AppError::TaskDeleteFailed => write!(f, "Failed to delete task"),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// 500-class variants log their internal detail and return a generic message
/// so database and server internals never reach the client.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(json!({ "error": msg })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({ "error": msg })),
            AppError::ValidationError(msg) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            AppError::DuplicateEmail
            | AppError::TaskNotFound
            | AppError::TaskCreateFailed
            | AppError::TaskUpdateFailed
            | AppError::TaskDeleteFailed => {
                HttpResponse::BadRequest().json(json!({ "error": self.to_string() }))
            }
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The field-level validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
