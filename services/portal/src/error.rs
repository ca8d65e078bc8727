//! Custom error types for the portal service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Where clients are sent when their session is missing or invalid
pub const LOGIN_REDIRECT: &str = "/login";

/// Message returned when an ownership-scoped statement matches nothing
pub const NOT_FOUND_OR_FORBIDDEN: &str = "not found or not permitted";

/// Custom error type for the portal service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Account/password pair did not match
    #[error("Invalid account or password")]
    InvalidCredentials,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing row, or a row owned by another account
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write collides with an existing row
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Too many login attempts for one account
    #[error("Too many requests")]
    TooManyRequests,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    /// Shorthand for a 400 naming a missing field
    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("`{}` is required", field))
    }

    /// Shorthand for an ownership-scoped miss
    pub fn not_owned() -> Self {
        ApiError::NotFound(NOT_FOUND_OR_FORBIDDEN.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => {
                let body = Json(json!({
                    "error": "Unauthorized",
                    "redirect": LOGIN_REDIRECT,
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid account or password".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many login attempts, try again later".to_string(),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(err) if err.is_unique_violation() => {
                (StatusCode::CONFLICT, "Record already exists".to_string())
            }
            ApiError::Database(err) => {
                error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
