//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Numeric error codes carried in every error response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    BadValue = 2,
    NotFound = 3,
    NoCopyAvailable = 4,
    NothingToReturn = 5,
    Conflict = 6,
    ConstraintViolation = 7,
    StoreBusy = 8,
    StoreUnavailable = 9,
    DbFailure = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No available copies to issue for book {0}")]
    CapacityExceeded(Uuid),

    #[error("No issued copies to return for book {0}")]
    InvalidReturn(Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Lock wait timed out: {0}")]
    LockTimeout(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Issue and return report a missing book as a conflict rather than 404.
    pub fn in_transition_context(self) -> Self {
        match self {
            AppError::NotFound(msg) => AppError::Conflict(msg),
            other => other,
        }
    }

    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            AppError::CapacityExceeded(_) => {
                (StatusCode::CONFLICT, ErrorCode::NoCopyAvailable, self.to_string())
            }
            AppError::InvalidReturn(_) => {
                (StatusCode::CONFLICT, ErrorCode::NothingToReturn, self.to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg.clone()),
            AppError::ConstraintViolation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ConstraintViolation, msg.clone())
            }
            AppError::LockTimeout(msg) => {
                tracing::warn!("Lock wait timed out: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StoreBusy,
                    "Book is busy, try again later".to_string(),
                )
            }
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StoreUnavailable,
                    "Store unavailable".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Maps Postgres SQLSTATE classes onto the error taxonomy.
fn classify_database_error(code: Option<&str>, message: &str) -> Option<AppError> {
    match code {
        // unique, foreign key, check, not null
        Some("23505") | Some("23503") | Some("23514") | Some("23502") => {
            Some(AppError::ConstraintViolation(message.to_string()))
        }
        // lock_not_available, deadlock_detected
        Some("55P03") | Some("40P01") => Some(AppError::LockTimeout(message.to_string())),
        _ => None,
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db_err) => {
                classify_database_error(db_err.code().as_deref(), db_err.message())
            }
            _ => None,
        };
        if let Some(classified) = classified {
            return classified;
        }

        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::StoreUnavailable(err.to_string()),
            other => AppError::Database(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
