/// Application error handling
///
/// Every fallible path in the service ends in [`AppError`], which knows how to
/// render itself as an HTTP response and how to log itself. The auth core keeps
/// its own finer-grained errors (`AccessTokenError`, `RefreshTokenError`) and
/// collapses them into the generic variants here.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::auth::{AccessTokenError, HashingError};
use crate::store::StoreError;

// ============================================================================
// 1. DOMAIN-SPECIFIC ERROR TYPES
// ============================================================================

/// Validation errors for request input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is empty")]
    EmptyField(&'static str),
    #[error("{0} is too long (maximum {1})")]
    TooLong(&'static str, usize),
    #[error("{0} is too short (minimum {1})")]
    TooShort(&'static str, usize),
    #[error("{0} has invalid format")]
    InvalidFormat(&'static str),
    #[error("{0} contains suspicious content")]
    SuspiciousContent(&'static str),
}

/// Authentication and authorization failures as seen by callers.
///
/// These are deliberately coarse: the specific sub-check that failed is logged
/// where it happens and never reaches the response.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid refresh token")]
    RefreshTokenInvalid,
    #[error("Forbidden")]
    Forbidden,
}

// ============================================================================
// 2. UNIFIED APPLICATION ERROR TYPE
// ============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("access token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AccessTokenError> for AppError {
    fn from(err: AccessTokenError) -> Self {
        match err {
            AccessTokenError::Signing(source) => AppError::Signing(source),
            _ => AppError::Auth(AuthError::InvalidToken),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Auth(e) => {
                let (status, code) = match e {
                    AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
                    AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "TOKEN_INVALID"),
                    AuthError::RefreshTokenInvalid => {
                        (StatusCode::UNAUTHORIZED, "REFRESH_TOKEN_INVALID")
                    }
                    AuthError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                };
                (status, code, e.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            AppError::Hashing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASHING_ERROR",
                "Unable to process password".to_string(),
            ),
            AppError::Signing(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
            AppError::Storage(StoreError::Conflict(what)) => (
                StatusCode::CONFLICT,
                "DUPLICATE_ENTRY",
                format!("Duplicate entry: {}", what),
            ),
            AppError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                "Storage error occurred".to_string(),
            ),
        }
    }

    fn log(&self, error_id: &str) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Validation error");
            }
            AppError::Auth(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Authentication error");
            }
            AppError::NotFound(what) => {
                tracing::info!(error_id = error_id, resource = what, "Resource not found");
            }
            AppError::Storage(StoreError::Conflict(_)) => {
                tracing::warn!(error_id = error_id, error = %self, "Duplicate entry attempt");
            }
            AppError::Hashing(_)
            | AppError::Signing(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => {
                tracing::error!(error_id = error_id, error = %self, "Internal error");
            }
        }
    }
}

// ============================================================================
// 3. HTTP RESPONSE MAPPING
// ============================================================================

/// Error response body
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// Unique id that ties the response to its log line
    pub error_id: String,
    pub message: String,
    /// Machine readable code for clients
    pub code: String,
    pub status: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_id: String, message: String, code: String, status: u16) -> Self {
        Self {
            error_id,
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log(&error_id);

        let (status, code, message) = self.parts();
        HttpResponse::build(status).json(ErrorResponse::new(
            error_id,
            message,
            code.to_string(),
            status.as_u16(),
        ))
    }

    fn status_code(&self) -> StatusCode {
        self.parts().0
    }
}
