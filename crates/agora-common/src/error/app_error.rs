//! Application error types
//!
//! Unified error handling for the entire application. Every variant knows its
//! HTTP status, its machine-readable code and the message a caller is allowed
//! to see.

use agora_core::{DomainError, IdentityError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Shown for anything unclassified; the real cause only goes to the log
pub const GENERIC_ERROR_MESSAGE: &str = "Something bad happened! Please contact administrator.";

/// Shown when the caller is unauthenticated or lacks the required role
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied! Please contact administrator.";

/// Shown when the bearer token is malformed, forged or expired
pub const INVALID_TOKEN_MESSAGE: &str = "Access Denied! Please re-validate your token.";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid Credentials!!")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Expected failure whose message is shown verbatim with a 500
    #[error("{0}")]
    Application(String),

    // Rate limiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_)
            | Self::InvalidInput(_)
            | Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired => 400,

            // 401 Unauthorized
            Self::MissingAuth | Self::InsufficientPermissions => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 429 Too Many Requests
            Self::RateLimitExceeded => 429,

            // 500 Internal Server Error
            Self::Application(_)
            | Self::Database(_)
            | Self::Cache(_)
            | Self::ExternalService(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Application(_) => "APPLICATION_ERROR",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Message that may be shown to the caller
    ///
    /// Returns `None` for validation errors, whose messages travel as a list.
    #[must_use]
    pub fn public_message(&self) -> Option<String> {
        match self {
            Self::Validation(_) => None,
            Self::InvalidCredentials
            | Self::InvalidInput(_)
            | Self::NotFound(_)
            | Self::Conflict(_)
            | Self::Application(_)
            | Self::RateLimitExceeded => Some(self.to_string()),
            Self::InvalidToken | Self::TokenExpired => Some(INVALID_TOKEN_MESSAGE.to_string()),
            Self::MissingAuth | Self::InsufficientPermissions => {
                Some(ACCESS_DENIED_MESSAGE.to_string())
            }
            Self::Domain(e) if e.is_not_found() || e.is_conflict() => Some(e.to_string()),
            Self::Domain(DomainError::ValidationError(msg)) => Some(msg.clone()),
            Self::Database(_)
            | Self::Cache(_)
            | Self::ExternalService(_)
            | Self::Internal(_)
            | Self::Config(_)
            | Self::Domain(_) => Some(GENERIC_ERROR_MESSAGE.to_string()),
        }
    }

    /// Whether the real cause is hidden from the caller
    #[must_use]
    pub fn is_masked(&self) -> bool {
        self.public_message().as_deref() == Some(GENERIC_ERROR_MESSAGE)
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(message: impl fmt::Display) -> Self {
        Self::NotFound(message.to_string())
    }

    /// Create a single-message validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(vec![msg.to_string()])
    }

    /// Create an application error shown verbatim
    #[must_use]
    pub fn application(msg: impl fmt::Display) -> Self {
        Self::Application(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            IdentityError::UserAlreadyExists => Self::Conflict(err.to_string()),
            IdentityError::Transport(_) | IdentityError::InvalidResponse(_) => {
                Self::ExternalService(err.to_string())
            }
            other => Self::Application(other.to_string()),
        }
    }
}

/// Error response structure for API responses
///
/// Exactly one of `error` and `errors` is present.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let errors = match err {
            AppError::Validation(messages) => Some(messages.clone()),
            _ => None,
        };
        Self {
            status: err.status_code(),
            code: err.error_code().to_string(),
            error: err.public_message(),
            errors,
            timestamp: Utc::now(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
