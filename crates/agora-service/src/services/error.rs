//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use agora_common::AppError;
use agora_core::{DomainError, IdentityError};
use std::fmt;

/// Returned whenever a member lookup by id, email, phone or username misses
pub const MEMBER_NOT_FOUND: &str = "Member not yet present in database. Please come back later!!";

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    Domain(DomainError),

    /// Application error (auth, token, etc.)
    App(AppError),

    /// Identity provider failure
    Identity(IdentityError),

    /// Resource not found; the message is shown verbatim
    NotFound(String),

    /// One or more validation messages, reported together
    Validation(Vec<String>),

    /// Expected failure shown verbatim with a 500
    Application(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Identity(e) => write!(f, "{e}"),
            Self::NotFound(msg) | Self::Application(msg) => write!(f, "{msg}"),
            Self::Validation(messages) => write!(f, "Validation error: {}", messages.join(", ")),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            Self::Identity(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// The standard "member missing" error
    pub fn member_not_found() -> Self {
        Self::NotFound(MEMBER_NOT_FOUND.to_string())
    }

    /// Create a single-message validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(vec![msg.into()])
    }

    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
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
            Self::App(e) => e.status_code(),
            Self::Identity(IdentityError::InvalidCredentials) | Self::Validation(_) => 400,
            Self::Identity(IdentityError::UserAlreadyExists) => 409,
            Self::NotFound(_) => 404,
            Self::Identity(_) | Self::Application(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Identity(_) => "IDENTITY_PROVIDER_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Application(_) => "APPLICATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<IdentityError> for ServiceError {
    fn from(err: IdentityError) -> Self {
        Self::Identity(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Identity(e) => AppError::from(e),
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Validation(messages) => AppError::Validation(messages),
            ServiceError::Application(msg) => AppError::Application(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_not_found_error() {
        let err = ServiceError::member_not_found();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), MEMBER_NOT_FOUND);
    }

    #[test]
    fn test_validation_error_keeps_every_message() {
        let err = ServiceError::Validation(vec![
            "email should be unique".to_string(),
            "Passwords do not match".to_string(),
        ]);
        assert_eq!(err.status_code(), 400);

        match AppError::from(err) {
            AppError::Validation(messages) => assert_eq!(messages.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_identity_errors_map_through_app_error() {
        assert_eq!(ServiceError::from(IdentityError::UserAlreadyExists).status_code(), 409);
        assert_eq!(ServiceError::from(IdentityError::InvalidCredentials).status_code(), 400);

        let app = AppError::from(ServiceError::from(IdentityError::Client(403)));
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message().as_deref(), Some("Keycloak client error: 403"));
    }

    #[test]
    fn test_application_error_is_shown_verbatim() {
        let app = AppError::from(ServiceError::application("Post not found"));
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message().as_deref(), Some("Post not found"));
    }

    #[test]
    fn test_domain_error_status() {
        assert_eq!(
            ServiceError::from(DomainError::Duplicate("email".into())).status_code(),
            409
        );
        assert_eq!(
            ServiceError::from(DomainError::DatabaseError("down".into())).status_code(),
            500
        );
    }
}
