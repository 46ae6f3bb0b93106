//! Response types and error handling for API endpoints
//!
//! Every failure is rendered as an [`ErrorResponse`] built for that response
//! alone. Causes the caller may not see are logged in full and replaced by
//! the generic message.

use agora_common::{AppError, ErrorResponse};
use agora_service::dto::validation_messages;
use agora_service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Collapse into the application error that decides status and message
    pub fn into_app_error(self) -> AppError {
        match self {
            Self::App(e) => e,
            Self::Service(e) => AppError::from(e),
            Self::Validation(errors) => AppError::Validation(validation_messages(&errors)),
            Self::InvalidPath(msg) | Self::InvalidQuery(msg) | Self::InvalidBody(msg) => {
                AppError::InvalidInput(msg)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.into_app_error();
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_masked() {
            error!(error = ?err, "Unhandled error");
        } else if status.is_server_error() {
            warn!(error = %err, "Request failed");
        }

        (status, Json(ErrorResponse::from(&err))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_common::{ACCESS_DENIED_MESSAGE, GENERIC_ERROR_MESSAGE};
    use agora_core::DomainError;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_list_is_returned_verbatim() {
        let err = ApiError::from(ServiceError::Validation(vec![
            "email should be unique".to_string(),
            "Passwords do not match".to_string(),
        ]));
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], 400);
        assert_eq!(json["errors"][1], "Passwords do not match");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_unclassified_errors_are_masked() {
        let err = ApiError::from(AppError::from(DomainError::DatabaseError(
            "connection refused".to_string(),
        )));
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_auth_is_access_denied() {
        let (status, json) = body_of(ApiError::App(AppError::MissingAuth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], ACCESS_DENIED_MESSAGE);
    }

    #[test]
    fn test_bad_input_is_client_error() {
        let err = ApiError::invalid_path("Invalid member id").into_app_error();
        assert_eq!(err.status_code(), 400);
    }
}
