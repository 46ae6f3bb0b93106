//! Authentication handlers
//!
//! Endpoints for registration, login, token refresh and username checks.

use agora_service::dto::{
    AuthResponse, LoginRequest, MemberRequest, MessageResponse, RefreshTokenRequest,
    RefreshTokenResponse, UsernameAvailabilityResponse, UsernameQuery,
};
use agora_service::{AuthService, MemberService};
use axum::{
    extract::{Query, State},
    Json,
};

use crate::extractors::{JsonBody, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Register a new member
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MemberRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::new(state.service_context())
        .register(&request)
        .await?;
    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// Login with username or email
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .login(&request)
        .await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RefreshTokenRequest>,
) -> ApiResult<Json<RefreshTokenResponse>> {
    let response = AuthService::new(state.service_context())
        .refresh(&request.refresh_token)
        .await?;
    Ok(Json(response))
}

/// Whether a username is still free
///
/// GET /api/auth/check-username?username=
pub async fn check_username(
    State(state): State<AppState>,
    query: Result<Query<UsernameQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<UsernameAvailabilityResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let available = MemberService::new(state.service_context())
        .check_username_availability(&query.username)
        .await?;
    Ok(Json(UsernameAvailabilityResponse { available }))
}
