//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use agora_service::dto::{HealthResponse, PrincipalResponse, ReadinessResponse};
use axum::{extract::State, http::StatusCode, Json};

use crate::extractors::AdminUser;
use crate::state::AppState;

/// Plain liveness message
///
/// GET /
pub async fn alive() -> &'static str {
    "I'm alive!"
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let probes = state.probes();

    // The in-memory store is always ready
    let store_healthy = match &probes.database {
        Some(pool) => agora_db::ping(pool).await,
        None => true,
    };

    let cache_healthy = match &probes.redis {
        Some(redis) => Some(redis.health_check().await.is_ok()),
        None => None,
    };

    let response = ReadinessResponse::ready(store_healthy, cache_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// The caller's verified token principal
///
/// GET /user
pub async fn current_principal(AdminUser(user): AdminUser) -> Json<PrincipalResponse> {
    Json(PrincipalResponse {
        username: user.username().to_string(),
        roles: user.roles().iter().map(|r| r.as_str().to_string()).collect(),
    })
}
