//! Middleware stack for the API server
//!
//! Request ids, per-request tracing spans, a 30 s timeout, CORS and a global
//! rate limit.

use std::sync::Arc;
use std::time::Duration;

use agora_common::{AppError, CorsConfig, RateLimitConfig};
use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests that run longer than this answer 503
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Milliseconds between replenished rate-limit permits
fn replenish_interval_ms(requests_per_second: u32) -> u64 {
    (1000 / u64::from(requests_per_second.max(1))).max(1)
}

/// Apply the full middleware stack
///
/// Layer order on an incoming request: rate limit, request id, trace,
/// timeout, CORS, handler.
pub fn apply_middleware(
    router: Router<AppState>,
    rate_limit: &RateLimitConfig,
    cors: &CorsConfig,
    is_production: bool,
) -> Result<Router<AppState>, AppError> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_interval_ms(rate_limit.requests_per_second))
        .burst_size(rate_limit.burst.max(1))
        .key_extractor(GlobalKeyExtractor)
        .finish()
        .ok_or_else(|| AppError::Config("Invalid rate limit configuration".to_string()))?;

    let router = router
        .layer(create_cors_layer(cors, is_production))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
        .layer(GovernorLayer {
            config: Arc::new(governor_conf),
        });

    Ok(router)
}

/// CORS: configured origins, or any origin in development when none are set
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)]);

    if !is_production && config.allowed_origins.is_empty() {
        tracing::warn!(
            "CORS: Allowing any origin (development mode). \
             Configure CORS_ALLOWED_ORIGINS for production."
        );
        return base_layer.allow_origin(Any);
    }

    if config.allowed_origins.is_empty() {
        tracing::warn!("CORS: No allowed origins configured in production mode");
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    tracing::info!(count = origins.len(), "CORS: Allowing configured origins");
    base_layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replenish_interval() {
        assert_eq!(replenish_interval_ms(10), 100);
        assert_eq!(replenish_interval_ms(0), 1000);
        assert_eq!(replenish_interval_ms(5000), 1);
    }
}
