//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and the handles probed by readiness.

use std::sync::Arc;

use agora_cache::RedisPool;
use agora_common::{AppConfig, TokenVerifier};
use agora_db::PgPool;
use agora_service::ServiceContext;

/// Backing-service handles checked by the readiness probe
#[derive(Clone, Default)]
pub struct Probes {
    /// Present when the Postgres store is in use
    pub database: Option<PgPool>,
    /// Present when the Redis member cache is enabled
    pub redis: Option<RedisPool>,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    probes: Probes,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig, probes: Probes) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            probes,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn probes(&self) -> &Probes {
        &self.probes
    }

    /// Get the bearer token verifier from the service context
    pub fn token_verifier(&self) -> &TokenVerifier {
        self.service_context.token_verifier()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("database", &self.probes.database.is_some())
            .field("redis", &self.probes.redis.is_some())
            .finish()
    }
}
