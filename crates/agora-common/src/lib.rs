//! # agora-common
//!
//! Shared utilities including configuration, error handling, token verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{AccessClaims, RealmAccess, TokenSigner, TokenVerifier};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    IdentityProviderConfig, IdentityProviderMode, RateLimitConfig, RedisConfig, SeedConfig,
    ServerConfig, StorageBackend, TokenVerificationConfig,
};
pub use error::{
    AppError, AppResult, ErrorResponse, ACCESS_DENIED_MESSAGE, GENERIC_ERROR_MESSAGE,
    INVALID_TOKEN_MESSAGE,
};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, TracingConfig, TracingError,
};
