//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
    pub identity: IdentityProviderConfig,
    pub token: TokenVerificationConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub seed: SeedConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Parse an `APP_ENV` value; unknown labels yield `None`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which document store adapter backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("STORAGE_BACKEND", other.to_string())),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default)]
    pub run_migrations: bool,
}

/// Redis configuration (member read cache)
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// Which identity provider adapter is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProviderMode {
    #[default]
    Keycloak,
    Memory,
}

impl FromStr for IdentityProviderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keycloak" => Ok(Self::Keycloak),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("IDP_MODE", other.to_string())),
        }
    }
}

/// Identity provider (Keycloak) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProviderConfig {
    pub mode: IdentityProviderMode,
    /// Server root, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Realm that holds the platform users
    pub realm: String,
    /// Confidential client used for password and refresh grants
    pub client_id: String,
    pub client_secret: String,
    /// Realm and client used to obtain admin tokens
    #[serde(default = "default_admin_realm")]
    pub admin_realm: String,
    #[serde(default = "default_admin_client_id")]
    pub admin_client_id: String,
    pub admin_username: String,
    pub admin_password: String,
    #[serde(default = "default_idp_timeout")]
    pub timeout_secs: u64,
}

impl IdentityProviderConfig {
    /// Issuer URL of the platform realm
    #[must_use]
    pub fn issuer_url(&self) -> String {
        format!("{}/realms/{}", self.base_url.trim_end_matches('/'), self.realm)
    }
}

/// Bearer token verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct TokenVerificationConfig {
    /// Expected `iss` claim; not checked when absent
    pub issuer: Option<String>,
    /// Expected `aud` claim; not checked when absent
    pub audience: Option<String>,
    /// RS256 public key of the realm (PEM)
    pub public_key_pem: Option<String>,
    /// HS256 shared secret
    pub secret: Option<String>,
    /// Lifetimes used when this service signs tokens itself (in-memory provider)
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Start-up data seeding
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct SeedConfig {
    /// Insert the demo members, posts and comments
    #[serde(default)]
    pub enabled: bool,
    /// Wipe members, posts and comments before seeding
    #[serde(default)]
    pub refresh_database: bool,
}

// Default value functions
fn default_app_name() -> String {
    "agora".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_cache_ttl() -> u64 {
    600
}

fn default_keycloak_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_realm() -> String {
    "kitchensink".to_string()
}

fn default_admin_realm() -> String {
    "master".to_string()
}

fn default_admin_client_id() -> String {
    "admin-cli".to_string()
}

fn default_idp_timeout() -> u64 {
    10
}

fn default_access_token_expiry() -> i64 {
    300 // 5 minutes
}

fn default_refresh_token_expiry() -> i64 {
    1800 // 30 minutes
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Read an optional variable, treating empty strings as unset
fn var_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read a variable and parse it, falling back to a default when unset
fn var_parsed<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match var_opt(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

fn var_flag(name: &'static str) -> Result<bool, ConfigError> {
    var_parsed(name, || false)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage: StorageBackend = var_parsed("STORAGE_BACKEND", StorageBackend::default)?;
        let database = match var_opt("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: var_parsed("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: var_parsed("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: var_flag("DATABASE_RUN_MIGRATIONS")?,
            }),
            None if storage == StorageBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"))
            }
            None => None,
        };

        let redis = match var_opt("REDIS_URL") {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: var_parsed("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
                ttl_seconds: var_parsed("CACHE_TTL_SECONDS", default_cache_ttl)?,
            }),
            None => None,
        };

        let identity = Self::identity_from_env()?;
        let token = Self::token_from_env(&identity)?;

        Ok(Self {
            app: AppSettings {
                name: var_opt("APP_NAME").unwrap_or_else(default_app_name),
                env: var_opt("APP_ENV")
                    .and_then(|s| Environment::from_label(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: var_opt("API_HOST").unwrap_or_else(default_host),
                port: var_parsed("API_PORT", default_port)?,
            },
            storage,
            database,
            redis,
            identity,
            token,
            rate_limit: RateLimitConfig {
                requests_per_second: var_parsed(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: var_parsed("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: var_opt("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            seed: SeedConfig {
                enabled: var_flag("APP_SEED_DATA")?,
                refresh_database: var_flag("APP_REFRESH_DATABASE")?,
            },
        })
    }

    fn identity_from_env() -> Result<IdentityProviderConfig, ConfigError> {
        let mode: IdentityProviderMode = var_parsed("IDP_MODE", IdentityProviderMode::default)?;
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match (var_opt(name), mode) {
                (Some(value), _) => Ok(value),
                (None, IdentityProviderMode::Memory) => Ok(String::new()),
                (None, IdentityProviderMode::Keycloak) => Err(ConfigError::MissingVar(name)),
            }
        };

        Ok(IdentityProviderConfig {
            mode,
            base_url: var_opt("KEYCLOAK_BASE_URL").unwrap_or_else(default_keycloak_url),
            realm: var_opt("KEYCLOAK_REALM").unwrap_or_else(default_realm),
            client_id: required("KEYCLOAK_CLIENT_ID")?,
            client_secret: required("KEYCLOAK_CLIENT_SECRET")?,
            admin_realm: var_opt("KEYCLOAK_ADMIN_REALM").unwrap_or_else(default_admin_realm),
            admin_client_id: var_opt("KEYCLOAK_ADMIN_CLIENT_ID")
                .unwrap_or_else(default_admin_client_id),
            admin_username: required("KEYCLOAK_ADMIN_USERNAME")?,
            admin_password: required("KEYCLOAK_ADMIN_PASSWORD")?,
            timeout_secs: var_parsed("KEYCLOAK_TIMEOUT_SECS", default_idp_timeout)?,
        })
    }

    fn token_from_env(
        identity: &IdentityProviderConfig,
    ) -> Result<TokenVerificationConfig, ConfigError> {
        let public_key_pem = var_opt("JWT_PUBLIC_KEY_PEM");
        let secret = var_opt("JWT_SECRET");

        match identity.mode {
            IdentityProviderMode::Memory if secret.is_none() => {
                return Err(ConfigError::MissingVar("JWT_SECRET"));
            }
            IdentityProviderMode::Keycloak if public_key_pem.is_none() && secret.is_none() => {
                return Err(ConfigError::MissingVar("JWT_PUBLIC_KEY_PEM"));
            }
            _ => {}
        }

        let issuer = var_opt("JWT_ISSUER").or_else(|| match identity.mode {
            IdentityProviderMode::Keycloak => Some(identity.issuer_url()),
            IdentityProviderMode::Memory => None,
        });

        Ok(TokenVerificationConfig {
            issuer,
            audience: var_opt("JWT_AUDIENCE"),
            public_key_pem,
            secret,
            access_token_expiry: var_parsed("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
            refresh_token_expiry: var_parsed(
                "JWT_REFRESH_TOKEN_EXPIRY",
                default_refresh_token_expiry,
            )?,
        })
    }

    /// Self-contained configuration: in-memory store and identity provider
    ///
    /// Used by tests and local demos; nothing external has to be running.
    #[must_use]
    pub fn in_memory(secret: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port: 0,
            },
            storage: StorageBackend::Memory,
            database: None,
            redis: None,
            identity: IdentityProviderConfig {
                mode: IdentityProviderMode::Memory,
                base_url: default_keycloak_url(),
                realm: default_realm(),
                client_id: String::new(),
                client_secret: String::new(),
                admin_realm: default_admin_realm(),
                admin_client_id: default_admin_client_id(),
                admin_username: String::new(),
                admin_password: String::new(),
                timeout_secs: default_idp_timeout(),
            },
            token: TokenVerificationConfig {
                issuer: None,
                audience: None,
                public_key_pem: None,
                secret: Some(secret.into()),
                access_token_expiry: default_access_token_expiry(),
                refresh_token_expiry: default_refresh_token_expiry(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: 1000,
                burst: 1000,
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            seed: SeedConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
