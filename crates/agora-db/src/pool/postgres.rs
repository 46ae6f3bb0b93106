//! PostgreSQL connection pool management

use agora_common::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Maximum time to wait for a connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum idle time before a connection is closed
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);
/// Maximum lifetime of a connection
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Apply the schema migrations shipped in this crate's `migrations/` directory
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    Migrator::new(dir).await?.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Cheap liveness probe used by the readiness endpoint
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}
