//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, ping, run_migrations};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
