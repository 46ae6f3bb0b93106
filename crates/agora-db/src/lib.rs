//! # agora-db
//!
//! Storage layer implementing the repository traits of `agora-core`.
//!
//! ## Overview
//!
//! Two interchangeable adapters are provided:
//!
//! - PostgreSQL via SQLx: connection pool, schema migrations, `FromRow`
//!   models, entity mappers and `Pg*Repository` implementations
//! - An in-memory store (`InMemory*Repository`) with the same semantics,
//!   used for local development and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agora_db::{create_pool, PgMemberRepository};
//! use agora_core::traits::MemberRepository;
//!
//! async fn example(config: &agora_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     let members = PgMemberRepository::new(pool);
//!     let total = members.count().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    InMemoryCommentRepository, InMemoryMemberRepository, InMemoryPostRepository, InMemoryStore,
};
pub use pool::{create_pool, ping, run_migrations, PgPool};
pub use repositories::{PgCommentRepository, PgMemberRepository, PgPostRepository};
