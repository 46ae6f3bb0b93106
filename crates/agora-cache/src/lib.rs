//! # agora-cache
//!
//! Read-through cache for member lookups.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Member Cache**: `MemberCache` adapters keyed by member id and username,
//!   over Redis or an in-process `DashMap`
//!
//! ## Example
//!
//! ```ignore
//! use agora_cache::{RedisMemberCache, RedisPool};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let cache = RedisMemberCache::new(pool, 600);
//! cache.put(&member).await;
//! ```

pub mod member;
pub mod pool;

pub use member::{InMemoryMemberCache, RedisMemberCache, MEMBER_KEY_PREFIX};
pub use pool::{RedisPool, RedisPoolError, RedisResult};
