//! Member read cache adapters

mod in_memory;
mod redis_cache;

pub use in_memory::InMemoryMemberCache;
pub use redis_cache::{RedisMemberCache, MEMBER_KEY_PREFIX};
