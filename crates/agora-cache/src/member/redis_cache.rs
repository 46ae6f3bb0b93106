//! Redis-backed member read cache
//!
//! Members are stored as JSON under two keys:
//! - `agora:member:id:{member_id}`
//! - `agora:member:username:{lowercase username}`

use async_trait::async_trait;
use tracing::{debug, warn};

use agora_core::entities::Member;
use agora_core::traits::MemberCache;

use crate::pool::RedisPool;

/// Key prefix shared by every member entry
pub const MEMBER_KEY_PREFIX: &str = "agora:member:";

fn id_key(member_id: i64) -> String {
    format!("{MEMBER_KEY_PREFIX}id:{member_id}")
}

fn username_key(username: &str) -> String {
    format!("{MEMBER_KEY_PREFIX}username:{}", username.to_lowercase())
}

/// Member cache over a Redis pool; errors degrade to misses
#[derive(Debug, Clone)]
pub struct RedisMemberCache {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisMemberCache {
    pub fn new(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    async fn read(&self, key: &str) -> Option<Member> {
        match self.pool.get_json::<Member>(key).await {
            Ok(hit) => {
                debug!(key, hit = hit.is_some(), "Member cache lookup");
                hit
            }
            Err(e) => {
                warn!(key, error = %e, "Member cache read failed");
                None
            }
        }
    }
}

#[async_trait]
impl MemberCache for RedisMemberCache {
    async fn get_by_member_id(&self, member_id: i64) -> Option<Member> {
        self.read(&id_key(member_id)).await
    }

    async fn get_by_username(&self, username: &str) -> Option<Member> {
        self.read(&username_key(username)).await
    }

    async fn put(&self, member: &Member) {
        for key in [id_key(member.member_id), username_key(&member.username)] {
            if let Err(e) = self.pool.put_json(&key, member, self.ttl_seconds).await {
                warn!(key = %key, error = %e, "Member cache write failed");
            }
        }
    }

    async fn evict(&self, member_id: i64, username: &str) {
        let keys = [id_key(member_id), username_key(username)];
        if let Err(e) = self.pool.remove(&keys).await {
            warn!(member_id, error = %e, "Member cache eviction failed");
        }
    }

    async fn clear(&self) {
        match self.pool.remove_prefix(MEMBER_KEY_PREFIX).await {
            Ok(removed) => debug!(removed, "Member cache cleared"),
            Err(e) => warn!(error = %e, "Member cache clear failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(id_key(42), "agora:member:id:42");
        assert_eq!(username_key("Jane.Doe"), "agora:member:username:jane.doe");
    }
}
