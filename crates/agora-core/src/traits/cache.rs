//! Member read cache port
//!
//! The cache is advisory. Implementations swallow (and log) their own
//! failures so a broken cache degrades to a miss, never to an error.

use async_trait::async_trait;

use crate::entities::Member;

#[async_trait]
pub trait MemberCache: Send + Sync {
    async fn get_by_member_id(&self, member_id: i64) -> Option<Member>;

    /// Lookup by username, case-insensitive
    async fn get_by_username(&self, username: &str) -> Option<Member>;

    /// Store under both keys
    async fn put(&self, member: &Member);

    /// Drop both keys for a member
    async fn evict(&self, member_id: i64, username: &str);

    /// Drop everything
    async fn clear(&self);
}
