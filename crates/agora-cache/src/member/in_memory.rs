//! In-process member read cache backed by `DashMap`

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use agora_core::entities::Member;
use agora_core::traits::MemberCache;

/// In-process cache; clones share the same maps
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberCache {
    by_id: Arc<DashMap<i64, Member>>,
    by_username: Arc<DashMap<String, Member>>,
}

impl InMemoryMemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members cached by id
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[async_trait]
impl MemberCache for InMemoryMemberCache {
    async fn get_by_member_id(&self, member_id: i64) -> Option<Member> {
        self.by_id.get(&member_id).map(|m| m.value().clone())
    }

    async fn get_by_username(&self, username: &str) -> Option<Member> {
        self.by_username
            .get(&username.to_lowercase())
            .map(|m| m.value().clone())
    }

    async fn put(&self, member: &Member) {
        self.by_id.insert(member.member_id, member.clone());
        self.by_username
            .insert(member.username.to_lowercase(), member.clone());
    }

    async fn evict(&self, member_id: i64, username: &str) {
        self.by_id.remove(&member_id);
        self.by_username.remove(&username.to_lowercase());
    }

    async fn clear(&self) {
        self.by_id.clear();
        self.by_username.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::entities::{NewMember, Role};

    fn member() -> Member {
        NewMember {
            username: "Jane.Doe".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            role: Role::User,
        }
        .into_member("rec-1".to_string(), 3)
    }

    #[tokio::test]
    async fn test_put_and_get_both_keys() {
        let cache = InMemoryMemberCache::new();
        cache.put(&member()).await;

        assert_eq!(cache.get_by_member_id(3).await.map(|m| m.member_id), Some(3));
        assert!(cache.get_by_username("jane.doe").await.is_some());
        assert!(cache.get_by_username("JANE.DOE").await.is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_evict_removes_both_keys() {
        let cache = InMemoryMemberCache::new();
        cache.put(&member()).await;
        cache.evict(3, "Jane.Doe").await;

        assert!(cache.get_by_member_id(3).await.is_none());
        assert!(cache.get_by_username("jane.doe").await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InMemoryMemberCache::new();
        cache.put(&member()).await;
        cache.clear().await;
        assert!(cache.is_empty());
    }
}
