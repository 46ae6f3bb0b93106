//! In-memory implementation of MemberRepository

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use agora_core::entities::{Member, MemberIdentifier, NewMember};
use agora_core::error::DomainError;
use agora_core::traits::{MemberRepository, RepoResult};
use agora_core::value_objects::{Page, PageRequest};

use super::store::{Collections, InMemoryStore};

#[derive(Debug, Clone)]
pub struct InMemoryMemberRepository {
    store: InMemoryStore,
}

impl InMemoryMemberRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn matches_identifier(member: &Member, identifier: &MemberIdentifier) -> bool {
    match identifier {
        MemberIdentifier::MemberId(id) => member.member_id == *id,
        MemberIdentifier::Username(name) => member.username.eq_ignore_ascii_case(name),
    }
}

/// Same uniqueness rules as the unique indexes of the SQL schema
fn check_unique(data: &Collections, candidate: &Member) -> RepoResult<()> {
    for other in data
        .members
        .iter()
        .filter(|m| m.record_id != candidate.record_id)
    {
        if other.member_id == candidate.member_id {
            return Err(DomainError::Duplicate("member id".to_string()));
        }
        if other.username.eq_ignore_ascii_case(&candidate.username) {
            return Err(DomainError::Duplicate("username".to_string()));
        }
        if other.email.eq_ignore_ascii_case(&candidate.email) {
            return Err(DomainError::Duplicate("email".to_string()));
        }
        if other.phone_number == candidate.phone_number {
            return Err(DomainError::Duplicate("phone number".to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_member_id(&self, member_id: i64) -> RepoResult<Option<Member>> {
        Ok(self.store.inner.read().member(member_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        let data = self.store.inner.read();
        Ok(data
            .members
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> RepoResult<Option<Member>> {
        let data = self.store.inner.read();
        Ok(data
            .members
            .iter()
            .find(|m| m.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        let data = self.store.inner.read();
        Ok(data
            .members
            .iter()
            .find(|m| m.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_email_or_username(&self, identifier: &str) -> RepoResult<Option<Member>> {
        let data = self.store.inner.read();
        Ok(data
            .members
            .iter()
            .find(|m| {
                m.email.eq_ignore_ascii_case(identifier)
                    || m.username.eq_ignore_ascii_case(identifier)
            })
            .cloned())
    }

    async fn find_conflicting(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
        exclude: &MemberIdentifier,
    ) -> RepoResult<Option<Member>> {
        let data = self.store.inner.read();
        Ok(data
            .members
            .iter()
            .filter(|m| !matches_identifier(m, exclude))
            .find(|m| {
                email.is_some_and(|e| m.email.eq_ignore_ascii_case(e))
                    || phone_number.is_some_and(|p| m.phone_number == p)
            })
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<Member>> {
        let members = self.list_all().await?;
        Ok(Page::from_slice(&members, page))
    }

    async fn list_all(&self) -> RepoResult<Vec<Member>> {
        let mut members = self.store.inner.read().members.clone();
        members.sort_by_key(|m| m.member_id);
        Ok(members)
    }

    #[instrument(skip(self), fields(username = %member.username))]
    async fn create_with_next_id(&self, member: NewMember) -> RepoResult<Member> {
        // The write guard is the serialization point for id assignment
        let mut data = self.store.inner.write();
        let next_id = data.members.iter().map(|m| m.member_id).max().unwrap_or(0) + 1;
        let member = member.into_member(Uuid::new_v4().to_string(), next_id);

        check_unique(&data, &member)?;
        data.members.push(member.clone());
        Ok(member)
    }

    async fn update(&self, member: &Member) -> RepoResult<Member> {
        let mut data = self.store.inner.write();
        check_unique(&data, member)?;

        let slot = data
            .members
            .iter_mut()
            .find(|m| m.record_id == member.record_id)
            .ok_or_else(|| DomainError::MemberNotFound(member.member_id.to_string()))?;

        *slot = Member {
            updated_at: Utc::now(),
            ..member.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_by_member_id(&self, member_id: i64) -> RepoResult<bool> {
        let mut data = self.store.inner.write();
        let before = data.members.len();
        data.members.retain(|m| m.member_id != member_id);
        Ok(data.members.len() != before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.store.inner.read().members.len() as i64)
    }

    async fn delete_all(&self) -> RepoResult<()> {
        let mut data = self.store.inner.write();
        data.members.clear();
        data.posts.clear();
        data.comments.clear();
        Ok(())
    }
}
