//! Member directory service
//!
//! Lookups, creation with store-assigned member ids, partial updates with a
//! cross-member email/phone conflict check, deletion and role changes. Reads
//! by id and username go through the member cache when one is configured;
//! every write evicts the member's cache entries.

use agora_core::entities::{Member, MemberIdentifier, MemberPatch, Role};
use agora_core::value_objects::{Page, PageRequest};
use tracing::{debug, info, instrument};

use crate::dto::MemberRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const EMAIL_NOT_UNIQUE: &str = "email should be unique";
pub const PHONE_NOT_UNIQUE: &str = "phone number should be unique";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const CONTACT_TAKEN: &str = "email or phone number already tagged to another user";

/// Role named by a member request; `user` when none is given
pub fn requested_role(request: &MemberRequest) -> ServiceResult<Role> {
    match request.user_role.as_deref().map(str::trim) {
        None | Some("") => Ok(Role::User),
        Some(name) => name
            .parse::<Role>()
            .map_err(|_| ServiceError::validation(format!("Unknown role: {name}"))),
    }
}

/// Member directory service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // === Lookups ===

    /// Find a member by business id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, member_id: i64) -> ServiceResult<Member> {
        if let Some(cache) = self.ctx.member_cache() {
            if let Some(member) = cache.get_by_member_id(member_id).await {
                return Ok(member);
            }
        }

        let member = self
            .ctx
            .member_repo()
            .find_by_member_id(member_id)
            .await?
            .ok_or_else(ServiceError::member_not_found)?;
        self.cache_put(&member).await;
        Ok(member)
    }

    /// Find a member by email (case-insensitive)
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(ServiceError::member_not_found)
    }

    /// Find a member by phone number (exact)
    #[instrument(skip(self))]
    pub async fn find_by_phone(&self, phone_number: &str) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_phone_number(phone_number)
            .await?
            .ok_or_else(ServiceError::member_not_found)
    }

    /// Find a member by username (case-insensitive)
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Member> {
        if let Some(cache) = self.ctx.member_cache() {
            if let Some(member) = cache.get_by_username(username).await {
                return Ok(member);
            }
        }

        let member = self
            .ctx
            .member_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(ServiceError::member_not_found)?;
        self.cache_put(&member).await;
        Ok(member)
    }

    /// Resolve the member id of a login identifier (email or username)
    #[instrument(skip(self))]
    pub async fn find_member_id_by_email_or_username(&self, identifier: &str) -> ServiceResult<i64> {
        self.ctx
            .member_repo()
            .find_by_email_or_username(identifier)
            .await?
            .map(|m| m.member_id)
            .ok_or_else(ServiceError::member_not_found)
    }

    /// Whether no member holds this username yet
    #[instrument(skip(self))]
    pub async fn check_username_availability(&self, username: &str) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .member_repo()
            .find_by_username(username)
            .await?
            .is_none())
    }

    /// One page of members, in member id order
    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Member>> {
        Ok(self.ctx.member_repo().list(page).await?)
    }

    /// Every member, in member id order
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<Member>> {
        Ok(self.ctx.member_repo().list_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> ServiceResult<i64> {
        Ok(self.ctx.member_repo().count().await?)
    }

    // === Writes ===

    /// Create a member from a request.
    ///
    /// All failed checks are reported together: duplicate email, duplicate
    /// phone number and mismatched passwords. The member id is assigned by
    /// the store as the current maximum plus one.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create(&self, request: &MemberRequest, role: Role) -> ServiceResult<Member> {
        let repo = self.ctx.member_repo();
        let mut errors = Vec::new();

        if repo.find_by_email(&request.email).await?.is_some() {
            errors.push(EMAIL_NOT_UNIQUE.to_string());
        }
        if repo.find_by_phone_number(&request.phone_number).await?.is_some() {
            errors.push(PHONE_NOT_UNIQUE.to_string());
        }
        if request.password != request.repeat_password {
            errors.push(PASSWORDS_DO_NOT_MATCH.to_string());
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let member = repo.create_with_next_id(request.to_new_member(role)).await?;
        info!(member_id = member.member_id, "Member created");
        Ok(member)
    }

    /// Fail if another member already owns the email or phone number.
    ///
    /// `owner` is excluded from the search, so a member may keep (or
    /// re-submit) their own contact details.
    pub async fn check_contact_conflict(
        &self,
        owner: &MemberIdentifier,
        email: Option<&str>,
        phone_number: Option<&str>,
    ) -> ServiceResult<()> {
        let conflict = self
            .ctx
            .member_repo()
            .find_conflicting(email, phone_number, owner)
            .await?;

        match conflict {
            Some(other) => {
                debug!(conflicting_member = other.member_id, "Contact details already in use");
                Err(ServiceError::validation(CONTACT_TAKEN))
            }
            None => Ok(()),
        }
    }

    /// Apply the present fields of `patch` to the identified member
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        identifier: &MemberIdentifier,
        patch: &MemberPatch,
    ) -> ServiceResult<Member> {
        self.check_contact_conflict(
            identifier,
            patch.email.as_deref(),
            patch.phone_number.as_deref(),
        )
        .await?;

        let mut member = self.load(identifier).await?;
        member.apply_patch(patch);

        let updated = self.ctx.member_repo().update(&member).await?;
        self.cache_evict(&updated).await;
        info!(member_id = updated.member_id, "Member updated");
        Ok(updated)
    }

    /// Delete the member record only; their posts and comments stay stored.
    /// Deleting a missing member is a no-op.
    #[instrument(skip(self))]
    pub async fn delete(&self, member_id: i64) -> ServiceResult<()> {
        let existing = self.ctx.member_repo().find_by_member_id(member_id).await?;
        let removed = self.ctx.member_repo().delete_by_member_id(member_id).await?;

        if let Some(member) = existing {
            self.cache_evict(&member).await;
        }
        if removed {
            info!(member_id, "Member deleted");
        }
        Ok(())
    }

    /// Give the member the admin role and persist it
    #[instrument(skip(self, member), fields(member_id = member.member_id))]
    pub async fn assign_admin_role(&self, mut member: Member) -> ServiceResult<Member> {
        member.promote_to_admin();
        let updated = self.ctx.member_repo().update(&member).await?;
        self.cache_evict(&updated).await;
        Ok(updated)
    }

    /// Load the target of an update without consulting the cache
    async fn load(&self, identifier: &MemberIdentifier) -> ServiceResult<Member> {
        let repo = self.ctx.member_repo();
        let found = match identifier {
            MemberIdentifier::MemberId(id) => repo.find_by_member_id(*id).await?,
            MemberIdentifier::Username(name) => repo.find_by_username(name).await?,
        };
        found.ok_or_else(ServiceError::member_not_found)
    }

    async fn cache_put(&self, member: &Member) {
        if let Some(cache) = self.ctx.member_cache() {
            cache.put(member).await;
        }
    }

    async fn cache_evict(&self, member: &Member) {
        if let Some(cache) = self.ctx.member_cache() {
            cache.evict(member.member_id, &member.username).await;
        }
    }
}
