//! Own-profile service
//!
//! The caller is always identified by the username of their verified token.

use agora_core::entities::{Member, MemberIdentifier};
use agora_core::events::{DualWriteGap, DualWriteOperation};
use agora_core::traits::IdentityUser;
use agora_core::IdentityError;
use tracing::{info, instrument};

use crate::dto::UpdateMemberRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::member::MemberService;

/// Own-profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's own member record
    #[instrument(skip(self))]
    pub async fn get(&self, username: &str) -> ServiceResult<Member> {
        MemberService::new(self.ctx).find_by_username(username).await
    }

    /// Update the caller's profile in the identity provider, then locally.
    ///
    /// The identity provider receives the merged profile plus the new
    /// password when a non-blank one is given. A failed local write after a
    /// successful provider update is reported to the reconciler.
    #[instrument(skip(self, request))]
    pub async fn update(&self, username: &str, request: &UpdateMemberRequest) -> ServiceResult<Member> {
        let members = MemberService::new(self.ctx);
        let owner = MemberIdentifier::Username(username.to_string());
        let patch = request.patch();

        members
            .check_contact_conflict(&owner, patch.email.as_deref(), patch.phone_number.as_deref())
            .await?;

        let mut merged = self
            .ctx
            .member_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(ServiceError::member_not_found)?;
        merged.apply_patch(&patch);

        self.push_to_identity_provider(&merged, request.new_password())
            .await?;

        match members.update(&owner, &patch).await {
            Ok(member) => {
                info!(member_id = member.member_id, "Profile updated");
                Ok(member)
            }
            Err(e) => {
                self.ctx
                    .reconciler()
                    .record_gap(DualWriteGap::new(
                        DualWriteOperation::ProfileUpdate,
                        username,
                        e.to_string(),
                    ))
                    .await;
                Err(e)
            }
        }
    }

    async fn push_to_identity_provider(
        &self,
        member: &Member,
        password: Option<&str>,
    ) -> ServiceResult<()> {
        let idp = self.ctx.identity_provider();
        let token = idp.admin_token().await?;

        let user_id = idp
            .find_user_id(&token, &member.username)
            .await?
            .ok_or_else(|| ServiceError::application(IdentityError::UserNotFound.to_string()))?;

        let user = IdentityUser {
            username: member.username.clone(),
            first_name: Some(member.first_name.clone()),
            last_name: Some(member.last_name.clone()),
            email: Some(member.email.clone()),
            phone_number: Some(member.phone_number.clone()),
            password: password.map(str::to_string),
        };

        idp.update_user(&token, &user_id, &user)
            .await
            .map_err(|e| match e {
                IdentityError::UserNotFound => ServiceError::application(e.to_string()),
                other => ServiceError::Identity(other),
            })
    }
}
