//! Uniqueness checks run while validating member requests
//!
//! Read-only lookups against the member store; no transaction is involved.

use tracing::instrument;

use crate::dto::MemberRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const EMAIL_OR_PHONE_TAKEN: &str =
    "Email and/or Phone number already registered, please use another";
pub const USERNAME_TAKEN: &str = "Username already registered, please use another";

/// Uniqueness validator
pub struct UniquenessValidator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UniquenessValidator<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Whether any member has this value as email (case-insensitive) or
    /// phone number (exact)
    #[instrument(skip(self))]
    pub async fn exists_as_email_or_phone(&self, value: &str) -> ServiceResult<bool> {
        let repo = self.ctx.member_repo();
        if repo.find_by_email(value).await?.is_some() {
            return Ok(true);
        }
        Ok(repo.find_by_phone_number(value).await?.is_some())
    }

    /// Whether the username is taken (case-insensitive)
    #[instrument(skip(self))]
    pub async fn exists_as_username(&self, value: &str) -> ServiceResult<bool> {
        Ok(self.ctx.member_repo().find_by_username(value).await?.is_some())
    }

    /// Run the per-field uniqueness rules of a member request; every
    /// failing field contributes its message
    pub async fn check_member_request(&self, request: &MemberRequest) -> ServiceResult<()> {
        let mut errors = Vec::new();

        if self.exists_as_username(&request.username).await? {
            errors.push(USERNAME_TAKEN.to_string());
        }
        if self.exists_as_email_or_phone(&request.email).await? {
            errors.push(EMAIL_OR_PHONE_TAKEN.to_string());
        }
        if self.exists_as_email_or_phone(&request.phone_number).await? {
            errors.push(EMAIL_OR_PHONE_TAKEN.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}
