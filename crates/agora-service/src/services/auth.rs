//! Authentication service
//!
//! Registration writes to the identity provider first and the member store
//! second. Login and refresh are token grants against the identity provider;
//! the platform never stores passwords itself.

use agora_core::entities::Member;
use agora_core::events::{DualWriteGap, DualWriteOperation};
use agora_core::traits::IdentityUser;
use agora_core::IdentityError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, MemberRequest, RefreshTokenResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::{requested_role, MemberService};
use super::uniqueness::UniquenessValidator;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new member
    ///
    /// 1. Username, email and phone number must be unused
    /// 2. The requested role (default `user`) must be known
    /// 3. Create the identity provider user and bind the realm role
    /// 4. Store the local member
    ///
    /// A failure in step 4 leaves the identity provider user in place and is
    /// reported to the reconciler.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &MemberRequest) -> ServiceResult<Member> {
        UniquenessValidator::new(self.ctx)
            .check_member_request(request)
            .await?;

        let role = requested_role(request)?;
        let idp = self.ctx.identity_provider();

        let token = idp.admin_token().await?;
        let user = IdentityUser {
            username: request.username.clone(),
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
            email: Some(request.email.clone()),
            phone_number: Some(request.phone_number.clone()),
            password: Some(request.password.clone()),
        };
        idp.create_user(&token, &user).await?;

        let user_id = idp
            .find_user_id(&token, &request.username)
            .await?
            .ok_or(IdentityError::UserNotFound)?;
        let realm_role = idp.find_role(&token, role.as_str()).await?;
        idp.assign_role(&token, &user_id, &realm_role).await?;

        match MemberService::new(self.ctx).create(request, role).await {
            Ok(member) => {
                info!(member_id = member.member_id, role = role.as_str(), "Member registered");
                Ok(member)
            }
            Err(e) => {
                self.ctx
                    .reconciler()
                    .record_gap(DualWriteGap::new(
                        DualWriteOperation::Registration,
                        &request.username,
                        e.to_string(),
                    ))
                    .await;
                Err(e)
            }
        }
    }

    /// Log in with a username or email
    #[instrument(skip(self, request), fields(identifier = %request.user_identifier))]
    pub async fn login(&self, request: &LoginRequest) -> ServiceResult<AuthResponse> {
        let tokens = self
            .ctx
            .identity_provider()
            .password_grant(&request.user_identifier, &request.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Login rejected"))?;

        let member_id = MemberService::new(self.ctx)
            .find_member_id_by_email_or_username(&request.user_identifier)
            .await?;

        let claims = self.ctx.token_verifier().verify(&tokens.access_token)?;

        info!(member_id, "Member logged in");

        Ok(AuthResponse {
            member_id,
            role: claims.authorities(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<RefreshTokenResponse> {
        let tokens = self
            .ctx
            .identity_provider()
            .refresh_grant(refresh_token)
            .await?;

        Ok(RefreshTokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        })
    }
}
