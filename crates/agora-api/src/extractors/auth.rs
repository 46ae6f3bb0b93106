//! Authentication extractors
//!
//! Verify the bearer token from the Authorization header and expose its
//! principal. [`MemberUser`] and [`AdminUser`] additionally require a role.

use agora_common::{AccessClaims, AppError};
use agora_core::entities::Role;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a verified access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: AccessClaims,
}

impl AuthUser {
    pub fn new(claims: AccessClaims) -> Self {
        Self { claims }
    }

    /// Principal name (`preferred_username`)
    pub fn username(&self) -> &str {
        self.claims.username()
    }

    pub fn roles(&self) -> Vec<Role> {
        self.claims.roles()
    }

    fn require_any(self, allowed: &[Role]) -> Result<Self, ApiError> {
        if allowed.iter().any(|role| self.claims.has_role(*role)) {
            Ok(self)
        } else {
            tracing::warn!(username = %self.username(), "Caller lacks the required role");
            Err(ApiError::App(AppError::InsufficientPermissions))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);

        // Signature, expiry and issuer are checked before any claim is read
        let claims = app_state
            .token_verifier()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        Ok(AuthUser::new(claims))
    }
}

/// Caller holding the `user` or `admin` role
#[derive(Debug, Clone)]
pub struct MemberUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for MemberUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require_any(&[Role::User, Role::Admin]).map(Self)
    }
}

/// Caller holding the `admin` role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require_any(&[Role::Admin]).map(Self)
    }
}
