//! Identity provider port
//!
//! The provider is the system of record for credentials, tokens and realm
//! roles. Every admin operation takes a service token obtained from
//! [`IdentityProvider::admin_token`] so callers control how often it is fetched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Result type for identity provider operations
pub type IdentityResult<T> = Result<T, IdentityError>;

/// User record pushed to the provider on registration and profile update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityUser {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Only sent when set; updates without a password keep the current one
    pub password: Option<String>,
}

/// A realm role as the provider represents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRepresentation {
    pub id: String,
    pub name: String,
}

/// Token pair returned by password and refresh grants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<String>,
    pub token_type: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Obtain a service-to-service admin token
    async fn admin_token(&self) -> IdentityResult<String>;

    /// Create an enabled user with a non-temporary password credential
    async fn create_user(&self, admin_token: &str, user: &IdentityUser) -> IdentityResult<()>;

    /// Resolve a username to the provider-side user id
    async fn find_user_id(&self, admin_token: &str, username: &str)
        -> IdentityResult<Option<String>>;

    /// Look up a realm role by name
    async fn find_role(&self, admin_token: &str, role_name: &str)
        -> IdentityResult<RoleRepresentation>;

    /// Bind a realm role to a user
    async fn assign_role(
        &self,
        admin_token: &str,
        user_id: &str,
        role: &RoleRepresentation,
    ) -> IdentityResult<()>;

    /// Overwrite profile fields (and the password when supplied)
    async fn update_user(
        &self,
        admin_token: &str,
        user_id: &str,
        user: &IdentityUser,
    ) -> IdentityResult<()>;

    /// Exchange credentials for a token pair
    async fn password_grant(&self, username: &str, password: &str) -> IdentityResult<TokenPair>;

    /// Exchange a refresh token for a new token pair
    async fn refresh_grant(&self, refresh_token: &str) -> IdentityResult<TokenPair>;

    /// Whether the provider answers at all (readiness probe)
    async fn is_reachable(&self) -> bool {
        true
    }
}
