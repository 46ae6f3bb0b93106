//! In-memory identity provider
//!
//! Keeps users, passwords and realm roles in process and mints HS256 tokens
//! with [`TokenSigner`], so the API can run and be tested without Keycloak.
//! Tokens it issues verify with a `TokenVerifier` built from the same secret.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use agora_common::TokenSigner;
use agora_core::entities::Role;
use agora_core::error::IdentityError;
use agora_core::traits::{
    IdentityProvider, IdentityResult, IdentityUser, RoleRepresentation, TokenPair,
};

const ADMIN_TOKEN: &str = "in-memory-admin-token";
const INVALID_GRANT: &str =
    r#"{"error":"invalid_grant","error_description":"Invalid refresh token"}"#;

#[derive(Debug, Clone)]
struct StoredUser {
    id: String,
    profile: IdentityUser,
    roles: Vec<Role>,
}

impl StoredUser {
    fn matches_login(&self, login: &str) -> bool {
        self.profile.username.eq_ignore_ascii_case(login)
            || self
                .profile
                .email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(login))
    }
}

fn role_representation(role: Role) -> RoleRepresentation {
    RoleRepresentation {
        id: format!("role-{}", role.as_str()),
        name: role.as_str().to_string(),
    }
}

/// Process-local [`IdentityProvider`]; users are keyed by lowercase username
pub struct InMemoryIdentityProvider {
    users: RwLock<HashMap<String, StoredUser>>,
    signer: TokenSigner,
}

impl std::fmt::Debug for InMemoryIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIdentityProvider")
            .field("users", &self.users.read().len())
            .finish()
    }
}

impl InMemoryIdentityProvider {
    pub fn new(signer: TokenSigner) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            signer,
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Realm roles currently mapped to a user
    pub fn roles_of(&self, username: &str) -> Vec<Role> {
        self.users
            .read()
            .get(&username.to_lowercase())
            .map(|u| u.roles.clone())
            .unwrap_or_default()
    }

    fn issue(&self, user: &StoredUser) -> IdentityResult<TokenPair> {
        let access_token = self
            .signer
            .sign_access(&user.profile.username, user.profile.email.as_deref(), &user.roles)
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;
        let refresh_token = self
            .signer
            .sign_refresh(&user.profile.username)
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: Some(self.signer.access_token_expiry().to_string()),
            token_type: Some("Bearer".to_string()),
        })
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn admin_token(&self) -> IdentityResult<String> {
        Ok(ADMIN_TOKEN.to_string())
    }

    async fn create_user(&self, _admin_token: &str, user: &IdentityUser) -> IdentityResult<()> {
        let mut users = self.users.write();
        let key = user.username.to_lowercase();

        let email_taken = user.email.as_deref().is_some_and(|email| {
            users.values().any(|u| u.matches_login(email))
        });
        if users.contains_key(&key) || email_taken {
            return Err(IdentityError::UserAlreadyExists);
        }

        users.insert(
            key,
            StoredUser {
                id: Uuid::new_v4().to_string(),
                profile: user.clone(),
                roles: Vec::new(),
            },
        );
        debug!(username = %user.username, "In-memory identity user created");
        Ok(())
    }

    async fn find_user_id(
        &self,
        _admin_token: &str,
        username: &str,
    ) -> IdentityResult<Option<String>> {
        Ok(self
            .users
            .read()
            .get(&username.to_lowercase())
            .map(|u| u.id.clone()))
    }

    async fn find_role(
        &self,
        _admin_token: &str,
        role_name: &str,
    ) -> IdentityResult<RoleRepresentation> {
        role_name
            .parse::<Role>()
            .map(role_representation)
            .map_err(|_| IdentityError::RoleNotFound(role_name.to_lowercase()))
    }

    async fn assign_role(
        &self,
        _admin_token: &str,
        user_id: &str,
        role: &RoleRepresentation,
    ) -> IdentityResult<()> {
        let role: Role = role
            .name
            .parse()
            .map_err(|_| IdentityError::RoleNotFound(role.name.clone()))?;

        let mut users = self.users.write();
        let user = users
            .values_mut()
            .find(|u| u.id == user_id)
            .ok_or(IdentityError::Client(404))?;
        if !user.roles.contains(&role) {
            user.roles.push(role);
        }
        Ok(())
    }

    async fn update_user(
        &self,
        _admin_token: &str,
        user_id: &str,
        user: &IdentityUser,
    ) -> IdentityResult<()> {
        let mut users = self.users.write();
        let stored = users
            .values_mut()
            .find(|u| u.id == user_id)
            .ok_or(IdentityError::UserNotFound)?;

        stored.profile.first_name.clone_from(&user.first_name);
        stored.profile.last_name.clone_from(&user.last_name);
        stored.profile.email.clone_from(&user.email);
        stored.profile.phone_number.clone_from(&user.phone_number);
        if user.password.is_some() {
            stored.profile.password.clone_from(&user.password);
        }
        Ok(())
    }

    async fn password_grant(&self, username: &str, password: &str) -> IdentityResult<TokenPair> {
        let user = self
            .users
            .read()
            .values()
            .find(|u| u.matches_login(username))
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)?;

        if user.profile.password.as_deref() != Some(password) {
            return Err(IdentityError::InvalidCredentials);
        }
        self.issue(&user)
    }

    async fn refresh_grant(&self, refresh_token: &str) -> IdentityResult<TokenPair> {
        let claims = self
            .signer
            .verify_refresh(refresh_token)
            .map_err(|_| IdentityError::Rejected(INVALID_GRANT.to_string()))?;

        let user = self
            .users
            .read()
            .get(&claims.username().to_lowercase())
            .cloned()
            .ok_or_else(|| IdentityError::Rejected(INVALID_GRANT.to_string()))?;
        self.issue(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_common::TokenVerifier;

    const SECRET: &str = "in-memory-idp-test-secret";

    fn provider() -> InMemoryIdentityProvider {
        InMemoryIdentityProvider::new(TokenSigner::new(SECRET, None, 300, 1800))
    }

    fn jane() -> IdentityUser {
        IdentityUser {
            username: "jane.doe".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone_number: Some("9876543210".to_string()),
            password: Some("Secret@123".to_string()),
        }
    }

    async fn register(idp: &InMemoryIdentityProvider, role: &str) -> String {
        let admin = idp.admin_token().await.unwrap();
        idp.create_user(&admin, &jane()).await.unwrap();
        let id = idp.find_user_id(&admin, "jane.doe").await.unwrap().unwrap();
        let role = idp.find_role(&admin, role).await.unwrap();
        idp.assign_role(&admin, &id, &role).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let idp = provider();
        register(&idp, "user").await;

        let same_name = IdentityUser {
            email: Some("other@example.com".to_string()),
            ..jane()
        };
        let same_email = IdentityUser {
            username: "someone".to_string(),
            ..jane()
        };

        assert_eq!(
            idp.create_user(ADMIN_TOKEN, &same_name).await,
            Err(IdentityError::UserAlreadyExists)
        );
        assert_eq!(
            idp.create_user(ADMIN_TOKEN, &same_email).await,
            Err(IdentityError::UserAlreadyExists)
        );
        assert_eq!(idp.user_count(), 1);
    }

    #[tokio::test]
    async fn test_password_grant_issues_verifiable_tokens() {
        let idp = provider();
        register(&idp, "USER").await;

        let pair = idp.password_grant("jane.doe", "Secret@123").await.unwrap();
        let claims = TokenVerifier::hs256(SECRET).verify(&pair.access_token).unwrap();

        assert_eq!(claims.username(), "jane.doe");
        assert_eq!(claims.roles(), vec![Role::User]);
        assert_eq!(pair.expires_in.as_deref(), Some("300"));
    }

    #[tokio::test]
    async fn test_password_grant_accepts_email() {
        let idp = provider();
        register(&idp, "user").await;
        assert!(idp.password_grant("JANE@example.com", "Secret@123").await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let idp = provider();
        register(&idp, "user").await;

        assert_eq!(
            idp.password_grant("jane.doe", "nope").await,
            Err(IdentityError::InvalidCredentials)
        );
        assert_eq!(
            idp.password_grant("ghost", "Secret@123").await,
            Err(IdentityError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_refresh_grant() {
        let idp = provider();
        register(&idp, "user").await;
        let pair = idp.password_grant("jane.doe", "Secret@123").await.unwrap();

        assert!(idp.refresh_grant(&pair.refresh_token).await.is_ok());
        assert!(matches!(
            idp.refresh_grant(&pair.access_token).await,
            Err(IdentityError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_assign_role_accumulates() {
        let idp = provider();
        let id = register(&idp, "user").await;
        let admin = idp.find_role(ADMIN_TOKEN, "Admin").await.unwrap();
        idp.assign_role(ADMIN_TOKEN, &id, &admin).await.unwrap();
        idp.assign_role(ADMIN_TOKEN, &id, &admin).await.unwrap();

        assert_eq!(idp.roles_of("jane.doe"), vec![Role::User, Role::Admin]);
    }

    #[tokio::test]
    async fn test_unknown_role_and_user() {
        let idp = provider();
        assert_eq!(
            idp.find_role(ADMIN_TOKEN, "Moderator").await,
            Err(IdentityError::RoleNotFound("moderator".to_string()))
        );
        assert_eq!(
            idp.update_user(ADMIN_TOKEN, "missing", &jane()).await,
            Err(IdentityError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_it() {
        let idp = provider();
        let id = register(&idp, "user").await;
        let patch = IdentityUser {
            first_name: Some("Janet".to_string()),
            password: None,
            ..jane()
        };
        idp.update_user(ADMIN_TOKEN, &id, &patch).await.unwrap();

        assert!(idp.password_grant("jane.doe", "Secret@123").await.is_ok());
    }
}
