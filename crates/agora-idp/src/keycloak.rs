//! Keycloak adapter for the identity provider port.
//!
//! Talks to two Keycloak surfaces:
//!
//! 1. The OpenID Connect token endpoint, for admin tokens (`admin-cli` in the
//!    master realm) and for password / refresh grants against the platform realm
//! 2. The Admin REST API under `/admin/realms/{realm}`, for user creation,
//!    lookup, profile updates and realm-role mappings
//!
//! # Example
//!
//! ```ignore
//! use agora_idp::KeycloakClient;
//! use agora_core::traits::IdentityProvider;
//!
//! let client = KeycloakClient::new(config.identity.clone())?;
//! let admin = client.admin_token().await?;
//! let id = client.find_user_id(&admin, "jane.doe").await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use agora_common::IdentityProviderConfig;
use agora_core::error::IdentityError;
use agora_core::traits::{
    IdentityProvider, IdentityResult, IdentityUser, RoleRepresentation, TokenPair,
};

/// Token endpoint response (OAuth2 access token response).
#[derive(Debug, Deserialize)]
struct KeycloakTokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds; Keycloak sends a number
    #[serde(default)]
    expires_in: Option<Value>,
    #[serde(default)]
    token_type: Option<String>,
}

impl KeycloakTokenResponse {
    fn into_pair(self) -> TokenPair {
        TokenPair {
            access_token: self.access_token,
            refresh_token: self.refresh_token.unwrap_or_default(),
            expires_in: self.expires_in.map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            }),
            token_type: self.token_type,
        }
    }
}

/// Password credential attached to a user representation.
#[derive(Debug, Serialize)]
struct CredentialRepresentation<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
    temporary: bool,
}

#[derive(Debug, Serialize)]
struct UserAttributes<'a> {
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
}

/// Subset of Keycloak's `UserRepresentation` written by this adapter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRepresentation<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    email: Option<&'a str>,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<Vec<CredentialRepresentation<'a>>>,
    attributes: UserAttributes<'a>,
}

impl<'a> UserRepresentation<'a> {
    fn for_create(user: &'a IdentityUser) -> Self {
        Self {
            username: Some(&user.username),
            ..Self::for_update(user)
        }
    }

    fn for_update(user: &'a IdentityUser) -> Self {
        Self {
            username: None,
            first_name: user.first_name.as_deref(),
            last_name: user.last_name.as_deref(),
            email: user.email.as_deref(),
            enabled: true,
            credentials: user.password.as_deref().map(|value| {
                vec![CredentialRepresentation {
                    kind: "password",
                    value,
                    temporary: false,
                }]
            }),
            attributes: UserAttributes {
                phone_number: user.phone_number.as_deref(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserSummary {
    id: String,
}

fn transport(e: reqwest::Error) -> IdentityError {
    IdentityError::Transport(e.to_string())
}

fn invalid_response(e: reqwest::Error) -> IdentityError {
    IdentityError::InvalidResponse(e.to_string())
}

/// Fail with the admin-API classification unless the status is 2xx.
fn check_admin_status(response: Response) -> IdentityResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(IdentityError::from_admin_status(status.as_u16()))
    }
}

/// Keycloak implementation of [`IdentityProvider`].
#[derive(Debug, Clone)]
pub struct KeycloakClient {
    config: IdentityProviderConfig,
    http: Client,
}

impl KeycloakClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: IdentityProviderConfig) -> IdentityResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(transport)?;

        Ok(Self { config, http })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn token_url(&self, realm: &str) -> String {
        format!(
            "{}/realms/{realm}/protocol/openid-connect/token",
            self.base_url()
        )
    }

    fn admin_url(&self, path: &str) -> String {
        format!(
            "{}/admin/realms/{}{path}",
            self.base_url(),
            self.config.realm
        )
    }

    /// POST a form to the platform realm's token endpoint.
    async fn grant(&self, form: &[(&str, &str)]) -> IdentityResult<TokenPair> {
        let response = self
            .http
            .post(self.token_url(&self.config.realm))
            .form(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Keycloak rejected token grant");
            return Err(IdentityError::Rejected(body));
        }

        let token: KeycloakTokenResponse = response.json().await.map_err(invalid_response)?;
        Ok(token.into_pair())
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    async fn admin_token(&self) -> IdentityResult<String> {
        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.admin_client_id.as_str()),
            ("username", self.config.admin_username.as_str()),
            ("password", self.config.admin_password.as_str()),
        ];

        let response = self
            .http
            .post(self.token_url(&self.config.admin_realm))
            .form(&form)
            .send()
            .await
            .map_err(transport)?;
        let response = check_admin_status(response)?;

        let token: KeycloakTokenResponse = response.json().await.map_err(invalid_response)?;
        debug!("Obtained Keycloak admin token");
        Ok(token.access_token)
    }

    async fn create_user(&self, admin_token: &str, user: &IdentityUser) -> IdentityResult<()> {
        let response = self
            .http
            .post(self.admin_url("/users"))
            .bearer_auth(admin_token)
            .json(&UserRepresentation::for_create(user))
            .send()
            .await
            .map_err(transport)?;
        check_admin_status(response)?;

        debug!(username = %user.username, "Keycloak user created");
        Ok(())
    }

    async fn find_user_id(
        &self,
        admin_token: &str,
        username: &str,
    ) -> IdentityResult<Option<String>> {
        let response = self
            .http
            .get(self.admin_url("/users"))
            .bearer_auth(admin_token)
            .query(&[("username", username), ("exact", "true")])
            .send()
            .await
            .map_err(transport)?;
        let response = check_admin_status(response)?;

        let users: Vec<UserSummary> = response.json().await.map_err(invalid_response)?;
        Ok(users.into_iter().next().map(|u| u.id))
    }

    async fn find_role(
        &self,
        admin_token: &str,
        role_name: &str,
    ) -> IdentityResult<RoleRepresentation> {
        let name = role_name.to_lowercase();
        let response = self
            .http
            .get(self.admin_url(&format!("/roles/{name}")))
            .bearer_auth(admin_token)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IdentityError::RoleNotFound(name));
        }
        let response = check_admin_status(response)?;
        response.json().await.map_err(invalid_response)
    }

    async fn assign_role(
        &self,
        admin_token: &str,
        user_id: &str,
        role: &RoleRepresentation,
    ) -> IdentityResult<()> {
        let response = self
            .http
            .post(self.admin_url(&format!("/users/{user_id}/role-mappings/realm")))
            .bearer_auth(admin_token)
            .json(&[role])
            .send()
            .await
            .map_err(transport)?;
        check_admin_status(response)?;

        debug!(user_id, role = %role.name, "Realm role assigned");
        Ok(())
    }

    async fn update_user(
        &self,
        admin_token: &str,
        user_id: &str,
        user: &IdentityUser,
    ) -> IdentityResult<()> {
        let response = self
            .http
            .put(self.admin_url(&format!("/users/{user_id}")))
            .bearer_auth(admin_token)
            .json(&UserRepresentation::for_update(user))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IdentityError::UserNotFound);
        }
        check_admin_status(response)?;

        debug!(user_id, "Keycloak user updated");
        Ok(())
    }

    async fn password_grant(&self, username: &str, password: &str) -> IdentityResult<TokenPair> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ];
        self.grant(&form).await
    }

    async fn refresh_grant(&self, refresh_token: &str) -> IdentityResult<TokenPair> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        self.grant(&form).await
    }

    async fn is_reachable(&self) -> bool {
        let url = format!("{}/.well-known/openid-configuration", self.config.issuer_url());
        match self.http.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Keycloak readiness probe failed");
                false
            }
        }
    }
}
