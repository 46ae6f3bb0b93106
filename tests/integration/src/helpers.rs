//! Test helpers for integration tests
//!
//! Spawns test servers and wraps the HTTP calls the suites make.

use std::net::SocketAddr;
use std::time::Duration;

use agora_api::{bind, create_app, create_app_state, run_server};
use agora_common::{AppConfig, IdentityProviderMode, StorageBackend};
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::task::JoinHandle;

use crate::fixtures::{AuthResponse, LoginRequest};

/// Signing secret for in-memory identity provider tokens
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    /// Start a server on in-memory adapters with the demo data seeded
    pub async fn start() -> Result<Self> {
        Self::start_with_config(memory_config()).await
    }

    /// Start a test server with custom config on an ephemeral port
    pub async fn start_with_config(mut config: AppConfig) -> Result<Self> {
        config.api.host = "127.0.0.1".to_string();
        config.api.port = 0;

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = run_server(app, listener).await {
                eprintln!("test server stopped: {e}");
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn request(&self, method: reqwest::Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url(), path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::GET, path, None).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::GET, path, Some(token))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path, None)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PUT, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::DELETE, path, Some(token))
            .send()
            .await?)
    }

    /// Log in and return the access token
    pub async fn login(&self, identifier: &str, password: &str) -> Result<String> {
        let response = self
            .post("/api/auth/login", &LoginRequest::new(identifier, password))
            .await?;
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;
        Ok(auth.access_token)
    }
}

/// In-memory store and identity provider, demo data seeded
pub fn memory_config() -> AppConfig {
    let mut config = AppConfig::in_memory(TEST_SECRET);
    config.seed.enabled = true;
    config
}

/// Environment configuration pointed at Postgres, or `None` to skip
///
/// The identity provider stays in memory so no Keycloak is needed.
pub fn postgres_config() -> Option<AppConfig> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return None;
    }

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Skipping test: {e}");
            return None;
        }
    };
    config.storage = StorageBackend::Postgres;
    config.identity.mode = IdentityProviderMode::Memory;
    config.token.public_key_pem = None;
    config.token.secret = Some(TEST_SECRET.to_string());
    if let Some(database) = config.database.as_mut() {
        database.run_migrations = true;
    }
    config.seed.enabled = false;
    Some(config)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
