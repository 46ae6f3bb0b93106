//! Bearer token handling
//!
//! Access tokens are issued by the identity provider. [`TokenVerifier`] checks
//! their signature (RS256 realm key or HS256 shared secret), expiry and issuer
//! before any claim is trusted. [`TokenSigner`] mints tokens of the same shape
//! for the in-memory identity provider and for tests.

use agora_core::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::TokenVerificationConfig;
use crate::error::AppError;

const ACCESS_TOKEN_TYPE: &str = "Bearer";
const REFRESH_TOKEN_TYPE: &str = "Refresh";

/// Realm role claim (`realm_access.roles`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claims read from an identity provider access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Identity provider user id
    pub sub: String,
    /// Login name; the platform identifies principals by this
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_access: Option<RealmAccess>,
    /// `Bearer` for access tokens, `Refresh` for refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    /// Principal name, falling back to the subject
    #[must_use]
    pub fn username(&self) -> &str {
        self.preferred_username.as_deref().unwrap_or(&self.sub)
    }

    /// Platform roles carried by the token; realm roles the platform does
    /// not know about (e.g. `offline_access`) are ignored
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = Vec::new();
        for name in self.realm_access.iter().flat_map(|ra| ra.roles.iter()) {
            if let Ok(role) = name.parse::<Role>() {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
        }
        roles
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Authority list as rendered in login responses, e.g. `[ROLE_ADMIN, ROLE_USER]`
    #[must_use]
    pub fn authorities(&self) -> String {
        let names: Vec<String> = self.roles().iter().map(Role::authority).collect();
        format!("[{}]", names.join(", "))
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.typ.as_deref() == Some(REFRESH_TOKEN_TYPE)
    }
}

fn map_jwt_error(err: &jsonwebtoken::errors::Error) -> AppError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    }
}

/// Verifies bearer tokens issued by the identity provider
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from configuration, preferring the RS256 public key
    ///
    /// # Errors
    /// Returns a configuration error if neither key is configured or the PEM
    /// cannot be parsed
    pub fn from_config(config: &TokenVerificationConfig) -> Result<Self, AppError> {
        let (decoding_key, algorithm) = match (&config.public_key_pem, &config.secret) {
            (Some(pem), _) => (
                DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AppError::Config(format!("invalid JWT_PUBLIC_KEY_PEM: {e}")))?,
                Algorithm::RS256,
            ),
            (None, Some(secret)) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            (None, None) => {
                return Err(AppError::Config(
                    "either JWT_PUBLIC_KEY_PEM or JWT_SECRET must be set".to_string(),
                ))
            }
        };

        Ok(Self::with_key(
            decoding_key,
            algorithm,
            config.issuer.as_deref(),
            config.audience.as_deref(),
        ))
    }

    /// HS256 verifier without issuer or audience checks
    #[must_use]
    pub fn hs256(secret: &str) -> Self {
        Self::with_key(
            DecodingKey::from_secret(secret.as_bytes()),
            Algorithm::HS256,
            None,
            None,
        )
    }

    fn with_key(
        decoding_key: DecodingKey,
        algorithm: Algorithm,
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            // Keycloak stamps `aud: account` on every token
            None => validation.validate_aud = false,
        }
        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify an access token and return its claims
    ///
    /// # Errors
    /// `TokenExpired` for an expired token, `InvalidToken` for anything else
    /// wrong, including presenting a refresh token
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| map_jwt_error(&e))?
            .claims;

        if claims.is_refresh_token() {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

/// Mints HS256 tokens shaped like the identity provider's
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: Option<String>,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl TokenSigner {
    #[must_use]
    pub fn new(
        secret: &str,
        issuer: Option<String>,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// # Errors
    /// Returns a configuration error when no HS256 secret is configured
    pub fn from_config(config: &TokenVerificationConfig) -> Result<Self, AppError> {
        let secret = config
            .secret
            .as_deref()
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".to_string()))?;
        Ok(Self::new(
            secret,
            config.issuer.clone(),
            config.access_token_expiry,
            config.refresh_token_expiry,
        ))
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Sign an access token carrying the given realm roles
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn sign_access(
        &self,
        username: &str,
        email: Option<&str>,
        roles: &[Role],
    ) -> Result<String, AppError> {
        let realm_access = RealmAccess {
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
        };
        self.sign(
            username,
            email,
            Some(realm_access),
            ACCESS_TOKEN_TYPE,
            self.access_token_expiry,
        )
    }

    /// Sign a refresh token for a user
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn sign_refresh(&self, username: &str) -> Result<String, AppError> {
        self.sign(
            username,
            None,
            None,
            REFRESH_TOKEN_TYPE,
            self.refresh_token_expiry,
        )
    }

    fn sign(
        &self,
        username: &str,
        email: Option<&str>,
        realm_access: Option<RealmAccess>,
        typ: &str,
        expiry: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: username.to_string(),
            preferred_username: Some(username.to_string()),
            email: email.map(str::to_string),
            realm_access,
            typ: Some(typ.to_string()),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Validate a refresh token previously issued by this signer
    ///
    /// # Errors
    /// `TokenExpired` or `InvalidToken`
    pub fn verify_refresh(&self, token: &str) -> Result<AccessClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let claims = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| map_jwt_error(&e))?
            .claims;

        if !claims.is_refresh_token() {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}
