//! Identity provider errors
//!
//! Display strings are surfaced to API callers verbatim, so they are kept
//! short and user-facing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The provider already holds a user with this username or email
    #[error("User already exists!!")]
    UserAlreadyExists,

    /// Password grant rejected with 401
    #[error("Invalid Credentials!!")]
    InvalidCredentials,

    /// No provider-side user matches the username
    #[error("User not found in Keycloak.")]
    UserNotFound,

    #[error("Role not found in Keycloak: {0}")]
    RoleNotFound(String),

    /// Admin API answered with a 4xx other than 409
    #[error("Keycloak client error: {0}")]
    Client(u16),

    /// Admin API answered with a 5xx
    #[error("Keycloak server error: {0}")]
    Server(u16),

    /// Token endpoint rejected a grant; carries the response body
    #[error("Error: {0}")]
    Rejected(String),

    #[error("Identity provider unreachable: {0}")]
    Transport(String),

    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
}

impl IdentityError {
    /// Classify a non-success admin API status
    pub fn from_admin_status(status: u16) -> Self {
        match status {
            409 => Self::UserAlreadyExists,
            400..=499 => Self::Client(status),
            _ => Self::Server(status),
        }
    }
}
