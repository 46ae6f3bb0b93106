//! # agora-idp
//!
//! Adapters for the [`agora_core::traits::IdentityProvider`] port.
//!
//! - [`KeycloakClient`]: admin REST API and OpenID Connect token endpoint over reqwest
//! - [`InMemoryIdentityProvider`]: process-local users and HS256 tokens for
//!   development and tests

pub mod keycloak;
pub mod memory;

pub use keycloak::KeycloakClient;
pub use memory::InMemoryIdentityProvider;
