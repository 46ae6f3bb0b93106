//! Authentication utilities

pub mod credentials;
mod token;

pub use token::{AccessClaims, RealmAccess, TokenSigner, TokenVerifier};
