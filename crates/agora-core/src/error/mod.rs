//! Domain error types

mod domain_error;
mod identity_error;

pub use domain_error::DomainError;
pub use identity_error::IdentityError;
