//! Ports implemented by the infrastructure crates

mod cache;
mod identity;
mod reconciler;
mod repositories;

pub use cache::MemberCache;
pub use identity::{IdentityProvider, IdentityResult, IdentityUser, RoleRepresentation, TokenPair};
pub use reconciler::RegistrationReconciler;
pub use repositories::{CommentRepository, MemberRepository, PostRepository, RepoResult};
