//! # agora-core
//!
//! Domain layer containing entities, value objects, ports, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, identity provider).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Member, MemberIdentifier, MemberPatch, NewComment, NewMember, NewPost, Post, Role,
};
pub use error::{DomainError, IdentityError};
pub use events::{DualWriteGap, DualWriteOperation};
pub use traits::{
    CommentRepository, IdentityProvider, IdentityResult, IdentityUser, MemberCache,
    MemberRepository, PostRepository, RegistrationReconciler, RepoResult, RoleRepresentation,
    TokenPair,
};
pub use value_objects::{mask_email, mask_phone, DeleteOutcome, Page, PageRequest, SortDirection};
