//! In-memory repository implementations
//!
//! Used for development without a database and by the service and API tests.
//! Semantics match the PostgreSQL adapters, including the unique constraints
//! and the orphaned posts and comments a member deletion leaves behind.

mod comment;
mod member;
mod post;
mod store;

pub use comment::InMemoryCommentRepository;
pub use member::InMemoryMemberRepository;
pub use post::InMemoryPostRepository;
pub use store::InMemoryStore;
