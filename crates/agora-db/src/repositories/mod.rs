//! PostgreSQL repository implementations

mod comment;
pub mod error;
mod member;
mod post;

pub use comment::PgCommentRepository;
pub use member::PgMemberRepository;
pub use post::PgPostRepository;
