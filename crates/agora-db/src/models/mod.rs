//! Database models with SQLx `FromRow` derives

mod comment;
mod member;
mod post;

pub use comment::CommentModel;
pub use member::MemberModel;
pub use post::PostModel;
