//! Domain entities - core business objects

mod comment;
mod member;
mod post;
mod role;

pub use comment::{Comment, NewComment};
pub use member::{Member, MemberIdentifier, MemberPatch, NewMember};
pub use post::{NewPost, Post};
pub use role::{Role, UnknownRole};
