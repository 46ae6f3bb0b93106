//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AdminUser, AuthUser, MemberUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{MemberIdPath, PathParam};
pub use validated::{JsonBody, ValidatedJson};
