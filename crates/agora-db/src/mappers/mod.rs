//! Entity <-> Model mappers

mod comment;
mod member;
mod post;
