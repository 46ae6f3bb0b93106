//! HTTP handlers grouped by area

pub mod admin;
pub mod auth;
pub mod health;
pub mod members;
pub mod posts;
pub mod profile;
