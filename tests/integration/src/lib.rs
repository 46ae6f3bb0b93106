//! Integration test utilities for the Agora API
//!
//! Boots the real router on an ephemeral port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
