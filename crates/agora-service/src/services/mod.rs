//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod admin;
pub mod auth;
pub mod context;
pub mod error;
pub mod member;
pub mod post;
pub mod profile;
pub mod reconciler;
pub mod seeder;
pub mod uniqueness;

// Re-export all services for convenience
pub use admin::AdminService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult, MEMBER_NOT_FOUND};
pub use member::MemberService;
pub use post::PostService;
pub use profile::ProfileService;
pub use reconciler::LoggingReconciler;
pub use seeder::DataSeeder;
pub use uniqueness::UniquenessValidator;
