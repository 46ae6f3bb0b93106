//! # agora-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AuthService, DataSeeder, LoggingReconciler, MemberService, PostService,
    ProfileService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    UniquenessValidator,
};
