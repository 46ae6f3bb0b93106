//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    validation_messages, CreateCommentRequest, CreatePostRequest, LoginRequest, MemberRequest,
    RefreshTokenRequest, UpdateMemberRequest, UsernameQuery,
};

pub use responses::{
    AnalyticsResponse, AuthResponse, CommentResponse, HealthChecks, HealthResponse,
    MemberAnalytics, MemberResponse, MessageResponse, PostAnalytics, PostResponse,
    PrincipalResponse, ReadinessResponse, RefreshTokenResponse, TopPost, UsernameAvailabilityResponse,
};
