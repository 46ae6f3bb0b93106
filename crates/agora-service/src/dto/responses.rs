//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` and use camelCase field names.
//! Absent optional fields are left out of the JSON.

use agora_core::entities::Role;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Member Responses
// ============================================================================

/// Member view
///
/// Post and comment authors use the masked form (see
/// [`MemberResponse::masked`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_role: Role,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub member_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    /// Authority list, e.g. `[ROLE_USER]`
    pub role: String,
}

/// Token refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The verified token principal of the caller
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalResponse {
    pub username: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UsernameAvailabilityResponse {
    pub available: bool,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub member: MemberResponse,
    pub post_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub member: MemberResponse,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// Platform-wide activity summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_users: i64,
    pub total_posts: i64,
    pub total_comments: i64,
    pub members: Vec<MemberAnalytics>,
    /// Absent when there are no posts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_post: Option<TopPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnalytics {
    pub username: String,
    pub total_posts: usize,
    /// Newest first
    pub posts: Vec<PostAnalytics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAnalytics {
    pub post_title: String,
    pub post_id: String,
    pub total_comments: i64,
}

/// Most commented post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub post_title: String,
    pub post_id: String,
    /// Author's full name
    pub member: String,
    pub total_comments: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    /// Absent when no cache is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
}

fn label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool, cache_healthy: Option<bool>) -> Self {
        let all_healthy = store_healthy && cache_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: label(store_healthy),
                cache: cache_healthy.map(label),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_omits_missing_top_post() {
        let analytics = AnalyticsResponse {
            total_users: 0,
            total_posts: 0,
            total_comments: 0,
            members: Vec::new(),
            top_post: None,
        };
        let json = serde_json::to_value(&analytics).unwrap();

        assert_eq!(json["totalUsers"], 0);
        assert!(json["members"].as_array().unwrap().is_empty());
        assert!(json.get("topPost").is_none());
    }

    #[test]
    fn test_refresh_response_omits_missing_fields() {
        let response = RefreshTokenResponse {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: None,
            token_type: Some("Bearer".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["accessToken"], "a");
        assert_eq!(json["tokenType"], "Bearer");
        assert!(json.get("expiresIn").is_none());
    }

    #[test]
    fn test_readiness() {
        assert!(ReadinessResponse::ready(true, None).is_ready());
        assert!(!ReadinessResponse::ready(true, Some(false)).is_ready());

        let json = serde_json::to_value(ReadinessResponse::ready(false, None)).unwrap();
        assert_eq!(json["checks"]["store"], "unhealthy");
        assert!(json["checks"].get("cache").is_none());
    }
}
