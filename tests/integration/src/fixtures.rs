//! Test fixtures and data generators
//!
//! Wire shapes of the API as the client sees them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seeded admin credentials
pub const ADMIN_USERNAME: &str = "john.doe";
pub const ADMIN_PASSWORD: &str = "Admin@123";

/// Seeded user credentials
pub const USER_USERNAME: &str = "jane.doe";
pub const USER_PASSWORD: &str = "User@1234";

pub const TEST_PASSWORD: &str = "Secret@123";

/// Registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub repeat_password: String,
}

impl RegisterRequest {
    /// A request whose username, email and phone collide with nothing
    pub fn unique() -> Self {
        let id = Uuid::new_v4();
        let tag = id.simple().to_string();
        let short = &tag[..10];
        Self {
            username: format!("member_{short}"),
            first_name: "Test".to_string(),
            last_name: "Member".to_string(),
            email: format!("{short}@example.com"),
            phone_number: format!("9{:09}", id.as_u128() % 1_000_000_000),
            password: TEST_PASSWORD.to_string(),
            repeat_password: TEST_PASSWORD.to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_identifier: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(identifier: &str, password: &str) -> Self {
        Self {
            user_identifier: identifier.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub member_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub code: String,
    pub error: Option<String>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub member_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_role: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub member: MemberView,
    pub post_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub member: MemberView,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub content: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: i64,
    pub page_size: u32,
    pub is_last: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub total_users: i64,
    pub total_posts: i64,
    pub total_comments: i64,
    pub members: Vec<MemberAnalyticsView>,
    pub top_post: Option<TopPostView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnalyticsView {
    pub username: String,
    pub total_posts: usize,
    pub posts: Vec<PostAnalyticsView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAnalyticsView {
    pub post_title: String,
    pub post_id: String,
    pub total_comments: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPostView {
    pub post_title: String,
    pub post_id: String,
    pub member: String,
    pub total_comments: i64,
}
