//! API Integration Tests
//!
//! Every test boots its own server with the in-memory store and identity
//! provider. `test_flow_against_postgres` additionally needs `DATABASE_URL`
//! and is skipped without it.
//!
//! Run with: cargo test -p agora-integration-tests --test api_tests

use agora_integration_tests::{
    assert_json, assert_status, fixtures::*, postgres_config, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_alive() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "I'm alive!");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "User registered successfully");

    let response = server
        .post("/api/auth/login", &LoginRequest::new(&request.email, TEST_PASSWORD))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.member_id, 3);
    assert_eq!(auth.role, "[ROLE_USER]");
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/auth/register", &request).await.unwrap();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    let errors = body.errors.expect("error list");
    assert!(errors.contains(&"Username already registered, please use another".to_string()));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/auth/login", &LoginRequest::new(USER_USERNAME, "Wrong@1234"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.as_deref(), Some("Invalid Credentials!!"));
}

#[tokio::test]
async fn test_refresh_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/auth/login", &LoginRequest::new(USER_USERNAME, USER_PASSWORD))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/auth/refresh-token",
            &serde_json::json!({ "refreshToken": auth.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: RefreshResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/dashboard/profile", &refreshed.access_token)
        .await
        .unwrap();
    let profile: MemberView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.username, USER_USERNAME);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_and_new_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.login(USER_USERNAME, USER_PASSWORD).await.unwrap();

    let response = server
        .put_auth(
            "/api/dashboard/profile",
            &token,
            &serde_json::json!({ "lastName": "Smith", "password": "Changed@123" }),
        )
        .await
        .unwrap();
    let updated: MemberView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.last_name, "Smith");
    assert_eq!(updated.email, "jane.doe@email.com");

    server.login(USER_USERNAME, "Changed@123").await.unwrap();
}

#[tokio::test]
async fn test_profile_update_rejects_taken_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.login(USER_USERNAME, USER_PASSWORD).await.unwrap();

    let response = server
        .put_auth(
            "/api/dashboard/profile",
            &token,
            &serde_json::json!({ "email": "john.doe@email.com" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_post_comment_analytics_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.login(USER_USERNAME, USER_PASSWORD).await.unwrap();

    let response = server
        .post_auth(
            "/api/posts",
            &token,
            &CreatePostRequest::new("Integration", "Posted over HTTP"),
        )
        .await
        .unwrap();
    let post: PostView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(post.comments.is_empty());
    assert_eq!(post.member.username, USER_USERNAME);
    assert_eq!(post.member.email, "j****e@email.com");

    let response = server
        .post_auth(
            &format!("/api/posts/{}/comments", post.id),
            &token,
            &CreateCommentRequest {
                content: "First!".to_string(),
            },
        )
        .await
        .unwrap();
    let comment: CommentView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comment.post_id, post.id);

    let admin = server.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
    let response = server.get_auth("/api/admin/analytics", &admin).await.unwrap();
    let analytics: AnalyticsView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(analytics.total_users, 2);
    assert!(analytics.total_posts >= 1);
    assert!(analytics.total_comments >= 1);
    assert!(analytics.top_post.is_some());

    let jane = analytics
        .members
        .iter()
        .find(|m| m.username == USER_USERNAME)
        .expect("jane.doe in analytics");
    let ours = jane
        .posts
        .iter()
        .find(|p| p.post_id == post.id)
        .expect("post in analytics");
    assert_eq!(ours.total_comments, 1);

    let response = server
        .delete_auth(&format!("/api/posts/comments/{}", comment.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/posts/{}", post.id), &token)
        .await
        .unwrap();
    let post: PostView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(post.comments.is_empty());
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.login(USER_USERNAME, USER_PASSWORD).await.unwrap();

    let response = server
        .post_auth(
            "/api/posts/does-not-exist/comments",
            &token,
            &CreateCommentRequest {
                content: "Hello?".to_string(),
            },
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(body.error.as_deref(), Some("Post not found"));
}

#[tokio::test]
async fn test_admin_users_page() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

    let response = server
        .get_auth("/api/admin/users?page=0&size=1", &admin)
        .await
        .unwrap();
    let page: PageView<MemberView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 2);
    assert!(!page.is_last);
}

#[tokio::test]
async fn test_flow_against_postgres() {
    let Some(config) = postgres_config() else {
        return;
    };

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let token = server.login(&request.username, TEST_PASSWORD).await.unwrap();
    let response = server
        .post_auth("/api/posts", &token, &CreatePostRequest::new("Stored", "In Postgres"))
        .await
        .unwrap();
    let post: PostView = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/posts/{}", post.id), &token)
        .await
        .unwrap();
    let fetched: PostView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, "Stored");
    assert_eq!(fetched.member.username, request.username);
}
