//! Route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, health, members, posts, profile};
use crate::state::AppState;

/// Every route of the API
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes())
}

/// Liveness, readiness and the token principal
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::alive))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/user", get(health::current_principal))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(member_routes())
        .merge(profile_routes())
        .merge(post_routes())
        .merge(admin_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route("/auth/check-username", get(auth::check_username))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route("/members/email/:email", get(members::get_member_by_email))
        .route("/members/phone/:phone", get(members::get_member_by_phone))
        .route(
            "/members/username/:name",
            get(members::get_member_by_username),
        )
}

fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/dashboard/profile",
        get(profile::get_profile).put(profile::update_profile),
    )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/posts/:post_id/comments", post(posts::add_comment))
        .route("/posts/comments/:comment_id", delete(posts::delete_comment))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/analytics", get(admin::analytics))
        .route("/admin/elevate/:username", put(admin::elevate))
}
