//! Post and comment handlers
//!
//! Authors are always taken from the verified token, never from the body.

use agora_core::value_objects::{DeleteOutcome, Page};
use agora_service::dto::{CommentResponse, CreateCommentRequest, CreatePostRequest, PostResponse};
use agora_service::PostService;
use axum::{extract::State, Json};
use tracing::debug;

use crate::extractors::{MemberUser, Pagination, PathParam, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List posts in creation order, each with its comments oldest first
///
/// GET /api/posts?page=&size=
pub async fn list_posts(
    State(state): State<AppState>,
    _caller: MemberUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<Page<PostResponse>>> {
    let posts = PostService::new(state.service_context()).list(page).await?;
    Ok(Json(posts))
}

/// GET /api/posts/{postId}
pub async fn get_post(
    State(state): State<AppState>,
    _caller: MemberUser,
    PathParam(post_id): PathParam<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = PostService::new(state.service_context())
        .get(&post_id)
        .await?;
    Ok(Json(post))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    MemberUser(user): MemberUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let post = PostService::new(state.service_context())
        .create(user.username(), &request.title, &request.content)
        .await?;
    Ok(Json(PostResponse::new(&post, &[])))
}

/// DELETE /api/posts/{postId}
pub async fn delete_post(
    State(state): State<AppState>,
    MemberUser(user): MemberUser,
    PathParam(post_id): PathParam<String>,
) -> ApiResult<NoContent> {
    let outcome = PostService::new(state.service_context())
        .delete_post(user.username(), &post_id)
        .await?;
    log_outcome(outcome, &post_id);
    Ok(NoContent)
}

/// POST /api/posts/{postId}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    MemberUser(user): MemberUser,
    PathParam(post_id): PathParam<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = PostService::new(state.service_context())
        .add_comment(&post_id, user.username(), &request.content)
        .await?;
    Ok(Json(comment.into()))
}

/// DELETE /api/posts/comments/{commentId}
pub async fn delete_comment(
    State(state): State<AppState>,
    MemberUser(user): MemberUser,
    PathParam(comment_id): PathParam<String>,
) -> ApiResult<NoContent> {
    let outcome = PostService::new(state.service_context())
        .delete_comment(user.username(), &comment_id)
        .await?;
    log_outcome(outcome, &comment_id);
    Ok(NoContent)
}

// Both outcomes answer 204
fn log_outcome(outcome: DeleteOutcome, id: &str) {
    if outcome == DeleteOutcome::NoMatchingOwnedRecord {
        debug!(id, "Delete matched no owned record");
    }
}
