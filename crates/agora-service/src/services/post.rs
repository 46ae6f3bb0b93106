//! Post and comment service
//!
//! Comments are always read through their `post_id`; the comment id list
//! stored on a post is maintained best-effort and never read back here.

use agora_core::entities::{Comment, Member, NewComment, NewPost, Post};
use agora_core::value_objects::{DeleteOutcome, Page, PageRequest, SortDirection};
use tracing::{debug, info, instrument, warn};

use crate::dto::PostResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::member::MemberService;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const INVALID_MEMBER_ID: &str = "Invalid member ID";

/// Post and comment service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of posts in creation order, each with its comments oldest
    /// first
    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<PostResponse>> {
        let posts = self.ctx.post_repo().list(page).await?;

        let mut views = Vec::with_capacity(posts.content.len());
        for post in &posts.content {
            let comments = self
                .ctx
                .comment_repo()
                .find_by_post_id(&post.id, SortDirection::Ascending)
                .await?;
            views.push(PostResponse::new(post, &comments));
        }

        Ok(Page {
            content: views,
            current_page: posts.current_page,
            total_pages: posts.total_pages,
            total_elements: posts.total_elements,
            page_size: posts.page_size,
            is_last: posts.is_last,
        })
    }

    /// A single post with its comments newest first
    #[instrument(skip(self))]
    pub async fn get(&self, post_id: &str) -> ServiceResult<PostResponse> {
        let post = self.find_post(post_id).await?;
        let comments = self
            .ctx
            .comment_repo()
            .find_by_post_id(&post.id, SortDirection::Descending)
            .await?;
        Ok(PostResponse::new(&post, &comments))
    }

    #[instrument(skip(self, content))]
    pub async fn create(&self, author_username: &str, title: &str, content: &str) -> ServiceResult<Post> {
        let author = MemberService::new(self.ctx)
            .find_by_username(author_username)
            .await?;

        let post = self
            .ctx
            .post_repo()
            .create(NewPost::new(author, title, content))
            .await?;

        info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    #[instrument(skip(self, content))]
    pub async fn add_comment(
        &self,
        post_id: &str,
        author_username: &str,
        content: &str,
    ) -> ServiceResult<Comment> {
        let author = self.requester(author_username).await?;
        let post = self.find_post(post_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .create(NewComment::new(author, &post.id, content))
            .await?;

        if let Err(e) = self
            .ctx
            .post_repo()
            .append_comment_id(&post.id, &comment.id)
            .await
        {
            warn!(post_id = %post.id, comment_id = %comment.id, error = %e, "Failed to record comment id on post");
        }

        info!(post_id = %post.id, comment_id = %comment.id, "Comment added");
        Ok(comment)
    }

    /// Delete a post. Admins may delete any post; everyone else only their
    /// own, and a non-matching request deletes nothing.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, requesting_username: &str, post_id: &str) -> ServiceResult<DeleteOutcome> {
        let requester = self.requester(requesting_username).await?;
        let repo = self.ctx.post_repo();

        let deleted = if requester.is_admin() {
            repo.delete_by_id(post_id).await?
        } else {
            repo.delete_by_id_and_author(post_id, requester.member_id)
                .await?
        };

        Ok(Self::outcome(deleted, "post", post_id))
    }

    /// Delete a comment, with the same ownership rule as posts
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        requesting_username: &str,
        comment_id: &str,
    ) -> ServiceResult<DeleteOutcome> {
        let requester = self.requester(requesting_username).await?;
        let repo = self.ctx.comment_repo();

        let deleted = if requester.is_admin() {
            repo.delete_by_id(comment_id).await?
        } else {
            repo.delete_by_id_and_author(comment_id, requester.member_id)
                .await?
        };

        Ok(Self::outcome(deleted, "comment", comment_id))
    }

    async fn find_post(&self, post_id: &str) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::application(POST_NOT_FOUND))
    }

    async fn requester(&self, username: &str) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found(INVALID_MEMBER_ID))
    }

    fn outcome(deleted: bool, kind: &str, id: &str) -> DeleteOutcome {
        let outcome = DeleteOutcome::from_affected(deleted);
        if outcome.is_deleted() {
            info!(kind, id, "Deleted");
        } else {
            debug!(kind, id, "Nothing deleted: no matching record owned by the requester");
        }
        outcome
    }
}
