//! Repository traits (ports) - define the interface for data access
//!
//! The store is treated as collection-per-entity with lookups by field,
//! counts, inserts and deletes. Adapters live in `agora-db`.

use async_trait::async_trait;

use crate::entities::{
    Comment, Member, MemberIdentifier, NewComment, NewMember, NewPost, Post,
};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, SortDirection};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by business id
    async fn find_by_member_id(&self, member_id: i64) -> RepoResult<Option<Member>>;

    /// Find member by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>>;

    /// Find member by phone number (exact)
    async fn find_by_phone_number(&self, phone_number: &str) -> RepoResult<Option<Member>>;

    /// Find member by username (case-insensitive)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>>;

    /// Find member whose email or username equals the identifier (case-insensitive)
    async fn find_by_email_or_username(&self, identifier: &str) -> RepoResult<Option<Member>>;

    /// Find a member other than `exclude` that already owns the email
    /// (case-insensitive) or the phone number (exact)
    async fn find_conflicting(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
        exclude: &MemberIdentifier,
    ) -> RepoResult<Option<Member>>;

    /// List one page of members in member id order
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Member>>;

    /// List every member in member id order
    async fn list_all(&self) -> RepoResult<Vec<Member>>;

    /// Insert a member with `member_id = max(member_id) + 1`.
    ///
    /// Reading the maximum and inserting must happen atomically with respect
    /// to other calls of this method.
    async fn create_with_next_id(&self, member: NewMember) -> RepoResult<Member>;

    /// Persist changes to an existing member
    async fn update(&self, member: &Member) -> RepoResult<Member>;

    /// Delete by business id; the member's posts and comments are kept.
    /// Returns whether a member was removed.
    async fn delete_by_member_id(&self, member_id: i64) -> RepoResult<bool>;

    /// Total number of members
    async fn count(&self) -> RepoResult<i64>;

    /// Remove every member (seeding only)
    async fn delete_all(&self) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by id
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>>;

    /// List one page of posts in creation order
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Post>>;

    /// List every post in creation order
    async fn list_all(&self) -> RepoResult<Vec<Post>>;

    /// Posts written by a member, newest first
    async fn find_by_author(&self, member_id: i64) -> RepoResult<Vec<Post>>;

    /// Insert a new post
    async fn create(&self, post: NewPost) -> RepoResult<Post>;

    /// Append a comment id to the post's display list (no-op if the post is gone)
    async fn append_comment_id(&self, post_id: &str, comment_id: &str) -> RepoResult<()>;

    /// Replace the post's display list of comment ids
    async fn set_comment_ids(&self, post_id: &str, comment_ids: &[String]) -> RepoResult<()>;

    /// Delete by id. Returns whether a post was removed.
    async fn delete_by_id(&self, id: &str) -> RepoResult<bool>;

    /// Delete by id only if the post was written by `author_member_id`
    async fn delete_by_id_and_author(&self, id: &str, author_member_id: i64) -> RepoResult<bool>;

    /// Total number of posts
    async fn count(&self) -> RepoResult<i64>;

    /// Remove every post (seeding only)
    async fn delete_all(&self) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by id
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Comment>>;

    /// Comments attached to a post, ordered by creation time
    async fn find_by_post_id(&self, post_id: &str, order: SortDirection)
        -> RepoResult<Vec<Comment>>;

    /// Number of comments attached to a post
    async fn count_by_post_id(&self, post_id: &str) -> RepoResult<i64>;

    /// Insert a new comment
    async fn create(&self, comment: NewComment) -> RepoResult<Comment>;

    /// Delete by id. Returns whether a comment was removed.
    async fn delete_by_id(&self, id: &str) -> RepoResult<bool>;

    /// Delete by id only if the comment was written by `author_member_id`
    async fn delete_by_id_and_author(&self, id: &str, author_member_id: i64) -> RepoResult<bool>;

    /// Total number of comments
    async fn count(&self) -> RepoResult<i64>;

    /// Remove every comment (seeding only)
    async fn delete_all(&self) -> RepoResult<()>;
}
