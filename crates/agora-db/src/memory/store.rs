//! Shared in-memory document store
//!
//! One lock guards all three collections. Posts and comments keep a reference
//! to their author's member id and are hydrated with the current member on
//! read. Deleting a member leaves their posts and comments stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use agora_core::entities::{Comment, Member, Post};

#[derive(Debug, Clone)]
pub(crate) struct PostRecord {
    pub id: String,
    pub author_member_id: i64,
    pub title: String,
    pub content: String,
    pub comment_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CommentRecord {
    pub id: String,
    pub author_member_id: i64,
    pub post_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collections in insertion order
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub members: Vec<Member>,
    pub posts: Vec<PostRecord>,
    pub comments: Vec<CommentRecord>,
}

impl Collections {
    pub fn member(&self, member_id: i64) -> Option<&Member> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    /// Resolve a post's author; records whose author vanished are skipped
    pub fn hydrate_post(&self, record: &PostRecord) -> Option<Post> {
        let author = self.member(record.author_member_id)?.clone();
        Some(Post {
            id: record.id.clone(),
            author,
            title: record.title.clone(),
            content: record.content.clone(),
            comment_ids: record.comment_ids.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn hydrate_comment(&self, record: &CommentRecord) -> Option<Comment> {
        let author = self.member(record.author_member_id)?.clone();
        Some(Comment {
            id: record.id.clone(),
            author,
            post_id: record.post_id.clone(),
            content: record.content.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Handle to the shared collections; clones share the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub(crate) inner: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members, posts and comments held
    pub fn sizes(&self) -> (usize, usize, usize) {
        let data = self.inner.read();
        (data.members.len(), data.posts.len(), data.comments.len())
    }
}
