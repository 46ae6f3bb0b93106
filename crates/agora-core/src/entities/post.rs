//! Post entity - an article authored by a member

use chrono::{DateTime, Utc};

use super::Member;

/// Post entity
///
/// `comment_ids` is a display hint only. Which comments belong to a post is
/// decided by `Comment::post_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub author: Member,
    pub title: String,
    pub content: String,
    pub comment_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check if the given member wrote this post
    #[inline]
    pub fn is_authored_by(&self, member_id: i64) -> bool {
        self.author.member_id == member_id
    }
}

/// A post that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: Member,
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(author: Member, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Materialize with a store-assigned id and an empty comment list
    pub fn into_post(self, id: String) -> Post {
        let now = Utc::now();
        Post {
            id,
            author: self.author,
            title: self.title,
            content: self.content,
            comment_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
