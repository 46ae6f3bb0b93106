//! Comment entity - a reply to a post

use chrono::{DateTime, Utc};

use super::Member;

/// Comment entity
///
/// `post_id` is a plain key, not a relation; deleting a post leaves its comments behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub author: Member,
    pub post_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    #[inline]
    pub fn is_authored_by(&self, member_id: i64) -> bool {
        self.author.member_id == member_id
    }
}

/// A comment that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewComment {
    pub author: Member,
    pub post_id: String,
    pub content: String,
}

impl NewComment {
    pub fn new(author: Member, post_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author,
            post_id: post_id.into(),
            content: content.into(),
        }
    }

    pub fn into_comment(self, id: String) -> Comment {
        let now = Utc::now();
        Comment {
            id,
            author: self.author,
            post_id: self.post_id,
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}
