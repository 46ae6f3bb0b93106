//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A comments row joined with its author's members row
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_record_id: String,
    pub author_member_id: i64,
    pub author_username: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub author_email: String,
    pub author_phone_number: String,
    pub author_role: String,
    pub author_created_at: DateTime<Utc>,
    pub author_updated_at: DateTime<Utc>,
}
