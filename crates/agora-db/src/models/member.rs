//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub record_id: String,
    pub member_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
