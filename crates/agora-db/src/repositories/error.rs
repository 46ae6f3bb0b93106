//! Error handling utilities for repositories

use agora_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map unique violations on the members table to a `Duplicate` naming the field
pub fn map_member_write_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("members_username_lower_key") => "username",
                Some("members_email_lower_key") => "email",
                Some("members_phone_number_key") => "phone number",
                Some("members_member_id_key") => "member id",
                _ => "member",
            };
            return DomainError::Duplicate(field.to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "member not found" error
pub fn member_not_found(member_id: i64) -> DomainError {
    DomainError::MemberNotFound(member_id.to_string())
}
