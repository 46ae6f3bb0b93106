//! Errors raised by the stores

use thiserror::Error;

/// Store-level failure, classified so the upper layers can pick a status
#[derive(Debug, Error)]
pub enum DomainError {
    /// No member with the given id, username or contact
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// A rule on the stored data failed; the message is shown to callers
    #[error("{0}")]
    ValidationError(String),

    /// A unique column (member id, username, email, phone) already holds the value
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    /// Connection, query or mapping failure; never shown to callers
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Duplicate(_) => "DUPLICATE_VALUE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_) | Self::PostNotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(DomainError::PostNotFound("p1".into()).is_not_found());
        assert!(!DomainError::Duplicate("email".into()).is_not_found());
        assert!(DomainError::Duplicate("email".into()).is_conflict());
        assert!(DomainError::ValidationError("bad".into()).is_validation());
        assert_eq!(DomainError::Duplicate("email".into()).code(), "DUPLICATE_VALUE");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = DomainError::ValidationError("email should be unique".to_string());
        assert_eq!(err.to_string(), "email should be unique");
    }
}
