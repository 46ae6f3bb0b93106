//! Result of an ownership-scoped delete

use serde::Serialize;

/// What an owner-or-admin delete actually did
///
/// Non-admin deletes filter on the author, so a non-owner's request matches
/// nothing. Callers can tell the two cases apart; the HTTP layer answers 204
/// for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteOutcome {
    Deleted,
    NoMatchingOwnedRecord,
}

impl DeleteOutcome {
    /// Build from the number of rows a delete touched
    pub fn from_affected(affected: bool) -> Self {
        if affected {
            Self::Deleted
        } else {
            Self::NoMatchingOwnedRecord
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}
