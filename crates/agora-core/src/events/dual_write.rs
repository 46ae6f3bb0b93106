//! Dual-write events - emitted when the identity provider and the member store diverge
//!
//! Registration, profile updates and role elevation write to the identity
//! provider first and to the local store second, without a distributed
//! transaction. When the second write fails the first is not undone; a
//! `DualWriteGap` records that fact so a reconciler can act on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which dual-write protocol left the systems out of step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DualWriteOperation {
    /// Identity provider user exists, local member was never stored
    Registration,
    /// Identity provider profile is ahead of the local member
    ProfileUpdate,
    /// Identity provider grants admin, local member still says user
    RoleElevation,
}

impl DualWriteOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "REGISTRATION",
            Self::ProfileUpdate => "PROFILE_UPDATE",
            Self::RoleElevation => "ROLE_ELEVATION",
        }
    }
}

/// A pending reconciliation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualWriteGap {
    pub operation: DualWriteOperation,
    pub username: String,
    /// Why the local write failed
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl DualWriteGap {
    pub fn new(
        operation: DualWriteOperation,
        username: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            username: username.into(),
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }
}
