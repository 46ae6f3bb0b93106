//! Reconciliation port for dual-write gaps

use async_trait::async_trait;

use crate::events::DualWriteGap;

/// Receives a record every time the identity provider accepted a write and
/// the local store then failed to follow.
///
/// Implementations may retry, compensate or just persist the gap for later;
/// the caller has already failed the request and does not wait on the outcome.
#[async_trait]
pub trait RegistrationReconciler: Send + Sync {
    async fn record_gap(&self, gap: DualWriteGap);
}
