//! Default handling of dual-write gaps

use async_trait::async_trait;
use tracing::warn;

use agora_core::events::DualWriteGap;
use agora_core::traits::RegistrationReconciler;

/// Logs every gap at `warn` and takes no further action
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReconciler;

#[async_trait]
impl RegistrationReconciler for LoggingReconciler {
    async fn record_gap(&self, gap: DualWriteGap) {
        warn!(
            operation = gap.operation.as_str(),
            username = %gap.username,
            reason = %gap.reason,
            at = %gap.timestamp,
            "Identity provider and member store diverged"
        );
    }
}
