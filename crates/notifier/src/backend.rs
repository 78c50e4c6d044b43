use async_trait::async_trait;

use crate::error::NotifyError;

/// Pluggable notification destination. Adding a delivery channel means
/// adding an implementation of this trait.
#[async_trait]
pub trait NotifySink: Send + Sync {
    /// Short identifier used in logs (e.g. "slack").
    fn name(&self) -> &'static str;

    /// Deliver one message. A single attempt; no retries.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
