use async_trait::async_trait;

use crate::error::NotifyResult;

/// Delivers one change notification to the fan-out channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, message: &str) -> NotifyResult<()>;
}
