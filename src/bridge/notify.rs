//! Voice-context notification hook
//!
//! After every upload the voice agent can be told which names it may hear.
//! Delivery is best effort: failures are logged and never reach the
//! upload response.

use crate::core::error::Result;
use crate::core::types::RequestId;
use async_trait::async_trait;

#[async_trait]
pub trait VoiceContextNotifier: Send + Sync {
    async fn candidates_updated(&self, request_id: &RequestId, names: &[String]) -> Result<()>;
}

/// Default notifier: records the update in the log and nothing else
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl VoiceContextNotifier for LogNotifier {
    async fn candidates_updated(&self, request_id: &RequestId, names: &[String]) -> Result<()> {
        tracing::info!(
            request_id = %request_id,
            candidates = %names.join(", "),
            "voice context updated"
        );
        Ok(())
    }
}
