//! Dashboard snapshot types

use crate::command::{Action, ExecutionReportEntry, VoiceSubmission};
use crate::core::types::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub candidates: CandidatesPanel,
    pub voice_commands: VoicePanel,
    pub pending_commands: PendingPanel,
    pub execution_history: HistoryPanel,
    pub system_status: SystemStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesPanel {
    pub count: usize,
    pub names: Vec<String>,
    pub last_updated: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicePanel {
    /// Submissions currently held in the log
    pub total: usize,
    /// Submissions ever received, including evicted ones
    pub received: u64,
    pub recent: Vec<VoiceSubmission>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPanel {
    #[serde(rename = "unExecuted")]
    pub unexecuted: usize,
    pub recent: Vec<Action>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPanel {
    pub total: usize,
    pub recent: Vec<ExecutionReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub api_health: &'static str,
    pub started_at: Timestamp,
    pub last_activity: Timestamp,
    /// `backend` when a language model is configured, else `fallback-only`
    pub translation_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_backend: Option<String>,
}
