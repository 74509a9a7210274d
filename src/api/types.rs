//! API request/response types

use crate::bridge::Dashboard;
use crate::candidates::CandidateRecord;
use crate::command::{Action, ExecutionReportEntry, TranslationSource, VoiceSubmission};
use crate::core::types::{RequestId, Timestamp};
use serde::{Deserialize, Serialize};

/// Upload request from the browser extension
///
/// `candidates` stays untyped here so a wrong shape becomes a
/// validation message instead of a generic body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub candidates: serde_json::Value,
    pub source: Option<String>,
    pub page_url: Option<String>,
    /// RFC 3339 time of the scrape
    pub timestamp: Option<String>,
}

/// Voice command request from the voice agent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    pub voice_text: Option<String>,
    pub metadata: Option<VoiceMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoiceMetadata {
    pub source: Option<String>,
}

/// Execution report from the browser extension
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub command_id: Option<String>,
    /// Missing means the client did not confirm success
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// RFC 3339 time the client executed the command
    pub timestamp: Option<String>,
    pub source: Option<String>,
}

/// Every successful response: payload plus correlation fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
    pub request_id: RequestId,
    pub timestamp: Timestamp,
}

impl<T> Envelope<T> {
    pub fn ok(request_id: RequestId, data: T) -> Self {
        Self {
            success: true,
            data,
            request_id,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub request_id: RequestId,
    pub timestamp: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub candidates_received: usize,
    pub candidate_names: Vec<String>,
    pub source: Option<String>,
    pub page_url: Option<String>,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub voice_command_id: String,
    pub voice_text: String,
    pub interpretation: String,
    pub actions: Vec<Action>,
    pub commands_generated: usize,
    pub translation_source: TranslationSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateRecord>,
    pub count: usize,
    pub last_updated: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingResponse {
    pub commands: Vec<Action>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub message: String,
    pub command_id: String,
    pub command: Action,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub dashboard: Dashboard,
}

#[derive(Debug, Serialize)]
pub struct VoiceHistoryResponse {
    pub commands: Vec<VoiceSubmission>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ExecutionHistoryResponse {
    pub reports: Vec<ExecutionReportEntry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    pub status: &'static str,
    pub translation_mode: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// Parse an optional client timestamp; unparseable values are ignored
pub fn parse_client_timestamp(raw: Option<&str>) -> Option<Timestamp> {
    raw.and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_timestamp() {
        let parsed = parse_client_timestamp(Some("2024-05-01T12:30:00+02:00")).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T10:30:00+00:00");
        assert!(parse_client_timestamp(Some("yesterday")).is_none());
        assert!(parse_client_timestamp(None).is_none());
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let envelope = Envelope::ok(
            RequestId("req_1".into()),
            PendingResponse {
                commands: Vec::new(),
                count: 0,
            },
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 0);
        assert_eq!(value["requestId"], "req_1");
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_report_request_defaults() {
        let request: ReportRequest = serde_json::from_str(r#"{"commandId": "cmd_1"}"#).unwrap();
        assert_eq!(request.command_id.as_deref(), Some("cmd_1"));
        assert!(!request.success);
        assert!(request.message.is_none());
    }
}
