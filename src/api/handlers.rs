//! API request handlers
//!
//! Each handler mints a request id, validates its input completely, and
//! only then calls into the bridge. Validation failures never mutate state.

use crate::api::error::ApiError;
use crate::api::types::{
    parse_client_timestamp, CandidateListResponse, DashboardResponse, Envelope,
    ExecutionHistoryResponse, IndexResponse, PendingResponse, ReportRequest, ReportResponse,
    UploadRequest, UploadResponse, VoiceHistoryResponse, VoiceRequest, VoiceResponse,
};
use crate::bridge::{Bridge, UploadBatch};
use crate::candidates::CandidateRecord;
use crate::command::ExecutionReport;
use crate::core::error::BridgeError;
use crate::core::types::{ActionId, RequestId};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::Instrument;

type Shared = State<Arc<Bridge>>;
type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

pub const ENDPOINTS: &[&str] = &[
    "POST /api/candidates/upload - Upload candidate data from the browser extension",
    "POST /api/candidates/voice/process - Translate a voice command into shortlist commands",
    "GET /api/candidates/voice/recent - Recent voice commands and their translations",
    "GET /api/candidates/list - Current candidate list",
    "GET /api/candidates/commands/pending - Unexecuted shortlist commands",
    "POST /api/candidates/commands/report - Report command execution",
    "GET /api/candidates/commands/history - Recent execution reports",
    "GET /api/candidates/dashboard - Monitoring summary",
];

/// OPTIONS on any route
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// GET /api/candidates - service description
pub async fn index(State(bridge): Shared) -> Json<Envelope<IndexResponse>> {
    Json(Envelope::ok(
        RequestId::new(),
        IndexResponse {
            status: "Shortlist bridge: candidate upload, voice commands, command queue",
            translation_mode: if bridge.has_backend() {
                "backend"
            } else {
                "fallback-only"
            },
            endpoints: ENDPOINTS.to_vec(),
        },
    ))
}

/// POST /api/candidates/upload - replace the candidate snapshot
pub async fn upload_candidates(
    State(bridge): Shared,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> ApiResult<UploadResponse> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("upload", request_id = %request_id);
    async move {
        let Json(request) = payload.map_err(|e| ApiError::rejected(&request_id, e))?;
        let records = CandidateRecord::parse_batch(&request.candidates)
            .map_err(|e| ApiError::new(&request_id, e))?;

        let batch = UploadBatch {
            records,
            source: request.source.clone(),
            page_url: request.page_url.clone(),
            uploaded_at: parse_client_timestamp(request.timestamp.as_deref()),
        };
        let receipt = bridge
            .upload_candidates(&request_id, batch)
            .await
            .map_err(|e| ApiError::new(&request_id, e))?;

        Ok::<_, ApiError>(Json(Envelope::ok(
            request_id.clone(),
            UploadResponse {
                message: format!("Successfully received {} candidates", receipt.count),
                candidates_received: receipt.count,
                candidate_names: receipt.names,
                source: request.source,
                page_url: request.page_url,
                uploaded_at: receipt.uploaded_at,
            },
        )))
    }
    .instrument(span)
    .await
}

/// POST /api/candidates/voice/process - translate and queue a voice command
pub async fn process_voice(
    State(bridge): Shared,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> ApiResult<VoiceResponse> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("voice", request_id = %request_id);
    async move {
        let Json(request) = payload.map_err(|e| ApiError::rejected(&request_id, e))?;
        let voice_text = request
            .voice_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ApiError::new(&request_id, BridgeError::validation("Missing voice text"))
            })?;
        let source = request.metadata.and_then(|m| m.source);

        let receipt = bridge
            .process_voice(&request_id, &voice_text, source)
            .await
            .map_err(|e| ApiError::new(&request_id, e))?;

        Ok::<_, ApiError>(Json(Envelope::ok(
            request_id.clone(),
            VoiceResponse {
                voice_command_id: receipt.submission_id.to_string(),
                voice_text,
                interpretation: receipt.interpretation,
                commands_generated: receipt.actions.len(),
                actions: receipt.actions,
                translation_source: receipt.source,
            },
        )))
    }
    .instrument(span)
    .await
}

/// GET /api/candidates/voice/recent - voice log, oldest first
pub async fn voice_history(State(bridge): Shared) -> Json<Envelope<VoiceHistoryResponse>> {
    let commands = bridge.voice_log().await;
    Json(Envelope::ok(
        RequestId::new(),
        VoiceHistoryResponse {
            count: commands.len(),
            commands,
        },
    ))
}

/// GET /api/candidates/list - current snapshot
pub async fn list_candidates(State(bridge): Shared) -> Json<Envelope<CandidateListResponse>> {
    let listing = bridge.list_candidates().await;
    Json(Envelope::ok(
        RequestId::new(),
        CandidateListResponse {
            count: listing.candidates.len(),
            candidates: listing.candidates,
            last_updated: listing.last_updated,
        },
    ))
}

/// GET /api/candidates/commands/pending - what the extension should run next
pub async fn pending_commands(State(bridge): Shared) -> Json<Envelope<PendingResponse>> {
    let request_id = RequestId::new();
    let commands = bridge.pending_commands().await;
    tracing::debug!(request_id = %request_id, count = commands.len(), "pending commands polled");
    Json(Envelope::ok(
        request_id,
        PendingResponse {
            count: commands.len(),
            commands,
        },
    ))
}

/// POST /api/candidates/commands/report - record an execution outcome
pub async fn report_execution(
    State(bridge): Shared,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResult<ReportResponse> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("report", request_id = %request_id);
    async move {
        let Json(request) = payload.map_err(|e| ApiError::rejected(&request_id, e))?;
        let command_id = request
            .command_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApiError::new(&request_id, BridgeError::validation("Missing commandId")))?;

        let report = ExecutionReport {
            action_id: ActionId(command_id.clone()),
            succeeded: request.success,
            message: request.message.unwrap_or_default(),
            executed_at: parse_client_timestamp(request.timestamp.as_deref()),
            source: request.source.unwrap_or_else(|| "unknown".to_string()),
        };
        let command = bridge
            .report_execution(report)
            .await
            .map_err(|e| ApiError::new(&request_id, e))?;

        Ok::<_, ApiError>(Json(Envelope::ok(
            request_id.clone(),
            ReportResponse {
                message: "Command execution report received".to_string(),
                command_id,
                command,
            },
        )))
    }
    .instrument(span)
    .await
}

/// GET /api/candidates/commands/history - recent execution reports
pub async fn execution_history(State(bridge): Shared) -> Json<Envelope<ExecutionHistoryResponse>> {
    let reports = bridge.execution_history().await;
    Json(Envelope::ok(
        RequestId::new(),
        ExecutionHistoryResponse {
            count: reports.len(),
            reports,
        },
    ))
}

/// GET /api/candidates/dashboard - monitoring summary
pub async fn dashboard(State(bridge): Shared) -> Json<Envelope<DashboardResponse>> {
    Json(Envelope::ok(
        RequestId::new(),
        DashboardResponse {
            dashboard: bridge.dashboard().await,
        },
    ))
}
