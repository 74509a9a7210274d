//! The bridge service: shared state plus the six operations the HTTP
//! layer exposes
//!
//! Locking rules:
//! - `entities` is read-locked only long enough to clone a snapshot
//! - `ledger` (queue, voice log, execution history) is one mutex so a
//!   voice submission and its actions land together
//! - no lock is held while the translation backend is in flight

use crate::bridge::dashboard::{
    CandidatesPanel, Dashboard, HistoryPanel, PendingPanel, SystemStatus, VoicePanel,
};
use crate::bridge::notify::{LogNotifier, VoiceContextNotifier};
use crate::candidates::{CandidateRecord, EntityStore};
use crate::command::{
    Action, BoundedLog, CommandQueue, ExecutionReport, ExecutionReportEntry, IntentTranslator,
    ReconciliationReporter, TranslationSource, VoiceSubmission,
};
use crate::core::config::BridgeConfig;
use crate::core::error::{BridgeError, Result};
use crate::core::types::{now, RequestId, SubmissionId, Timestamp};
use crate::llm::client::{CompletionBackend, LlmClient};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Queue and logs, guarded together
struct Ledger {
    queue: CommandQueue,
    voice_log: BoundedLog<VoiceSubmission>,
    history: BoundedLog<ExecutionReportEntry>,
    last_activity: Timestamp,
}

/// A validated upload, ready to replace the store
#[derive(Debug, Clone)]
pub struct UploadBatch {
    pub records: Vec<CandidateRecord>,
    pub source: Option<String>,
    pub page_url: Option<String>,
    pub uploaded_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub count: usize,
    pub names: Vec<String>,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct VoiceReceipt {
    pub submission_id: SubmissionId,
    pub received_at: Timestamp,
    pub source: TranslationSource,
    pub interpretation: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone)]
pub struct CandidateListing {
    pub candidates: Vec<CandidateRecord>,
    pub last_updated: Option<Timestamp>,
}

/// Application service shared by every request handler
pub struct Bridge {
    config: BridgeConfig,
    entities: RwLock<EntityStore>,
    ledger: Mutex<Ledger>,
    translator: IntentTranslator,
    notifier: Arc<dyn VoiceContextNotifier>,
    started_at: Timestamp,
}

impl Bridge {
    /// Build a bridge with an optional translation backend
    pub fn new(config: BridgeConfig, backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        let translator =
            IntentTranslator::new(backend, config.translator.clone(), config.llm_timeout());
        let started_at = now();
        let ledger = Ledger {
            queue: CommandQueue::new(config.command_retention),
            voice_log: BoundedLog::new(config.voice_log_capacity),
            history: BoundedLog::new(config.execution_history_capacity),
            last_activity: started_at,
        };
        Self {
            config,
            entities: RwLock::new(EntityStore::new()),
            ledger: Mutex::new(ledger),
            translator,
            notifier: Arc::new(LogNotifier),
            started_at,
        }
    }

    /// Build a bridge whose backend comes from `LLM_*` environment variables
    ///
    /// A missing key is not an error: the bridge runs fallback-only.
    pub fn from_env(config: BridgeConfig) -> Result<Self> {
        let backend: Option<Arc<dyn CompletionBackend>> = match LlmClient::from_env(&config.llm) {
            Ok(client) => {
                tracing::info!(model = client.model(), "translation backend configured");
                Some(Arc::new(client))
            }
            Err(BridgeError::Config(reason)) => {
                tracing::warn!(%reason, "no translation backend, keyword fallback only");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self::new(config, backend))
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn VoiceContextNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn has_backend(&self) -> bool {
        self.translator.has_backend()
    }

    /// Replace the candidate snapshot and notify the voice agent
    pub async fn upload_candidates(
        &self,
        request_id: &RequestId,
        batch: UploadBatch,
    ) -> Result<UploadReceipt> {
        let uploaded_at = batch.uploaded_at.unwrap_or_else(now);
        let names: Vec<String> = batch.records.iter().map(|r| r.name.clone()).collect();
        let count = batch.records.len();

        self.entities
            .write()
            .await
            .replace_all(batch.records, uploaded_at)?;
        self.touch().await;

        tracing::info!(
            request_id = %request_id,
            count,
            source = batch.source.as_deref().unwrap_or("unknown"),
            page_url = batch.page_url.as_deref().unwrap_or(""),
            "stored candidates"
        );

        let notifier = Arc::clone(&self.notifier);
        let notify_names = names.clone();
        let notify_request = request_id.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier
                .candidates_updated(&notify_request, &notify_names)
                .await
            {
                tracing::warn!(request_id = %notify_request, error = %e, "voice context update failed");
            }
        });

        Ok(UploadReceipt {
            count,
            names,
            uploaded_at,
        })
    }

    /// Translate a voice command and queue the resulting actions
    pub async fn process_voice(
        &self,
        request_id: &RequestId,
        text: &str,
        source: Option<String>,
    ) -> Result<VoiceReceipt> {
        if text.trim().is_empty() {
            return Err(BridgeError::validation("Missing voice text"));
        }
        let received_at = now();

        let snapshot = self.entities.read().await.snapshot();
        let outcome = self.translator.translate(text, &snapshot).await;
        let translation_source = outcome.source();
        let translation = outcome.into_result();

        let submission = VoiceSubmission {
            id: SubmissionId::new(),
            text: text.to_string(),
            received_at,
            source: source.unwrap_or_else(|| "voice-agent".to_string()),
            translation_source,
            translation: translation.clone(),
        };
        let actions: Vec<Action> = translation
            .actions
            .iter()
            .map(|p| Action::from_proposal(p, submission.id.clone(), received_at))
            .collect();
        let submission_id = submission.id.clone();

        {
            let mut ledger = self.ledger.lock().await;
            ledger.voice_log.append(submission);
            ledger.queue.enqueue(actions.iter().cloned());
            ledger.last_activity = received_at;
        }

        tracing::info!(
            request_id = %request_id,
            voice_command_id = %submission_id,
            source = ?translation_source,
            commands = actions.len(),
            "voice command processed"
        );

        Ok(VoiceReceipt {
            submission_id,
            received_at,
            source: translation_source,
            interpretation: translation.interpretation,
            actions,
        })
    }

    pub async fn list_candidates(&self) -> CandidateListing {
        let store = self.entities.read().await;
        CandidateListing {
            candidates: store.snapshot(),
            last_updated: store.last_updated(),
        }
    }

    pub async fn pending_commands(&self) -> Vec<Action> {
        self.ledger.lock().await.queue.list_pending()
    }

    /// Apply an execution report; unknown ids are `CommandNotFound`
    pub async fn report_execution(&self, report: ExecutionReport) -> Result<Action> {
        let mut ledger = self.ledger.lock().await;
        let ledger = &mut *ledger;
        let reported_at = now();
        let action = ReconciliationReporter::apply(
            &mut ledger.queue,
            &mut ledger.history,
            report,
            reported_at,
        )?;
        ledger.last_activity = reported_at;
        Ok(action)
    }

    /// Voice log contents, oldest first
    pub async fn voice_log(&self) -> Vec<VoiceSubmission> {
        self.ledger.lock().await.voice_log.iter().cloned().collect()
    }

    /// Execution history contents, oldest first
    pub async fn execution_history(&self) -> Vec<ExecutionReportEntry> {
        self.ledger.lock().await.history.iter().cloned().collect()
    }

    pub async fn dashboard(&self) -> Dashboard {
        let window = self.config.dashboard_recent;
        let candidates = {
            let store = self.entities.read().await;
            CandidatesPanel {
                count: store.len(),
                names: store.names(),
                last_updated: store.last_updated(),
            }
        };

        let ledger = self.ledger.lock().await;
        Dashboard {
            candidates,
            voice_commands: VoicePanel {
                total: ledger.voice_log.len(),
                received: ledger.voice_log.total_appended(),
                recent: ledger.voice_log.recent(window).cloned().collect(),
            },
            pending_commands: PendingPanel {
                unexecuted: ledger.queue.pending_count(),
                recent: ledger.queue.recent(window),
            },
            execution_history: HistoryPanel {
                total: ledger.history.len(),
                recent: ledger.history.recent(window).cloned().collect(),
            },
            system_status: SystemStatus {
                api_health: "online",
                started_at: self.started_at,
                last_activity: ledger.last_activity,
                translation_mode: if self.has_backend() {
                    "backend"
                } else {
                    "fallback-only"
                },
                translation_backend: self.translator.backend_label(),
            },
        }
    }

    async fn touch(&self) {
        self.ledger.lock().await.last_activity = now();
    }
}
