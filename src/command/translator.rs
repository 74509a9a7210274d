//! Intent translation - turns voice text into shortlist proposals
//!
//! Two paths:
//! - Backend: the LLM reads the candidate listing and replies with JSON
//! - Fallback: deterministic keyword + substring matching
//!
//! A backend failure of any kind (transport, status, timeout, unparseable
//! reply) is never surfaced. It is logged and the fallback result is
//! returned instead, tagged so callers can tell the two apart.
//!
//! Known limitation: the fallback only ever emits `add`. There is no
//! remove detection without the backend.

use crate::candidates::CandidateRecord;
use crate::command::action::{ProposedAction, ShortlistOperation};
use crate::core::config::TranslatorConfig;
use crate::core::error::BridgeError;
use crate::llm::client::CompletionBackend;
use crate::llm::context::CandidateContext;
use crate::llm::parser::request_translation;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Interpretation plus the actions it implies; empty actions means
/// "no actionable intent detected"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub interpretation: String,
    pub actions: Vec<ProposedAction>,
}

/// Which path produced a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationSource {
    Backend,
    Fallback,
}

/// Why the fallback path ran
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// No backend configured
    NoBackend,
    /// Backend configured but the call or its reply was unusable
    BackendFailed(String),
}

/// Translation result with its provenance
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    Backend(TranslationResult),
    Fallback {
        result: TranslationResult,
        reason: FallbackReason,
    },
}

impl TranslationOutcome {
    pub fn result(&self) -> &TranslationResult {
        match self {
            Self::Backend(result) => result,
            Self::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> TranslationResult {
        match self {
            Self::Backend(result) => result,
            Self::Fallback { result, .. } => result,
        }
    }

    pub fn source(&self) -> TranslationSource {
        match self {
            Self::Backend(_) => TranslationSource::Backend,
            Self::Fallback { .. } => TranslationSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Translates voice text against a candidate snapshot
pub struct IntentTranslator {
    backend: Option<Arc<dyn CompletionBackend>>,
    config: TranslatorConfig,
    timeout: Duration,
}

impl IntentTranslator {
    pub fn new(
        backend: Option<Arc<dyn CompletionBackend>>,
        config: TranslatorConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            config,
            timeout,
        }
    }

    /// Translator that always uses keyword matching
    pub fn fallback_only(config: TranslatorConfig) -> Self {
        Self::new(None, config, Duration::from_secs(1))
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_label(&self) -> Option<String> {
        self.backend.as_ref().map(|b| b.describe())
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `text` against `entities`
    ///
    /// Holds no locks; callers pass an owned snapshot.
    pub async fn translate(&self, text: &str, entities: &[CandidateRecord]) -> TranslationOutcome {
        let Some(backend) = &self.backend else {
            return TranslationOutcome::Fallback {
                result: self.fallback(text, entities),
                reason: FallbackReason::NoBackend,
            };
        };

        let context = CandidateContext::from_snapshot(entities);
        let call = request_translation(backend.as_ref(), text, &context);
        let reply = match tokio::time::timeout(self.timeout, call).await {
            Ok(reply) => reply,
            Err(_) => Err(BridgeError::Translation(format!(
                "backend timed out after {:?}",
                self.timeout
            ))),
        };

        match reply {
            Ok(reply) => {
                let actions: Vec<ProposedAction> =
                    reply.actions.into_iter().map(ProposedAction::from).collect();
                let actions = if self.config.strict_target_names {
                    retain_known_targets(actions, entities)
                } else {
                    actions
                };
                tracing::info!(actions = actions.len(), "backend translation");
                TranslationOutcome::Backend(TranslationResult {
                    interpretation: reply.interpretation,
                    actions,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "translation backend failed, using keyword fallback");
                TranslationOutcome::Fallback {
                    result: self.fallback(text, entities),
                    reason: FallbackReason::BackendFailed(e.to_string()),
                }
            }
        }
    }

    /// Deterministic keyword translation
    pub fn fallback(&self, text: &str, entities: &[CandidateRecord]) -> TranslationResult {
        let actions = keyword_match(
            text,
            entities,
            &self.config.trigger_keywords,
            self.config.fallback_confidence,
        );
        tracing::info!(actions = actions.len(), "fallback translation");
        TranslationResult {
            interpretation: format!("Fallback processing: \"{}\"", text),
            actions,
        }
    }
}

/// Emit an `add` for every candidate whose name appears in the text
///
/// Matching is case-insensitive substring search and only runs when at
/// least one trigger keyword is present. Names are copied from `entities`,
/// never from the text.
pub fn keyword_match(
    text: &str,
    entities: &[CandidateRecord],
    trigger_keywords: &[String],
    confidence: f32,
) -> Vec<ProposedAction> {
    let lower = text.to_lowercase();
    let triggered = trigger_keywords
        .iter()
        .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()));
    if !triggered {
        return Vec::new();
    }

    entities
        .iter()
        .filter(|r| lower.contains(&r.name.to_lowercase()))
        .map(|r| ProposedAction::new(ShortlistOperation::Add, r.name.clone(), confidence))
        .collect()
}

fn retain_known_targets(
    actions: Vec<ProposedAction>,
    entities: &[CandidateRecord],
) -> Vec<ProposedAction> {
    actions
        .into_iter()
        .filter(|a| {
            let known = entities.iter().any(|r| r.name == a.target_name);
            if !known {
                tracing::warn!(target_name = %a.target_name, "dropping action for unknown candidate");
            }
            known
        })
        .collect()
}
