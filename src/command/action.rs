//! Shortlist actions: what the translator proposes and what the queue holds

use crate::core::types::{ActionId, SubmissionId, Timestamp};
use serde::{Deserialize, Serialize};

/// The only kind of action the bridge knows how to queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Shortlist,
}

/// Whether a candidate goes onto or comes off the shortlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortlistOperation {
    Add,
    Remove,
}

/// An action as produced by translation, before it is queued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(rename = "action")]
    pub operation: ShortlistOperation,
    #[serde(rename = "candidateName")]
    pub target_name: String,
    pub confidence: f32,
}

impl ProposedAction {
    pub fn new(operation: ShortlistOperation, target_name: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind: ActionKind::Shortlist,
            operation,
            target_name: target_name.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// A queued action awaiting execution by the browser extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(rename = "action")]
    pub operation: ShortlistOperation,
    #[serde(rename = "candidateName")]
    pub target_name: String,
    pub confidence: f32,
    #[serde(rename = "voiceCommandId")]
    pub origin_submission_id: SubmissionId,
    pub created_at: Timestamp,
    pub executed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<bool>,
    #[serde(
        default,
        rename = "executionMessage",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcome_message: Option<String>,
}

impl Action {
    /// Materialize a proposal into a fresh, unexecuted action
    pub fn from_proposal(
        proposal: &ProposedAction,
        origin: SubmissionId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: ActionId::new(),
            kind: proposal.kind,
            operation: proposal.operation,
            target_name: proposal.target_name.clone(),
            confidence: proposal.confidence,
            origin_submission_id: origin,
            created_at,
            executed: false,
            executed_at: None,
            succeeded: None,
            outcome_message: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.executed
    }
}
