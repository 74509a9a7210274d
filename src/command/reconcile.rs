//! Reconciliation - applies execution reports from the polling client

use crate::command::action::Action;
use crate::command::journal::{BoundedLog, ExecutionReportEntry};
use crate::command::queue::CommandQueue;
use crate::core::error::Result;
use crate::core::types::{ActionId, Timestamp};

/// An execution outcome as reported by the browser extension
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub action_id: ActionId,
    pub succeeded: bool,
    pub message: String,
    /// Client-side execution time, if the client sent a parseable one
    pub executed_at: Option<Timestamp>,
    pub source: String,
}

/// Applies reports to the queue and records them in the history
pub struct ReconciliationReporter;

impl ReconciliationReporter {
    /// Mark the action executed, then append to the history
    ///
    /// An unknown action id fails before anything is mutated, so the
    /// history only ever holds reports that matched a queued action.
    pub fn apply(
        queue: &mut CommandQueue,
        history: &mut BoundedLog<ExecutionReportEntry>,
        report: ExecutionReport,
        reported_at: Timestamp,
    ) -> Result<Action> {
        let executed_at = report.executed_at.unwrap_or(reported_at);
        let updated = queue
            .mark_executed(
                &report.action_id,
                report.succeeded,
                report.message.clone(),
                executed_at,
            )?
            .clone();

        history.append(ExecutionReportEntry {
            action_id: report.action_id,
            succeeded: report.succeeded,
            message: report.message,
            executed_at: report.executed_at,
            reported_at,
            source: report.source,
        });

        tracing::info!(
            command_id = %updated.id,
            succeeded = report.succeeded,
            "command execution reported"
        );
        Ok(updated)
    }
}
