//! Command queue - actions awaiting pickup by the browser extension

use crate::command::action::Action;
use crate::core::error::{BridgeError, Result};
use crate::core::types::{ActionId, Timestamp};
use std::collections::VecDeque;

/// Insertion-ordered list of actions
///
/// Actions are never removed by execution, only flagged. Growth is capped
/// by `retention`: past it the oldest action is dropped, executed or not.
#[derive(Debug, Clone)]
pub struct CommandQueue {
    actions: VecDeque<Action>,
    retention: usize,
}

impl CommandQueue {
    pub fn new(retention: usize) -> Self {
        Self {
            actions: VecDeque::new(),
            retention: retention.max(1),
        }
    }

    pub fn enqueue(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            if self.actions.len() >= self.retention {
                if let Some(dropped) = self.actions.pop_front() {
                    if dropped.is_pending() {
                        tracing::warn!(
                            command_id = %dropped.id,
                            "retention limit reached, dropping unexecuted command"
                        );
                    }
                }
            }
            self.actions.push_back(action);
        }
    }

    /// Unexecuted actions in insertion order
    pub fn list_pending(&self) -> Vec<Action> {
        self.actions.iter().filter(|a| a.is_pending()).cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_pending()).count()
    }

    /// Record an execution outcome
    ///
    /// `executed` follows `succeeded`: a failed action stays pending so the
    /// next poll hands it out again, with the failure still recorded. A
    /// repeated report for the same id overwrites the earlier outcome. An
    /// unknown id leaves the queue untouched.
    pub fn mark_executed(
        &mut self,
        id: &ActionId,
        succeeded: bool,
        message: impl Into<String>,
        at: Timestamp,
    ) -> Result<&Action> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| BridgeError::CommandNotFound(id.clone()))?;

        action.executed = succeeded;
        action.executed_at = Some(at);
        action.succeeded = Some(succeeded);
        action.outcome_message = Some(message.into());
        Ok(&*action)
    }

    pub fn get(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// The last `n` actions regardless of state, oldest first
    pub fn recent(&self, n: usize) -> Vec<Action> {
        self.actions
            .iter()
            .skip(self.actions.len().saturating_sub(n))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
