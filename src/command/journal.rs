//! Bounded observability logs: voice submissions and execution reports

use crate::command::translator::{TranslationResult, TranslationSource};
use crate::core::types::{ActionId, SubmissionId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ring buffer that keeps the most recent `capacity` entries
///
/// Appending past capacity evicts the oldest entry. O(1) per append.
#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
    total_appended: u64,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total_appended: 0,
        }
    }

    pub fn append(&mut self, entry: T) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.total_appended += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries ever appended, including evicted ones
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }
}

/// One voice request and what the translator made of it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSubmission {
    pub id: SubmissionId,
    pub text: String,
    pub received_at: Timestamp,
    pub source: String,
    pub translation_source: TranslationSource,
    pub translation: TranslationResult,
}

/// One execution report from the polling client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReportEntry {
    #[serde(rename = "commandId")]
    pub action_id: ActionId,
    #[serde(rename = "success")]
    pub succeeded: bool,
    pub message: String,
    /// When the client says it executed the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<Timestamp>,
    pub reported_at: Timestamp,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_log_evicts_oldest() {
        let mut log = BoundedLog::new(3);
        for i in 1..=4 {
            log.append(i);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(log.total_appended(), 4);
    }

    #[test]
    fn test_fifty_one_appends_keep_last_fifty() {
        let mut log = BoundedLog::new(50);
        for i in 0..51 {
            log.append(i);
        }
        assert_eq!(log.len(), 50);
        let kept: Vec<_> = log.iter().copied().collect();
        assert_eq!(kept, (1..51).collect::<Vec<_>>());
    }

    #[test]
    fn test_recent_window() {
        let mut log = BoundedLog::new(10);
        for i in 0..5 {
            log.append(i);
        }
        assert_eq!(log.recent(2).copied().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(log.recent(100).count(), 5);
    }

    #[test]
    fn test_zero_capacity_clamped_to_one() {
        let mut log = BoundedLog::new(0);
        log.append("a");
        log.append("b");
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bounded_log_keeps_most_recent_in_order(
                capacity in 1usize..64,
                items in proptest::collection::vec(any::<u32>(), 0..200),
            ) {
                let mut log = BoundedLog::new(capacity);
                for item in &items {
                    log.append(*item);
                }
                let expected: Vec<u32> =
                    items.iter().copied().skip(items.len().saturating_sub(capacity)).collect();
                prop_assert!(log.len() <= capacity);
                prop_assert_eq!(log.iter().copied().collect::<Vec<_>>(), expected);
            }
        }
    }
}
