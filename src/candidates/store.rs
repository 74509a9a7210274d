//! In-memory registry of the most recently uploaded candidates

use crate::candidates::record::CandidateRecord;
use crate::core::error::{BridgeError, Result};
use crate::core::types::Timestamp;

/// Holds exactly one snapshot: whatever the extension uploaded last
///
/// Every upload replaces the whole snapshot; there is no merge.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    records: Vec<CandidateRecord>,
    last_updated: Option<Timestamp>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot wholesale
    ///
    /// An empty batch is rejected and leaves the previous snapshot intact.
    pub fn replace_all(&mut self, records: Vec<CandidateRecord>, at: Timestamp) -> Result<()> {
        if records.is_empty() {
            return Err(BridgeError::validation(
                "Invalid candidates data - candidate list is empty",
            ));
        }
        self.records = records;
        self.last_updated = Some(at);
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<CandidateRecord> {
        self.records.clone()
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }
}
