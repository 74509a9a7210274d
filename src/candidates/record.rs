//! Candidate records scraped by the browser extension

use crate::core::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named job candidate, the addressable target of shortlist actions
///
/// Only `name` is interpreted. Every other field the extension scrapes is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CandidateRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_title: None,
            location: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Validate an untyped upload payload into a batch of records
    ///
    /// The payload must be a non-empty array of objects, each with a
    /// non-blank string `name`, and names must be unique within the batch.
    /// Nothing is stored here; callers replace the store only on `Ok`.
    pub fn parse_batch(value: &serde_json::Value) -> Result<Vec<CandidateRecord>> {
        let items = value.as_array().ok_or_else(|| {
            BridgeError::validation(format!(
                "Invalid candidates data - expected array of candidates, received {}",
                json_type_name(value)
            ))
        })?;

        if items.is_empty() {
            return Err(BridgeError::validation(
                "Invalid candidates data - candidate list is empty",
            ));
        }

        let mut seen = HashSet::with_capacity(items.len());
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let record: CandidateRecord = serde_json::from_value(item.clone()).map_err(|e| {
                BridgeError::validation(format!("Invalid candidate at index {}: {}", index, e))
            })?;
            if record.name.trim().is_empty() {
                return Err(BridgeError::validation(format!(
                    "Invalid candidate at index {}: name is blank",
                    index
                )));
            }
            if !seen.insert(record.name.clone()) {
                return Err(BridgeError::validation(format!(
                    "Duplicate candidate name: {}",
                    record.name
                )));
            }
            records.push(record);
        }

        Ok(records)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
