//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wall-clock instant, always UTC
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current wall-clock time
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

fn token(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Unique identifier for a queued shortlist action
///
/// Opaque to clients: the browser extension echoes it back verbatim
/// when it reports execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(token("cmd"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a voice submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn new() -> Self {
        Self(token("voice"))
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request correlation token, echoed in every response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        Self(token("req"))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_prefixed_and_unique() {
        let a = ActionId::new();
        let b = ActionId::new();
        assert!(a.as_str().starts_with("cmd_"));
        assert_ne!(a, b);
        assert!(SubmissionId::new().0.starts_with("voice_"));
        assert!(RequestId::new().0.starts_with("req_"));
    }

    #[test]
    fn test_action_id_serializes_as_plain_string() {
        let id = ActionId::from("cmd_abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cmd_abc\"");
    }
}
