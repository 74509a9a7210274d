//! Service configuration with documented defaults
//!
//! All tunable numbers are collected here. Values come from an optional
//! TOML file, then a small set of environment overrides. Backend
//! credentials are never part of this struct; see `LlmClient::from_env`.

use crate::core::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the bridge service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // === SERVER ===
    /// Address the HTTP server binds to
    pub bind_addr: String,

    // === RETENTION ===
    /// Maximum voice submissions kept in the voice log
    ///
    /// Oldest entries are evicted first once the cap is reached.
    pub voice_log_capacity: usize,

    /// Maximum execution reports kept in the execution history
    pub execution_history_capacity: usize,

    /// Maximum actions kept in the command queue
    ///
    /// The queue only ever grows on voice submissions. Past this bound the
    /// oldest actions are dropped, so a pending action older than
    /// `command_retention` newer actions can be lost.
    pub command_retention: usize,

    /// Length of the "recent" windows shown on the dashboard
    pub dashboard_recent: usize,

    // === SUBSYSTEMS ===
    pub translator: TranslatorConfig,
    pub llm: LlmConfig,
}

/// Tunables for the intent translator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Confidence assigned to every action produced by keyword matching
    pub fallback_confidence: f32,

    /// Words that must appear in the utterance before keyword matching
    /// emits anything
    pub trigger_keywords: Vec<String>,

    /// Drop backend actions whose target is not a known candidate name
    ///
    /// Off by default: the model is trusted to copy names from the list.
    pub strict_target_names: bool,
}

/// Tunables for the language-model backend call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            voice_log_capacity: 50,
            execution_history_capacity: 50,
            command_retention: 500,
            dashboard_recent: 10,
            translator: TranslatorConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            fallback_confidence: 0.7,
            trigger_keywords: vec!["shortlist".to_string(), "add".to_string()],
            strict_target_names: false,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            max_tokens: 500,
            temperature: 0.1,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from an optional TOML file, then apply env overrides
    ///
    /// Recognised variables: `BRIDGE_BIND_ADDR`, `BRIDGE_STRICT_TARGETS`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Self::parse_toml(&content)?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("BRIDGE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Ok(flag) = std::env::var("BRIDGE_STRICT_TARGETS") {
            self.translator.strict_target_names =
                matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.voice_log_capacity == 0
            || self.execution_history_capacity == 0
            || self.command_retention == 0
        {
            return Err(BridgeError::Config(
                "log capacities and command retention must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.translator.fallback_confidence) {
            return Err(BridgeError::Config(format!(
                "fallback_confidence must be within [0, 1], got {}",
                self.translator.fallback_confidence
            )));
        }
        if self.llm.timeout_secs == 0 {
            return Err(BridgeError::Config("llm.timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn llm_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.llm.timeout_secs)
    }
}
