use thiserror::Error;

use crate::core::types::ActionId;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// Client supplied a missing or malformed field
    #[error("{0}")]
    Validation(String),

    #[error("Command not found: {0}")]
    CommandNotFound(ActionId),

    /// Translation backend failed or replied with an unusable body
    #[error("Translation backend error: {0}")]
    Translation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl BridgeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors the caller caused and can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::CommandNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
