//! Shared error types for the discovery engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for discovery operations
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A filter field name outside the recognised set was supplied.
    ///
    /// This is a caller-contract violation, distinct from bad data.
    #[error("Unknown filter field '{0}'")]
    UnknownField(String),

    /// A recognised filter field received a value it cannot hold
    #[error("Invalid value '{value}' for filter field '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Event feed could not be read
    #[error("Failed to read event feed {}: {source}", .path.display())]
    Feed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl DiscoveryError {
    /// Create an invalid value error for a filter field
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the error comes from misuse of the filter API rather than
    /// from data or the environment.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::UnknownField(_) | Self::InvalidValue { .. })
    }
}

/// Result type alias using the discovery error type
pub type Result<T> = std::result::Result<T, DiscoveryError>;
