//! Motion layer error types
//!
//! Only configuration and content loading can fail. The per-frame path
//! degrades to defaults instead of returning errors.

use thiserror::Error;

/// Errors raised while building the motion layer
#[derive(Error, Debug)]
pub enum MotionError {
    /// A configuration value is out of its accepted range
    #[error("Invalid config value `{field}`: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A scroll mapping has an unusable input domain or output range
    #[error("Invalid scroll mapping for layer `{layer}`: {reason}")]
    InvalidMapping { layer: String, reason: String },

    /// Failed to parse a TOML configuration file
    #[error("Config parse failed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to parse the content table
    #[error("Content parse failed: {0}")]
    ContentParse(#[from] serde_json::Error),

    /// Failed to read a configuration or content file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MotionError {
    /// Shorthand for an [`MotionError::InvalidConfig`]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for motion layer setup
pub type Result<T> = std::result::Result<T, MotionError>;
