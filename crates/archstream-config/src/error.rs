//! Error types for settings management

use std::path::PathBuf;
use thiserror::Error;

/// Settings error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error when reading or writing a settings file
    #[error("I/O error on settings file '{path}': {source}")]
    Io {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Settings validation error
    #[error("Settings validation failed: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Invalid settings value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Settings key
        key: String,
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// Source layering or deserialization error
    #[error("Settings error: {message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        Self::Other {
            message: error.to_string(),
        }
    }
}

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}
