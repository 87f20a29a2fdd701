//! Settings management for archstream
//!
//! Collects the handful of knobs a compressor session or decompressor run
//! needs from layered sources, then turns them into the validated core types.
//!
//! # Features
//!
//! - **Multiple formats**: YAML, TOML and JSON settings files
//! - **Environment overrides**: `ARCHSTREAM__COMPRESSION__LEVEL=9` and friends
//! - **Defaults**: every field has a default matching the core crate
//!
//! # Examples
//!
//! ```rust
//! use archstream_config::ConfigBuilder;
//!
//! let settings = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_source_file("archstream.yaml")
//!     .build()
//!     .expect("Failed to load settings");
//!
//! let compression = settings.compression_config().expect("valid level");
//! println!("Compression code: {}", compression.code());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use archstream_types::{
    BufferCapacity, CompressionConfig, CompressionLevel, ErrorContext, StreamOptions,
};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Top-level settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Compression code applied to new sessions
    #[serde(default)]
    pub compression: CompressionSettings,
    /// Codec buffer sizing
    #[serde(default)]
    pub buffers: BufferSettings,
    /// Diagnostic naming
    #[serde(default)]
    pub diagnostics: DiagnosticsSettings,
}

/// Compression settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionSettings {
    /// Numeric compression code: `0` stores, `-1` or `1..=9` selects zlib
    #[serde(default = "default_level")]
    pub level: i32,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Buffer settings, in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSettings {
    /// Codec output buffer; bounds every chunk handed to a sink
    #[serde(default = "default_buffer_size")]
    pub output_size: usize,
    /// Initial read-side input buffer
    #[serde(default = "default_buffer_size")]
    pub input_size: usize,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            output_size: default_buffer_size(),
            input_size: default_buffer_size(),
        }
    }
}

/// Diagnostic settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsSettings {
    /// Name prefixed to every error message
    #[serde(default = "default_module_name")]
    pub module_name: String,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
        }
    }
}

fn default_level() -> i32 {
    CompressionLevel::CODEC_DEFAULT
}

fn default_buffer_size() -> usize {
    BufferCapacity::DEFAULT
}

fn default_module_name() -> String {
    ErrorContext::DEFAULT_MODULE.to_string()
}

impl Settings {
    /// Diagnostic context named after `diagnostics.module_name`
    pub fn error_context(&self) -> ErrorContext {
        ErrorContext::new(self.diagnostics.module_name.clone())
    }

    /// Parse `compression.level` into a compression config
    pub fn compression_config(&self) -> ConfigResult<CompressionConfig> {
        CompressionConfig::parse(self.compression.level, &self.error_context())
            .map_err(|e| ConfigError::invalid_value("compression.level", e.to_string()))
    }

    /// Validate the buffer sizes into stream options
    pub fn stream_options(&self) -> ConfigResult<StreamOptions> {
        let output_capacity = BufferCapacity::new(self.buffers.output_size)
            .map_err(|e| ConfigError::invalid_value("buffers.output_size", e))?;
        let input_capacity = BufferCapacity::new(self.buffers.input_size)
            .map_err(|e| ConfigError::invalid_value("buffers.input_size", e))?;
        Ok(StreamOptions {
            output_capacity,
            input_capacity,
        })
    }

    /// Check every field without keeping the converted values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.diagnostics.module_name.trim().is_empty() {
            return Err(ConfigError::validation(
                "diagnostics.module_name must not be empty",
            ));
        }
        self.compression_config()
            .and_then(|_| self.stream_options())
            .map(|_| ())
            .map_err(|e| ConfigError::validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archstream_types::CompressionAlgorithm;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_core() {
        let settings = Settings::default();
        assert_eq!(settings.compression.level, -1);
        assert_eq!(settings.buffers.output_size, 4096);
        assert_eq!(settings.buffers.input_size, 4096);
        assert_eq!(settings.diagnostics.module_name, "archstream");

        assert_eq!(settings.compression_config().unwrap(), CompressionConfig::default());
        assert_eq!(settings.stream_options().unwrap(), StreamOptions::default());
        assert_eq!(settings.error_context().module(), "archstream");
    }

    #[rstest]
    #[case(0, CompressionAlgorithm::None)]
    #[case(-1, CompressionAlgorithm::Zlib)]
    #[case(9, CompressionAlgorithm::Zlib)]
    fn test_compression_config(#[case] level: i32, #[case] algorithm: CompressionAlgorithm) {
        let mut settings = Settings::default();
        settings.compression.level = level;
        assert_eq!(settings.compression_config().unwrap().algorithm(), algorithm);
    }

    #[test]
    fn test_invalid_level_names_key() {
        let mut settings = Settings::default();
        settings.compression.level = 12;
        settings.diagnostics.module_name = "dump".to_string();

        let error = settings.compression_config().unwrap_err();
        let message = error.to_string();
        assert!(message.contains("compression.level"));
        assert!(message.contains("dump: invalid compression code: 12"));
        assert!(settings.validate().is_err());
    }

    #[rstest]
    #[case(16, 4096)]
    #[case(4096, 16)]
    #[case(usize::MAX, 4096)]
    fn test_invalid_buffer_sizes(#[case] output_size: usize, #[case] input_size: usize) {
        let mut settings = Settings::default();
        settings.buffers = BufferSettings {
            output_size,
            input_size,
        };
        assert!(settings.stream_options().is_err());
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_empty_module_name_rejected() {
        let mut settings = Settings::default();
        settings.diagnostics.module_name = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_core_types_deserialize_validated() {
        let config: CompressionConfig = serde_yaml::from_str("6").unwrap();
        assert_eq!(config.code(), 6);
        assert!(serde_yaml::from_str::<CompressionConfig>("42").is_err());
        assert!(serde_json::from_str::<CompressionConfig>(
            r#"{"algorithm":"Zlib","level":0}"#
        )
        .is_err());
        assert!(serde_json::from_str::<CompressionLevel>("42").is_err());
        assert!(serde_json::from_str::<StreamOptions>(
            r#"{"output_capacity":1,"input_capacity":4096}"#
        )
        .is_err());
    }
}
