//! Core compression selection types
//!
//! A single integer "compression" value picks both the algorithm and its
//! level. [`CompressionConfig::parse`] is the only way to turn such a value
//! into a configuration, so every config in circulation is already valid.

use crate::{CompressionLevel, Error, ErrorContext, Result};
use std::fmt;

/// Compression algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompressionAlgorithm {
    /// No compression, bytes are forwarded unchanged
    None,
    /// zlib-wrapped deflate
    Zlib,
}

impl CompressionAlgorithm {
    /// Human-readable codec name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Zlib => "zlib",
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed compression selection
///
/// Serializes as its numeric compression code and deserializes through
/// [`parse`](Self::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i32", into = "i32")
)]
pub struct CompressionConfig {
    algorithm: CompressionAlgorithm,
    level: CompressionLevel,
}

impl CompressionConfig {
    /// Compression code meaning "no compression"
    pub const NO_COMPRESSION: i32 = 0;

    /// Interpret a numeric compression code
    ///
    /// `-1` and `1..=9` select zlib at that level, `0` selects no compression,
    /// anything else is rejected.
    pub fn parse(code: i32, ctx: &ErrorContext) -> Result<Self> {
        if code == Self::NO_COMPRESSION {
            return Ok(Self::none());
        }
        CompressionLevel::new(code)
            .map(Self::zlib)
            .map_err(|_| ctx.invalid_parameter(code))
    }

    /// Configuration that forwards bytes unchanged
    pub fn none() -> Self {
        Self {
            algorithm: CompressionAlgorithm::None,
            level: CompressionLevel::default(),
        }
    }

    /// zlib at the given level
    pub fn zlib(level: CompressionLevel) -> Self {
        Self {
            algorithm: CompressionAlgorithm::Zlib,
            level,
        }
    }

    /// Selected algorithm
    pub fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Selected level; only meaningful for zlib
    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// The compression code this configuration was parsed from
    pub fn code(&self) -> i32 {
        match self.algorithm {
            CompressionAlgorithm::None => Self::NO_COMPRESSION,
            CompressionAlgorithm::Zlib => self.level.get(),
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::zlib(CompressionLevel::default())
    }
}

impl TryFrom<i32> for CompressionConfig {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::parse(code, &ErrorContext::default())
    }
}

impl From<CompressionConfig> for i32 {
    fn from(config: CompressionConfig) -> Self {
        config.code()
    }
}
