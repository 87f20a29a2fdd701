//! Error types and handling for archstream
//!
//! Every failure in the compression layer is fatal: the enclosing write, end or
//! read operation stops immediately and the error is handed to the caller. There
//! is no warning tier and no retry. Each variant carries the diagnostic module
//! name taken from the [`ErrorContext`] that was threaded through the failing
//! call, plus the codec's own diagnostic text where one exists.

use std::borrow::Cow;
use std::fmt;

/// Diagnostic context threaded through every fallible call
///
/// Replaces a process-wide "module name" with a value owned by the caller, so
/// two archivers in the same process can report under different names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Name prefixed to every error message
    pub module: Cow<'static, str>,
}

impl ErrorContext {
    /// Module name used when the caller does not supply one
    pub const DEFAULT_MODULE: &'static str = "archstream";

    /// Create a new error context
    pub fn new(module: impl Into<Cow<'static, str>>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// Get the module name
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Build an invalid parameter error for a compression code
    pub fn invalid_parameter(&self, code: i32) -> Error {
        Error::InvalidParameter {
            module: self.module.to_string(),
            code,
        }
    }

    /// Build an unsupported codec error
    pub fn unsupported_codec(&self, codec: impl Into<String>) -> Error {
        Error::UnsupportedCodec {
            module: self.module.to_string(),
            codec: codec.into(),
        }
    }

    /// Build an allocation failure error
    pub fn allocation(&self, what: impl Into<String>, message: impl fmt::Display) -> Error {
        Error::Allocation {
            module: self.module.to_string(),
            what: what.into(),
            message: message.to_string(),
        }
    }

    /// Build a codec initialization error
    pub fn codec_init(&self, message: impl Into<String>) -> Error {
        Error::CodecInit {
            module: self.module.to_string(),
            message: message.into(),
        }
    }

    /// Build a codec step error
    pub fn codec(&self, action: impl Into<String>, message: impl Into<String>) -> Error {
        Error::Codec {
            module: self.module.to_string(),
            action: action.into(),
            message: message.into(),
        }
    }

    /// Build a short write error
    pub fn short_write(&self, expected: usize, written: usize, reason: Option<String>) -> Error {
        Error::ShortWrite {
            module: self.module.to_string(),
            expected,
            written,
            reason: reason.unwrap_or_else(|| "sink accepted fewer bytes than given".to_string()),
        }
    }

    /// Build a source read error
    pub fn io(&self, error: &std::io::Error) -> Error {
        Error::Io {
            module: self.module.to_string(),
            message: error.to_string(),
        }
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MODULE)
    }
}

/// Main error type for archstream operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// Compression code outside the accepted set
    #[error("{module}: invalid compression code: {code}")]
    InvalidParameter {
        /// Diagnostic module name
        module: String,
        /// Rejected compression code
        code: i32,
    },

    /// Requested codec is not compiled into this build
    #[error("{module}: not built with {codec} support")]
    UnsupportedCodec {
        /// Diagnostic module name
        module: String,
        /// Name of the missing codec
        codec: String,
    },

    /// Buffer or codec state could not be allocated
    #[error("{module}: out of memory allocating {what}: {message}")]
    Allocation {
        /// Diagnostic module name
        module: String,
        /// What was being allocated
        what: String,
        /// Allocator diagnostic
        message: String,
    },

    /// Codec refused to initialize
    #[error("{module}: could not initialize compression library: {message}")]
    CodecInit {
        /// Diagnostic module name
        module: String,
        /// Codec diagnostic
        message: String,
    },

    /// Encode or decode step failed
    #[error("{module}: could not {action} data: {message}")]
    Codec {
        /// Diagnostic module name
        module: String,
        /// Either "compress" or "uncompress"
        action: String,
        /// Codec diagnostic
        message: String,
    },

    /// Sink or consumer accepted fewer bytes than it was given
    #[error(
        "{module}: could not write to output file: wrote {written} of {expected} bytes: {reason}"
    )]
    ShortWrite {
        /// Diagnostic module name
        module: String,
        /// Bytes handed to the sink
        expected: usize,
        /// Bytes the sink reported accepting
        written: usize,
        /// Transport error text, if any
        reason: String,
    },

    /// Byte source failed
    #[error("{module}: could not read input: {message}")]
    Io {
        /// Diagnostic module name
        module: String,
        /// Transport error text
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad compression code
    InvalidParameter,
    /// Codec missing from the build
    UnsupportedCodec,
    /// Allocation failure
    Allocation,
    /// Codec initialization failure
    CodecInit,
    /// Codec step failure
    Codec,
    /// Short write to a sink or consumer
    ShortWrite,
    /// Source read failure
    Io,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::UnsupportedCodec { .. } => ErrorKind::UnsupportedCodec,
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::CodecInit { .. } => ErrorKind::CodecInit,
            Self::Codec { .. } => ErrorKind::Codec,
            Self::ShortWrite { .. } => ErrorKind::ShortWrite,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Every archstream error aborts the enclosing operation
    pub fn is_fatal(&self) -> bool {
        true
    }

    /// Diagnostic module name the error was raised under
    pub fn module(&self) -> &str {
        match self {
            Self::InvalidParameter { module, .. }
            | Self::UnsupportedCodec { module, .. }
            | Self::Allocation { module, .. }
            | Self::CodecInit { module, .. }
            | Self::Codec { module, .. }
            | Self::ShortWrite { module, .. }
            | Self::Io { module, .. } => module,
        }
    }
}
