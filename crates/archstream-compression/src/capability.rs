//! Compiled-in codec availability
//!
//! Whether zlib exists is decided by the `zlib` cargo feature. Callers never
//! branch on the feature themselves: they ask [`Capabilities`] and get a typed
//! `UnsupportedCodec` error back for anything missing.

use archstream_types::{CompressionAlgorithm, ErrorContext, Result};

/// Set of codecs a session may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    zlib: bool,
}

impl Capabilities {
    /// Codecs compiled into this build
    pub const fn detect() -> Self {
        Self {
            zlib: cfg!(feature = "zlib"),
        }
    }

    /// Remove a codec from the set
    ///
    /// Passthrough is always available and cannot be removed.
    pub const fn without(self, algorithm: CompressionAlgorithm) -> Self {
        match algorithm {
            CompressionAlgorithm::None => self,
            CompressionAlgorithm::Zlib => Self { zlib: false },
        }
    }

    /// Check whether a codec is available
    pub const fn is_available(self, algorithm: CompressionAlgorithm) -> bool {
        match algorithm {
            CompressionAlgorithm::None => true,
            CompressionAlgorithm::Zlib => self.zlib,
        }
    }

    /// Fail with `UnsupportedCodec` if a codec is missing
    pub fn ensure(self, algorithm: CompressionAlgorithm, ctx: &ErrorContext) -> Result<()> {
        if self.is_available(algorithm) {
            Ok(())
        } else {
            Err(ctx.unsupported_codec(algorithm.name()))
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}
