//! Per-session byte accounting

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics for one compressor session or decompressor run
///
/// `bytes_in` counts what entered the engine (plain bytes on the write side,
/// compressed bytes on the read side) and `bytes_out` what left it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreamStats {
    /// Bytes handed to the engine
    pub bytes_in: u64,
    /// Bytes handed onwards by the engine
    pub bytes_out: u64,
    /// Non-empty chunks handed onwards
    pub chunks: u64,
}

impl StreamStats {
    /// Record input entering the engine
    pub fn record_input(&mut self, len: usize) {
        self.bytes_in += len as u64;
    }

    /// Record one chunk leaving the engine
    pub fn record_chunk(&mut self, len: usize) {
        self.bytes_out += len as u64;
        self.chunks += 1;
    }

    /// Ratio of output to input bytes
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            1.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}
