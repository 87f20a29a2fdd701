//! Configuration types for archstream
//!
//! This module provides validated value types for compression levels and
//! buffer capacities.

// Serde is imported conditionally through cfg_attr

/// Compression level with validation
///
/// Holds either the codec's own "default" sentinel or an explicit level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i32", into = "i32")
)]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// Sentinel selecting the codec's default level
    pub const CODEC_DEFAULT: i32 = -1;
    /// Fastest compression
    pub const FASTEST: i32 = 1;
    /// Best compression
    pub const BEST: i32 = 9;

    /// Create a new compression level with validation
    pub fn new(level: i32) -> Result<Self, String> {
        if level == Self::CODEC_DEFAULT || (Self::FASTEST..=Self::BEST).contains(&level) {
            Ok(Self(level))
        } else {
            Err(format!(
                "Compression level {} is neither {} nor within {}..={}",
                level,
                Self::CODEC_DEFAULT,
                Self::FASTEST,
                Self::BEST
            ))
        }
    }

    /// Get the compression level value
    pub fn get(self) -> i32 {
        self.0
    }

    /// Check if this is the codec default sentinel
    pub fn is_codec_default(self) -> bool {
        self.0 == Self::CODEC_DEFAULT
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(Self::CODEC_DEFAULT)
    }
}

impl TryFrom<i32> for CompressionLevel {
    type Error = String;

    fn try_from(level: i32) -> Result<Self, String> {
        Self::new(level)
    }
}

impl From<CompressionLevel> for i32 {
    fn from(level: CompressionLevel) -> Self {
        level.0
    }
}

/// Capacity of an internal codec buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Minimum buffer capacity (64 bytes)
    pub const MIN: usize = 64;
    /// Maximum buffer capacity (64MB)
    pub const MAX: usize = 64 * 1024 * 1024;
    /// Default buffer capacity (4KB)
    pub const DEFAULT: usize = 4 * 1024;

    /// Create a new buffer capacity with validation
    pub fn new(size: usize) -> Result<Self, String> {
        if size < Self::MIN {
            Err(format!("Buffer capacity {} is below minimum {}", size, Self::MIN))
        } else if size > Self::MAX {
            Err(format!("Buffer capacity {} exceeds maximum {}", size, Self::MAX))
        } else {
            Ok(Self(size))
        }
    }

    /// Get the buffer capacity value
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for BufferCapacity {
    type Error = String;

    fn try_from(size: usize) -> Result<Self, String> {
        Self::new(size)
    }
}

impl From<BufferCapacity> for usize {
    fn from(capacity: BufferCapacity) -> Self {
        capacity.0
    }
}

/// Buffer sizing for compressor sessions and decompressor runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamOptions {
    /// Capacity of the codec output buffer; also the largest chunk a
    /// compressor ever hands to its sink
    pub output_capacity: BufferCapacity,
    /// Initial capacity of the read-side input buffer; sources may grow it
    pub input_capacity: BufferCapacity,
}

impl StreamOptions {
    /// Create options with the same capacity on both sides
    pub fn with_capacity(capacity: BufferCapacity) -> Self {
        Self {
            output_capacity: capacity,
            input_capacity: capacity,
        }
    }
}
