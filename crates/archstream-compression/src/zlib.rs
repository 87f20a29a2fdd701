//! zlib backend built on `flate2`'s low-level stream API

use crate::codec::{FlushMode, Step, StepDecoder, StepEncoder};
use archstream_types::{CompressionLevel, ErrorContext, Result};
use flate2::{Compress, CompressError, Compression, Decompress, DecompressError};
use flate2::{FlushCompress, FlushDecompress, Status};

/// Map a validated level onto a `flate2` compression level
fn backend_level(level: CompressionLevel, ctx: &ErrorContext) -> Result<Compression> {
    if level.is_codec_default() {
        return Ok(Compression::default());
    }
    match u32::try_from(level.get()) {
        Ok(value) if value <= Compression::best().level() => Ok(Compression::new(value)),
        _ => Err(ctx.codec_init(format!("unsupported zlib level {}", level.get()))),
    }
}

/// Incremental zlib encoder
pub struct ZlibEncoder {
    inner: Compress,
}

impl ZlibEncoder {
    /// Create an encoder that writes a zlib header and adler32 trailer
    pub fn new(level: CompressionLevel, ctx: &ErrorContext) -> Result<Self> {
        let level = backend_level(level, ctx)?;
        Ok(Self {
            inner: Compress::new(level, true),
        })
    }
}

impl StepEncoder for ZlibEncoder {
    type Error = CompressError;

    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> std::result::Result<Step, CompressError> {
        let flush = match flush {
            FlushMode::None => FlushCompress::None,
            FlushMode::Finish => FlushCompress::Finish,
        };
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self.inner.compress(input, output, flush)?;
        Ok(Step {
            consumed: (self.inner.total_in() - before_in) as usize,
            produced: (self.inner.total_out() - before_out) as usize,
            stream_end: matches!(status, Status::StreamEnd),
        })
    }
}

/// Incremental zlib decoder
pub struct ZlibDecoder {
    inner: Decompress,
}

impl ZlibDecoder {
    /// Create a decoder expecting a zlib header
    pub fn new() -> Self {
        Self {
            inner: Decompress::new(true),
        }
    }
}

impl Default for ZlibDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StepDecoder for ZlibDecoder {
    type Error = DecompressError;

    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> std::result::Result<Step, DecompressError> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self.inner.decompress(input, output, FlushDecompress::None)?;
        Ok(Step {
            consumed: (self.inner.total_in() - before_in) as usize,
            produced: (self.inner.total_out() - before_out) as usize,
            stream_end: matches!(status, Status::StreamEnd),
        })
    }
}
