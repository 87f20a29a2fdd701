//! Incremental codec interface
//!
//! Engines drive a codec one step at a time: each step consumes some input,
//! produces some output into a caller-owned buffer, and reports whether the
//! codec reached its logical end of stream. Anything that can be driven this
//! way can sit behind the compressor and decompressor engines.

use archstream_types::{ByteSink, ByteSource, ErrorContext, Result};
use std::fmt;
use std::io::{self, Write};

/// Flush behaviour requested from an encoder step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushMode {
    /// Consume input, emit output only when the codec wants to
    None,
    /// No more input will follow; emit everything including the trailer
    Finish,
}

/// Outcome of one codec step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// Input bytes consumed by this step
    pub consumed: usize,
    /// Output bytes written by this step
    pub produced: usize,
    /// The codec reached its logical end of stream
    pub stream_end: bool,
}

impl Step {
    /// Whether the step moved any bytes
    pub fn made_progress(&self) -> bool {
        self.consumed > 0 || self.produced > 0
    }
}

/// Encoder driven one step at a time
pub trait StepEncoder {
    /// Codec diagnostic type
    type Error: fmt::Display;

    /// Run one incremental compression step
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> std::result::Result<Step, Self::Error>;
}

/// Decoder driven one step at a time
pub trait StepDecoder {
    /// Codec diagnostic type
    type Error: fmt::Display;

    /// Run one incremental decompression step
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> std::result::Result<Step, Self::Error>;
}

/// Allocate a zero-filled buffer, reporting failure instead of aborting
pub(crate) fn allocate_buffer(len: usize, what: &str, ctx: &ErrorContext) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| ctx.allocation(what, e))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Hand one chunk to a sink; anything short of full acceptance is fatal
pub(crate) fn deliver<S: ByteSink + ?Sized>(
    sink: &mut S,
    chunk: &[u8],
    ctx: &ErrorContext,
) -> Result<()> {
    match sink.write_chunk(chunk) {
        Ok(written) if written == chunk.len() => Ok(()),
        Ok(written) => Err(ctx.short_write(chunk.len(), written, None)),
        Err(e) => Err(ctx.short_write(chunk.len(), 0, Some(e.to_string()))),
    }
}

/// Hand decoded bytes to the downstream consumer
pub(crate) fn forward<W: Write + ?Sized>(
    consumer: &mut W,
    chunk: &[u8],
    ctx: &ErrorContext,
) -> Result<()> {
    if chunk.is_empty() {
        return Ok(());
    }
    consumer
        .write_all(chunk)
        .map_err(|e| ctx.short_write(chunk.len(), 0, Some(e.to_string())))
}

/// Pull the next chunk from a source; `Ok(0)` is end of input
pub(crate) fn pull<R: ByteSource + ?Sized>(
    source: &mut R,
    buf: &mut Vec<u8>,
    ctx: &ErrorContext,
) -> Result<usize> {
    let count = source.read_chunk(buf).map_err(|e| ctx.io(&e))?;
    if count > buf.len() {
        let e = io::Error::new(
            io::ErrorKind::InvalidData,
            format!("source reported {} bytes but buffer holds {}", count, buf.len()),
        );
        return Err(ctx.io(&e));
    }
    Ok(count)
}
