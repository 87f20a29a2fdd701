//! Write-side compressor engine
//!
//! [`StreamCompressor`] owns an encoder and a fixed-capacity output buffer.
//! Input is fed to the encoder until it is fully consumed; the buffer goes to
//! the sink whenever it fills, whenever input is still pending after a step,
//! and at finish while it holds anything. The sink never sees an empty chunk
//! and never sees a chunk larger than the buffer capacity.

use crate::codec::{allocate_buffer, deliver, FlushMode, StepEncoder};
use crate::stats::StreamStats;
use archstream_types::{BufferCapacity, ByteSink, ErrorContext, Result};
use tracing::trace;

/// Incremental compressor writing bounded chunks to a sink
pub struct StreamCompressor<E> {
    encoder: E,
    out: Vec<u8>,
    filled: usize,
    ctx: ErrorContext,
    stats: StreamStats,
}

impl<E: StepEncoder> StreamCompressor<E> {
    /// Create a compressor around an initialized encoder
    pub fn new(encoder: E, capacity: BufferCapacity, ctx: ErrorContext) -> Result<Self> {
        let out = allocate_buffer(capacity.get(), "compression output buffer", &ctx)?;
        Ok(Self {
            encoder,
            out,
            filled: 0,
            ctx,
            stats: StreamStats::default(),
        })
    }

    /// Compress `data`, flushing full buffers to the sink
    ///
    /// Returns `data.len()`: either every byte reaches the encoder or the call
    /// fails.
    pub fn write<S: ByteSink + ?Sized>(&mut self, data: &[u8], sink: &mut S) -> Result<usize> {
        self.stats.record_input(data.len());
        self.deflate(data, FlushMode::None, sink)?;
        Ok(data.len())
    }

    /// Finish the stream, emitting all buffered output and the codec trailer
    pub fn finish<S: ByteSink + ?Sized>(mut self, sink: &mut S) -> Result<StreamStats> {
        self.deflate(&[], FlushMode::Finish, sink)?;
        Ok(self.stats)
    }

    /// Statistics so far
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    fn deflate<S: ByteSink + ?Sized>(
        &mut self,
        mut input: &[u8],
        flush: FlushMode,
        sink: &mut S,
    ) -> Result<()> {
        let finishing = flush == FlushMode::Finish;

        while !input.is_empty() || finishing {
            let step = self
                .encoder
                .step(input, &mut self.out[self.filled..], flush)
                .map_err(|e| self.ctx.codec("compress", e.to_string()))?;

            input = &input[step.consumed..];
            self.filled += step.produced;

            if self.filled == self.out.len() || !input.is_empty() || finishing {
                self.emit(sink)?;
            }

            if step.stream_end {
                break;
            }

            // The buffer always has room here, so a step that moved nothing
            // will move nothing next time either.
            if !step.made_progress() {
                let message = if finishing {
                    "compressor stalled before end of stream"
                } else {
                    "compressor stopped consuming input"
                };
                return Err(self.ctx.codec("compress", message));
            }
        }

        Ok(())
    }

    fn emit<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.filled == 0 {
            return Ok(());
        }
        deliver(sink, &self.out[..self.filled], &self.ctx)?;
        self.stats.record_chunk(self.filled);
        trace!("Emitted compressed chunk of {} bytes", self.filled);
        self.filled = 0;
        Ok(())
    }
}
