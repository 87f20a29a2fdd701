//! Read-side decompressor engine

use crate::codec::{allocate_buffer, forward, pull, StepDecoder};
use crate::stats::StreamStats;
use archstream_types::{ByteSource, ErrorContext, Result, StreamOptions};
use std::io::Write;
use tracing::trace;

/// One decode pass over a compressed source
///
/// Owns the decoder for the duration of [`run`](Self::run); buffers are
/// allocated inside the run and released when it returns, on success or
/// failure alike.
pub struct StreamDecompressor<D> {
    decoder: D,
    options: StreamOptions,
    ctx: ErrorContext,
}

impl<D: StepDecoder> StreamDecompressor<D> {
    /// Create a decompressor around an initialized decoder
    pub fn new(decoder: D, options: StreamOptions, ctx: ErrorContext) -> Self {
        Self {
            decoder,
            options,
            ctx,
        }
    }

    /// Decode everything the source yields and pass it to `consumer`
    ///
    /// Returns once the source reports end of input and the decoder has
    /// reached its own end of stream.
    pub fn run<R, W>(mut self, source: &mut R, consumer: &mut W) -> Result<StreamStats>
    where
        R: ByteSource + ?Sized,
        W: Write + ?Sized,
    {
        let ctx = &self.ctx;
        let mut input = allocate_buffer(self.options.input_capacity.get(), "input buffer", ctx)?;
        let mut output = allocate_buffer(
            self.options.output_capacity.get(),
            "decompression output buffer",
            ctx,
        )?;
        let mut stats = StreamStats::default();
        let mut finished = false;

        loop {
            let count = pull(source, &mut input, ctx)?;
            if count == 0 {
                break;
            }
            stats.record_input(count);

            let mut pending = &input[..count];
            while !pending.is_empty() {
                if finished {
                    return Err(ctx.codec(
                        "uncompress",
                        format!("{} bytes of trailing data after end of stream", pending.len()),
                    ));
                }

                let step = self
                    .decoder
                    .step(pending, &mut output)
                    .map_err(|e| ctx.codec("uncompress", e.to_string()))?;
                pending = &pending[step.consumed..];
                forward(consumer, &output[..step.produced], ctx)?;
                if step.produced > 0 {
                    stats.record_chunk(step.produced);
                }
                finished = step.stream_end;

                if !finished && !step.made_progress() {
                    return Err(ctx.codec("uncompress", "decompressor stopped consuming input"));
                }
            }
        }

        // Input is exhausted; collect whatever the decoder still holds.
        while !finished {
            let step = self
                .decoder
                .step(&[], &mut output)
                .map_err(|e| ctx.codec("uncompress", e.to_string()))?;
            forward(consumer, &output[..step.produced], ctx)?;
            if step.produced > 0 {
                stats.record_chunk(step.produced);
            }
            finished = step.stream_end;

            if !finished && !step.made_progress() {
                return Err(ctx.codec("uncompress", "unexpected end of compressed data"));
            }
        }

        trace!(
            "Decoded {} compressed bytes into {} bytes",
            stats.bytes_in,
            stats.bytes_out
        );
        Ok(stats)
    }
}
