//! Uncompressed data I/O
//!
//! Same contract as the zlib engines with no transformation: writes go to the
//! sink in one call each, reads forward every source chunk unchanged.

use crate::codec::{allocate_buffer, deliver, forward, pull};
use crate::stats::StreamStats;
use archstream_types::{ByteSink, ByteSource, ErrorContext, Result, StreamOptions};
use std::io::Write;
use tracing::trace;

/// Write side of the passthrough engine
#[derive(Debug, Default)]
pub struct PassthroughWriter {
    stats: StreamStats,
}

impl PassthroughWriter {
    /// Create a new passthrough writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward `data` to the sink in a single call
    ///
    /// Empty input is not forwarded, since a zero-length chunk would read as
    /// end of data to the container above.
    pub fn write<S: ByteSink + ?Sized>(
        &mut self,
        data: &[u8],
        sink: &mut S,
        ctx: &ErrorContext,
    ) -> Result<usize> {
        self.stats.record_input(data.len());
        if data.is_empty() {
            return Ok(0);
        }
        deliver(sink, data, ctx)?;
        self.stats.record_chunk(data.len());
        trace!("Passthrough forwarded {} bytes", data.len());
        Ok(data.len())
    }

    /// Statistics so far
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Close the writer; nothing is buffered, so nothing is flushed
    pub fn finish(self) -> StreamStats {
        self.stats
    }
}

/// Forward every source chunk to the consumer until the source is exhausted
pub fn read_passthrough<R, W>(
    source: &mut R,
    consumer: &mut W,
    options: &StreamOptions,
    ctx: &ErrorContext,
) -> Result<StreamStats>
where
    R: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = allocate_buffer(options.input_capacity.get(), "input buffer", ctx)?;
    let mut stats = StreamStats::default();

    loop {
        let count = pull(source, &mut buf, ctx)?;
        if count == 0 {
            break;
        }
        stats.record_input(count);
        forward(consumer, &buf[..count], ctx)?;
        stats.record_chunk(count);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archstream_types::{sink_fn, source_fn, ErrorKind};
    use std::collections::VecDeque;

    #[test]
    fn test_write_forwards_whole_payload_once() {
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut sink = sink_fn(|chunk: &[u8]| {
            chunks.push(chunk.to_vec());
            Ok(chunk.len())
        });
        let mut writer = PassthroughWriter::new();
        let ctx = ErrorContext::default();

        assert_eq!(writer.write(b"hello", &mut sink, &ctx).unwrap(), 5);
        assert_eq!(writer.write(b"", &mut sink, &ctx).unwrap(), 0);
        assert_eq!(writer.write(b"world!", &mut sink, &ctx).unwrap(), 6);
        let stats = writer.finish();
        drop(sink);

        assert_eq!(chunks, vec![b"hello".to_vec(), b"world!".to_vec()]);
        assert_eq!(stats.bytes_in, 11);
        assert_eq!(stats.chunks, 2);
    }

    #[test]
    fn test_write_short_sink_fails() {
        let mut sink = sink_fn(|chunk: &[u8]| Ok(chunk.len() / 2));
        let mut writer = PassthroughWriter::new();
        let error = writer
            .write(b"abcdef", &mut sink, &ErrorContext::default())
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ShortWrite);
    }

    #[test]
    fn test_read_forwards_until_eof() {
        let mut pending: VecDeque<Vec<u8>> =
            vec![b"first ".to_vec(), b"second ".to_vec(), b"third".to_vec()].into();
        let mut source = source_fn(|buf: &mut Vec<u8>| match pending.pop_front() {
            Some(chunk) => {
                if buf.len() < chunk.len() {
                    buf.resize(chunk.len(), 0);
                }
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None => Ok(0),
        });

        let mut out = Vec::new();
        let stats = read_passthrough(
            &mut source,
            &mut out,
            &StreamOptions::default(),
            &ErrorContext::default(),
        )
        .unwrap();

        assert_eq!(out, b"first second third");
        assert_eq!(stats.chunks, 3);
        assert_eq!(stats.bytes_in, stats.bytes_out);
    }

    #[test]
    fn test_read_empty_source() {
        let mut source = source_fn(|_: &mut Vec<u8>| Ok(0));
        let mut out = Vec::new();
        let stats = read_passthrough(
            &mut source,
            &mut out,
            &StreamOptions::default(),
            &ErrorContext::default(),
        )
        .unwrap();
        assert!(out.is_empty());
        assert_eq!(stats, StreamStats::default());
    }
}
