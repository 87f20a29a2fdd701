//! Unified test utilities for archstream tests and benchmarks

use archstream_types::{ByteSink, ByteSource};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `warn` so passing runs stay quiet.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn"))
            .unwrap_or_default();

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

/// Test data generation patterns
#[derive(Debug, Clone, Copy)]
pub enum TestDataPattern {
    /// All zeros - highly compressible
    Zeros,
    /// Deterministic pseudo-random bytes - incompressible
    Random,
    /// Runs of repeated bytes mixed with noise
    Mixed,
    /// Line-oriented text resembling a data dump
    Text,
}

/// Generate test data with specified pattern
pub fn generate_test_data(size: usize, pattern: TestDataPattern) -> Vec<u8> {
    match pattern {
        TestDataPattern::Zeros => vec![0u8; size],
        TestDataPattern::Random => {
            // xorshift keeps runs reproducible across platforms
            let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
            (0..size)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    (state >> 24) as u8
                })
                .collect()
        }
        TestDataPattern::Mixed => (0..size)
            .map(|i| match i % 1000 {
                0..=99 => 0,
                100..=199 => 255,
                _ => ((i * 7 + 13) % 256) as u8,
            })
            .collect(),
        TestDataPattern::Text => {
            let mut data = Vec::with_capacity(size);
            let mut row = 0u64;
            while data.len() < size {
                let line = format!(
                    "{}\tcustomer_{}\t{}.{:02}\n",
                    row,
                    row % 977,
                    row * 31,
                    row % 100
                );
                data.extend_from_slice(line.as_bytes());
                row += 1;
            }
            data.truncate(size);
            data
        }
    }
}

/// Create a temporary file with test data
pub fn create_test_file(
    temp_dir: &TempDir,
    name: &str,
    size: usize,
    pattern: TestDataPattern,
) -> PathBuf {
    let file_path = temp_dir.path().join(name);
    let data = generate_test_data(size, pattern);
    fs::write(&file_path, data).expect("Failed to write test file");
    file_path
}

/// Sink that keeps every chunk it is handed
#[derive(Debug, Default)]
pub struct RecordingSink {
    chunks: Vec<Vec<u8>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks in arrival order
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// All received bytes, concatenated
    pub fn concat(&self) -> Vec<u8> {
        self.chunks.concat()
    }

    /// Turn the recording into a source replaying the same chunk boundaries
    pub fn into_source(self) -> ChunkedSource {
        ChunkedSource::new(self.chunks)
    }
}

impl ByteSink for RecordingSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.chunks.push(chunk.to_vec());
        Ok(chunk.len())
    }
}

/// Sink that accepts `full_chunks` chunks whole, then only half of each
#[derive(Debug)]
pub struct ShortSink {
    full_chunks: usize,
    calls: usize,
}

impl ShortSink {
    /// Create a sink that goes short after `full_chunks` chunks
    pub fn new(full_chunks: usize) -> Self {
        Self {
            full_chunks,
            calls: 0,
        }
    }

    /// Number of times the sink was called
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl ByteSink for ShortSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls > self.full_chunks {
            Ok(chunk.len() / 2)
        } else {
            Ok(chunk.len())
        }
    }
}

/// Source yielding a fixed list of chunks, then end of input
#[derive(Debug, Default)]
pub struct ChunkedSource {
    pending: VecDeque<Vec<u8>>,
}

impl ChunkedSource {
    /// Create a source from chunks
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            pending: chunks.into(),
        }
    }

    /// Split `data` into chunks of at most `size` bytes
    pub fn split(data: &[u8], size: usize) -> Self {
        Self::new(data.chunks(size.max(1)).map(<[u8]>::to_vec).collect())
    }
}

impl ByteSource for ChunkedSource {
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self.pending.pop_front() {
            Some(chunk) => {
                if buf.len() < chunk.len() {
                    buf.resize(chunk.len(), 0);
                }
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None => Ok(0),
        }
    }
}
