//! Error handling tests for archstream-compression

use crate::capability::Capabilities;
use crate::session::{read_data, read_data_with, CompressorSession};
use archstream_types::{
    sink_fn, source_fn, BufferCapacity, CompressionConfig, ErrorContext, ErrorKind,
    ReaderSource, StreamOptions, WriterSink,
};
use std::io::{self, Cursor, Write};

fn zlib_bytes(data: &[u8]) -> Vec<u8> {
    let mut session = CompressorSession::allocate(6, WriterSink::new(Vec::new())).unwrap();
    session.write(data).unwrap();
    session.end().unwrap().into_inner()
}

/// Garbage fed to the zlib reader is a codec error
#[test]
fn test_invalid_compressed_data() {
    let mut out = Vec::new();
    let error = read_data(
        6,
        &mut ReaderSource::new(Cursor::new(vec![0xFF; 100])),
        &mut out,
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Codec);
    assert!(error.to_string().contains("could not uncompress data"));
}

/// A corrupted header is caught by the decoder
#[test]
fn test_corrupted_header() {
    let mut stored = zlib_bytes(b"Hello, world! This is test data.");
    stored[0] = stored[0].wrapping_add(1);

    let mut out = Vec::new();
    let error = read_data(6, &mut ReaderSource::new(Cursor::new(stored)), &mut out).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Codec);
}

/// A corrupted trailer fails the checksum
#[test]
fn test_corrupted_checksum() {
    let mut stored = zlib_bytes(&b"Hello, world! This is test data.".repeat(10));
    let last = stored.len() - 1;
    stored[last] ^= 0xFF;

    let mut out = Vec::new();
    let error = read_data(6, &mut ReaderSource::new(Cursor::new(stored)), &mut out).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Codec);
}

/// Truncated input stops at the drain loop instead of hanging
#[test]
fn test_truncated_stream() {
    let stored = zlib_bytes(&b"Hello, world! This is test data for compression.".repeat(10));
    let truncated = stored[..stored.len() / 2].to_vec();

    let mut out = Vec::new();
    let error =
        read_data(6, &mut ReaderSource::new(Cursor::new(truncated)), &mut out).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Codec);
}

/// Bytes after the zlib trailer are rejected
#[test]
fn test_trailing_garbage() {
    let mut stored = zlib_bytes(b"payload");
    stored.extend_from_slice(b"junk");

    let mut out = Vec::new();
    let error = read_data(6, &mut ReaderSource::new(Cursor::new(stored)), &mut out).unwrap_err();
    assert!(error.to_string().contains("trailing data"));
    assert_eq!(out, b"payload");
}

/// An empty zlib source is a truncated stream, not an empty payload
#[test]
fn test_empty_zlib_source() {
    let mut out = Vec::new();
    let error =
        read_data(6, &mut ReaderSource::new(Cursor::new(Vec::new())), &mut out).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Codec);
}

/// A sink that accepts short stops the session at the first short chunk
#[test]
fn test_short_sink_zlib() {
    let options = StreamOptions::with_capacity(BufferCapacity::new(64).unwrap());
    let config = CompressionConfig::parse(1, &ErrorContext::default()).unwrap();
    let mut accepted = Vec::new();
    let mut session = CompressorSession::with_options(
        config,
        options,
        Capabilities::detect(),
        ErrorContext::new("dump"),
        sink_fn(|chunk: &[u8]| {
            accepted.push(chunk.len());
            if accepted.len() == 2 {
                Ok(chunk.len() / 2)
            } else {
                Ok(chunk.len())
            }
        }),
    )
    .unwrap();

    // Varied bytes so the encoder fills many buffers before the write returns.
    let data: Vec<u8> = (0..200_000u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();
    let error = session.write(&data).unwrap_err();
    assert_eq!(session.write(b"more").unwrap_err(), error);
    assert_eq!(session.end().err(), Some(error.clone()));
    assert_eq!(error.kind(), ErrorKind::ShortWrite);
    assert!(error.to_string().starts_with("dump: could not write to output file"));
    assert_eq!(accepted.len(), 2);
}

/// A transport error's text reaches the ShortWrite message
#[test]
fn test_sink_error_text() {
    let mut session = CompressorSession::allocate(
        0,
        sink_fn(|_: &[u8]| Err(io::Error::new(io::ErrorKind::Other, "No space left on device"))),
    )
    .unwrap();
    let error = session.write(b"abc").unwrap_err();
    assert!(error.to_string().contains("No space left on device"));
}

/// A consumer that refuses decoded bytes fails the read
#[test]
fn test_failing_consumer() {
    struct Refuse;

    impl Write for Refuse {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "consumer closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let stored = zlib_bytes(b"payload");
    let error = read_data(6, &mut ReaderSource::new(Cursor::new(stored)), &mut Refuse)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ShortWrite);
    assert!(error.to_string().contains("consumer closed"));
}

/// A source that errors is reported as I/O, not as a codec failure
#[test]
fn test_failing_source() {
    let mut source =
        source_fn(|_: &mut Vec<u8>| Err(io::Error::new(io::ErrorKind::Other, "read failed")));
    let mut out = Vec::new();
    for code in [0, 6] {
        let config = CompressionConfig::parse(code, &ErrorContext::default()).unwrap();
        let error = read_data_with(
            &config,
            &StreamOptions::default(),
            Capabilities::detect(),
            &ErrorContext::default(),
            &mut source,
            &mut out,
        )
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
