//! Streaming compression layer for archive writers and readers
//!
//! This crate sits between a record-oriented archiver and the raw byte
//! transport underneath it. The archiver writes or reads a logical byte
//! stream; a codec (zlib) or a passthrough transforms it in bounded chunks
//! behind one contract:
//!
//! - **Write side**: [`CompressorSession`] takes any number of writes and
//!   flushes the codec trailer when ended
//! - **Read side**: [`read_data`] pulls compressed chunks until the source is
//!   exhausted and hands decoded bytes to any [`std::io::Write`]
//! - **Capability check**: requesting a codec that is not compiled in fails
//!   with `UnsupportedCodec` before anything is allocated
//!
//! Every error is fatal to the operation that raised it.
//!
//! # Features
//!
//! - `zlib` (default): zlib support through `flate2`
//! - `serde` (default): Enable serialization support for statistics
//!
//! # Examples
//!
//! ```rust
//! use archstream_compression::{read_data, Capabilities, CompressorSession};
//! use archstream_types::{CompressionAlgorithm, ReaderSource, WriterSink};
//! use std::io::Cursor;
//!
//! // zlib level 6 when compiled in, stored otherwise
//! let code = if Capabilities::detect().is_available(CompressionAlgorithm::Zlib) {
//!     6
//! } else {
//!     0
//! };
//!
//! let mut session = CompressorSession::allocate(code, WriterSink::new(Vec::new()))?;
//! session.write(b"Hello, world! ")?;
//! session.write(b"Hello again.")?;
//! let stored = session.end()?.into_inner();
//!
//! let mut restored = Vec::new();
//! read_data(code, &mut ReaderSource::new(Cursor::new(stored)), &mut restored)?;
//! assert_eq!(restored, b"Hello, world! Hello again.");
//! # Ok::<(), archstream_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod capability;
pub mod codec;
pub mod deflate;
pub mod inflate;
pub mod passthrough;
pub mod session;
pub mod stats;
#[cfg(feature = "zlib")]
pub mod zlib;

#[cfg(all(test, feature = "zlib"))]
mod error_tests;

// Re-export main types
pub use capability::Capabilities;
pub use codec::{FlushMode, Step, StepDecoder, StepEncoder};
pub use deflate::StreamCompressor;
pub use inflate::StreamDecompressor;
pub use passthrough::{read_passthrough, PassthroughWriter};
pub use session::{read_data, read_data_with, CompressorSession};
pub use stats::StreamStats;
#[cfg(feature = "zlib")]
pub use zlib::{ZlibDecoder, ZlibEncoder};
