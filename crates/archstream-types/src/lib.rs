//! Core type system and error handling for archstream
//!
//! This crate provides the foundational types shared by the archstream
//! compression layer and its configuration loader:
//!
//! - **Error handling**: one fatal error model with a threaded diagnostic context
//! - **Compression selection**: parsing of the single integer compression code
//! - **Buffer sizing**: validated capacities for codec buffers
//! - **Transport traits**: the byte sink and byte source callbacks
//!
//! # Features
//!
//! - `std` (default): Enable standard library features
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use archstream_types::{CompressionAlgorithm, CompressionConfig, ErrorContext, ErrorKind};
//!
//! let ctx = ErrorContext::default();
//! let config = CompressionConfig::parse(6, &ctx).unwrap();
//! assert_eq!(config.algorithm(), CompressionAlgorithm::Zlib);
//!
//! let error = CompressionConfig::parse(10, &ctx).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::InvalidParameter);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{BufferCapacity, CompressionLevel, StreamOptions};
pub use error::{Error, ErrorContext, ErrorKind};
pub use result::Result;
pub use traits::*;
pub use types::*;
