//! archstream Testing Suite
//!
//! This crate holds the cross-crate integration tests and throughput
//! benchmarks for archstream, plus the sinks, sources and data generators
//! they share.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Recording and short-accepting sinks, chunked sources, deterministic
/// test data and tracing setup for test binaries.
pub mod test_utils;
