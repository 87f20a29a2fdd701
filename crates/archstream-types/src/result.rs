//! Result type alias for archstream operations

use crate::Error;

/// Result type alias for archstream operations
pub type Result<T> = std::result::Result<T, Error>;
