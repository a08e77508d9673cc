//! Re-encode Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A re-encode error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for re-encode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not an image, or is corrupt. Don't retry with the same input.
    #[display("image could not be decoded")]
    Decode,
    /// The decoded image could not be written as PNG (e.g. unsupported pixel layout).
    #[display("image could not be encoded")]
    Encode,
    /// The named quality setting does not exist.
    #[display("unknown raster quality: {_0}")]
    UnknownQuality(#[error(not(source))] String),
    /// The blocking encoder task panicked or was cancelled.
    #[display("re-encode task failed")]
    Runtime,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Runtime)
    }
}
