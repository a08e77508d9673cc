//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The entry path is empty, absolute, or contains forbidden segments.
    #[display("invalid entry path: {_0:?}")]
    InvalidPath(#[error(not(source))] String),
    /// An entry with the same path has already been written.
    #[display("duplicate entry path: {_0}")]
    DuplicateEntry(#[error(not(source))] String),
    /// The requested method is not supported.
    #[display("unsupported compression method: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// The requested method is supported but not enabled.
    #[display("disabled compression method: {_0}")]
    DisabledFormat(#[error(not(source))] String),
    /// Writing entry data or the central directory failed.
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::DuplicateEntry("media/a.png".to_string()).to_string(), "duplicate entry path: media/a.png");
        assert_eq!(ErrorKind::InvalidPath("../a".to_string()).to_string(), "invalid entry path: \"../a\"");
        assert_eq!(ErrorKind::UnsupportedFormat("lz4".to_string()).to_string(), "unsupported compression method: lz4");
        assert_eq!(ErrorKind::Io.to_string(), "I/O error");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::DuplicateEntry("a".to_string()).is_retryable());
        assert!(!ErrorKind::UnsupportedFormat("lz4".to_string()).is_retryable());
        assert!(ErrorKind::Io.is_retryable());
    }

    #[test]
    fn error_from_result() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full"));
        let err: Result<()> = result.or_raise(|| ErrorKind::Io);
        assert_eq!(*err.unwrap_err(), ErrorKind::Io);
    }
}
