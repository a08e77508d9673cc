//! Organize Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use crate::ItemId;
use derive_more::{Display, Error};
use std::fmt::{Display as FmtDisplay, Formatter, Result as FmtResult};

/// An organize error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for organize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the file an assembly failure happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryContext {
    pub item: ItemId,
    pub file: String,
    /// Archive path the file was headed for.
    pub path: String,
    pub size: u64,
    pub hint: Option<String>,
}
impl FmtDisplay for EntryContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "`{}` at `{}` (item {}, {} bytes, type {})",
            self.file,
            self.path,
            self.item,
            self.size,
            self.hint.as_deref().filter(|h| !h.is_empty()).unwrap_or("unknown"),
        )
    }
}

/// Classifies the origin of an organize failure.
///
/// ### Preconditions
/// Checked before any file is touched, see [`check_ready`](crate::check_ready).
/// - [`ErrorKind::NothingToBuild`]
/// - [`ErrorKind::MissingPrimaryName`]
/// - [`ErrorKind::InvalidPrimaryName`]
///
/// ### Fatal per package
/// Any of these abort assembly; no partial archive is returned.
/// - [`ErrorKind::Source`]
/// - [`ErrorKind::InvalidPath`]
/// - [`ErrorKind::EntryWrite`]
/// - [`ErrorKind::Finalize`]
/// - [`ErrorKind::Cancelled`]
/// - [`ErrorKind::Runtime`]
///
/// Image re-encoding failures are never errors; they surface as
/// [`Warning`](crate::Warning)s instead.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("nothing to build: no item has any files attached")]
    NothingToBuild,
    #[display("a primary name is required by items that use it")]
    MissingPrimaryName,
    /// The primary name would add directories to the paths it is substituted into.
    #[display("primary name `{_0}` must not contain a path separator")]
    InvalidPrimaryName(#[error(not(source))] String),
    /// The file's bytes could not be read.
    #[display("could not read {_0}")]
    Source(#[error(not(source))] EntryContext),
    /// The resolved archive path is empty or would escape the archive root.
    #[display("invalid archive path for {_0}")]
    InvalidPath(#[error(not(source))] EntryContext),
    /// The archive rejected the entry, including duplicate paths.
    #[display("could not write archive entry for {_0}")]
    EntryWrite(#[error(not(source))] EntryContext),
    /// Every entry was written but the archive could not be closed.
    #[display("could not finalize the archive")]
    Finalize,
    #[display("package assembly was cancelled")]
    Cancelled,
    #[display("invalid organization template: {_0}")]
    Template(#[error(not(source))] String),
    /// The configured archive name template could not be compiled or rendered.
    #[display("could not produce an archive name")]
    ArchiveName,
    /// A blocking task panicked or was aborted.
    #[display("background task failed")]
    Runtime,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Source(_) | Self::Runtime)
    }
}

/// Recoverable per-file problems, collected on the finished
/// [`Package`](crate::Package) instead of aborting it.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Warning {
    #[display("could not re-encode `{file}` (item {item}), kept the original: {reason}")]
    ReencodeFailed { item: ItemId, file: String, reason: String },
}
