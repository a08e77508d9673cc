//! Package assembly.
//!
//! Streams every planned entry into an in-memory ZIP archive, re-encoding
//! images where items ask for it. The primary entry point is
//! [`assemble_stream`], which yields [`PackageEvent`]s; [`assemble`] drives it
//! to completion and forwards progress percentages to a callback.
//!
//! A failed image re-encode never aborts a package: the original bytes are
//! written under the original name and a [`Warning`] is recorded. Any other
//! failure (unreadable source, unusable path, duplicate entry) aborts the
//! whole package and nothing is returned.

mod stream;

pub use self::stream::{PackageEvent, assemble_stream};
use crate::OrganizationItem;
use crate::error::{ErrorKind, Result, Warning};
use futures::StreamExt;
use tablepack_archive::Compression;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Knobs for a single assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub compression: Compression,
    /// Store already-compressed media (PNG, JPEG, video, ...) instead of
    /// compressing it again.
    pub store_precompressed: bool,
    /// Checked before each file; when cancelled, assembly stops and the
    /// partial archive is discarded.
    pub cancel: Option<CancellationToken>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { compression: Compression::default(), store_precompressed: true, cancel: None }
    }
}

impl AssembleOptions {
    pub fn new(compression: Compression) -> Self {
        Self { compression, ..Self::default() }
    }

    pub fn with_store_precompressed(mut self, enabled: bool) -> Self {
        self.store_precompressed = enabled;
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// A finished archive and what went into it.
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// The complete ZIP archive.
    pub bytes: Vec<u8>,
    /// Archive paths in the order they were written.
    pub entries: Vec<String>,
    /// Paths of directory placeholders that were left out.
    pub skipped: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl Package {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Percentage of `processed` out of `total`, rounded to the nearest integer.
///
/// Only the last file reports 100: anything short of `total` is capped at 99
/// even when it would round up.
pub fn progress(processed: u64, total: u64) -> u8 {
    if total == 0 || processed >= total {
        return 100;
    }
    let rounded = (processed.saturating_mul(200) + total) / total.saturating_mul(2);
    rounded.min(99) as u8
}

/// Assembles the package for `items`, calling `on_progress` once per attached
/// file with a non-decreasing percentage that ends at exactly 100.
///
/// `items` is borrowed for the whole build, so the list cannot change
/// underneath it.
///
/// # Errors
/// See [`ErrorKind`]; preconditions are checked before any file is read.
#[instrument(skip_all, fields(items = items.len(), primary = %primary, output_size))]
pub async fn assemble(
    items: &[OrganizationItem],
    primary: &str,
    options: &AssembleOptions,
    mut on_progress: impl FnMut(u8),
) -> Result<Package> {
    let mut events = std::pin::pin!(assemble_stream(items, primary, options));
    while let Some(event) = events.next().await {
        match event? {
            PackageEvent::Written { progress, .. } | PackageEvent::Skipped { progress, .. } => on_progress(progress),
            PackageEvent::Complete(package) => {
                tracing::Span::current().record("output_size", package.bytes.len());
                return Ok(package);
            },
            PackageEvent::Started | PackageEvent::Planned(_) | PackageEvent::Warning(_) => {},
        }
    }
    // The stream always ends with either an error or `Complete`.
    exn::bail!(ErrorKind::Runtime)
}
