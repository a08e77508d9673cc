//! In-memory archive writer.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use crate::path::validate;
use exn::ResultExt;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::instrument;
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipWriter};

const ENTRY_PERMISSIONS: u32 = 0o644;

/// Writes a ZIP archive into an in-memory buffer, one entry at a time.
///
/// Every entry is stamped with the same modification time (the ZIP epoch,
/// 1980-01-01) and the same permissions, so writing identical entries in the
/// same order yields byte-identical archives.
///
/// # Examples
///
/// ```
/// use tablepack_archive::{ArchiveWriter, Compression};
///
/// let mut writer = ArchiveWriter::new(Compression::Deflate);
/// writer.add("tables/My Game.vpx", b"table data").unwrap();
/// // Paths are never written twice.
/// assert!(writer.add("tables/My Game.vpx", b"other").is_err());
/// let bytes = writer.finish().unwrap();
/// assert!(bytes.starts_with(b"PK"));
/// ```
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    compression: Compression,
    store_precompressed: bool,
    entries: HashSet<String>,
}
impl ArchiveWriter {
    /// Creates an empty archive whose entries use `compression`.
    pub fn new(compression: Compression) -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            compression,
            store_precompressed: true,
            entries: HashSet::new(),
        }
    }

    /// Whether entries in an already-compressed format (see
    /// [`Compression::for_entry`]) are stored instead of compressed again.
    /// Enabled by default.
    pub fn with_store_precompressed(mut self, enabled: bool) -> Self {
        self.store_precompressed = enabled;
        self
    }

    /// The method entries are written with, before per-entry refinement.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry has already been written at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    /// Appends one file entry.
    ///
    /// # Errors
    /// - [`ErrorKind::InvalidPath`] if `path` fails [validation](crate::validate_entry_path).
    /// - [`ErrorKind::DuplicateEntry`] if `path` was already written; the
    ///   archive is left untouched.
    /// - [`ErrorKind::Io`] if the encoder fails.
    #[instrument(skip(self, data), fields(size = data.len(), method))]
    pub fn add(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = validate(path)?;
        if self.entries.contains(path) {
            exn::bail!(ErrorKind::DuplicateEntry(path.to_string()));
        }
        let compression = match self.store_precompressed {
            true => self.compression.for_entry(path),
            false => self.compression,
        };
        tracing::Span::current().record("method", compression.as_str());
        let options = SimpleFileOptions::default()
            .compression_method(compression.method())
            .compression_level(compression.level())
            .last_modified_time(DateTime::default())
            .unix_permissions(ENTRY_PERMISSIONS)
            .large_file(data.len() as u64 >= u64::from(u32::MAX));
        self.zip.start_file(path, options).or_raise(|| ErrorKind::Io)?;
        self.zip.write_all(data).or_raise(|| ErrorKind::Io)?;
        self.entries.insert(path.to_string());
        Ok(())
    }

    /// Writes the central directory and returns the finished archive bytes.
    #[instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish().or_raise(|| ErrorKind::Io)?;
        Ok(cursor.into_inner())
    }
}
