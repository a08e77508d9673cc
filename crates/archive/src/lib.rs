//! ZIP archive writing for assembled packages.
//!
//! This crate wraps the [`zip`] writer behind a small API tailored to building
//! a package entirely in memory:
//!
//! - **Entry methods** chosen through the [`Compression`] enum, parsed from
//!   configuration strings ([`Compression::from_str`](std::str::FromStr)) and
//!   refined per entry ([`Compression::for_entry`]) so that media which is
//!   already compressed is stored rather than deflated a second time.
//! - **Deterministic output** via [`ArchiveWriter`]: every entry carries the
//!   same timestamp and permissions, so identical input produces identical
//!   bytes.
//! - **Loud failures** for entry paths that are empty, absolute, traverse
//!   upwards, or collide with an entry already written ([`validate_entry_path`]).
//!
//! Bzip2 and Zstd entry methods are behind feature flags; Stored and Deflate
//! are always available.

#[cfg(feature = "cli")]
pub mod cli;
mod construct;
pub mod error;
mod path;
mod util;
mod writer;

pub use crate::path::validate as validate_entry_path;
pub use crate::writer::ArchiveWriter;

/// The method used to compress each archive entry.
///
/// Variants gated behind feature flags (`bzip2`, `zstd`) are only available
/// when the corresponding feature is enabled. Defaults to
/// [`Deflate`](Self::Deflate), the method every ZIP consumer understands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// No compression, bytes are stored as-is
    Stored,
    /// Deflate, the universally supported ZIP method
    #[default]
    Deflate,
    /// Bzip2 (method 12)
    #[cfg(feature = "bzip2")]
    Bzip2,
    /// Zstandard (method 93)
    #[cfg(feature = "zstd")]
    Zstd,
}
