//! Files attached to organization items, and where their bytes come from.
//!
//! A [`SourceFile`] is a plain value: the file's leaf name, the sub-path it was
//! recorded under when it arrived as part of a folder, its size, and a MIME
//! type or extension hint. The content itself sits behind a [`ByteSource`] and
//! is only read when an archive is actually assembled, so previews and
//! summaries never touch the bytes.

pub mod error;
mod file;
mod local;
mod memory;

pub use crate::file::SourceFile;
pub use crate::local::{LocalSource, SourceFileStream, discover_folder, discover_folder_stream};
pub use crate::memory::MemorySource;
use crate::error::Result;
use async_trait::async_trait;

/// Lazily readable file content.
///
/// Implementations must be cheap to share: a [`SourceFile`] holds its source
/// behind an [`Arc`](std::sync::Arc) and is cloned freely.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Reads the complete content.
    async fn read(&self) -> Result<Vec<u8>>;

    /// Where the bytes come from, for logging only.
    fn origin(&self) -> String;
}
