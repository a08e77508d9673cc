use crate::error::Result;
use crate::{ByteSource, MemorySource};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// A file attached to an organization item.
///
/// `relative_path` is only set for files that arrived as part of a folder, and
/// then starts with the folder's own name (`"backglass/left/a.png"`).
#[derive(Clone)]
pub struct SourceFile {
    name: String,
    relative_path: Option<String>,
    size: u64,
    hint: Option<String>,
    content: Arc<dyn ByteSource>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, size: u64, content: Arc<dyn ByteSource>) -> Self {
        Self { name: name.into(), relative_path: None, size, hint: None, content }
    }

    /// In-memory file whose size is taken from the data.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let source = MemorySource::new(data);
        let size = source.len() as u64;
        Self::new(name, size, Arc::new(source))
    }

    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    /// Set the MIME type or extension hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Everything after the last dot of the name, if there is anything there.
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
    }

    /// Non-empty segments of the relative path.
    pub fn relative_segments(&self) -> Vec<&str> {
        self.relative_path
            .as_deref()
            .map(|p| p.split('/').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Browsers report folder entries as zero-byte files with no type. These
    /// carry no content and are left out of archives and trees.
    pub fn is_directory_placeholder(&self) -> bool {
        self.size == 0 && self.hint.as_deref().is_none_or(str::is_empty)
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        self.content.read().await
    }

    pub fn origin(&self) -> String {
        self.content.origin()
    }
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("relative_path", &self.relative_path)
            .field("size", &self.size)
            .field("hint", &self.hint)
            .field("origin", &self.content.origin())
            .finish()
    }
}
