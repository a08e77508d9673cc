//! Files on the local filesystem.
//!
//! Content is read lazily via `tokio::fs`, and whole directories can be
//! discovered the way a browser reports a dropped folder: every file gets a
//! relative path that starts with the directory's own name.

use crate::error::{ErrorKind, Result};
use crate::{ByteSource, SourceFile};
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, TryStreamExt};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::fs::{self, DirEntry};

/// Fallback hint for local files without an extension, so an empty file is
/// never mistaken for a directory entry.
const UNKNOWN_HINT: &str = "application/octet-stream";

pub type SourceFileStream = Pin<Box<dyn Stream<Item = Result<SourceFile>> + Send>>;

enum WalkEntry {
    File(SourceFile),
    Descend(PathBuf),
    Skip,
}

/// A file read from disk when the archive is assembled.
pub struct LocalSource {
    path: PathBuf,
}
impl LocalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for LocalSource {
    async fn read(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path).await.map_err(|e| ErrorKind::from_io(e, &self.path))?)
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }
}

fn file_name(path: &Path) -> Result<String> {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => Ok(name.to_string()),
        None => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
    }
}

fn local_hint(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| UNKNOWN_HINT.to_string())
}

impl SourceFile {
    /// Attach a single file from disk. Only metadata is read here.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).await.map_err(|e| ErrorKind::from_io(e, path))?;
        if !metadata.is_file() {
            exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
        }
        let name = file_name(path)?;
        let hint = local_hint(&name);
        Ok(Self::new(name, metadata.len(), Arc::new(LocalSource::new(path))).with_hint(hint))
    }
}

async fn process_entry(entry: DirEntry, root: &Path, prefix: &str) -> Result<WalkEntry> {
    let path = entry.path();
    let metadata = entry.metadata().await.map_err(|e| ErrorKind::from_io(e, &path))?;
    if metadata.is_dir() {
        return Ok(WalkEntry::Descend(path));
    }
    if !metadata.is_file() {
        // Broken symlinks and other special entries.
        return Ok(WalkEntry::Skip);
    }
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ErrorKind::InvalidPath(path.clone()))?
        .components()
        .map(|c| c.as_os_str().to_str().ok_or_else(|| ErrorKind::InvalidPath(path.clone())))
        .collect::<std::result::Result<Vec<_>, _>>()?
        .join("/");
    let name = file_name(&path)?;
    let hint = local_hint(&name);
    let file = SourceFile::new(name, metadata.len(), Arc::new(LocalSource::new(&path)))
        .with_relative_path(format!("{prefix}/{relative}"))
        .with_hint(hint);
    Ok(WalkEntry::File(file))
}

/// Walk a directory, yielding every regular file beneath it in no particular
/// order. Unreadable entries are yielded as errors without ending the walk.
pub fn discover_folder_stream(root: impl Into<PathBuf>) -> SourceFileStream {
    let root = root.into();
    let prefix = match file_name(&root) {
        Ok(name) => name,
        Err(e) => return Box::pin(futures::stream::once(async { Err(e) })),
    };
    let mut stack = vec![root.clone()];

    Box::pin(stream! {
        'dirs: while let Some(current) = stack.pop() {
            let mut entries = match fs::read_dir(&current).await {
                Ok(entries) => entries,
                Err(e) => {
                    yield Err(exn::Exn::from(ErrorKind::from_io(e, &current)));
                    continue 'dirs;
                }
            };
            'entries: loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break 'entries,
                    Err(e) => { yield Err(exn::Exn::from(ErrorKind::from_io(e, &current))); continue 'entries; },
                };
                match process_entry(entry, &root, &prefix).await {
                    Ok(WalkEntry::File(f)) => yield Ok(f),
                    Ok(WalkEntry::Descend(d)) => stack.push(d),
                    Ok(WalkEntry::Skip) => {},
                    Err(e) => yield Err(e),
                }
            }
        }
    })
}

/// Discover every file in a directory, sorted by relative path so repeated
/// discoveries of the same tree produce the same order.
#[tracing::instrument(skip(root), fields(root = %root.as_ref().display(), file_count))]
pub async fn discover_folder(root: impl AsRef<Path>) -> Result<Vec<SourceFile>> {
    let root = root.as_ref();
    let metadata = fs::metadata(root).await.map_err(|e| ErrorKind::from_io(e, root))?;
    if !metadata.is_dir() {
        exn::bail!(ErrorKind::InvalidPath(root.to_path_buf()));
    }
    let mut files: Vec<SourceFile> = discover_folder_stream(root).try_collect().await?;
    files.sort_by(|a, b| a.relative_path().cmp(&b.relative_path()));
    tracing::Span::current().record("file_count", files.len());
    tracing::debug!("discovered folder contents");
    Ok(files)
}
