use crate::Compression;
use crate::error::{Error, ErrorKind};
use std::str::FromStr;

/// Extensions of formats that are already compressed internally. Deflating
/// them again costs time and usually grows the entry.
const PRECOMPRESSED_EXTENSIONS: &[&str] = &[
    "7z", "avi", "bz2", "f4v", "flac", "gif", "gz", "jpeg", "jpg", "m4a", "m4v", "mkv", "mov", "mp3", "mp4", "ogg",
    "png", "rar", "webm", "webp", "xz", "zip", "zst",
];

impl FromStr for Compression {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "store" | "stored" => Ok(Compression::Stored),
            "deflate" | "deflated" => Ok(Compression::Deflate),
            #[cfg(feature = "bzip2")]
            "bz2" | "bzip2" => Ok(Compression::Bzip2),
            #[cfg(not(feature = "bzip2"))]
            "bz2" | "bzip2" => exn::bail!(ErrorKind::DisabledFormat(s.to_string())),
            #[cfg(feature = "zstd")]
            "zst" | "zstd" => Ok(Compression::Zstd),
            #[cfg(not(feature = "zstd"))]
            "zst" | "zstd" => exn::bail!(ErrorKind::DisabledFormat(s.to_string())),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}
impl Compression {
    /// Refine the configured method for a single entry, based on the entry's
    /// file extension.
    ///
    /// Entries whose extension names an already-compressed format are
    /// [`Stored`](Self::Stored); everything else keeps `self`.
    #[must_use]
    pub fn for_entry(self, path: impl AsRef<str>) -> Self {
        let name = path.as_ref().rsplit('/').next().unwrap_or_default();
        let extension = match name.rsplit_once('.') {
            // A leading dot is a hidden file, not an extension.
            Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
            _ => return self,
        };
        match PRECOMPRESSED_EXTENSIONS.contains(&extension.as_str()) {
            true => Compression::Stored,
            false => self,
        }
    }
}
