//! Entry path validation.
//!
//! Archive entry paths are forward-slash separated and relative to the
//! archive root. Unlike filesystem paths they are never resolved or
//! normalized: a path that would need normalizing is rejected, so the path
//! that was predicted is exactly the path that gets written.

use crate::error::{ErrorKind, Result};

/// Validates an archive entry path.
///
/// Rejects empty paths, absolute paths, empty segments (`a//b`, trailing
/// `/`), `.` and `..` segments, backslashes and null bytes.
///
/// # Examples
///
/// ```
/// use tablepack_archive::validate_entry_path;
/// // Valid paths
/// assert!(validate_entry_path("tables/My Game.vpx").is_ok());
/// assert!(validate_entry_path("readme.txt").is_ok());
/// // Invalid paths
/// assert!(validate_entry_path("").is_err());
/// assert!(validate_entry_path("/etc/passwd").is_err());
/// assert!(validate_entry_path("media/../../escape").is_err());
/// assert!(validate_entry_path("media/").is_err());
/// ```
pub fn validate(path: &str) -> Result<&str> {
    if path.is_empty() || path.contains('\0') || path.contains('\\') {
        exn::bail!(ErrorKind::InvalidPath(path.to_string()));
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            exn::bail!(ErrorKind::InvalidPath(path.to_string()));
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("game.vpx")]
    #[case("tables/My Game.vpx")]
    #[case("media/Visual Pinball X/Backglass Images/My Game.png")]
    #[case("roms/.hidden")]
    fn test_valid_paths(#[case] path: &str) {
        assert_eq!(validate(path).unwrap(), path);
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("/absolute.vpx")]
    #[case("a//b")]
    #[case("trailing/")]
    #[case("./a")]
    #[case("a/./b")]
    #[case("..")]
    #[case("a/../b")]
    #[case("a\\b")]
    #[case("a\0b")]
    fn test_invalid_paths(#[case] path: &str) {
        let err = validate(path).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidPath(path.to_string()));
    }
}
