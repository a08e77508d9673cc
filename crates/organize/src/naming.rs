//! Output file names.

use crate::{ItemKind, OrganizationItem};
use tablepack_reencode::CANONICAL_EXTENSION;
use tablepack_source::SourceFile;

/// Everything before the last dot, or the whole name without one.
fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// The primary name implied by a table file's name: its name minus the last
/// extension (`"My Game.vpx"` becomes `"My Game"`).
pub fn primary_name_from_file(name: &str) -> &str {
    stem(name)
}

/// Computes the archive file name of `file` as the first file of `item`.
///
/// - Single items using the source name take the primary name as their base,
///   keeping the original extension, or the PNG extension when re-encoded.
/// - Otherwise a re-encoded file keeps its base name with the PNG extension.
/// - Otherwise the name is unchanged.
///
/// The primary name is not validated: an empty one yields a bare extension
/// (`".vpx"`). Check it up front with [`check_ready`](crate::check_ready).
pub fn resolve_file_name(file: &SourceFile, item: &OrganizationItem, primary: &str, was_reencoded: bool) -> String {
    if item.kind == ItemKind::Single && item.options.use_source_name {
        let extension = if was_reencoded { Some(CANONICAL_EXTENSION) } else { file.extension() };
        return match extension {
            Some(ext) => format!("{primary}.{ext}"),
            None => primary.to_string(),
        };
    }
    plain_file_name(file.name(), was_reencoded)
}

/// Name of a file that never takes the primary name.
pub(crate) fn plain_file_name(name: &str, was_reencoded: bool) -> String {
    if was_reencoded { format!("{}.{CANONICAL_EXTENSION}", stem(name)) } else { name.to_string() }
}

/// Resolves the name of the file at `index` within its item.
///
/// Only the first file of a Single item takes the primary name; any extra
/// files attached to it keep their own names so nothing collides.
pub(crate) fn resolve_file_name_at(
    item: &OrganizationItem,
    index: usize,
    file: &SourceFile,
    primary: &str,
    was_reencoded: bool,
) -> String {
    if index == 0 {
        resolve_file_name(file, item, primary, was_reencoded)
    } else {
        plain_file_name(file.name(), was_reencoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemOptions;
    use rstest::rstest;

    fn item(kind: ItemKind, use_source_name: bool) -> OrganizationItem {
        OrganizationItem::new(kind).with_options(ItemOptions { use_source_name, ..Default::default() })
    }

    #[rstest]
    #[case("game.vpx")]
    #[case("archive.tar.gz")]
    #[case("README")]
    #[case("")]
    #[case("weird..name.")]
    #[case("spaces in name.PNG")]
    fn test_untouched_names_are_identity(#[case] name: &str) {
        let file = SourceFile::from_bytes(name, vec![1]);
        for kind in [ItemKind::Single, ItemKind::Multiple, ItemKind::Folder] {
            assert_eq!(resolve_file_name(&file, &item(kind, false), "My Game", false), name);
        }
    }

    #[rstest]
    #[case("game.vpx", false, "My Game.vpx")]
    #[case("cover.jpg", true, "My Game.png")]
    #[case("archive.tar.gz", false, "My Game.gz")]
    #[case("README", false, "My Game")]
    fn test_primary_name_substitution(#[case] name: &str, #[case] reencoded: bool, #[case] expected: &str) {
        let file = SourceFile::from_bytes(name, vec![1]);
        assert_eq!(resolve_file_name(&file, &item(ItemKind::Single, true), "My Game", reencoded), expected);
    }

    #[test]
    fn test_primary_name_only_applies_to_single_items() {
        let file = SourceFile::from_bytes("a.jpg", vec![1]);
        assert_eq!(resolve_file_name(&file, &item(ItemKind::Multiple, true), "My Game", false), "a.jpg");
        assert_eq!(resolve_file_name(&file, &item(ItemKind::Folder, true), "My Game", true), "a.png");
    }

    #[test]
    fn test_empty_primary_name_yields_bare_extension() {
        let file = SourceFile::from_bytes("game.vpx", vec![1]);
        assert_eq!(resolve_file_name(&file, &item(ItemKind::Single, true), "", false), ".vpx");
    }

    #[rstest]
    #[case("photo.jpeg", "photo.png")]
    #[case("multi.part.gif", "multi.part.png")]
    #[case("noext", "noext.png")]
    fn test_reencoded_names(#[case] name: &str, #[case] expected: &str) {
        let file = SourceFile::from_bytes(name, vec![1]);
        assert_eq!(resolve_file_name(&file, &item(ItemKind::Multiple, false), "x", true), expected);
    }

    #[test]
    fn test_extra_single_files_keep_their_names() {
        let single = item(ItemKind::Single, true);
        let first = SourceFile::from_bytes("game.vpx", vec![1]);
        let extra = SourceFile::from_bytes("game.directb2s", vec![1]);
        assert_eq!(resolve_file_name_at(&single, 0, &first, "My Game", false), "My Game.vpx");
        assert_eq!(resolve_file_name_at(&single, 1, &extra, "My Game", false), "game.directb2s");
    }

    #[rstest]
    #[case("My Game.vpx", "My Game")]
    #[case("table.v1.2.vpx", "table.v1.2")]
    #[case("noext", "noext")]
    fn test_primary_name_from_file(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(primary_name_from_file(name), expected);
    }
}
