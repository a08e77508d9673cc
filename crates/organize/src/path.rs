//! Archive paths.
//!
//! [`resolve_archive_path`] is the single source of truth for where a file
//! lands. The preview tree and the assembler both go through it, which is what
//! keeps the preview an exact prediction of the archive.

use crate::{ItemKind, OrganizationItem};
use tablepack_source::SourceFile;

/// Name used for a folder item's directory when the label is blank.
fn fallback_folder_name(item: &OrganizationItem) -> String {
    match item.label.trim() {
        "" => format!("Folder_{}", item.id),
        label => label.to_string(),
    }
}

/// The directory a folder item's files are grouped under, below its location.
///
/// - With `rename_folder`, the label (or `Folder_<id>` when blank).
/// - Otherwise the top-level folder recorded in the first file's relative
///   path.
/// - Without a recorded relative path, a lone file sits directly in the
///   location (`None`), and several files are grouped under the label (or
///   `Folder_<id>`).
///
/// Always `None` for items that aren't folders.
pub fn folder_name(item: &OrganizationItem) -> Option<String> {
    if item.kind != ItemKind::Folder {
        return None;
    }
    if item.options.rename_folder {
        return Some(fallback_folder_name(item));
    }
    let recorded = item.files.first().map(SourceFile::relative_segments).filter(|segments| segments.len() > 1);
    match recorded {
        Some(segments) => Some(segments[0].to_string()),
        None if item.files.len() <= 1 => None,
        None => Some(fallback_folder_name(item)),
    }
}

/// Computes the archive-root-relative path of `file`, already named
/// `resolved_name`, within `item`.
///
/// Folder items keep the file's recorded sub-path below the original folder
/// (`"MyFolder/sub/img.png"` lands at `<location>/<folder>/sub/img.png`).
/// The result is not validated; the assembler rejects unusable paths.
pub fn resolve_archive_path(item: &OrganizationItem, file: &SourceFile, resolved_name: &str) -> String {
    let folder = folder_name(item);
    let mut parts: Vec<&str> = item.location_segments().collect();
    if let Some(folder) = folder.as_deref() {
        parts.push(folder);
    }
    if item.kind == ItemKind::Folder {
        let segments = file.relative_segments();
        if segments.len() > 2 {
            parts.extend(&segments[1..segments.len() - 1]);
        }
    }
    parts.push(resolved_name);
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemOptions;
    use rstest::rstest;

    fn folder_item(label: &str, rename_folder: bool) -> OrganizationItem {
        OrganizationItem::new(ItemKind::Folder)
            .with_id("f1")
            .with_label(label)
            .with_location("media/")
            .with_options(ItemOptions { rename_folder, ..Default::default() })
    }

    fn nested(relative: &str) -> SourceFile {
        let name = relative.rsplit('/').next().unwrap_or(relative);
        SourceFile::from_bytes(name, vec![1]).with_relative_path(relative)
    }

    #[rstest]
    #[case("", "game.vpx", "game.vpx")]
    #[case("tables/", "My Game.vpx", "tables/My Game.vpx")]
    #[case("tables", "My Game.vpx", "tables/My Game.vpx")]
    #[case("/a//b/", "x.png", "a/b/x.png")]
    fn test_plain_items(#[case] location: &str, #[case] name: &str, #[case] expected: &str) {
        let item = OrganizationItem::new(ItemKind::Multiple).with_location(location);
        let file = SourceFile::from_bytes("ignored", vec![1]);
        assert_eq!(resolve_archive_path(&item, &file, name), expected);
    }

    #[test]
    fn test_folder_keeps_original_name() {
        let file = nested("MyFolder/sub/img.png");
        let item = folder_item("Renamed", false).with_file(file.clone());
        assert_eq!(resolve_archive_path(&item, &file, "img.png"), "media/MyFolder/sub/img.png");
    }

    #[test]
    fn test_folder_renamed_to_label() {
        let file = nested("MyFolder/sub/img.png");
        let item = folder_item("Renamed", true).with_file(file.clone());
        assert_eq!(resolve_archive_path(&item, &file, "img.png"), "media/Renamed/sub/img.png");
    }

    #[test]
    fn test_folder_renamed_with_blank_label_uses_item_id() {
        let file = nested("MyFolder/img.png");
        let item = folder_item("  ", true).with_file(file.clone());
        assert_eq!(folder_name(&item).unwrap(), "Folder_f1");
        assert_eq!(resolve_archive_path(&item, &file, "img.png"), "media/Folder_f1/img.png");
    }

    #[test]
    fn test_folder_name_comes_from_first_file() {
        let first = nested("Art/a.png");
        let second = nested("Other/deep/b.png");
        let item = folder_item("Label", false).with_files([first, second.clone()]);
        assert_eq!(resolve_archive_path(&item, &second, "b.png"), "media/Art/deep/b.png");
    }

    #[test]
    fn test_folder_without_sub_paths() {
        let lone = SourceFile::from_bytes("a.png", vec![1]);
        let item = folder_item("Label", false).with_file(lone.clone());
        assert_eq!(folder_name(&item), None);
        assert_eq!(resolve_archive_path(&item, &lone, "a.png"), "media/a.png");

        let other = SourceFile::from_bytes("b.png", vec![1]);
        let item = item.with_file(other.clone());
        assert_eq!(folder_name(&item).unwrap(), "Label");
        assert_eq!(resolve_archive_path(&item, &other, "b.png"), "media/Label/b.png");

        let item = folder_item("", false).with_files([lone, other.clone()]);
        assert_eq!(resolve_archive_path(&item, &other, "b.png"), "media/Folder_f1/b.png");
    }

    #[test]
    fn test_non_folder_ignores_relative_path() {
        let file = nested("MyFolder/sub/img.png");
        let item = OrganizationItem::new(ItemKind::Multiple).with_location("media").with_file(file.clone());
        assert_eq!(folder_name(&item), None);
        assert_eq!(resolve_archive_path(&item, &file, "img.png"), "media/img.png");
    }
}
