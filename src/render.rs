//! Plain-text output for the terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tablepack_organize::{FileTreeNode, PackageSummary, format_size};

const PROGRESS_TEMPLATE: &str = "{msg} [{bar:40}] {pos:>3}%";

/// Percentage bar for a package build, drawn on stderr. Hidden when `quiet`.
pub fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100).with_message("Building");
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Draws `root`'s children as an indented tree, in the order the preview
/// lists them.
pub fn tree(root: &FileTreeNode) -> String {
    TreeView(root).to_string()
}

struct TreeView<'a>(&'a FileTreeNode);

impl Display for TreeView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.children().is_empty() {
            return writeln!(f, "(empty package)");
        }
        branch(f, self.0.children(), "")
    }
}

fn branch(out: &mut Formatter<'_>, nodes: &[FileTreeNode], prefix: &str) -> FmtResult {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let (connector, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        if node.is_folder() {
            writeln!(out, "{prefix}{connector}{}/", node.name)?;
            branch(out, node.children(), &format!("{prefix}{indent}"))?;
        } else if let Some(size) = node.size {
            writeln!(out, "{prefix}{connector}{} ({})", node.name, format_size(size))?;
        } else {
            writeln!(out, "{prefix}{connector}{}", node.name)?;
        }
    }
    Ok(())
}

pub fn summary(summary: &PackageSummary) -> String {
    format!(
        "Files:    {}\nFolders:  {} ({} in archive)\nSize:     {}\n",
        summary.file_count,
        summary.folder_count,
        summary.archive_folder_count,
        format_size(summary.total_size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablepack_organize::{ItemKind, OrganizationItem, SourceFile, build_tree};

    #[test]
    fn test_tree() {
        let items = vec![
            OrganizationItem::table_file(SourceFile::from_bytes("x.vpx", b"12345".to_vec())),
            OrganizationItem::new(ItemKind::Single)
                .with_location("media/")
                .with_file(SourceFile::from_bytes("bg.png", b"png".to_vec())),
        ];
        let rendered = tree(&build_tree(&items, "Game"));
        assert_eq!(
            rendered,
            "├── tables/\n│   └── Game.vpx (5 B)\n└── media/\n    └── bg.png (3 B)\n",
        );
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(tree(&build_tree(&[], "Game")), "(empty package)\n");
    }

    #[test]
    fn test_quiet_progress_bar_is_hidden() {
        let bar = progress_bar(true);
        assert!(bar.is_hidden());
        bar.set_position(42);
        assert_eq!(bar.position(), 42);
        bar.finish_and_clear();
    }

    #[test]
    fn test_progress_bar_counts_percent() {
        let bar = progress_bar(false);
        assert_eq!(bar.length(), Some(100));
        assert_eq!(bar.message(), "Building");
        bar.abandon();
    }

    #[test]
    fn test_summary() {
        let totals = PackageSummary { file_count: 3, folder_count: 1, total_size: 2048, archive_folder_count: 2 };
        assert_eq!(summary(&totals), "Files:    3\nFolders:  1 (2 in archive)\nSize:     2 KB\n");
    }
}
