use crate::error::{ErrorKind, Result};
use crate::plan::plan;
use crate::{ItemKind, OrganizationItem};
use serde::Serialize;
use std::collections::HashSet;

/// Aggregate counts for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    /// Every attached file, directory placeholders included.
    pub file_count: u64,
    /// Distinct directories implied by item locations alone.
    ///
    /// Folder items add at least one directory this doesn't see; see
    /// [`archive_folder_count`](Self::archive_folder_count).
    pub folder_count: u64,
    pub total_size: u64,
    /// Distinct directories actually present in the archive layout.
    pub archive_folder_count: u64,
}

/// Summarizes `items`. Items without files are ignored entirely.
pub fn summarize(items: &[OrganizationItem]) -> PackageSummary {
    let live: Vec<&OrganizationItem> = items.iter().filter(|item| !item.is_inert()).collect();

    let mut locations = HashSet::new();
    for item in &live {
        let mut path = String::new();
        for segment in item.location_segments() {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(segment);
            locations.insert(path.clone());
        }
    }

    // A primary name accepted by `check_ready` has no separators, so it never
    // changes the directory layout.
    let entries = plan(items, "");
    let directories: HashSet<&str> =
        entries.iter().filter(|entry| !entry.is_placeholder()).flat_map(|entry| entry.parent_dirs()).collect();

    PackageSummary {
        file_count: live.iter().map(|item| item.files.len() as u64).sum(),
        folder_count: locations.len() as u64,
        total_size: live.iter().map(|item| item.total_size()).sum(),
        archive_folder_count: directories.len() as u64,
    }
}

/// Returns `true` if at least one item has a file attached.
pub fn has_any_files(items: &[OrganizationItem]) -> bool {
    items.iter().any(|item| !item.is_inert())
}

/// Checks the preconditions of a build without touching any file content.
///
/// # Errors
/// - [`ErrorKind::NothingToBuild`] when no item has files.
/// - [`ErrorKind::MissingPrimaryName`] when `primary` is blank but an item
///   with files would be named after it.
/// - [`ErrorKind::InvalidPrimaryName`] when such an item exists and `primary`
///   contains `/` or `\`.
pub fn check_ready(items: &[OrganizationItem], primary: &str) -> Result<()> {
    if !has_any_files(items) {
        exn::bail!(ErrorKind::NothingToBuild);
    }
    let needs_primary = items
        .iter()
        .any(|item| !item.is_inert() && item.kind == ItemKind::Single && item.options.use_source_name);
    if !needs_primary {
        return Ok(());
    }
    if primary.trim().is_empty() {
        exn::bail!(ErrorKind::MissingPrimaryName);
    }
    if primary.contains(['/', '\\']) {
        exn::bail!(ErrorKind::InvalidPrimaryName(primary.to_string()));
    }
    Ok(())
}
