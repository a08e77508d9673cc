use crate::error::EntryContext;
use crate::naming::resolve_file_name_at;
use crate::{OrganizationItem, resolve_archive_path};
use tablepack_reencode::is_raster_image;
use tablepack_source::SourceFile;

/// Where one attached file is headed, as predicted before any bytes are read.
///
/// Names and paths assume re-encoding succeeds; the assembler falls back to
/// [`PlannedEntry::fallback`] when it doesn't.
#[derive(Debug, Clone)]
pub struct PlannedEntry<'a> {
    pub item: &'a OrganizationItem,
    pub file: &'a SourceFile,
    /// Position of the file within its item.
    pub index: usize,
    pub reencode: bool,
    pub name: String,
    pub path: String,
}

impl<'a> PlannedEntry<'a> {
    fn new(item: &'a OrganizationItem, index: usize, file: &'a SourceFile, primary: &str) -> Self {
        let reencode = will_reencode(item, file);
        let name = resolve_file_name_at(item, index, file, primary, reencode);
        let path = resolve_archive_path(item, file, &name);
        Self { item, file, index, reencode, name, path }
    }

    /// The same file, written as-is.
    pub fn fallback(&self, primary: &str) -> Self {
        let name = resolve_file_name_at(self.item, self.index, self.file, primary, false);
        let path = resolve_archive_path(self.item, self.file, &name);
        Self { reencode: false, name, path, ..self.clone() }
    }

    /// Zero-byte, typeless entries stand for directories and are never written.
    pub fn is_placeholder(&self) -> bool {
        self.file.is_directory_placeholder()
    }

    pub fn context(&self) -> EntryContext {
        EntryContext {
            item: self.item.id.clone(),
            file: self.file.name().to_string(),
            path: self.path.clone(),
            size: self.file.size(),
            hint: self.file.hint().map(String::from),
        }
    }

    /// Directories above the entry, shallowest first.
    pub(crate) fn parent_dirs(&self) -> impl Iterator<Item = &str> {
        self.path.match_indices('/').map(|(i, _)| &self.path[..i])
    }
}

/// Whether the file will be re-encoded. The tree and the assembler must agree
/// on this without decoding anything.
pub(crate) fn will_reencode(item: &OrganizationItem, file: &SourceFile) -> bool {
    item.options.convert_to_raster && is_raster_image(file.name(), file.hint())
}

pub(crate) fn plan_item<'a>(item: &'a OrganizationItem, primary: &str) -> impl Iterator<Item = PlannedEntry<'a>> {
    item.files.iter().enumerate().map(move |(index, file)| PlannedEntry::new(item, index, file, primary))
}

/// Every attached file across `items`, in item order then file order, with
/// its resolved name and archive path. Directory placeholders are included.
pub fn plan<'a>(items: &'a [OrganizationItem], primary: &str) -> Vec<PlannedEntry<'a>> {
    items.iter().flat_map(|item| plan_item(item, primary)).collect()
}
