//! The organization-to-archive engine.
//!
//! Callers describe a package as an ordered list of [`OrganizationItem`]s:
//! placement rules that say which files go where and how they are named.
//! From that list (and the session's primary name) this crate derives:
//!
//! - **Names** ([`resolve_file_name`]) and **paths** ([`resolve_archive_path`])
//!   for every attached file.
//! - A **preview** ([`build_tree`]) laid out exactly like the archive.
//! - The **archive** itself ([`assemble`], [`assemble_stream`]), with images
//!   optionally re-encoded to PNG and progress reported per file.
//! - A **summary** ([`summarize`]) of counts and sizes.
//!
//! Every operation is a pure function of the item list and primary name; the
//! list is only ever borrowed. [`check_ready`] validates a build up front
//! without reading any file content.
//!
//! Saved [templates](OrganizationTemplate) and [preset catalogs](PresetCatalog)
//! produce items but are otherwise outside the engine.

pub mod error;
mod item;
mod namer;
mod naming;
pub mod package;
mod path;
mod plan;
mod preset;
mod summary;
mod template;
mod tree;
mod util;

pub use crate::error::Warning;
pub use crate::item::{ItemId, ItemKind, ItemOptions, OrganizationItem};
pub use crate::namer::{ARCHIVE_EXTENSION, ArchiveNamer};
pub use crate::naming::{primary_name_from_file, resolve_file_name};
pub use crate::package::{AssembleOptions, Package, PackageEvent, assemble, assemble_stream};
pub use crate::path::{folder_name, resolve_archive_path};
pub use crate::plan::{PlannedEntry, plan};
pub use crate::preset::{PresetCatalog, PresetCategory, PresetItem};
pub use crate::summary::{PackageSummary, check_ready, has_any_files, summarize};
pub use crate::template::{OrganizationTemplate, TEMPLATE_VERSION, TemplateMetadata};
pub use crate::tree::{FileTreeNode, NodeKind, build_tree};
pub use crate::util::format_size;
pub use tablepack_reencode::RasterQuality;
pub use tablepack_source::SourceFile;
