//! Preset catalogs.
//!
//! Presets are static data describing commonly used items, grouped by the
//! emulator or frontend they belong to. The core only knows their shape and
//! how to turn one into a live [`OrganizationItem`]; the catalog itself is
//! supplied by the caller.

use crate::error::{ErrorKind, Result};
use crate::{ItemKind, ItemOptions, OrganizationItem};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use tablepack_reencode::RasterQuality;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetItem {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub default_location: String,
    #[serde(default, rename = "useTableName")]
    pub use_source_name: bool,
    #[serde(default)]
    pub category: String,
}

impl PresetItem {
    /// A new item placed at the preset's default location, with conversion
    /// and folder renaming off.
    pub fn instantiate(&self, quality: RasterQuality) -> OrganizationItem {
        OrganizationItem::new(self.kind).with_label(&self.label).with_location(&self.default_location).with_options(
            ItemOptions {
                use_source_name: self.use_source_name,
                convert_to_raster: false,
                raster_quality: quality,
                rename_folder: false,
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetCategory {
    pub name: String,
    /// Where the category's tree usually lives in a deployment; informational.
    #[serde(default)]
    pub parent_path: String,
    pub items: Vec<PresetItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalog(Vec<PresetCategory>);

impl PresetCatalog {
    pub fn new(categories: Vec<PresetCategory>) -> Self {
        Self(categories)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).or_raise(|| ErrorKind::Template("malformed preset catalog".into()))
    }

    pub fn categories(&self) -> &[PresetCategory] {
        &self.0
    }

    pub fn items(&self) -> impl Iterator<Item = &PresetItem> {
        self.0.iter().flat_map(|category| category.items.iter())
    }

    pub fn find(&self, id: &str) -> Option<&PresetItem> {
        self.items().find(|item| item.id == id)
    }
}
