use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tablepack_reencode::RasterQuality;
use tablepack_source::SourceFile;
use uuid::Uuid;

/// Opaque, session-unique identifier of an [`OrganizationItem`].
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);
impl ItemId {
    /// A fresh random identifier. Never reused.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How many files an item takes and whether folder semantics apply.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[display("single")]
    Single,
    #[display("multiple")]
    Multiple,
    #[display("folder")]
    Folder,
}
impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            "folder" => Ok(Self::Folder),
            other => Err(format!("unknown item type `{other}`")),
        }
    }
}

/// The fixed set of per-item toggles. Everything defaults to off and
/// [`RasterQuality::Low`].
///
/// Serialized names match existing template files, which predate the
/// "source name" terminology and call it the table name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOptions {
    /// Single items only: replace the file's base name with the primary name.
    #[serde(rename = "useTableName", alias = "useSourceName")]
    pub use_source_name: bool,
    /// Re-encode qualifying images to PNG before naming.
    #[serde(rename = "convertToPng")]
    pub convert_to_raster: bool,
    #[serde(rename = "pngCompressionLevel")]
    pub raster_quality: RasterQuality,
    /// Folder items only: name the archive folder after the label instead of
    /// the uploaded folder.
    #[serde(rename = "renameFolder")]
    pub rename_folder: bool,
}

/// One placement rule: which files go where, and how they are named.
///
/// Attached files are never serialized; a saved item is only the rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationItem {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub label: String,
    /// Directory relative to the archive root, `/` separated. Empty is the root.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub options: ItemOptions,
    #[serde(skip)]
    pub files: Vec<SourceFile>,
}

impl OrganizationItem {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: ItemId::generate(),
            kind,
            label: String::new(),
            location: String::new(),
            options: ItemOptions::default(),
            files: Vec::new(),
        }
    }

    /// The conventional first item of every package: the table file itself,
    /// renamed after the primary name and placed under `tables/`.
    pub fn table_file(file: SourceFile) -> Self {
        let mut item = Self::new(ItemKind::Single).with_label("Table File").with_location("tables/").with_file(file);
        item.options.use_source_name = true;
        item
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_files(mut self, files: impl IntoIterator<Item = SourceFile>) -> Self {
        self.files.extend(files);
        self
    }

    /// Items without files contribute nothing to archives, trees or summaries.
    pub fn is_inert(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(SourceFile::size).sum()
    }

    /// Non-empty segments of the location.
    pub fn location_segments(&self) -> impl Iterator<Item = &str> {
        self.location.split('/').filter(|s| !s.is_empty())
    }

    /// The location without leading, trailing or doubled slashes.
    pub fn normalized_location(&self) -> String {
        self.location_segments().collect::<Vec<_>>().join("/")
    }
}
