//! Saved organization templates.
//!
//! A template is an ordered list of items with their files stripped, plus a
//! name and some optional metadata. The JSON shape is shared with templates
//! exported by earlier tools, so field names are kept as they were.

use crate::OrganizationItem;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const TEMPLATE_VERSION: &str = "1.0";

fn default_version() -> String {
    TEMPLATE_VERSION.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationTemplate {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub items: Vec<OrganizationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,
}

impl OrganizationTemplate {
    /// Parses and validates a template.
    ///
    /// # Errors
    /// [`ErrorKind::Template`] if the JSON is malformed or the name is blank.
    pub fn from_json(json: &str) -> Result<Self> {
        let template: Self =
            serde_json::from_str(json).or_raise(|| ErrorKind::Template("malformed template JSON".into()))?;
        if template.name.trim().is_empty() {
            exn::bail!(ErrorKind::Template("template has no name".into()));
        }
        Ok(template)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).or_raise(|| ErrorKind::Template("could not serialize template".into()))
    }

    /// Snapshot of `items` as a template, stamped with the current time.
    /// Attached files are dropped.
    pub fn export(items: &[OrganizationItem], name: impl Into<String>) -> Self {
        let items = items.iter().map(|item| OrganizationItem { files: Vec::new(), ..item.clone() }).collect();
        let created = OffsetDateTime::now_utc().format(&Rfc3339).ok();
        Self {
            name: name.into(),
            version: default_version(),
            items,
            metadata: Some(TemplateMetadata { created, ..TemplateMetadata::default() }),
        }
    }

    /// Live items for a new session: fresh ids, no files.
    pub fn instantiate(&self) -> Vec<OrganizationItem> {
        self.items
            .iter()
            .map(|item| OrganizationItem { files: Vec::new(), ..item.clone() }.with_id(crate::ItemId::generate()))
            .collect()
    }

    /// File name to save the template under: ASCII alphanumerics kept and
    /// lowercased, everything else replaced by `_`.
    pub fn file_name(&self) -> String {
        let stem: String =
            self.name.chars().map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' }).collect();
        format!("{stem}_template.json")
    }
}
