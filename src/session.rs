//! Turning command-line arguments into an item list.

use crate::catalog;
use crate::cli::Layout;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use std::path::Path;
use tablepack_organize::{
    ItemKind, OrganizationItem, OrganizationTemplate, RasterQuality, SourceFile, primary_name_from_file,
};
use tablepack_source::discover_folder;

/// Items plus the keys `--attach` can refer to them by.
#[derive(Debug, Default)]
pub struct Session {
    pub primary: String,
    pub items: Vec<OrganizationItem>,
    /// Per item: the template or preset id it came from, and its label.
    keys: Vec<Vec<String>>,
}

impl Session {
    pub async fn load(layout: &Layout, quality: RasterQuality) -> Result<Self> {
        let mut session = Self::default();
        if let Some(template) = &layout.template {
            session.apply_template(&load_template(template).await?);
        }
        if !layout.presets.is_empty() {
            let catalog = catalog::presets()?;
            for id in &layout.presets {
                let preset =
                    catalog.find(id).ok_or_raise(|| ErrorKind::Usage(format!("no preset with id `{id}`")))?;
                session.push(preset.instantiate(quality), [preset.id.clone()]);
            }
        }
        if let Some(path) = &layout.table {
            let file = SourceFile::from_path(path).await.or_raise(|| ErrorKind::Input(path.clone()))?;
            session.attach_table(file, layout.template.is_some());
        }
        if let Some(name) = &layout.name {
            session.primary = name.trim().to_string();
        }
        for (key, path) in &layout.attachments {
            session.attach(key, path).await?;
        }
        if layout.no_table && !session.items.is_empty() {
            let removed = session.items.remove(0);
            session.keys.remove(0);
            tracing::debug!(label = %removed.label, "leaving the table item out of the package");
        }
        tracing::debug!(items = session.items.len(), primary = %session.primary, "session loaded");
        Ok(session)
    }

    fn push(&mut self, item: OrganizationItem, keys: impl IntoIterator<Item = String>) {
        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.push(item.label.clone());
        self.keys.push(keys);
        self.items.push(item);
    }

    fn apply_template(&mut self, template: &OrganizationTemplate) {
        // Instantiating gives fresh ids, so remember the saved ones for `--attach`.
        for (saved, item) in template.items.iter().zip(template.instantiate()) {
            self.push(item, [saved.id.to_string()]);
        }
    }

    /// The table goes into a template's first item when that item is an
    /// empty primary-named single, otherwise into a new conventional table
    /// item at the front.
    fn attach_table(&mut self, file: SourceFile, templated: bool) {
        self.primary = primary_name_from_file(file.name()).to_string();
        if templated
            && let Some(first) = self.items.first_mut()
            && first.kind == ItemKind::Single
            && first.options.use_source_name
            && first.is_inert()
        {
            first.files.push(file);
            return;
        }
        let item = OrganizationItem::table_file(file);
        self.keys.insert(0, vec!["table".to_string(), item.label.clone()]);
        self.items.insert(0, item);
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.items.iter().zip(&self.keys).position(|(item, keys)| {
            item.id.as_str() == key || keys.iter().any(|k| k.eq_ignore_ascii_case(key))
        })
    }

    async fn attach(&mut self, key: &str, path: &Path) -> Result<()> {
        let index = self.find(key).ok_or_raise(|| ErrorKind::Usage(format!("no item matches `{key}`")))?;
        let metadata =
            tokio::fs::metadata(path).await.or_raise(|| ErrorKind::Input(path.to_path_buf()))?;
        let item = &mut self.items[index];
        if metadata.is_dir() {
            if item.kind != ItemKind::Folder {
                exn::bail!(ErrorKind::Usage(format!("`{key}` is a {} item and cannot take a folder", item.kind)));
            }
            let files = discover_folder(path).await.or_raise(|| ErrorKind::Input(path.to_path_buf()))?;
            tracing::debug!(item = %item.id, files = files.len(), "attached folder");
            item.files.extend(files);
        } else {
            let file = SourceFile::from_path(path).await.or_raise(|| ErrorKind::Input(path.to_path_buf()))?;
            item.files.push(file);
        }
        Ok(())
    }
}

async fn load_template(template: &str) -> Result<OrganizationTemplate> {
    if catalog::is_template(template) {
        return catalog::template(template);
    }
    let path = Path::new(template);
    let json = tokio::fs::read_to_string(path).await.or_raise(|| ErrorKind::Input(path.to_path_buf()))?;
    OrganizationTemplate::from_json(&json).or_raise(|| ErrorKind::Input(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(root: &Path, relative: &str, data: &[u8]) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, data).unwrap();
        path
    }

    #[tokio::test]
    async fn test_template_with_table_and_attachments() {
        let temp_dir = tempfile::tempdir().unwrap();
        let table = write(temp_dir.path(), "My Game.vpx", b"table");
        let backglass = write(temp_dir.path(), "bg.jpg", b"jpg");
        write(temp_dir.path(), "roms/mygame.zip", b"rom");
        let layout = Layout {
            template: Some("pinup-popper".into()),
            table: Some(table),
            attachments: vec![
                ("backglass".into(), backglass),
                ("ROMs".into(), temp_dir.path().join("roms")),
            ],
            ..Layout::default()
        };
        let session = Session::load(&layout, RasterQuality::Low).await.unwrap();
        assert_eq!(session.primary, "My Game");
        // The table file lands in the template's own table item.
        assert_eq!(session.items[0].label, "Table File");
        assert_eq!(session.items[0].files[0].name(), "My Game.vpx");
        let backglass = session.items.iter().find(|i| i.label == "Backglass").unwrap();
        assert_eq!(backglass.files[0].name(), "bg.jpg");
        let roms = session.items.iter().find(|i| i.label == "ROMs").unwrap();
        assert_eq!(roms.files[0].relative_path(), Some("roms/mygame.zip"));
    }

    #[tokio::test]
    async fn test_table_without_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let table = write(temp_dir.path(), "T2.vpx", b"table");
        let layout = Layout { table: Some(table), name: Some(" Terminator 2 ".into()), ..Layout::default() };
        let session = Session::load(&layout, RasterQuality::Low).await.unwrap();
        assert_eq!(session.primary, "Terminator 2");
        assert_eq!(session.items.len(), 1);
        assert_eq!(session.items[0].location, "tables/");
        assert!(session.find("table").is_some());
    }

    #[tokio::test]
    async fn test_presets_and_no_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let table = write(temp_dir.path(), "T2.vpx", b"table");
        let wheel = write(temp_dir.path(), "wheel.png", b"png");
        let layout = Layout {
            presets: vec!["px-wheel".into()],
            table: Some(table),
            attachments: vec![("px-wheel".into(), wheel)],
            no_table: true,
            ..Layout::default()
        };
        let session = Session::load(&layout, RasterQuality::High).await.unwrap();
        // The table item was inserted in front of the preset, then dropped.
        assert_eq!(session.items.len(), 1);
        assert_eq!(session.items[0].label, "Wheel");
        assert_eq!(session.items[0].options.raster_quality, RasterQuality::High);
        assert_eq!(session.items[0].files.len(), 1);
        assert_eq!(session.primary, "T2");
    }

    #[tokio::test]
    async fn test_template_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(
            temp_dir.path(),
            "custom.json",
            br#"{"name": "Custom", "items": [{"id": "docs", "type": "multiple", "label": "Docs", "location": "docs/"}]}"#,
        );
        let layout = Layout { template: Some(path.display().to_string()), ..Layout::default() };
        let session = Session::load(&layout, RasterQuality::Low).await.unwrap();
        assert_eq!(session.items.len(), 1);
        assert!(session.find("docs").is_some());
        assert!(session.find("DOCS").is_some());
    }

    #[tokio::test]
    async fn test_attachment_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = write(temp_dir.path(), "a.txt", b"a");
        let unknown = Layout { attachments: vec![("nope".into(), file)], ..Layout::default() };
        let err = Session::load(&unknown, RasterQuality::Low).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Usage(_)));

        let folder_into_single = Layout {
            template: Some("pinball-emporium".into()),
            attachments: vec![("rom-file".into(), temp_dir.path().to_path_buf())],
            ..Layout::default()
        };
        let err = Session::load(&folder_into_single, RasterQuality::Low).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Usage(_)));

        let missing = Layout { table: Some(temp_dir.path().join("missing.vpx")), ..Layout::default() };
        let err = Session::load(&missing, RasterQuality::Low).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Input(_)));
    }
}
