//! Built-in templates and presets, embedded into the binary at compile time
//! using [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use rust_embed::Embed;
use std::borrow::Cow;
use tablepack_organize::{OrganizationTemplate, PresetCatalog};

#[derive(Embed)]
#[folder = "assets/"]
struct Assets;

const TEMPLATE_DIR: &str = "templates/";
const PRESETS: &str = "presets.json";

fn text(path: &str) -> Result<String> {
    let file = Assets::get(path).ok_or_raise(|| ErrorKind::Catalog(format!("missing asset `{path}`")))?;
    String::from_utf8(file.data.into_owned()).or_raise(|| ErrorKind::Catalog(format!("asset `{path}` is not UTF-8")))
}

/// Keys of the built-in templates (`pinball-emporium`, ...), sorted.
pub fn template_keys() -> Vec<String> {
    let mut keys: Vec<String> = Assets::iter()
        .filter_map(|path: Cow<'static, str>| {
            path.strip_prefix(TEMPLATE_DIR).and_then(|name| name.strip_suffix(".json")).map(String::from)
        })
        .collect();
    keys.sort();
    keys
}

pub fn template(key: &str) -> Result<OrganizationTemplate> {
    let json = text(&format!("{TEMPLATE_DIR}{key}.json"))?;
    OrganizationTemplate::from_json(&json).or_raise(|| ErrorKind::Catalog(format!("template `{key}`")))
}

pub fn is_template(key: &str) -> bool {
    Assets::get(&format!("{TEMPLATE_DIR}{key}.json")).is_some()
}

pub fn presets() -> Result<PresetCatalog> {
    PresetCatalog::from_json(&text(PRESETS)?).or_raise(|| ErrorKind::Catalog(PRESETS.to_string()))
}
