//! Layered configuration for tablepack.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. built-in defaults,
//! 2. `config.toml`, `config.yaml` or `config.json` in the user's config directory,
//! 3. an explicitly given file (format picked by extension),
//! 4. `TABLEPACK_*` environment variables.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tablepack_archive::Compression;
use tablepack_reencode::RasterQuality;

pub const ENV_PREFIX: &str = "TABLEPACK_";
pub const DEFAULT_ARCHIVE_NAME: &str = "{{ primary|slug }}.zip";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Method used for archive entries that aren't already compressed media.
    #[serde(with = "compression_str")]
    pub compression: Compression,
    /// Template for the output file name; `primary` is the package's primary name.
    pub archive_name: String,
    pub output_dir: PathBuf,
    /// Quality given to items created from presets.
    pub default_quality: RasterQuality,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            output_dir: PathBuf::from("."),
            default_quality: RasterQuality::default(),
        }
    }
}

impl Config {
    /// Directory searched for the user's configuration file, if the platform has one.
    pub fn user_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tablepack").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// All configuration sources, merged but not yet extracted.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = Self::user_config_dir() {
            figment = figment
                .merge(Toml::file(dir.join("config.toml")))
                .merge(Yaml::file(dir.join("config.yaml")))
                .merge(Json::file(dir.join("config.json")));
        }
        if let Some(path) = explicit {
            figment = merge_file(figment, path)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    #[tracing::instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(explicit)?)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().map_err(|e| ErrorKind::Load(e.to_string()))?;
        config.validate()?;
        tracing::debug!(compression = %config.compression, output_dir = %config.output_dir.display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive_name.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("archive_name must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("output_dir must not be empty".into()));
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        exn::bail!(ErrorKind::Load(format!("config file not found: {}", path.display())));
    }
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::Invalid(format!("unrecognised config format: {}", path.display()))),
    })
}

mod compression_str {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use tablepack_archive::Compression;

    pub fn serialize<S: Serializer>(value: &Compression, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Compression, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| D::Error::custom(format!("unknown compression method `{raw}`")))
    }
}
