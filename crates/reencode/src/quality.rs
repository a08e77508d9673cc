use crate::error::{Error, ErrorKind};
use image::codecs::png::{CompressionType, FilterType};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Fidelity setting for re-encoding.
///
/// The names describe *compression strength*, not output quality: `High`
/// compresses hardest and `None` not at all. Because the output is PNG every
/// setting keeps every pixel; the setting only trades encode time for size.
///
/// | setting | encoder effort              |
/// |---------|-----------------------------|
/// | `none`  | fastest, no filtering       |
/// | `low`   | default effort, adaptive    |
/// | `high`  | best effort, adaptive       |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterQuality {
    None,
    #[default]
    Low,
    High,
}
impl RasterQuality {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RasterQuality::None => "none",
            RasterQuality::Low => "low",
            RasterQuality::High => "high",
        }
    }

    pub(crate) fn encoder_settings(&self) -> (CompressionType, FilterType) {
        match self {
            RasterQuality::None => (CompressionType::Fast, FilterType::NoFilter),
            RasterQuality::Low => (CompressionType::Default, FilterType::Adaptive),
            RasterQuality::High => (CompressionType::Best, FilterType::Adaptive),
        }
    }
}
impl Display for RasterQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
impl FromStr for RasterQuality {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RasterQuality::None),
            "low" => Ok(RasterQuality::Low),
            "high" => Ok(RasterQuality::High),
            _ => exn::bail!(ErrorKind::UnknownQuality(s.to_string())),
        }
    }
}
