//! Image re-encoding to the canonical raster format (PNG).
//!
//! - **Detection** ([`raster_format`], [`is_raster_image`]) decides from a
//!   file's name and its MIME type or extension hint whether the file is an
//!   image this crate can decode. Only decodable formats qualify, so a caller
//!   can predict the renamed output without decoding anything.
//! - **Re-encoding** ([`reencode`], [`reencode_blocking`]) decodes the image
//!   and writes it back out as PNG at one of three [`RasterQuality`] settings.
//!
//! PNG is lossless: the quality setting selects how hard the encoder works to
//! shrink the output, never how many pixels survive.

pub mod error;
mod format;
mod quality;
mod reencode;

pub use crate::format::{CANONICAL_EXTENSION, CANONICAL_MIME, is_raster_image, raster_format};
pub use crate::quality::RasterQuality;
pub use crate::reencode::{reencode, reencode_blocking};
