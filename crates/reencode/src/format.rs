use image::ImageFormat;

/// Extension (without dot) of the canonical raster format.
pub const CANONICAL_EXTENSION: &str = "png";
/// MIME type of the canonical raster format.
pub const CANONICAL_MIME: &str = "image/png";

/// Formats this crate can decode. Anything else is left untouched by callers,
/// which keeps name prediction and actual re-encoding in agreement.
const DECODABLE: &[ImageFormat] =
    &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif, ImageFormat::Bmp, ImageFormat::WebP];

/// Detects the raster format of a file from its hint, falling back to its name.
///
/// A hint containing `/` is treated as a MIME type (`image/jpeg`), any other
/// non-empty hint as an extension (`jpg`). When a hint is present it is
/// authoritative; the name's extension is only consulted without one.
pub fn raster_format(name: &str, hint: Option<&str>) -> Option<ImageFormat> {
    let hint = hint.map(str::trim).filter(|h| !h.is_empty());
    let format = match hint {
        Some(mime) if mime.contains('/') => ImageFormat::from_mime_type(mime.to_lowercase()),
        Some(ext) => ImageFormat::from_extension(ext.trim_start_matches('.')),
        None => match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ImageFormat::from_extension(ext),
            _ => None,
        },
    }?;
    DECODABLE.contains(&format).then_some(format)
}

/// Returns `true` if the file is a raster image this crate can re-encode.
pub fn is_raster_image(name: &str, hint: Option<&str>) -> bool {
    raster_format(name, hint).is_some()
}
