use crate::RasterQuality;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::codecs::png::PngEncoder;
use tracing::instrument;

/// Decodes `input` and re-encodes it as PNG, on the current thread.
///
/// The source format is sniffed from the bytes themselves, so a mislabelled
/// file still converts as long as its content is a decodable image.
///
/// # Errors
/// - [`ErrorKind::Decode`] if `input` is not a decodable image.
/// - [`ErrorKind::Encode`] if the decoded pixels cannot be written as PNG.
#[instrument(skip(input), fields(input_size = input.len(), output_size))]
pub fn reencode_blocking(input: &[u8], quality: RasterQuality) -> Result<Vec<u8>> {
    let image = image::load_from_memory(input).or_raise(|| ErrorKind::Decode)?;
    let (compression, filter) = quality.encoder_settings();
    let mut output = Vec::new();
    image
        .write_with_encoder(PngEncoder::new_with_quality(&mut output, compression, filter))
        .or_raise(|| ErrorKind::Encode)?;
    tracing::Span::current().record("output_size", output.len());
    Ok(output)
}

/// Re-encodes `input` as PNG on the blocking thread pool.
///
/// Decoding and compressing are CPU-bound; running them inline would stall
/// every other task on the executor for the duration of the encode.
pub async fn reencode(input: Vec<u8>, quality: RasterQuality) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || reencode_blocking(&input, quality)).await.or_raise(|| ErrorKind::Runtime)?
}
