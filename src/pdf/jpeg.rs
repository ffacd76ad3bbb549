//! JPEG output for rendered pages

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::Result;

/// Quality used when none is given, the same default most imaging tools use
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode a rendered page as JPEG.
///
/// JPEG has no alpha channel, so the page is flattened to 8-bit RGB first.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))?;
    Ok(buf)
}
