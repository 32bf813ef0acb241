//! PNG and data-URI encoding.

use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbImage;
use std::io::Cursor;

use crate::error::PixelMapError;

/// Prefix of every data URI produced by [`to_data_uri`].
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode an RGB image as PNG.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, PixelMapError> {
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| PixelMapError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URI.
pub fn to_data_uri(png_bytes: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png_bytes))
}

/// Size of `bytes` in megabytes, rounded to two decimals.
pub fn size_mb(bytes: usize) -> f64 {
    (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_png_signature_and_decode() {
        let img = RgbImage::from_pixel(7, 3, Rgb([70, 130, 180]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (7, 3));
        assert_eq!(*decoded.get_pixel(6, 2), Rgb([70, 130, 180]));
    }

    #[test]
    fn test_data_uri() {
        let uri = to_data_uri(b"abc");
        assert_eq!(uri, "data:image/png;base64,YWJj");
        let payload = uri.strip_prefix(PNG_DATA_URI_PREFIX).unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), b"abc");
    }

    #[test]
    fn test_size_mb() {
        assert_eq!(size_mb(0), 0.0);
        assert_eq!(size_mb(1024 * 1024), 1.0);
        assert_eq!(size_mb(1_572_864), 1.5);
    }
}
