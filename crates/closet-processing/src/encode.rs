//! Output encoding for optimized images.
//!
//! WebP goes through the libwebp bindings for lossy quality control; JPEG
//! and PNG use the `image` codecs. Re-encoding drops any embedded metadata,
//! so optimized files never carry source EXIF.

use image::DynamicImage;
use std::io::Cursor;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    WebP,
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::WebP => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Encode an image at the given quality (0-100; ignored for PNG).
pub fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, anyhow::Error> {
    match format {
        OutputFormat::WebP => {
            let rgba = img.to_rgba8();
            let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
            let memory = encoder.encode(quality.clamp(0.0, 100.0));
            Ok(memory.to_vec())
        }
        OutputFormat::Jpeg => {
            let mut buffer = Vec::new();
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buffer,
                quality.clamp(0.0, 100.0) as u8,
            );
            img.to_rgb8().write_with_encoder(encoder)?;
            Ok(buffer)
        }
        OutputFormat::Png => {
            let mut buffer = Vec::new();
            img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 48, Rgba([120, 40, 200, 255])))
    }

    #[test]
    fn test_encode_webp_roundtrip() {
        let encoded = encode(&test_image(), OutputFormat::WebP, 80.0).unwrap();
        assert!(!encoded.is_empty());

        let decoded = image::load_from_memory(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_encode_jpeg_roundtrip() {
        let encoded = encode(&test_image(), OutputFormat::Jpeg, 85.0).unwrap();
        let decoded = image::load_from_memory(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_encode_png_roundtrip() {
        let encoded = encode(&test_image(), OutputFormat::Png, 0.0).unwrap();
        let decoded = image::load_from_memory(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(OutputFormat::WebP.mime_type(), "image/webp");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }
}
