//! Image optimizer: decode honoring EXIF orientation, bounded-fit resize,
//! re-encode at configured quality/format.

use crate::encode::{encode, OutputFormat};
use crate::image::orientation::ImageOrientation;
use crate::image::resize::resize_to_fit;
use image::GenericImageView;
use std::io::Cursor;

/// Result of optimizing one image.
#[derive(Debug, Clone)]
pub struct OptimizedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl OptimizedImage {
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

#[derive(Debug, Clone)]
pub struct ImageOptimizer {
    pub max_width: u32,
    pub max_height: u32,
    pub format: OutputFormat,
    /// Encode quality on the 0-100 scale.
    pub quality: f32,
}

impl Default for ImageOptimizer {
    fn default() -> Self {
        Self {
            max_width: 1600,
            max_height: 1600,
            format: OutputFormat::WebP,
            quality: 80.0,
        }
    }
}

impl ImageOptimizer {
    /// Decode, orient, resize within bounds, and re-encode.
    ///
    /// CPU-bound; callers on the async pool should wrap this in
    /// `spawn_blocking`.
    pub fn optimize(&self, data: &[u8]) -> Result<OptimizedImage, anyhow::Error> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .decode()?;

        let img = ImageOrientation::apply_exif_orientation(img, data);
        let img = resize_to_fit(img, self.max_width, self.max_height);

        let (width, height) = img.dimensions();
        let encoded = encode(&img, self.format, self.quality)?;

        tracing::debug!(
            width = width,
            height = height,
            input_bytes = data.len(),
            output_bytes = encoded.len(),
            format = ?self.format,
            "Image optimized"
        );

        Ok(OptimizedImage {
            data: encoded,
            width,
            height,
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_optimize_downscales_to_bounds() {
        let optimizer = ImageOptimizer {
            max_width: 1000,
            max_height: 1000,
            ..Default::default()
        };

        let result = optimizer.optimize(&png_bytes(2000, 1000)).unwrap();
        assert_eq!((result.width, result.height), (1000, 500));
        assert_eq!(result.format, OutputFormat::WebP);
        assert_eq!(result.content_type(), "image/webp");

        let decoded = image::load_from_memory(&result.data).unwrap();
        assert_eq!(decoded.dimensions(), (1000, 500));
    }

    #[test]
    fn test_optimize_keeps_small_images() {
        let optimizer = ImageOptimizer::default();
        let result = optimizer.optimize(&png_bytes(320, 240)).unwrap();
        assert_eq!((result.width, result.height), (320, 240));
    }

    #[test]
    fn test_optimize_rejects_garbage() {
        let optimizer = ImageOptimizer::default();
        assert!(optimizer.optimize(b"definitely not an image").is_err());
    }

    #[test]
    fn test_optimize_jpeg_output() {
        let optimizer = ImageOptimizer {
            format: OutputFormat::Jpeg,
            quality: 85.0,
            ..Default::default()
        };
        let result = optimizer.optimize(&png_bytes(100, 100)).unwrap();
        assert_eq!(result.extension(), "jpg");
        assert!(image::load_from_memory(&result.data).is_ok());
    }
}
