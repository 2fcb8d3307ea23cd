use image::{DynamicImage, GenericImageView};

/// Compute target dimensions so that neither bound is exceeded while the
/// aspect ratio is preserved. Images already inside the bounds are returned
/// unchanged; this never upscales.
pub fn fit_within(orig_width: u32, orig_height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if orig_width <= max_width && orig_height <= max_height {
        return (orig_width, orig_height);
    }

    let scale = (max_width as f32 / orig_width as f32)
        .min(max_height as f32 / orig_height as f32);

    let width = ((orig_width as f32 * scale).round() as u32).max(1);
    let height = ((orig_height as f32 * scale).round() as u32).max(1);

    (width, height)
}

/// Select filter type based on resize ratio: cheaper filters for heavy
/// downscales, Lanczos for near-1:1 work.
pub fn select_filter(
    orig_width: u32,
    orig_height: u32,
    new_width: u32,
    new_height: u32,
) -> image::imageops::FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        image::imageops::FilterType::Triangle
    } else if max_ratio > 1.5 {
        image::imageops::FilterType::CatmullRom
    } else {
        image::imageops::FilterType::Lanczos3
    }
}

/// Resize an image so it fits within the given bounds, preserving aspect
/// ratio. Returns the image untouched when it already fits.
pub fn resize_to_fit(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();
    let (target_width, target_height) = fit_within(orig_width, orig_height, max_width, max_height);

    if (target_width, target_height) == (orig_width, orig_height) {
        return img;
    }

    let filter = select_filter(orig_width, orig_height, target_width, target_height);
    img.resize_exact(target_width, target_height, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_fit_within_width_bound() {
        // Longer side scaled to its max, shorter proportionally.
        assert_eq!(fit_within(2000, 1000, 1000, 1000), (1000, 500));
    }

    #[test]
    fn test_fit_within_height_bound() {
        assert_eq!(fit_within(1000, 2000, 1000, 1000), (500, 1000));
    }

    #[test]
    fn test_fit_within_no_upscale() {
        assert_eq!(fit_within(800, 600, 1000, 1000), (800, 600));
    }

    #[test]
    fn test_fit_within_both_bounds_exceeded() {
        // 4000x3000 into 1000x600: height is the tighter bound.
        assert_eq!(fit_within(4000, 3000, 1000, 600), (800, 600));
    }

    #[test]
    fn test_fit_within_never_zero() {
        assert_eq!(fit_within(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn test_select_filter_thresholds() {
        assert_eq!(
            select_filter(3000, 3000, 1000, 1000),
            image::imageops::FilterType::Triangle
        );
        assert_eq!(
            select_filter(1600, 1600, 1000, 1000),
            image::imageops::FilterType::CatmullRom
        );
        assert_eq!(
            select_filter(1100, 1100, 1000, 1000),
            image::imageops::FilterType::Lanczos3
        );
    }

    #[test]
    fn test_resize_to_fit_applies_bounds() {
        let img =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(2000, 1000, Rgba([255, 0, 0, 255])));
        let resized = resize_to_fit(img, 1000, 1000);
        assert_eq!(resized.dimensions(), (1000, 500));
    }

    #[test]
    fn test_resize_to_fit_leaves_small_images_alone() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 200, Rgba([0, 255, 0, 255])));
        let resized = resize_to_fit(img, 1000, 1000);
        assert_eq!(resized.dimensions(), (300, 200));
    }
}
