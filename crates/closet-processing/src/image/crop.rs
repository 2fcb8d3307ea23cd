//! Square crop with an explicit request/response state machine.
//!
//! The original product let the user pan/zoom inside a fixed square viewport
//! before upload. In a headless pipeline that interaction becomes a
//! [`CropGate`]: when installed, each file is handed to the gate, which
//! either resolves with a square region or cancels the item. The gate
//! interaction is tracked by [`CropRequest`], a small state machine
//! (`idle -> awaiting -> resolved | cancelled`) so the control flow is
//! auditable without tracing callbacks.

use async_trait::async_trait;
use image::GenericImageView;
use std::io::Cursor;

/// JPEG quality used when re-encoding a cropped image.
pub const CROP_JPEG_QUALITY: u8 = 90;

/// A square region within the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl CropRegion {
    /// Whether the region lies fully inside an image of the given size.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.side > 0
            && self.x.checked_add(self.side).is_some_and(|right| right <= width)
            && self.y.checked_add(self.side).is_some_and(|bottom| bottom <= height)
    }
}

/// Outcome of a crop gate interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropDecision {
    Apply(CropRegion),
    /// Aborts that single item; siblings are unaffected.
    Cancel,
}

/// Host-supplied interactive crop boundary.
#[async_trait]
pub trait CropGate: Send + Sync {
    async fn resolve(&self, filename: &str, width: u32, height: u32) -> CropDecision;
}

/// States of one crop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropState {
    Idle,
    Awaiting,
    Resolved,
    Cancelled,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid crop transition: {from:?} -> {to:?}")]
pub struct CropStateError {
    pub from: CropState,
    pub to: CropState,
}

/// Tracks a single gate interaction through its legal transitions.
#[derive(Debug)]
pub struct CropRequest {
    state: CropState,
}

impl CropRequest {
    pub fn new() -> Self {
        Self {
            state: CropState::Idle,
        }
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    pub fn begin(&mut self) -> Result<(), CropStateError> {
        self.transition(CropState::Idle, CropState::Awaiting)
    }

    pub fn resolve(&mut self) -> Result<(), CropStateError> {
        self.transition(CropState::Awaiting, CropState::Resolved)
    }

    pub fn cancel(&mut self) -> Result<(), CropStateError> {
        self.transition(CropState::Awaiting, CropState::Cancelled)
    }

    fn transition(&mut self, from: CropState, to: CropState) -> Result<(), CropStateError> {
        if self.state != from {
            return Err(CropStateError {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

impl Default for CropRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Crop image data to a square region and re-encode as JPEG at fixed quality.
pub fn apply_crop(data: &[u8], region: CropRegion) -> Result<Vec<u8>, anyhow::Error> {
    let img = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;

    let (width, height) = img.dimensions();
    if !region.fits(width, height) {
        anyhow::bail!(
            "crop region {}x{}+{}+{} outside image bounds {}x{}",
            region.side,
            region.side,
            region.x,
            region.y,
            width,
            height
        );
    }

    let cropped = img.crop_imm(region.x, region.y, region.side, region.side);

    let mut buffer = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, CROP_JPEG_QUALITY);
    cropped.to_rgb8().write_with_encoder(encoder)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_region_fits() {
        let region = CropRegion { x: 10, y: 10, side: 50 };
        assert!(region.fits(100, 100));
        assert!(!region.fits(50, 100));
        assert!(!CropRegion { x: 0, y: 0, side: 0 }.fits(100, 100));
    }

    #[test]
    fn test_state_machine_resolve_path() {
        let mut request = CropRequest::new();
        assert_eq!(request.state(), CropState::Idle);
        request.begin().unwrap();
        assert_eq!(request.state(), CropState::Awaiting);
        request.resolve().unwrap();
        assert_eq!(request.state(), CropState::Resolved);
    }

    #[test]
    fn test_state_machine_cancel_path() {
        let mut request = CropRequest::new();
        request.begin().unwrap();
        request.cancel().unwrap();
        assert_eq!(request.state(), CropState::Cancelled);
    }

    #[test]
    fn test_state_machine_rejects_illegal_transitions() {
        let mut request = CropRequest::new();
        assert!(request.resolve().is_err()); // resolve before begin
        request.begin().unwrap();
        assert!(request.begin().is_err()); // double begin
        request.resolve().unwrap();
        assert!(request.cancel().is_err()); // cancel after resolve
    }

    #[test]
    fn test_apply_crop_produces_square_jpeg() {
        let data = png_bytes(100, 60);
        let out = apply_crop(&data, CropRegion { x: 20, y: 5, side: 50 }).unwrap();

        let cropped = image::load_from_memory(&out).unwrap();
        assert_eq!(cropped.dimensions(), (50, 50));
    }

    #[test]
    fn test_apply_crop_out_of_bounds() {
        let data = png_bytes(40, 40);
        let result = apply_crop(&data, CropRegion { x: 10, y: 10, side: 40 });
        assert!(result.is_err());
    }
}
