//! Image operations module
//!
//! - EXIF orientation handling (orientation)
//! - Aspect-preserving bounded-fit resize (resize)
//! - Square crop with gate state machine (crop)

pub mod crop;
pub mod orientation;
pub mod resize;

pub use crop::{CropDecision, CropGate, CropRegion, CropRequest, CropState};
pub use orientation::ImageOrientation;
