//! Reference layout arithmetic for NV21 input frames.
//!
//! The buffer is laid out as:
//!
//! ```text
//! [ NV21 input (w * h * 3/2) | RGBA output (w * h * 4) | processing scratch ]
//! ```
//!
//! Offsets use the unrotated input dimensions since rotation only happens
//! after the RGBA conversion. Processing runs on a copy whose longest side is
//! [`PROCESSING_DIMENSION`]; its RGBA and gray planes need scratch space only
//! when the rotated frame has to be resized. The second phase also keeps the
//! three visible faces as square gray planes.

use crate::rubik_detector::config::ImageProperties;
use crate::rubik_detector::layout::types::{FrameLayout, ScanPhase};

/// Longest side of the frame the engine processes.
pub const PROCESSING_DIMENSION: u32 = 480;

/// Side of each rectified face plane kept during the second phase.
pub const FACE_DIMENSION: usize = 360;

const VISIBLE_FACES: usize = 3;

const RGBA_BYTES: usize = 4;

/// Processing frame size for a frame of `rotated_width`x`rotated_height`.
pub fn processing_dimensions(rotated_width: u32, rotated_height: u32) -> (u32, u32) {
    let largest = rotated_width.max(rotated_height);
    if largest > PROCESSING_DIMENSION {
        let ratio = PROCESSING_DIMENSION as f32 / largest as f32;
        if largest == rotated_height {
            ((rotated_width as f32 * ratio).round() as u32, PROCESSING_DIMENSION)
        } else {
            (PROCESSING_DIMENSION, (rotated_height as f32 * ratio).round() as u32)
        }
    } else if largest < PROCESSING_DIMENSION {
        let width = if largest == rotated_width { 320 } else { 240 };
        let height = if largest == rotated_height { 320 } else { 240 };
        (width, height)
    } else {
        (rotated_width, rotated_height)
    }
}

/// Computes the shared buffer layout for the properties active in `phase`.
///
/// Pure: identical inputs always give identical layouts.
pub fn compute_layout(
    scan_properties: &ImageProperties,
    photo_properties: &ImageProperties,
    phase: ScanPhase,
) -> FrameLayout {
    let active = match phase {
        ScanPhase::FirstPhase => scan_properties,
        ScanPhase::SecondPhase => photo_properties,
    };
    let width = active.width() as usize;
    let height = active.height() as usize;

    let input_byte_count = width * (height + height / 2);
    let result_byte_count = width * height * RGBA_BYTES;

    let (rotated_width, rotated_height) = active.rotated_dimensions();
    let (processing_width, processing_height) = processing_dimensions(rotated_width, rotated_height);
    let needs_resize = (processing_width, processing_height) != (rotated_width, rotated_height);

    let mut scratch = 0;
    if needs_resize {
        let processing_pixels = processing_width as usize * processing_height as usize;
        scratch += processing_pixels * RGBA_BYTES + processing_pixels;
    }
    if phase.is_second() {
        scratch += VISIBLE_FACES * FACE_DIMENSION * FACE_DIMENSION;
    }

    let required_memory = input_byte_count + result_byte_count + scratch;

    // Regions are contiguous and end within required_memory by construction.
    match FrameLayout::new(
        required_memory,
        0,
        input_byte_count,
        input_byte_count,
        result_byte_count,
    ) {
        Ok(layout) => layout,
        Err(e) => unreachable!("reference layout violates its own invariants: {e}"),
    }
}
