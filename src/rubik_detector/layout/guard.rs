//! Buffer capacity guard
//!
//! Checks run before any buffer crosses into the engine. A missing capacity is
//! an ordinary "not now" outcome; a non-direct buffer is a programming error.

use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::layout::buffer::FrameBuffer;
use crate::rubik_detector::layout::types::FrameLayout;

/// Which capacity figure of the layout an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Scanning and extraction: `required_memory`
    Frame,
    /// Color analysis: `required_memory_colors`
    Colors,
}

pub fn required_bytes(layout: &FrameLayout, requirement: Requirement) -> usize {
    match requirement {
        Requirement::Frame => layout.required_memory(),
        Requirement::Colors => layout.required_memory_colors(),
    }
}

/// Whether a buffer of `capacity` bytes can be used with `layout`.
pub fn validate(capacity: usize, layout: &FrameLayout, requirement: Requirement) -> bool {
    capacity >= required_bytes(layout, requirement)
}

pub fn ensure_direct<B: FrameBuffer + ?Sized>(buffer: &B) -> Result<()> {
    if buffer.is_direct() {
        Ok(())
    } else {
        Err(DetectorError::NonDirectBuffer)
    }
}
