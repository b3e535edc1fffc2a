//! Fixed-point wire codec
//!
//! Floats cross the vision engine boundary as `i32` values scaled by a fixed
//! factor: `round(value * scale)` on the way in, `raw / scale` on the way out.

use crate::rubik_detector::common::error::{DetectorError, Result};

/// Ints per facelet record: color, center x, center y, width, height, angle.
pub const FACELET_RECORD_LEN: usize = 6;

/// A 3x3 grid of facelet records.
pub const FACELET_ARRAY_LEN: usize = 9 * FACELET_RECORD_LEN;

/// Sticker labels in the cube-state array.
pub const STICKER_COUNT: usize = 54;

/// Ints per LAB triple in the cube-state array.
pub const LAB_TRIPLE_LEN: usize = 3;

/// 54 face labels followed by one LAB triple per physical face.
pub const CUBE_STATE_ARRAY_LEN: usize = STICKER_COUNT + 6 * LAB_TRIPLE_LEN;

/// A fixed-point scale shared by both sides of the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPoint {
    scale: i32,
}

impl FixedPoint {
    /// Geometry (centers, sizes, angles) of the facelet array.
    pub const GEOMETRY: FixedPoint = FixedPoint::new(100_000);

    /// LAB components of the cube-state array.
    pub const COLOR: FixedPoint = FixedPoint::new(10_000);

    pub const fn new(scale: i32) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn encode(&self, value: f64) -> Result<i32> {
        let scaled = (value * self.scale as f64).round();
        if !scaled.is_finite() || scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
            return Err(DetectorError::FixedPointOverflow(value));
        }
        Ok(scaled as i32)
    }

    pub fn decode(&self, raw: i32) -> f64 {
        raw as f64 / self.scale as f64
    }

    /// Largest error a round trip through this scale may introduce.
    pub fn tolerance(&self) -> f64 {
        0.5 / self.scale as f64
    }
}
