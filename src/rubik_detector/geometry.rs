//! Facelet geometry helpers
//!
//! Pure functions over decoded results, used by renderers downstream.

use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::model::{FaceletGrid, Point2d, RubikFacelet};

impl RubikFacelet {
    /// Corners of the oriented rectangle.
    ///
    /// The first two corners come from rotating the half extents by `angle`;
    /// the other two are their reflections through the center.
    pub fn corners(&self) -> [Point2d; 4] {
        let (sin, cos) = self.angle.sin_cos();
        let sin_half = sin * 0.5;
        let cos_half = cos * 0.5;
        let Point2d { x: cx, y: cy } = self.center;

        let first = Point2d::new(
            cx - sin_half * self.height - cos_half * self.width,
            cy + cos_half * self.height - sin_half * self.width,
        );
        let second = Point2d::new(
            cx + sin_half * self.height - cos_half * self.width,
            cy - cos_half * self.height - sin_half * self.width,
        );

        [
            first,
            second,
            Point2d::new(2.0 * cx - first.x, 2.0 * cy - first.y),
            Point2d::new(2.0 * cx - second.x, 2.0 * cy - second.y),
        ]
    }
}

/// Rescales a grid detected on a `from_width`x`from_height` frame to a
/// `to_width`x`to_height` frame sharing the same rotation convention.
///
/// Centers and sizes scale by the ratio of the longest sides; angles are kept.
pub fn rescale_grid(
    grid: &FaceletGrid,
    from_width: u32,
    from_height: u32,
    to_width: u32,
    to_height: u32,
) -> Result<FaceletGrid> {
    if from_width == 0 || from_height == 0 {
        return Err(DetectorError::InvalidProperties {
            width: from_width as i64,
            height: from_height as i64,
        });
    }
    if to_width == 0 || to_height == 0 {
        return Err(DetectorError::InvalidProperties {
            width: to_width as i64,
            height: to_height as i64,
        });
    }
    if (from_width > from_height) != (to_width > to_height) {
        return Err(DetectorError::AspectClassMismatch {
            from_width,
            from_height,
            to_width,
            to_height,
        });
    }

    let ratio = to_width.max(to_height) as f32 / from_width.max(from_height) as f32;

    Ok(grid.map(|facelet| RubikFacelet {
        center: Point2d::new(facelet.center.x * ratio, facelet.center.y * ratio),
        width: facelet.width * ratio,
        height: facelet.height * ratio,
        ..*facelet
    }))
}
