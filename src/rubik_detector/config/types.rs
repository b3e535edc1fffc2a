//! Detector configuration types

use std::path::PathBuf;

use crate::rubik_detector::common::error::{DetectorError, Result};

/// Clockwise rotation the engine applies to a frame before processing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(DetectorError::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether width and height trade places once the rotation is applied.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Resolution and orientation of the frames fed to one scan phase.
///
/// Always valid once constructed: both sides are positive and the rotation is
/// a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageProperties {
    rotation: Rotation,
    width: u32,
    height: u32,
}

impl ImageProperties {
    pub fn new(rotation_degrees: i32, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(DetectorError::InvalidProperties {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            rotation: Rotation::from_degrees(rotation_degrees)?,
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions of the frame after rotation, as rendered into the output frame.
    pub fn rotated_dimensions(&self) -> (u32, u32) {
        if self.rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// How the engine renders detected facelets onto the output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    DoNotDraw,
    Rectangles,
    Circles,
}

impl DrawMode {
    pub fn as_wire(self) -> i32 {
        match self {
            DrawMode::DoNotDraw => 0,
            DrawMode::Rectangles => 1,
            DrawMode::Circles => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawConfig {
    draw_mode: DrawMode,
    stroke_width: u32,
    fill_shape: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::filled_circles()
    }
}

impl DrawConfig {
    const DEFAULT_STROKE_WIDTH: u32 = 3;

    pub fn new(draw_mode: DrawMode, stroke_width: i32, fill_shape: bool) -> Result<Self> {
        if stroke_width < 0 {
            return Err(DetectorError::InvalidDrawConfig(format!(
                "stroke width must not be negative, got {stroke_width}"
            )));
        }
        Ok(Self {
            draw_mode,
            stroke_width: stroke_width as u32,
            fill_shape,
        })
    }

    pub fn do_not_draw() -> Self {
        Self {
            draw_mode: DrawMode::DoNotDraw,
            stroke_width: 0,
            fill_shape: false,
        }
    }

    pub fn rectangles() -> Self {
        Self {
            draw_mode: DrawMode::Rectangles,
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            fill_shape: false,
        }
    }

    pub fn circles() -> Self {
        Self {
            draw_mode: DrawMode::Circles,
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            fill_shape: false,
        }
    }

    pub fn filled_circles() -> Self {
        Self {
            fill_shape: true,
            ..Self::circles()
        }
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn fill_shape(&self) -> bool {
        self.fill_shape
    }
}

/// Configuration for a scan session
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Live, low-resolution frames used while tracking the cube
    pub scan_properties: ImageProperties,
    /// High-resolution still used for facelet extraction and color analysis
    pub photo_properties: ImageProperties,
    /// How detections are drawn onto the output frame
    pub draw_config: DrawConfig,
    /// Directory where a debug-capable engine may persist intermediate frames
    pub image_save_path: Option<PathBuf>,
    /// Whether to keep and log per-frame statistics
    pub debuggable: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scan_properties: ImageProperties {
                rotation: Rotation::Deg90,
                width: 640,
                height: 480,
            },
            photo_properties: ImageProperties {
                rotation: Rotation::Deg90,
                width: 4032,
                height: 3024,
            },
            draw_config: DrawConfig::default(),
            image_save_path: None,
            debuggable: false,
        }
    }
}

impl DetectorConfig {
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::default()
    }
}

/// Builder for DetectorConfig
#[derive(Default)]
pub struct DetectorConfigBuilder {
    scan_properties: Option<ImageProperties>,
    photo_properties: Option<ImageProperties>,
    draw_config: Option<DrawConfig>,
    image_save_path: Option<Option<PathBuf>>,
    debuggable: Option<bool>,
}

impl DetectorConfigBuilder {
    pub fn scan_properties(mut self, properties: ImageProperties) -> Self {
        self.scan_properties = Some(properties);
        self
    }

    pub fn photo_properties(mut self, properties: ImageProperties) -> Self {
        self.photo_properties = Some(properties);
        self
    }

    pub fn draw_config(mut self, draw_config: DrawConfig) -> Self {
        self.draw_config = Some(draw_config);
        self
    }

    pub fn image_save_path(mut self, path: Option<PathBuf>) -> Self {
        self.image_save_path = Some(path);
        self
    }

    pub fn debuggable(mut self, enable: bool) -> Self {
        self.debuggable = Some(enable);
        self
    }

    pub fn build(self) -> DetectorConfig {
        let default = DetectorConfig::default();
        DetectorConfig {
            scan_properties: self.scan_properties.unwrap_or(default.scan_properties),
            photo_properties: self.photo_properties.unwrap_or(default.photo_properties),
            draw_config: self.draw_config.unwrap_or(default.draw_config),
            image_save_path: self.image_save_path.unwrap_or(default.image_save_path),
            debuggable: self.debuggable.unwrap_or(default.debuggable),
        }
    }
}
