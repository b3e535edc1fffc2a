//! Preview configuration types

use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::config::ImageProperties;
use crate::rubik_detector::layout::FrameLayout;

const RGBA_BYTES: usize = 4;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Configuration for preview frame output
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Compression method to use
    pub compression: PreviewCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            compression: PreviewCompression::None,
            predictor: None,
        }
    }
}

impl PreviewConfig {
    pub fn builder() -> PreviewConfigBuilder {
        PreviewConfigBuilder::default()
    }
}

/// Builder for PreviewConfig
#[derive(Default)]
pub struct PreviewConfigBuilder {
    compression: Option<PreviewCompression>,
    predictor: Option<Option<u16>>,
}

impl PreviewConfigBuilder {
    pub fn compression(mut self, compression: PreviewCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> PreviewConfig {
        let default = PreviewConfig::default();
        PreviewConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}

/// RGBA8888 output frame borrowed from a shared buffer.
#[derive(Debug, Clone, Copy)]
pub struct PreviewFrame<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> PreviewFrame<'a> {
    /// Locates the output frame of `layout` in `buffer`. The frame is upright,
    /// so its size is the rotated size of `properties`.
    pub fn from_layout(
        layout: &FrameLayout,
        properties: &ImageProperties,
        buffer: &'a [u8],
    ) -> Result<Self> {
        let (width, height) = properties.rotated_dimensions();
        let expected = width as usize * height as usize * RGBA_BYTES;
        if layout.result_byte_count() != expected {
            return Err(DetectorError::EncodeError(format!(
                "result frame holds {} bytes, a {}x{} RGBA frame needs {}",
                layout.result_byte_count(),
                width,
                height,
                expected
            )));
        }
        let data = layout.result_frame(buffer).ok_or_else(|| {
            DetectorError::EncodeError(format!(
                "buffer of {} bytes ends before the result frame at {:?}",
                buffer.len(),
                layout.result_range()
            ))
        })?;
        Ok(Self { data, width, height })
    }
}
