use std::io::{Cursor, Write};

use tiff::encoder::colortype::RGBA8;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::preview::types::{PreviewCompression, PreviewConfig, PreviewFrame};
use crate::rubik_detector::preview::writer::PreviewWriter;

pub struct TiffPreviewWriter;

impl PreviewWriter for TiffPreviewWriter {
    fn write_preview(&self, frame: &PreviewFrame<'_>, output: &mut dyn Write, config: &PreviewConfig) -> Result<()> {
        debug!("Encoding preview frame: {}x{}", frame.width, frame.height);

        let compression = match config.compression {
            PreviewCompression::None => Compression::Uncompressed,
            PreviewCompression::Lzw => Compression::Lzw,
            PreviewCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            PreviewCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            PreviewCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        // TIFF encoding needs Seek, so encode in memory first
        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| DetectorError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor) = config.predictor {
            encoder = encoder.with_predictor(match predictor {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            });
        }

        encoder
            .write_image::<RGBA8>(frame.width, frame.height, frame.data)
            .map_err(|e| DetectorError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Preview encoding complete: {} bytes", buffer.len());
        Ok(())
    }
}
