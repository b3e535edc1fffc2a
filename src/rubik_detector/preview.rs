//! Preview output module
//!
//! Writes the RGBA output frame the engine leaves in the shared buffer to TIFF.

mod tiff_preview_writer;
pub mod types;
mod writer;

pub use tiff_preview_writer::TiffPreviewWriter;
pub use types::{PreviewCompression, PreviewConfig, PreviewConfigBuilder, PreviewFrame};
pub use writer::PreviewWriter;
