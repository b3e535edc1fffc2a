use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::rubik_detector::common::error::Result;
use crate::rubik_detector::preview::types::{PreviewConfig, PreviewFrame};

pub trait PreviewWriter {
    fn write_preview(&self, frame: &PreviewFrame<'_>, output: &mut dyn Write, config: &PreviewConfig) -> Result<()>;

    fn write_preview_file(&self, frame: &PreviewFrame<'_>, path: &Path, config: &PreviewConfig) -> Result<()> {
        let mut output = BufWriter::new(File::create(path)?);
        self.write_preview(frame, &mut output, config)?;
        output.flush()?;
        Ok(())
    }
}
