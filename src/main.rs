use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use rubik_scan_rs::logger;
use rubik_scan_rs::rubik_detector::{
    DetectorConfig, DirectBuffer, DrawConfig, ImageProperties, PreviewConfig, PreviewFrame,
    PreviewWriter, ScanSession, TiffPreviewWriter, VisionEngine,
};

use tracing::{error, info, warn};

fn main() -> anyhow::Result<()> {
    logger::init();

    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "frame.nv21".to_string()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| "preview.tiff".to_string()));

    info!("Starting rubik_scan...");

    let config = DetectorConfig::builder()
        .scan_properties(ImageProperties::new(90, 640, 480)?)
        .draw_config(DrawConfig::filled_circles())
        .debuggable(true)
        .build();
    let mut session = ScanSession::new(config).context("failed to open scan session")?;

    let layout = *session
        .layout()
        .context("vision engine reported no usable frame layout")?;
    info!(
        "Scan session ready: {} bytes required, input {:?}, result {:?}",
        layout.required_memory(),
        layout.input_range(),
        layout.result_range()
    );

    let frame = std::fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;
    if frame.len() != layout.input_byte_count() {
        bail!(
            "{} holds {} bytes, a {}x{} NV21 frame needs {}",
            input.display(),
            frame.len(),
            session.scan_properties().width(),
            session.scan_properties().height(),
            layout.input_byte_count()
        );
    }

    let mut buffer = DirectBuffer::allocate(layout.required_memory());
    buffer[layout.input_range()].copy_from_slice(&frame);

    match session.scan_cube(&mut buffer)?.detected() {
        Some(grid) => info!("Cube face detected: {}", grid),
        None => warn!("No cube face detected in {}", input.display()),
    }

    if let Err(e) = write_preview(&session, &buffer, &output) {
        error!("Preview failed: {}", e);
    }

    session.release();
    Ok(())
}

fn write_preview<E: VisionEngine>(session: &ScanSession<E>, buffer: &[u8], output: &Path) -> anyhow::Result<()> {
    let layout = session.layout().context("no frame layout to locate the preview in")?;
    let frame = PreviewFrame::from_layout(layout, session.active_properties(), buffer)?;
    TiffPreviewWriter.write_preview_file(&frame, output, &PreviewConfig::default())?;
    info!("Preview written to {}", output.display());
    Ok(())
}
