use std::time::Instant;

use tracing::{debug, info, instrument, trace, warn};

use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::config::{DetectorConfig, DrawConfig, ImageProperties};
use crate::rubik_detector::decode::{decode_cube_state, decode_facelets};
use crate::rubik_detector::engine::{EngineHandle, NativeEngine, VisionEngine};
use crate::rubik_detector::layout::guard::{self, Requirement};
use crate::rubik_detector::layout::{FrameBuffer, FrameLayout, ScanPhase};
use crate::rubik_detector::model::{CubeState, FaceletGrid};
use crate::rubik_detector::session::stats::ScanStatistics;
use crate::rubik_detector::session::types::{Detection, Rejection, SessionState};

/// Reads the layout the engine reports for its current properties and phase.
fn query_layout<E: VisionEngine>(engine: &E, handle: EngineHandle) -> Result<FrameLayout> {
    FrameLayout::from_wire(
        engine.required_memory(handle),
        engine.input_offset(handle),
        engine.input_size(handle),
        engine.result_offset(handle),
        engine.result_size(handle),
    )
    .inspect_err(|e| warn!("Vision engine reported an unusable layout: {}", e))
}

/// Owns one vision-engine context for its whole lifetime.
///
/// Not internally synchronized: callers serialize all operations on a session.
/// Dropping the session releases the context.
pub struct ScanSession<E: VisionEngine> {
    engine: E,
    handle: Option<EngineHandle>,
    phase: ScanPhase,
    scan_properties: ImageProperties,
    photo_properties: ImageProperties,
    draw_config: DrawConfig,
    // None until the engine reports a usable layout again.
    layout: Option<FrameLayout>,
    // Layout last synced in the first phase for the current scan properties;
    // scan buffers are sized by it.
    scan_layout: Option<FrameLayout>,
    statistics: Option<ScanStatistics>,
}

impl ScanSession<NativeEngine> {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        Self::with_engine(NativeEngine::new()?, config)
    }
}

impl<E: VisionEngine> ScanSession<E> {
    #[instrument(skip_all)]
    pub fn with_engine(mut engine: E, config: DetectorConfig) -> Result<Self> {
        engine.initialize()?;

        let scan = config.scan_properties;
        let photo = config.photo_properties;
        let draw = config.draw_config;
        let storage_path = config
            .image_save_path
            .as_deref()
            .map(|path| path.to_string_lossy().into_owned());

        let handle = {
            let _span = tracing::info_span!("create_context").entered();
            engine.create(
                scan.rotation().degrees(),
                scan.width() as i32,
                scan.height() as i32,
                photo.rotation().degrees(),
                photo.width() as i32,
                photo.height() as i32,
                draw.draw_mode().as_wire(),
                draw.stroke_width() as i32,
                draw.fill_shape(),
                storage_path.as_deref(),
            )
        }
        .ok_or_else(|| {
            DetectorError::EngineError("vision engine could not create a context".to_string())
        })?;

        let synced = {
            let _span = tracing::info_span!("query_layout").entered();
            query_layout(&engine, handle)
        };
        let layout = match synced {
            Ok(layout) => layout,
            Err(e) => {
                engine.release(handle);
                return Err(e);
            }
        };

        info!(
            "Scan session created: scan {}x{} @{}°, photo {}x{} @{}°, {} bytes required",
            scan.width(),
            scan.height(),
            scan.rotation().degrees(),
            photo.width(),
            photo.height(),
            photo.rotation().degrees(),
            layout.required_memory()
        );

        Ok(Self {
            engine,
            handle: Some(handle),
            phase: ScanPhase::FirstPhase,
            scan_properties: scan,
            photo_properties: photo,
            draw_config: draw,
            layout: Some(layout),
            scan_layout: Some(layout),
            statistics: config.debuggable.then(ScanStatistics::new),
        })
    }

    pub fn state(&self) -> SessionState {
        match self.handle {
            Some(_) => SessionState::Active(self.phase),
            None => SessionState::Released,
        }
    }

    pub fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn scan_properties(&self) -> &ImageProperties {
        &self.scan_properties
    }

    pub fn photo_properties(&self) -> &ImageProperties {
        &self.photo_properties
    }

    /// Properties of the frames the current phase works on.
    pub fn active_properties(&self) -> &ImageProperties {
        match self.phase {
            ScanPhase::FirstPhase => &self.scan_properties,
            ScanPhase::SecondPhase => &self.photo_properties,
        }
    }

    pub fn draw_config(&self) -> &DrawConfig {
        &self.draw_config
    }

    /// Layout for the current properties and phase. `None` after the engine
    /// reported an unusable layout; buffer operations are rejected until a
    /// later update syncs a usable one.
    pub fn layout(&self) -> Option<&FrameLayout> {
        self.layout.as_ref()
    }

    /// Layout the scan buffer handed to `extract_facelets` is checked against.
    /// `None` once the scan properties change during the second phase.
    pub fn scan_layout(&self) -> Option<&FrameLayout> {
        self.scan_layout.as_ref()
    }

    pub fn required_memory(&self) -> Option<usize> {
        self.layout.map(|layout| layout.required_memory())
    }

    pub fn required_memory_colors(&self) -> Option<usize> {
        self.layout.map(|layout| layout.required_memory_colors())
    }

    /// Per-frame statistics, kept only by debuggable sessions.
    pub fn statistics(&self) -> Option<&ScanStatistics> {
        self.statistics.as_ref()
    }

    fn sync_layout(&mut self, handle: EngineHandle) -> Result<()> {
        let synced = query_layout(&self.engine, handle);
        self.layout = synced.as_ref().ok().copied();
        if self.phase == ScanPhase::FirstPhase {
            self.scan_layout = self.layout;
        }
        let layout = synced?;
        debug!(
            "Layout synced for {:?}: {} bytes required, result frame at {:?}",
            self.phase,
            layout.required_memory(),
            layout.result_range()
        );
        Ok(())
    }

    pub fn update_scan_properties(&mut self, properties: ImageProperties) -> Result<()> {
        self.update_properties(false, properties)
    }

    pub fn update_photo_properties(&mut self, properties: ImageProperties) -> Result<()> {
        self.update_properties(true, properties)
    }

    #[instrument(skip(self))]
    fn update_properties(&mut self, is_photo: bool, properties: ImageProperties) -> Result<()> {
        let Some(handle) = self.handle else {
            debug!("Ignoring property update on a released session");
            return Ok(());
        };
        self.engine.set_properties(
            handle,
            is_photo,
            properties.rotation().degrees(),
            properties.width() as i32,
            properties.height() as i32,
        );
        if is_photo {
            self.photo_properties = properties;
        } else {
            self.scan_properties = properties;
            if self.phase == ScanPhase::SecondPhase {
                debug!("Scan layout invalidated until the first phase is re-entered");
                self.scan_layout = None;
            }
        }
        self.sync_layout(handle)
    }

    #[instrument(skip(self))]
    pub fn update_scan_phase(&mut self, phase: ScanPhase) -> Result<()> {
        let Some(handle) = self.handle else {
            debug!("Ignoring phase change on a released session");
            return Ok(());
        };
        self.engine.set_phase(handle, phase.is_second());
        if self.phase != phase {
            info!("Scan phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.sync_layout(handle)
    }

    pub fn update_draw_config(&mut self, draw_config: DrawConfig) {
        let Some(handle) = self.handle else {
            debug!("Ignoring draw config update on a released session");
            return;
        };
        self.engine.set_draw_config(
            handle,
            draw_config.draw_mode().as_wire(),
            draw_config.stroke_width() as i32,
            draw_config.fill_shape(),
        );
        self.draw_config = draw_config;
    }

    fn reject<T>(&self, rejection: Rejection) -> Detection<T> {
        debug!("Rejected: {}", rejection);
        Detection::Rejected(rejection)
    }

    /// The live handle if the session is active in `required`.
    fn admit(&self, required: ScanPhase) -> std::result::Result<EngineHandle, Rejection> {
        let handle = self.handle.ok_or(Rejection::Released)?;
        if self.phase != required {
            return Err(Rejection::WrongPhase {
                required,
                current: self.phase,
            });
        }
        Ok(handle)
    }

    fn check_capacity(
        capacity: usize,
        layout: Option<&FrameLayout>,
        requirement: Requirement,
    ) -> std::result::Result<(), Rejection> {
        let layout = layout.ok_or(Rejection::LayoutUnavailable)?;
        if guard::validate(capacity, layout, requirement) {
            Ok(())
        } else {
            Err(Rejection::InsufficientCapacity {
                required: guard::required_bytes(layout, requirement),
                capacity,
            })
        }
    }

    /// Looks for a cube face in a live frame held in a direct buffer.
    pub fn scan_cube<B: FrameBuffer + ?Sized>(&mut self, buffer: &mut B) -> Result<Detection<FaceletGrid>> {
        if self.is_released() {
            return Ok(self.reject(Rejection::Released));
        }
        guard::ensure_direct(buffer)?;
        self.scan_frame(buffer.bytes_mut())
    }

    /// Looks for a cube face in a live frame held in a plain byte array.
    pub fn scan_cube_bytes(&mut self, data: &mut [u8]) -> Result<Detection<FaceletGrid>> {
        self.scan_frame(data)
    }

    #[instrument(level = "trace", skip_all, fields(capacity = data.len()))]
    fn scan_frame(&mut self, data: &mut [u8]) -> Result<Detection<FaceletGrid>> {
        let handle = match self.admit(ScanPhase::FirstPhase) {
            Ok(handle) => handle,
            Err(rejection) => return Ok(self.reject(rejection)),
        };
        if let Err(rejection) = Self::check_capacity(data.len(), self.layout(), Requirement::Frame) {
            return Ok(self.reject(rejection));
        }

        let started = Instant::now();
        let raw = self.engine.scan(handle, data);
        let latency = started.elapsed();
        let decoded = decode_facelets(raw.as_deref());

        if let Some(statistics) = self.statistics.as_mut() {
            statistics.record_frame(latency, matches!(decoded, Ok(Some(_))));
            debug!(
                "Frame {}: {:.3}ms, {:.1} fps average",
                statistics.frames(),
                latency.as_secs_f64() * 1000.0,
                statistics.frame_rate().unwrap_or(0.0)
            );
        }

        Ok(match decoded? {
            Some(grid) => Detection::Detected(grid),
            None => {
                trace!("No cube face in frame");
                Detection::Missed
            }
        })
    }

    /// Projects the last tracked face onto the high-resolution photo.
    ///
    /// `scan_buffer` is sized for the first-phase layout, `photo_data` for the
    /// active second-phase layout.
    #[instrument(skip_all, fields(scan_capacity = scan_buffer.capacity(), photo_capacity = photo_data.len()))]
    pub fn extract_facelets<B: FrameBuffer + ?Sized>(
        &mut self,
        scan_buffer: &mut B,
        photo_data: &mut [u8],
    ) -> Result<Detection<()>> {
        if self.is_released() {
            return Ok(self.reject(Rejection::Released));
        }
        guard::ensure_direct(scan_buffer)?;
        let handle = match self.admit(ScanPhase::SecondPhase) {
            Ok(handle) => handle,
            Err(rejection) => return Ok(self.reject(rejection)),
        };
        let capacities = Self::check_capacity(scan_buffer.capacity(), self.scan_layout(), Requirement::Frame)
            .and_then(|()| Self::check_capacity(photo_data.len(), self.layout(), Requirement::Frame));
        if let Err(rejection) = capacities {
            return Ok(self.reject(rejection));
        }

        if self.engine.extract_facelets(handle, scan_buffer.bytes_mut(), photo_data) {
            debug!("Facelets extracted from photo");
            Ok(Detection::Detected(()))
        } else {
            debug!("Facelet extraction found nothing");
            Ok(Detection::Missed)
        }
    }

    /// Classifies all 54 stickers from a photo held in a direct buffer.
    #[instrument(skip_all, fields(capacity = buffer.capacity()))]
    pub fn analyze_colors<B: FrameBuffer + ?Sized>(&mut self, buffer: &mut B) -> Result<Detection<CubeState>> {
        if self.is_released() {
            return Ok(self.reject(Rejection::Released));
        }
        guard::ensure_direct(buffer)?;
        let handle = match self.admit(ScanPhase::SecondPhase) {
            Ok(handle) => handle,
            Err(rejection) => return Ok(self.reject(rejection)),
        };
        if let Err(rejection) = Self::check_capacity(buffer.capacity(), self.layout(), Requirement::Colors) {
            return Ok(self.reject(rejection));
        }

        match self.engine.analyze_colors(handle, buffer.bytes_mut()) {
            Some(raw) => {
                let state = {
                    let _span = tracing::info_span!("decode_cube_state").entered();
                    decode_cube_state(&raw)?
                };
                info!("Cube state analyzed: {}", state.to_solver_scramble());
                Ok(Detection::Detected(state))
            }
            None => {
                debug!("Color analysis failed");
                Ok(Detection::Missed)
            }
        }
    }

    /// Frees the engine context. Later calls are rejected; releasing twice is a no-op.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.release(handle);
            info!("Scan session released");
        }
    }
}

impl<E: VisionEngine> Drop for ScanSession<E> {
    fn drop(&mut self) {
        self.release();
    }
}
