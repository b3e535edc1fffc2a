use crate::rubik_detector::common::error::Result;
use crate::rubik_detector::engine::EngineHandle;

/// Operations exported by a vision engine.
///
/// Calls on one handle are never issued concurrently. Buffers are borrowed
/// exclusively for the duration of a call; afterwards the input region still
/// holds the input frame and the result region holds an RGBA8888 frame.
pub trait VisionEngine {
    /// One-time library setup. Must be idempotent.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Creates a context; `None` if the engine could not allocate one.
    #[allow(clippy::too_many_arguments)]
    fn create(
        &mut self,
        scan_rotation: i32,
        scan_width: i32,
        scan_height: i32,
        photo_rotation: i32,
        photo_width: i32,
        photo_height: i32,
        draw_mode: i32,
        stroke_width: i32,
        fill_shape: bool,
        storage_path: Option<&str>,
    ) -> Option<EngineHandle>;

    /// Frees the context. The handle is never used again.
    fn release(&mut self, handle: EngineHandle);

    fn set_properties(&mut self, handle: EngineHandle, is_photo: bool, rotation: i32, width: i32, height: i32);

    fn set_phase(&mut self, handle: EngineHandle, is_second_phase: bool);

    fn set_draw_config(&mut self, handle: EngineHandle, draw_mode: i32, stroke_width: i32, fill_shape: bool);

    /// Tracks a cube face in a live frame. Returns the facelet array, or `None` on a miss.
    fn scan(&mut self, handle: EngineHandle, data: &mut [u8]) -> Option<Vec<i32>>;

    fn extract_facelets(&mut self, handle: EngineHandle, scan_data: &mut [u8], photo_data: &mut [u8]) -> bool;

    /// Classifies the 54 stickers. Returns the cube-state array, or `None` on failure.
    fn analyze_colors(&mut self, handle: EngineHandle, data: &mut [u8]) -> Option<Vec<i32>>;

    fn required_memory(&self, handle: EngineHandle) -> i32;

    fn input_offset(&self, handle: EngineHandle) -> i32;

    fn input_size(&self, handle: EngineHandle) -> i32;

    fn result_offset(&self, handle: EngineHandle) -> i32;

    fn result_size(&self, handle: EngineHandle) -> i32;
}
