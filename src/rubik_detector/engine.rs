//! Vision engine boundary
//!
//! The engine does the actual image processing. Only primitives, an opaque
//! handle, raw byte buffers and flat integer arrays cross this boundary.

#[cfg(rubikdetector_native)]
pub mod native;
pub mod vision_engine;

use std::num::NonZeroUsize;

pub use vision_engine::VisionEngine;

/// Opaque identity of one engine context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(NonZeroUsize);

impl EngineHandle {
    pub fn new(raw: NonZeroUsize) -> Self {
        Self(raw)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

// Fallback when the native library is NOT linked in
#[cfg(not(rubikdetector_native))]
#[derive(Debug)]
pub enum NativeEngine {}

#[cfg(not(rubikdetector_native))]
impl NativeEngine {
    pub fn new() -> crate::rubik_detector::Result<Self> {
        Err(crate::rubik_detector::DetectorError::EngineUnavailable(
            "built without the native vision engine, set RUBIKDETECTOR_LIB_DIR".to_string(),
        ))
    }
}

#[cfg(not(rubikdetector_native))]
impl VisionEngine for NativeEngine {
    fn create(
        &mut self,
        _scan_rotation: i32,
        _scan_width: i32,
        _scan_height: i32,
        _photo_rotation: i32,
        _photo_width: i32,
        _photo_height: i32,
        _draw_mode: i32,
        _stroke_width: i32,
        _fill_shape: bool,
        _storage_path: Option<&str>,
    ) -> Option<EngineHandle> {
        match *self {}
    }

    fn release(&mut self, _handle: EngineHandle) {
        match *self {}
    }

    fn set_properties(&mut self, _handle: EngineHandle, _is_photo: bool, _rotation: i32, _width: i32, _height: i32) {
        match *self {}
    }

    fn set_phase(&mut self, _handle: EngineHandle, _is_second_phase: bool) {
        match *self {}
    }

    fn set_draw_config(&mut self, _handle: EngineHandle, _draw_mode: i32, _stroke_width: i32, _fill_shape: bool) {
        match *self {}
    }

    fn scan(&mut self, _handle: EngineHandle, _data: &mut [u8]) -> Option<Vec<i32>> {
        match *self {}
    }

    fn extract_facelets(&mut self, _handle: EngineHandle, _scan_data: &mut [u8], _photo_data: &mut [u8]) -> bool {
        match *self {}
    }

    fn analyze_colors(&mut self, _handle: EngineHandle, _data: &mut [u8]) -> Option<Vec<i32>> {
        match *self {}
    }

    fn required_memory(&self, _handle: EngineHandle) -> i32 {
        match *self {}
    }

    fn input_offset(&self, _handle: EngineHandle) -> i32 {
        match *self {}
    }

    fn input_size(&self, _handle: EngineHandle) -> i32 {
        match *self {}
    }

    fn result_offset(&self, _handle: EngineHandle) -> i32 {
        match *self {}
    }

    fn result_size(&self, _handle: EngineHandle) -> i32 {
        match *self {}
    }
}

#[cfg(rubikdetector_native)]
pub use native::NativeEngine;
