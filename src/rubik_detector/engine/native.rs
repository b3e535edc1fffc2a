use std::ffi::CString;
use std::num::NonZeroUsize;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::rubik_detector::codec::{CUBE_STATE_ARRAY_LEN, FACELET_ARRAY_LEN};
use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::engine::{EngineHandle, VisionEngine};

#[allow(non_camel_case_types, non_upper_case_globals, dead_code)]
mod ffi {
    include!(concat!(env!("OUT_DIR"), "/rubikdetector_bindings.rs"));
}

static LIBRARY_STATUS: OnceLock<i32> = OnceLock::new();

/// Binding to the `rubikdetector_native` C library.
#[derive(Debug)]
pub struct NativeEngine {
    _private: (),
}

impl NativeEngine {
    pub fn new() -> Result<Self> {
        let mut engine = Self { _private: () };
        engine.initialize()?;
        Ok(engine)
    }

    fn processor(handle: EngineHandle) -> *mut ffi::rbdt_processor {
        handle.get() as *mut ffi::rbdt_processor
    }
}

impl VisionEngine for NativeEngine {
    fn initialize(&mut self) -> Result<()> {
        let status = *LIBRARY_STATUS.get_or_init(|| {
            debug!("Initializing native vision engine");
            // SAFETY: the initializer takes no arguments and runs once per process.
            unsafe { ffi::rbdt_initialize() }
        });
        if status != 0 {
            return Err(DetectorError::EngineError(format!(
                "rbdt_initialize failed with status {status}"
            )));
        }
        Ok(())
    }

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
    ) -> Option<EngineHandle> {
        let storage_path = match storage_path.map(CString::new).transpose() {
            Ok(path) => path,
            Err(e) => {
                warn!("Ignoring image save path: {}", e);
                None
            }
        };
        let path_ptr = storage_path.as_ref().map_or(std::ptr::null(), |p| p.as_ptr());

        // SAFETY: all arguments are plain values; the path outlives the call.
        let processor = unsafe {
            ffi::rbdt_create(
                scan_rotation,
                scan_width,
                scan_height,
                photo_rotation,
                photo_width,
                photo_height,
                draw_mode,
                stroke_width,
                fill_shape,
                path_ptr,
            )
        };
        NonZeroUsize::new(processor as usize).map(EngineHandle::new)
    }

    fn release(&mut self, handle: EngineHandle) {
        // SAFETY: the session releases each handle exactly once.
        unsafe { ffi::rbdt_release(Self::processor(handle)) }
    }

    fn set_properties(&mut self, handle: EngineHandle, is_photo: bool, rotation: i32, width: i32, height: i32) {
        // SAFETY: handle is live for as long as the owning session is active.
        unsafe { ffi::rbdt_set_properties(Self::processor(handle), is_photo, rotation, width, height) }
    }

    fn set_phase(&mut self, handle: EngineHandle, is_second_phase: bool) {
        // SAFETY: see set_properties.
        unsafe { ffi::rbdt_set_phase(Self::processor(handle), is_second_phase) }
    }

    fn set_draw_config(&mut self, handle: EngineHandle, draw_mode: i32, stroke_width: i32, fill_shape: bool) {
        // SAFETY: see set_properties.
        unsafe { ffi::rbdt_set_draw_config(Self::processor(handle), draw_mode, stroke_width, fill_shape) }
    }

    fn scan(&mut self, handle: EngineHandle, data: &mut [u8]) -> Option<Vec<i32>> {
        let mut facelets = vec![0i32; FACELET_ARRAY_LEN];
        // SAFETY: `data` is exclusively borrowed for the call and its length is
        // passed along; `facelets` has room for the full array.
        let found = unsafe {
            ffi::rbdt_scan(
                Self::processor(handle),
                data.as_mut_ptr(),
                data.len(),
                facelets.as_mut_ptr(),
            )
        };
        found.then_some(facelets)
    }

    fn extract_facelets(&mut self, handle: EngineHandle, scan_data: &mut [u8], photo_data: &mut [u8]) -> bool {
        // SAFETY: both buffers are exclusively borrowed for the call.
        unsafe {
            ffi::rbdt_extract_facelets(
                Self::processor(handle),
                scan_data.as_mut_ptr(),
                scan_data.len(),
                photo_data.as_mut_ptr(),
                photo_data.len(),
            )
        }
    }

    fn analyze_colors(&mut self, handle: EngineHandle, data: &mut [u8]) -> Option<Vec<i32>> {
        let mut state = vec![0i32; CUBE_STATE_ARRAY_LEN];
        // SAFETY: see scan.
        let analyzed = unsafe {
            ffi::rbdt_analyze_colors(
                Self::processor(handle),
                data.as_mut_ptr(),
                data.len(),
                state.as_mut_ptr(),
            )
        };
        analyzed.then_some(state)
    }

    fn required_memory(&self, handle: EngineHandle) -> i32 {
        // SAFETY: read-only query on a live handle.
        unsafe { ffi::rbdt_required_memory(Self::processor(handle)) }
    }

    fn input_offset(&self, handle: EngineHandle) -> i32 {
        // SAFETY: read-only query on a live handle.
        unsafe { ffi::rbdt_input_offset(Self::processor(handle)) }
    }

    fn input_size(&self, handle: EngineHandle) -> i32 {
        // SAFETY: read-only query on a live handle.
        unsafe { ffi::rbdt_input_size(Self::processor(handle)) }
    }

    fn result_offset(&self, handle: EngineHandle) -> i32 {
        // SAFETY: read-only query on a live handle.
        unsafe { ffi::rbdt_result_offset(Self::processor(handle)) }
    }

    fn result_size(&self, handle: EngineHandle) -> i32 {
        // SAFETY: read-only query on a live handle.
        unsafe { ffi::rbdt_result_size(Self::processor(handle)) }
    }
}
