//! Frame layout types

use std::ops::Range;

use crate::rubik_detector::common::error::{DetectorError, Result};

/// Stage of the two-phase scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanPhase {
    /// Live, low-resolution tracking of a cube face
    #[default]
    FirstPhase,
    /// High-resolution facelet extraction and color analysis
    SecondPhase,
}

impl ScanPhase {
    pub fn is_second(self) -> bool {
        self == ScanPhase::SecondPhase
    }
}

/// Byte layout of the shared buffer for the current properties and phase.
///
/// Both regions always fit inside `required_memory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameLayout {
    required_memory: usize,
    input_offset: usize,
    input_byte_count: usize,
    result_offset: usize,
    result_byte_count: usize,
}

impl FrameLayout {
    pub fn new(
        required_memory: usize,
        input_offset: usize,
        input_byte_count: usize,
        result_offset: usize,
        result_byte_count: usize,
    ) -> Result<Self> {
        let input_end = input_offset.checked_add(input_byte_count);
        let result_end = result_offset.checked_add(result_byte_count);
        if input_end.is_none_or(|end| end > required_memory) {
            return Err(DetectorError::MalformedLayout(format!(
                "input frame [{input_offset}, +{input_byte_count}) exceeds required memory {required_memory}"
            )));
        }
        if result_end.is_none_or(|end| end > required_memory) {
            return Err(DetectorError::MalformedLayout(format!(
                "result frame [{result_offset}, +{result_byte_count}) exceeds required memory {required_memory}"
            )));
        }
        if result_byte_count.checked_mul(2).is_none() {
            return Err(DetectorError::MalformedLayout(format!(
                "result frame of {result_byte_count} bytes is too large"
            )));
        }
        Ok(Self {
            required_memory,
            input_offset,
            input_byte_count,
            result_offset,
            result_byte_count,
        })
    }

    /// Builds a layout from the raw values reported across the engine boundary.
    pub fn from_wire(
        required_memory: i32,
        input_offset: i32,
        input_byte_count: i32,
        result_offset: i32,
        result_byte_count: i32,
    ) -> Result<Self> {
        let to_usize = |name: &str, value: i32| {
            usize::try_from(value).map_err(|_| {
                DetectorError::MalformedLayout(format!("{name} is negative: {value}"))
            })
        };
        Self::new(
            to_usize("required memory", required_memory)?,
            to_usize("input offset", input_offset)?,
            to_usize("input byte count", input_byte_count)?,
            to_usize("result offset", result_offset)?,
            to_usize("result byte count", result_byte_count)?,
        )
    }

    pub fn required_memory(&self) -> usize {
        self.required_memory
    }

    /// Capacity needed by color analysis: room for two full result frames.
    pub fn required_memory_colors(&self) -> usize {
        self.result_byte_count * 2
    }

    pub fn input_offset(&self) -> usize {
        self.input_offset
    }

    pub fn input_byte_count(&self) -> usize {
        self.input_byte_count
    }

    pub fn result_offset(&self) -> usize {
        self.result_offset
    }

    pub fn result_byte_count(&self) -> usize {
        self.result_byte_count
    }

    pub fn input_range(&self) -> Range<usize> {
        self.input_offset..self.input_offset + self.input_byte_count
    }

    pub fn result_range(&self) -> Range<usize> {
        self.result_offset..self.result_offset + self.result_byte_count
    }

    /// The input frame region, if `buffer` is large enough to hold it.
    pub fn input_frame<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        buffer.get(self.input_range())
    }

    pub fn input_frame_mut<'a>(&self, buffer: &'a mut [u8]) -> Option<&'a mut [u8]> {
        buffer.get_mut(self.input_range())
    }

    /// The RGBA8888 output frame region, if `buffer` is large enough to hold it.
    pub fn result_frame<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        buffer.get(self.result_range())
    }

    pub fn result_frame_mut<'a>(&self, buffer: &'a mut [u8]) -> Option<&'a mut [u8]> {
        buffer.get_mut(self.result_range())
    }
}
