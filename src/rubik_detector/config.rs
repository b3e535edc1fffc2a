//! Detector configuration module
//!
//! Image properties for both scan phases, draw settings handed to the engine,
//! and the session-level configuration with its builder.

pub mod types;

pub use types::{
    DetectorConfig,
    DetectorConfigBuilder,
    DrawConfig,
    DrawMode,
    ImageProperties,
    Rotation,
};
