//! Rubik's Cube detection session
//!
//! This module coordinates a two-phase scan against an external vision engine:
//! low-resolution live tracking of a cube face, then high-resolution facelet
//! extraction and color analysis. It owns the shared-buffer layout negotiation,
//! the phase state machine and the decoding of the engine's marshaled results.

pub mod common;
pub mod codec;
pub mod config;
pub mod model;
pub mod geometry;
pub mod layout;
pub mod decode;
pub mod engine;
pub mod session;
pub mod preview;

pub use common::{
    DetectorError,
    Result,
};

pub use config::{
    DetectorConfig,
    DetectorConfigBuilder,
    DrawConfig,
    DrawMode,
    ImageProperties,
    Rotation,
};

pub use model::{
    CubeState,
    Face,
    FaceletColor,
    FaceletGrid,
    Point2d,
    RubikFacelet,
};

pub use geometry::rescale_grid;

pub use layout::{
    DirectBuffer,
    FrameBuffer,
    FrameLayout,
    ScanPhase,
    compute_layout,
};

pub use decode::{
    decode_cube_state,
    decode_facelets,
    encode_facelet_grid,
};

pub use engine::{
    EngineHandle,
    NativeEngine,
    VisionEngine,
};

pub use session::{
    Detection,
    Rejection,
    ScanSession,
    ScanStatistics,
    SessionState,
};

pub use preview::{
    PreviewCompression,
    PreviewConfig,
    PreviewConfigBuilder,
    PreviewFrame,
    PreviewWriter,
    TiffPreviewWriter,
};
