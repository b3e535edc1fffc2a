use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidProperties { width: i64, height: i64 },

    #[error("Invalid rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation(i32),

    #[error("Invalid draw config: {0}")]
    InvalidDrawConfig(String),

    #[error("Frame buffers passed to the vision engine need to be direct buffers")]
    NonDirectBuffer,

    #[error("Malformed result from vision engine: {0}")]
    MalformedResult(String),

    #[error("Malformed frame layout from vision engine: {0}")]
    MalformedLayout(String),

    #[error(
        "Largest side differs between frames: {from_width}x{from_height} vs {to_width}x{to_height}"
    )]
    AspectClassMismatch {
        from_width: u32,
        from_height: u32,
        to_width: u32,
        to_height: u32,
    },

    #[error("Value {0} does not fit the fixed-point wire format")]
    FixedPointOverflow(f64),

    #[error("Vision engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Vision engine error: {0}")]
    EngineError(String),

    #[error("Failed to encode preview frame: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
