//! Shared buffer layout module
//!
//! Where the input frame, the RGBA output frame and the engine's scratch space
//! live inside the one buffer the caller reuses across calls, and the checks a
//! buffer must pass before the engine may touch it.

mod buffer;
mod calculator;
pub mod guard;
pub mod types;

pub use buffer::{DirectBuffer, FrameBuffer};
pub use calculator::{compute_layout, processing_dimensions};
pub use guard::Requirement;
pub use types::{FrameLayout, ScanPhase};
