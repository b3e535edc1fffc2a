//! Decoded detection results
//!
//! Caller-owned snapshots produced by the decoder. Nothing here refers back to
//! the session or to the shared buffer.

pub mod facelet;
pub mod cube_state;

pub use facelet::{FaceletColor, FaceletGrid, Point2d, RubikFacelet};
pub use cube_state::{CubeState, Face};
