//! Scan session module
//!
//! One session owns one vision-engine context and enforces the two-phase call
//! order: live scanning first, then facelet extraction and color analysis.

mod scan_session;
mod stats;
pub mod types;

#[cfg(test)]
mod tests;

pub use scan_session::ScanSession;
pub use stats::ScanStatistics;
pub use types::{Detection, Rejection, SessionState};
