//! Common utilities module
//!
//! This module contains shared utilities used across the detector.

pub mod error;

pub use error::{DetectorError, Result};
