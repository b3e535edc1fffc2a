//! Session outcome types

use std::fmt;

use crate::rubik_detector::layout::ScanPhase;

/// Lifecycle of a session. `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active(ScanPhase),
    Released,
}

impl SessionState {
    pub fn is_released(self) -> bool {
        self == SessionState::Released
    }

    pub fn phase(self) -> Option<ScanPhase> {
        match self {
            SessionState::Active(phase) => Some(phase),
            SessionState::Released => None,
        }
    }
}

/// Why an operation did not reach the engine. Never an error: the caller
/// simply tries again later, possibly with a larger buffer or another phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Released,
    /// The engine's last reported layout was unusable, or the scan
    /// properties changed since the scan layout was synced
    LayoutUnavailable,
    WrongPhase { required: ScanPhase, current: ScanPhase },
    InsufficientCapacity { required: usize, capacity: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Released => write!(f, "session already released"),
            Rejection::LayoutUnavailable => write!(f, "no usable frame layout for the current properties"),
            Rejection::WrongPhase { required, current } => {
                write!(f, "operation needs {required:?}, session is in {current:?}")
            }
            Rejection::InsufficientCapacity { required, capacity } => {
                write!(f, "buffer holds {capacity} bytes, {required} required")
            }
        }
    }
}

/// Outcome of a per-frame operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection<T> {
    /// The engine ran and found what it was looking for
    Detected(T),
    /// The engine ran and found nothing this time
    Missed,
    /// The engine was not called
    Rejected(Rejection),
}

impl<T> Detection<T> {
    pub fn is_detected(&self) -> bool {
        matches!(self, Detection::Detected(_))
    }

    pub fn detected(self) -> Option<T> {
        match self {
            Detection::Detected(value) => Some(value),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Detection::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Detection<U> {
        match self {
            Detection::Detected(value) => Detection::Detected(f(value)),
            Detection::Missed => Detection::Missed,
            Detection::Rejected(rejection) => Detection::Rejected(rejection),
        }
    }
}
