use std::time::{Duration, Instant};

/// Per-frame counters kept by a debuggable session.
#[derive(Debug, Clone, Default)]
pub struct ScanStatistics {
    frames: u64,
    detections: u64,
    total_latency: Duration,
    last_latency: Option<Duration>,
    first_frame: Option<Instant>,
    last_frame: Option<Instant>,
}

impl ScanStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, latency: Duration, detected: bool) {
        self.record_frame_at(Instant::now(), latency, detected);
    }

    fn record_frame_at(&mut self, at: Instant, latency: Duration, detected: bool) {
        self.frames += 1;
        if detected {
            self.detections += 1;
        }
        self.total_latency += latency;
        self.last_latency = Some(latency);
        self.first_frame.get_or_insert(at);
        self.last_frame = Some(at);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn detections(&self) -> u64 {
        self.detections
    }

    pub fn last_latency(&self) -> Option<Duration> {
        self.last_latency
    }

    pub fn average_latency(&self) -> Option<Duration> {
        let frames = u32::try_from(self.frames).ok().filter(|&n| n > 0)?;
        Some(self.total_latency / frames)
    }

    /// Frames per second between the first and the last recorded frame.
    pub fn frame_rate(&self) -> Option<f64> {
        let elapsed = self.last_frame?.duration_since(self.first_frame?).as_secs_f64();
        if elapsed > 0.0 {
            Some((self.frames - 1) as f64 / elapsed)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
