//! Fixed frame-rate pacing

use std::time::{Duration, Instant};

/// Paces a loop at a fixed number of frames per second
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self::starting_at(frame_rate, Instant::now())
    }

    pub fn starting_at(frame_rate: u32, now: Instant) -> Self {
        Self {
            frame: Duration::from_secs(1) / frame_rate.max(1),
            last: now,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left before the next frame is due
    pub fn timeout(&self, now: Instant) -> Duration {
        self.frame.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// If a frame is due, start the next one and return true
    pub fn frame_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.frame {
            self.last = now;
            true
        } else {
            false
        }
    }
}
