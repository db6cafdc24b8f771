// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-rate limiting for redraws.

/// Slack absorbing float error when the host runs at exactly the target rate
const INTERVAL_TOLERANCE_MS: f64 = 1e-3;

/// Admits at most one redraw per `1 / target_fps` seconds
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    min_interval: f64,
    last: Option<f64>,
}

impl FrameThrottle {
    /// Create a throttle; a non-positive rate disables throttling
    pub fn new(target_fps: f64) -> Self {
        let min_interval = if target_fps.is_finite() && target_fps > 0.0 {
            1000.0 / target_fps
        } else {
            0.0
        };
        Self {
            min_interval,
            last: None,
        }
    }

    /// Minimum milliseconds between redraws
    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }

    /// Whether a redraw may happen at `now`; records it if so
    pub fn admit(&mut self, now: f64) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now - last + INTERVAL_TOLERANCE_MS >= self.min_interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    /// Forget the last redraw
    pub fn reset(&mut self) {
        self.last = None;
    }
}
