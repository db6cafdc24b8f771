// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame timestamp sources.

/// Default display refresh rate
pub const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Produces the timestamp (in milliseconds) of each successive frame
pub trait FrameClock {
    /// Timestamp of the next frame
    fn next_frame(&mut self) -> f64;
}

/// Deterministic clock advancing by a fixed interval per frame.
///
/// Stands in for the display refresh in tests and headless runs.
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    interval: f64,
    now: f64,
    started: bool,
}

impl FixedRateClock {
    /// Create a clock ticking `frame_rate` times per second, starting at 0 ms
    pub fn new(frame_rate: f64) -> Self {
        let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            DEFAULT_FRAME_RATE
        };
        Self::with_interval(1000.0 / frame_rate)
    }

    /// Create a clock with an explicit frame interval in milliseconds
    pub fn with_interval(interval: f64) -> Self {
        Self {
            interval,
            now: 0.0,
            started: false,
        }
    }

    /// Start counting from `start` instead of 0 (builder style)
    pub fn starting_at(mut self, start: f64) -> Self {
        self.now = start;
        self
    }

    /// Milliseconds between frames
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Timestamp of the most recent frame
    pub fn now(&self) -> f64 {
        self.now
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl FrameClock for FixedRateClock {
    fn next_frame(&mut self) -> f64 {
        if self.started {
            self.now += self.interval;
        } else {
            self.started = true;
        }
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rate_sequence() {
        let mut clock = FixedRateClock::with_interval(10.0);
        assert_eq!(clock.next_frame(), 0.0);
        assert_eq!(clock.next_frame(), 10.0);
        assert_eq!(clock.next_frame(), 20.0);
        assert_eq!(clock.now(), 20.0);
    }

    #[test]
    fn test_sixty_hertz_interval() {
        let clock = FixedRateClock::default();
        assert!((clock.interval() - 16.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_rate_falls_back_to_default() {
        let clock = FixedRateClock::new(0.0);
        assert!((clock.interval() - 1000.0 / DEFAULT_FRAME_RATE).abs() < 1e-9);
    }

    #[test]
    fn test_starting_at_offset() {
        let mut clock = FixedRateClock::with_interval(5.0).starting_at(100.0);
        assert_eq!(clock.next_frame(), 100.0);
        assert_eq!(clock.next_frame(), 105.0);
    }
}
