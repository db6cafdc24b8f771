// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time-based interpolation along a single straight segment.

use pathplay_scene::Point;

/// One position produced by an [`Interpolator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Interpolated position
    pub position: Point,
    /// Step counter, starting at 0 and increasing by one per sample
    pub step: usize,
    /// Fraction of the duration elapsed, clamped to `[0, 1]`
    pub progress: f32,
}

impl Sample {
    /// Horizontal coordinate
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Vertical coordinate
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Whether this is the terminal sample
    pub fn is_last(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Frame-sampled linear motion from `start` to `end` over `duration`.
///
/// The time origin is latched from the first sampled frame, so step 0 always
/// reports `start`. The terminal sample reports `end` exactly. A non-positive
/// or non-finite duration completes on the first sample.
#[derive(Debug, Clone)]
pub struct Interpolator {
    start: Point,
    end: Point,
    duration: f64,
    origin: Option<f64>,
    next_step: usize,
    finished: bool,
}

impl Interpolator {
    /// Create an interpolator; nothing is sampled until [`Interpolator::sample`]
    pub fn new(start: Point, end: Point, duration: f64) -> Self {
        Self {
            start,
            end,
            duration,
            origin: None,
            next_step: 0,
            finished: false,
        }
    }

    /// Segment start point
    pub fn start(&self) -> Point {
        self.start
    }

    /// Segment end point
    pub fn end(&self) -> Point {
        self.end
    }

    /// Segment duration
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the terminal sample was produced
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of samples produced so far
    pub fn steps_taken(&self) -> usize {
        self.next_step
    }

    /// Produce the sample for the frame at `now`.
    ///
    /// Returns `None` once the terminal sample has been produced.
    pub fn sample(&mut self, now: f64) -> Option<Sample> {
        if self.finished {
            return None;
        }
        let origin = *self.origin.get_or_insert(now);
        let progress = fraction_elapsed(now - origin, self.duration);
        let position = if progress >= 1.0 {
            self.finished = true;
            self.end
        } else {
            self.start.lerp(self.end, progress)
        };

        let step = self.next_step;
        self.next_step += 1;
        Some(Sample {
            position,
            step,
            progress,
        })
    }
}

fn fraction_elapsed(elapsed: f64, duration: f64) -> f32 {
    if !(duration.is_finite() && duration > 0.0) {
        return 1.0;
    }
    (elapsed.max(0.0) / duration).min(1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_reports_start() {
        let mut interp = Interpolator::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 100.0);
        let sample = interp.sample(5000.0).unwrap();

        assert_eq!(sample.step, 0);
        assert_eq!(sample.progress, 0.0);
        assert_eq!(sample.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_progress_is_clamped_and_terminal_is_exact() {
        let end = Point::new(0.3, 0.7);
        let mut interp = Interpolator::new(Point::new(0.1, 0.1), end, 30.0);
        interp.sample(0.0).unwrap();

        let mid = interp.sample(15.0).unwrap();
        assert_eq!(mid.step, 1);
        assert!((mid.progress - 0.5).abs() < 1e-6);

        let last = interp.sample(45.0).unwrap();
        assert_eq!(last.step, 2);
        assert_eq!(last.progress, 1.0);
        assert_eq!(last.position, end);
        assert!(last.is_last());

        assert!(interp.sample(60.0).is_none());
        assert!(interp.is_finished());
        assert_eq!(interp.steps_taken(), 3);
    }

    #[test]
    fn test_zero_duration_finishes_in_one_sample() {
        let mut interp = Interpolator::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0), 0.0);
        let sample = interp.sample(10.0).unwrap();

        assert_eq!(sample.position, Point::new(2.0, 2.0));
        assert!(sample.is_last());
        assert!(interp.sample(20.0).is_none());
    }

    #[test]
    fn test_negative_and_nan_duration_finish_immediately() {
        for duration in [-5.0, f64::NAN, f64::INFINITY] {
            let mut interp = Interpolator::new(Point::default(), Point::new(4.0, 0.0), duration);
            assert!(interp.sample(0.0).unwrap().is_last());
        }
    }

    #[test]
    fn test_time_before_origin_clamps_to_zero() {
        let mut interp = Interpolator::new(Point::default(), Point::new(10.0, 0.0), 100.0);
        interp.sample(100.0).unwrap();
        let sample = interp.sample(50.0).unwrap();
        assert_eq!(sample.progress, 0.0);
    }
}
