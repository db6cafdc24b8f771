// SPDX-License-Identifier: MIT OR Apache-2.0
//! Point-to-point movement.

use crate::interpolate::{Interpolator, Sample};
use crate::timeline::{Animation, AnimationHandle, FrameContext, Progress, Timeline};
use pathplay_scene::Point;

/// Moves from one point to another, reporting one [`Sample`] per frame.
///
/// The terminal sample is followed by exactly one completion call.
pub struct PointMover {
    interpolator: Interpolator,
    on_step: Box<dyn FnMut(Sample)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl PointMover {
    /// Create a mover; schedule it on a [`Timeline`] to run it
    pub fn new(
        start: Point,
        end: Point,
        duration: f64,
        on_step: impl FnMut(Sample) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            interpolator: Interpolator::new(start, end, duration),
            on_step: Box::new(on_step),
            on_complete: Some(Box::new(on_complete)),
        }
    }
}

impl Animation for PointMover {
    fn advance(&mut self, frame: &FrameContext<'_>) -> Progress {
        let Some(sample) = self.interpolator.sample(frame.now()) else {
            return Progress::Finished;
        };
        tracing::trace!(
            "Step {} at ({}, {}) progress {}",
            sample.step,
            sample.x(),
            sample.y(),
            sample.progress
        );
        (self.on_step)(sample);

        if frame.is_cancelled() || !sample.is_last() {
            return Progress::Running;
        }
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
        Progress::Finished
    }

    fn label(&self) -> &'static str {
        "point"
    }
}

/// Move from `start` to `end` over `duration` milliseconds.
///
/// Returns immediately; the first step runs on the next tick of `timeline`.
pub fn move_between_points(
    timeline: &Timeline,
    start: Point,
    end: Point,
    duration: f64,
    on_step: impl FnMut(Sample) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    timeline.schedule(PointMover::new(start, end, duration, on_step, on_complete))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedRateClock, FrameClock};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Recording {
        steps: Rc<RefCell<Vec<Sample>>>,
        completions: Rc<Cell<usize>>,
        steps_at_completion: Rc<Cell<Option<usize>>>,
    }

    fn start_move(timeline: &Timeline, end: Point, duration: f64) -> (AnimationHandle, Recording) {
        let steps = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(Cell::new(0));
        let steps_at_completion = Rc::new(Cell::new(None));

        let handle = {
            let steps = Rc::clone(&steps);
            let steps_seen = Rc::clone(&steps);
            let completions = Rc::clone(&completions);
            let steps_at_completion = Rc::clone(&steps_at_completion);
            move_between_points(
                timeline,
                Point::new(0.0, 0.0),
                end,
                duration,
                move |sample| steps.borrow_mut().push(sample),
                move || {
                    completions.set(completions.get() + 1);
                    steps_at_completion.set(Some(steps_seen.borrow().len()));
                },
            )
        };
        (
            handle,
            Recording {
                steps,
                completions,
                steps_at_completion,
            },
        )
    }

    #[test]
    fn test_returns_before_first_step() {
        let timeline = Timeline::new();
        let (_, rec) = start_move(&timeline, Point::new(10.0, 0.0), 100.0);
        assert!(rec.steps.borrow().is_empty());

        timeline.tick(0.0);
        assert_eq!(rec.steps.borrow().len(), 1);
    }

    #[test]
    fn test_step_indices_are_consecutive() {
        let timeline = Timeline::new();
        let (handle, rec) = start_move(&timeline, Point::new(100.0, 50.0), 250.0);

        let mut clock = FixedRateClock::default();
        timeline.run_until_idle(&mut clock, 1000);

        let steps = rec.steps.borrow();
        assert!(steps.len() > 2);
        for (expected, sample) in steps.iter().enumerate() {
            assert_eq!(sample.step, expected);
        }
        for pair in steps.windows(2) {
            assert!(pair[1].progress >= pair[0].progress);
        }
        assert!(handle.is_finished());
    }

    #[test]
    fn test_terminal_step_then_single_completion() {
        let timeline = Timeline::new();
        let end = Point::new(10.0, 0.0);
        let (_, rec) = start_move(&timeline, end, 1.0);

        let mut clock = FixedRateClock::default();
        timeline.run_until_idle(&mut clock, 100);
        timeline.tick(clock.next_frame());

        let steps = rec.steps.borrow();
        let last = steps.last().unwrap();
        assert_eq!(last.position, end);
        assert_eq!(last.progress, 1.0);
        assert_eq!(rec.completions.get(), 1);
        assert_eq!(rec.steps_at_completion.get(), Some(steps.len()));
    }

    #[test]
    fn test_zero_duration_terminates() {
        let timeline = Timeline::new();
        let end = Point::new(3.0, 4.0);
        let (_, rec) = start_move(&timeline, end, 0.0);

        timeline.tick(0.0);
        timeline.tick(16.0);

        assert_eq!(rec.steps.borrow().len(), 1);
        assert_eq!(rec.steps.borrow()[0].position, end);
        assert_eq!(rec.completions.get(), 1);
    }

    #[test]
    fn test_negative_duration_completes_at_most_once() {
        let timeline = Timeline::new();
        let (_, rec) = start_move(&timeline, Point::new(1.0, 1.0), -20.0);

        let mut clock = FixedRateClock::default();
        timeline.run_until_idle(&mut clock, 10);
        assert_eq!(rec.completions.get(), 1);
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_cancel_from_step_callback_skips_completion() {
        let timeline = Timeline::new();
        let slot: Rc<RefCell<Option<AnimationHandle>>> = Rc::new(RefCell::new(None));
        let completions = Rc::new(Cell::new(0));

        let handle = {
            let slot = Rc::clone(&slot);
            let completions = Rc::clone(&completions);
            move_between_points(
                &timeline,
                Point::new(0.0, 0.0),
                Point::new(5.0, 5.0),
                0.0,
                move |_| {
                    if let Some(handle) = slot.borrow().as_ref() {
                        handle.cancel();
                    }
                },
                move || completions.set(completions.get() + 1),
            )
        };
        *slot.borrow_mut() = Some(handle.clone());

        timeline.tick(0.0);
        timeline.tick(16.0);

        assert!(handle.is_cancelled());
        assert_eq!(completions.get(), 0);
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_cancelled_move_never_completes() {
        let timeline = Timeline::new();
        let (handle, rec) = start_move(&timeline, Point::new(10.0, 0.0), 1000.0);

        timeline.tick(0.0);
        handle.cancel();
        timeline.tick(2000.0);

        assert_eq!(rec.steps.borrow().len(), 1);
        assert_eq!(rec.completions.get(), 0);
    }
}
