// SPDX-License-Identifier: MIT OR Apache-2.0
//! Multi-segment path traversal.
//!
//! A path of `n` points is walked as `n - 1` straight segments sharing the
//! total duration equally. Segments run strictly in order: the frame that
//! produces a segment's terminal step also reports its completion, and the
//! next segment's step 0 runs on the following frame. Walks with fewer than
//! two points produce no steps and complete on their first frame.

use crate::interpolate::Interpolator;
use crate::timeline::{Animation, AnimationHandle, FrameContext, Progress, Timeline};
use pathplay_scene::Point;

/// A step within a path walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Interpolated position
    pub position: Point,
    /// Step counter local to the segment
    pub step: usize,
    /// Segment index, starting at 0
    pub segment: usize,
    /// Progress within the segment
    pub progress: f32,
}

/// Something that happened during one frame of a walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkEvent {
    /// A position update
    Step(PathStep),
    /// A segment reached its end point
    SegmentComplete(usize),
    /// Every segment is done
    Complete,
}

#[derive(Debug, Clone)]
enum WalkState {
    Idle,
    RunningSegment {
        segment: usize,
        interpolator: Interpolator,
    },
    SegmentComplete(usize),
    Done,
}

/// Callback-free state machine for one traversal of a point sequence
#[derive(Debug, Clone)]
pub struct PathWalk {
    points: Vec<Point>,
    duration: f64,
    state: WalkState,
}

impl PathWalk {
    /// Create a walk over `points` lasting `duration` in total
    pub fn new(points: impl Into<Vec<Point>>, duration: f64) -> Self {
        Self {
            points: points.into(),
            duration,
            state: WalkState::Idle,
        }
    }

    /// Working point sequence
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Time slice given to each segment
    pub fn segment_duration(&self) -> f64 {
        match self.segment_count() {
            0 => 0.0,
            n => self.duration / n as f64,
        }
    }

    /// Segment currently being walked
    pub fn current_segment(&self) -> Option<usize> {
        match self.state {
            WalkState::RunningSegment { segment, .. } => Some(segment),
            _ => None,
        }
    }

    /// Whether the walk completed
    pub fn is_done(&self) -> bool {
        matches!(self.state, WalkState::Done)
    }

    /// Rewind to the start; the next frame begins segment 0 again
    pub fn reset(&mut self) {
        self.state = WalkState::Idle;
    }

    /// Reverse the working points in place and rewind
    pub fn reverse(&mut self) {
        self.points.reverse();
        self.reset();
    }

    fn segment(&self, segment: usize) -> Interpolator {
        Interpolator::new(
            self.points[segment],
            self.points[segment + 1],
            self.segment_duration(),
        )
    }

    /// Advance by one frame, appending what happened to `events`
    pub fn advance(&mut self, now: f64, events: &mut Vec<WalkEvent>) {
        loop {
            match std::mem::replace(&mut self.state, WalkState::Done) {
                WalkState::Idle => {
                    if self.segment_count() == 0 {
                        events.push(WalkEvent::Complete);
                        return;
                    }
                    self.state = WalkState::RunningSegment {
                        segment: 0,
                        interpolator: self.segment(0),
                    };
                }
                WalkState::RunningSegment {
                    segment,
                    mut interpolator,
                } => {
                    let Some(sample) = interpolator.sample(now) else {
                        self.state = WalkState::SegmentComplete(segment);
                        continue;
                    };
                    events.push(WalkEvent::Step(PathStep {
                        position: sample.position,
                        step: sample.step,
                        segment,
                        progress: sample.progress,
                    }));
                    if sample.is_last() {
                        self.state = WalkState::SegmentComplete(segment);
                    } else {
                        self.state = WalkState::RunningSegment {
                            segment,
                            interpolator,
                        };
                        return;
                    }
                }
                WalkState::SegmentComplete(segment) => {
                    events.push(WalkEvent::SegmentComplete(segment));
                    if segment + 1 < self.segment_count() {
                        self.state = WalkState::RunningSegment {
                            segment: segment + 1,
                            interpolator: self.segment(segment + 1),
                        };
                    } else {
                        events.push(WalkEvent::Complete);
                    }
                    return;
                }
                WalkState::Done => return,
            }
        }
    }
}

/// Walks a path, dispatching steps and completions to callbacks
pub struct PathWalker {
    walk: PathWalk,
    events: Vec<WalkEvent>,
    on_step: Box<dyn FnMut(PathStep)>,
    on_segment_complete: Box<dyn FnMut(usize)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl PathWalker {
    /// Create a walker; schedule it on a [`Timeline`] to run it
    pub fn new(
        points: impl Into<Vec<Point>>,
        duration: f64,
        on_step: impl FnMut(PathStep) + 'static,
        on_segment_complete: impl FnMut(usize) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            walk: PathWalk::new(points, duration),
            events: Vec::new(),
            on_step: Box::new(on_step),
            on_segment_complete: Box::new(on_segment_complete),
            on_complete: Some(Box::new(on_complete)),
        }
    }
}

impl Animation for PathWalker {
    fn advance(&mut self, frame: &FrameContext<'_>) -> Progress {
        self.walk.advance(frame.now(), &mut self.events);
        for event in self.events.drain(..) {
            match event {
                WalkEvent::Step(step) => (self.on_step)(step),
                WalkEvent::SegmentComplete(segment) => {
                    tracing::trace!("Segment {} complete", segment);
                    (self.on_segment_complete)(segment);
                }
                WalkEvent::Complete => {
                    if let Some(on_complete) = self.on_complete.take() {
                        on_complete();
                    }
                }
            }
            if frame.is_cancelled() {
                break;
            }
        }
        if self.walk.is_done() {
            Progress::Finished
        } else {
            Progress::Running
        }
    }

    fn label(&self) -> &'static str {
        "path"
    }
}

/// Walk `points` over `duration` milliseconds in total.
///
/// Returns immediately. Fewer than two points is not an error: no steps are
/// produced and `on_complete` fires on the next tick.
pub fn move_along_path(
    timeline: &Timeline,
    points: impl Into<Vec<Point>>,
    duration: f64,
    on_step: impl FnMut(PathStep) + 'static,
    on_segment_complete: impl FnMut(usize) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    timeline.schedule(PathWalker::new(
        points,
        duration,
        on_step,
        on_segment_complete,
        on_complete,
    ))
}
