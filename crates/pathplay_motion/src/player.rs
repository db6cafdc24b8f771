// SPDX-License-Identifier: MIT OR Apache-2.0
//! Directional, looping and yoyo playback along a path.
//!
//! A traversal is one full walk over every segment. Without looping the
//! player stops after one traversal and reports a loop count of 1. With
//! looping a new traversal begins on the frame after the previous one ends,
//! and yoyo flips the direction between traversals so motion continues from
//! the endpoint just reached. Looping playback runs until cancelled.

use crate::error::MotionError;
use crate::timeline::{Animation, AnimationHandle, FrameContext, Progress, Timeline};
use crate::walker::{PathWalk, WalkEvent};
use pathplay_scene::{Path, Point};
use serde::{Deserialize, Serialize};

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Original point order
    #[default]
    Forward,
    /// Reversed point order
    Backward,
}

impl Direction {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// Playback parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Starting direction
    pub direction: Direction,
    /// Duration of one traversal in milliseconds
    pub duration: f64,
    /// Restart after each traversal
    pub looping: bool,
    /// Flip direction between traversals (only with `looping`)
    pub yoyo: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            duration: 1000.0,
            looping: false,
            yoyo: false,
        }
    }
}

/// A position update reported during playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerUpdate {
    /// Interpolated position
    pub position: Point,
    /// Step counter local to the segment
    pub step: usize,
    /// Segment index within the current traversal
    pub segment: usize,
    /// Completed traversals so far
    pub loop_count: u32,
    /// Direction of the current traversal
    pub direction: Direction,
}

type UpdateFn = Box<dyn FnMut(PlayerUpdate)>;
type CompleteFn = Box<dyn FnOnce(u32)>;

/// Builder for path playback.
///
/// ```ignore
/// let handle = FollowPath::new(path)
///     .direction(Direction::Backward)
///     .duration(500.0)
///     .looping(true)
///     .on_update(|update| println!("{:?}", update.position))
///     .start(&timeline)?;
/// ```
#[derive(Default)]
pub struct FollowPath {
    path: Option<Path>,
    options: PlaybackOptions,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
}

impl FollowPath {
    /// Start building playback along `path`
    pub fn new(path: Path) -> Self {
        Self::default().path(path)
    }

    /// Set the path
    pub fn path(mut self, path: Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Replace all playback options
    pub fn options(mut self, options: PlaybackOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the starting direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.options.direction = direction;
        self
    }

    /// Set the duration of one traversal
    pub fn duration(mut self, duration: f64) -> Self {
        self.options.duration = duration;
        self
    }

    /// Enable or disable looping
    pub fn looping(mut self, looping: bool) -> Self {
        self.options.looping = looping;
        self
    }

    /// Enable or disable yoyo
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.options.yoyo = yoyo;
        self
    }

    /// Set the update callback (required)
    pub fn on_update(mut self, on_update: impl FnMut(PlayerUpdate) + 'static) -> Self {
        self.on_update = Some(Box::new(on_update));
        self
    }

    /// Set the completion callback, called with the final loop count
    pub fn on_complete(mut self, on_complete: impl FnOnce(u32) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Validate and build the player without scheduling it
    pub fn build(self) -> Result<PathPlayer, MotionError> {
        let path = self.path.ok_or(MotionError::MissingPath)?;
        if !path.is_traversable() {
            return Err(MotionError::PathTooShort(path.len()));
        }
        let on_update = self.on_update.ok_or(MotionError::MissingUpdateCallback)?;

        let options = self.options;
        let working = match options.direction {
            Direction::Forward => path,
            Direction::Backward => path.reversed(),
        };
        Ok(PathPlayer {
            walk: PathWalk::new(working, options.duration),
            events: Vec::new(),
            direction: options.direction,
            loop_count: 0,
            looping: options.looping,
            yoyo: options.yoyo,
            on_update,
            on_complete: self.on_complete,
        })
    }

    /// Validate and schedule playback on `timeline`.
    ///
    /// Fails before anything is scheduled if the path is missing or shorter
    /// than two points, or if no update callback was set.
    pub fn start(self, timeline: &Timeline) -> Result<AnimationHandle, MotionError> {
        let player = self.build()?;
        tracing::debug!(
            "Following path with {} points {} (looping: {}, yoyo: {})",
            player.walk.points().len(),
            player.direction.name(),
            player.looping,
            player.yoyo
        );
        Ok(timeline.schedule(player))
    }
}

/// Walks a path repeatedly according to [`PlaybackOptions`]
pub struct PathPlayer {
    walk: PathWalk,
    events: Vec<WalkEvent>,
    direction: Direction,
    loop_count: u32,
    looping: bool,
    yoyo: bool,
    on_update: UpdateFn,
    on_complete: Option<CompleteFn>,
}

impl PathPlayer {
    /// Completed traversals
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Direction of the current traversal
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn finish_traversal(&mut self) -> Progress {
        self.loop_count += 1;
        if !self.looping {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete(self.loop_count);
            }
            return Progress::Finished;
        }

        if self.yoyo {
            self.direction = self.direction.flipped();
            self.walk.reverse();
        } else {
            self.walk.reset();
        }
        tracing::debug!(
            "Traversal {} done, restarting {}",
            self.loop_count,
            self.direction.name()
        );
        Progress::Running
    }
}

impl Animation for PathPlayer {
    fn advance(&mut self, frame: &FrameContext<'_>) -> Progress {
        self.walk.advance(frame.now(), &mut self.events);

        let mut traversal_done = false;
        for event in self.events.drain(..) {
            match event {
                WalkEvent::Step(step) => (self.on_update)(PlayerUpdate {
                    position: step.position,
                    step: step.step,
                    segment: step.segment,
                    loop_count: self.loop_count,
                    direction: self.direction,
                }),
                WalkEvent::SegmentComplete(_) => {}
                WalkEvent::Complete => traversal_done = true,
            }
            if frame.is_cancelled() {
                return Progress::Finished;
            }
        }

        if traversal_done {
            self.finish_traversal()
        } else {
            Progress::Running
        }
    }

    fn label(&self) -> &'static str {
        "follow"
    }
}

/// Follow `path` with `options`, reporting every step to `on_update`.
///
/// Shorthand for the [`FollowPath`] builder.
pub fn follow_path(
    timeline: &Timeline,
    path: Path,
    options: PlaybackOptions,
    on_update: impl FnMut(PlayerUpdate) + 'static,
    on_complete: Option<Box<dyn FnOnce(u32)>>,
) -> Result<AnimationHandle, MotionError> {
    let mut builder = FollowPath::new(path).options(options).on_update(on_update);
    builder.on_complete = on_complete;
    builder.start(timeline)
}
