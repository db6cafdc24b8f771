// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cooperative frame scheduler driving every running animation.
//!
//! The host calls [`Timeline::tick`] once per display refresh (or per fake
//! timer tick in tests). Each tick advances every live animation exactly
//! once, in registration order. Animations scheduled while a tick is running
//! are first advanced on the following tick.

use crate::clock::FrameClock;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Result of advancing an animation by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More frames are needed
    Running,
    /// The animation is over and may be dropped
    Finished,
}

/// What an animation sees while it is advanced
pub struct FrameContext<'a> {
    now: f64,
    state: &'a Cell<AnimationState>,
}

impl FrameContext<'_> {
    /// Timestamp of the current frame
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Whether the animation was cancelled, possibly by one of its own callbacks.
    ///
    /// Animations check this between callbacks and stop as soon as it is set.
    pub fn is_cancelled(&self) -> bool {
        self.state.get() == AnimationState::Cancelled
    }
}

/// A frame-driven state machine
pub trait Animation {
    /// Advance by one frame
    fn advance(&mut self, frame: &FrameContext<'_>) -> Progress;

    /// Short name for logs
    fn label(&self) -> &'static str;
}

/// Unique identifier for a scheduled animation, increasing per timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a scheduled animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Waiting for its first frame
    #[default]
    Scheduled,
    /// Advanced at least once
    Running,
    /// Ran to its natural end
    Finished,
    /// Stopped through a handle or the timeline
    Cancelled,
}

impl AnimationState {
    /// Whether the animation will never advance again
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnimationState::Finished | AnimationState::Cancelled)
    }
}

/// Caller-side handle to a scheduled animation.
///
/// Dropping the handle does not stop the animation.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    id: AnimationId,
    state: Rc<Cell<AnimationState>>,
}

impl AnimationHandle {
    /// Animation ID
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> AnimationState {
        self.state.get()
    }

    /// Whether the animation ran to its end
    pub fn is_finished(&self) -> bool {
        self.state.get() == AnimationState::Finished
    }

    /// Whether the animation was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.state.get() == AnimationState::Cancelled
    }

    /// Stop the animation. No further steps or completion callbacks fire.
    ///
    /// Returns false if it had already finished or been cancelled.
    pub fn cancel(&self) -> bool {
        if self.state.get().is_terminal() {
            return false;
        }
        self.state.set(AnimationState::Cancelled);
        tracing::debug!("Cancelled animation {}", self.id);
        true
    }
}

struct Entry {
    id: AnimationId,
    animation: Box<dyn Animation>,
    state: Rc<Cell<AnimationState>>,
}

#[derive(Default)]
struct TimelineInner {
    next_id: u64,
    /// Animations advanced on the next tick
    active: Vec<Entry>,
    /// Animations scheduled during a tick
    pending: Vec<Entry>,
    /// State cells of every live animation
    states: IndexMap<AnimationId, Rc<Cell<AnimationState>>>,
    frame: u64,
    last_tick: Option<f64>,
    ticking: bool,
}

/// Shared frame scheduler.
///
/// Cloning yields another handle to the same timeline, so callbacks can
/// schedule follow-up animations.
#[derive(Clone, Default)]
pub struct Timeline {
    inner: Rc<RefCell<TimelineInner>>,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Timeline")
            .field("frame", &inner.frame)
            .field("live", &inner.states.len())
            .finish()
    }
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation. It is first advanced on the next tick.
    pub fn schedule(&self, animation: impl Animation + 'static) -> AnimationHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = AnimationId(inner.next_id);
        let state = Rc::new(Cell::new(AnimationState::Scheduled));

        tracing::debug!("Scheduled {} animation {}", animation.label(), id);
        let entry = Entry {
            id,
            animation: Box::new(animation),
            state: Rc::clone(&state),
        };
        if inner.ticking {
            inner.pending.push(entry);
        } else {
            inner.active.push(entry);
        }
        inner.states.insert(id, Rc::clone(&state));

        AnimationHandle { id, state }
    }

    /// Advance every live animation by one frame.
    ///
    /// Returns the number of animations advanced.
    pub fn tick(&self, now: f64) -> usize {
        let mut batch = {
            let mut inner = self.inner.borrow_mut();
            inner.frame += 1;
            inner.last_tick = Some(now);
            inner.ticking = true;
            std::mem::take(&mut inner.active)
        };

        let mut kept = Vec::with_capacity(batch.len());
        let mut finished = Vec::new();
        let mut advanced = 0;

        // The timeline is not borrowed while callbacks run
        for mut entry in batch.drain(..) {
            if entry.state.get() == AnimationState::Cancelled {
                finished.push(entry.id);
                continue;
            }
            entry.state.set(AnimationState::Running);
            let frame = FrameContext {
                now,
                state: &entry.state,
            };
            let progress = entry.animation.advance(&frame);
            advanced += 1;

            match (progress, entry.state.get()) {
                (_, AnimationState::Cancelled) => finished.push(entry.id),
                (Progress::Finished, _) => {
                    entry.state.set(AnimationState::Finished);
                    tracing::debug!("Finished {} animation {}", entry.animation.label(), entry.id);
                    finished.push(entry.id);
                }
                (Progress::Running, _) => kept.push(entry),
            }
        }

        let mut inner = self.inner.borrow_mut();
        for id in finished {
            inner.states.shift_remove(&id);
        }
        let pending = std::mem::take(&mut inner.pending);
        kept.extend(pending);
        inner.active = kept;
        inner.ticking = false;
        advanced
    }

    /// Cancel an animation by id. Returns false if it is not live.
    pub fn cancel(&self, id: AnimationId) -> bool {
        let state = self.inner.borrow().states.get(&id).cloned();
        match state {
            Some(state) if !state.get().is_terminal() => {
                state.set(AnimationState::Cancelled);
                tracing::debug!("Cancelled animation {}", id);
                true
            }
            _ => false,
        }
    }

    /// Cancel every live animation
    pub fn cancel_all(&self) -> usize {
        let inner = self.inner.borrow();
        let mut cancelled = 0;
        for state in inner.states.values() {
            if !state.get().is_terminal() {
                state.set(AnimationState::Cancelled);
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            tracing::debug!("Cancelled {} animations", cancelled);
        }
        cancelled
    }

    /// Number of animations that will still advance
    pub fn active_count(&self) -> usize {
        self.inner
            .borrow()
            .states
            .values()
            .filter(|state| !state.get().is_terminal())
            .count()
    }

    /// Whether nothing is left to advance
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame
    }

    /// Timestamp of the most recent tick
    pub fn last_tick(&self) -> Option<f64> {
        self.inner.borrow().last_tick
    }

    /// Tick with frames from `clock` until idle or `max_frames` ticks ran.
    ///
    /// Returns the number of ticks run.
    pub fn run_until_idle(&self, clock: &mut dyn FrameClock, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && !self.is_idle() {
            self.tick(clock.next_frame());
            frames += 1;
        }
        frames
    }
}
