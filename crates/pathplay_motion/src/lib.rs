// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path-following animation engine for PathPlay.
//!
//! This crate turns points plus a duration into frame-synchronized position
//! updates:
//! - Point-to-point movement ([`move_between_points`])
//! - Multi-segment walks ([`move_along_path`])
//! - Directional, looping and yoyo playback ([`FollowPath`])
//!
//! ## Architecture
//!
//! Every animation is an explicit state machine implementing [`Animation`].
//! A single-threaded [`Timeline`] advances each live animation once per
//! frame; the host supplies frame timestamps, either from the display or
//! from a [`FixedRateClock`] in tests. Starting an animation never blocks and
//! returns an [`AnimationHandle`] that can cancel it.

pub mod clock;
pub mod error;
pub mod interpolate;
pub mod mover;
pub mod player;
pub mod timeline;
pub mod walker;

pub use clock::{FixedRateClock, FrameClock, DEFAULT_FRAME_RATE};
pub use error::MotionError;
pub use interpolate::{Interpolator, Sample};
pub use mover::{move_between_points, PointMover};
pub use player::{follow_path, Direction, FollowPath, PathPlayer, PlaybackOptions, PlayerUpdate};
pub use timeline::{
    Animation, AnimationHandle, AnimationId, AnimationState, FrameContext, Progress, Timeline,
};
pub use walker::{move_along_path, PathStep, PathWalk, PathWalker, WalkEvent};
