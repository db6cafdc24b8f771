// SPDX-License-Identifier: MIT OR Apache-2.0
//! Invocation errors raised before an animation is scheduled.

/// Contract violation detected when starting playback
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MotionError {
    /// No path was supplied
    #[error("No path to follow")]
    MissingPath,

    /// The path cannot be walked
    #[error("Path needs at least 2 points to follow, got {0}")]
    PathTooShort(usize),

    /// Playback needs somewhere to report positions
    #[error("An update callback is required")]
    MissingUpdateCallback,
}
