// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer errors.

use pathplay_motion::MotionError;
use pathplay_scene::ElementId;

/// Failure binding an animation to a renderer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// Links follow their path and cannot be animated by position
    #[error("Link {0} cannot be moved; animate its endpoints instead")]
    LinkNotMovable(ElementId),

    /// Playback could not start
    #[error("Playback error: {0}")]
    Motion(#[from] MotionError),
}

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, RenderError>;
