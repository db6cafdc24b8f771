// SPDX-License-Identifier: MIT OR Apache-2.0
//! Top-level application errors.

use crate::script::ScriptError;
use pathplay_render::RenderError;

/// Anything that stops a run
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Script could not be loaded or built
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// A motion could not be started
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Frame export failed
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
