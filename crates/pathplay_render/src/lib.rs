// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendering layer for PathPlay.
//!
//! This crate connects scenes and animations to a drawing backend:
//! - The [`Renderer`] contract backends implement
//! - Flash highlighting and redraw throttling
//! - [`FrameRecorder`], a headless backend that records draw commands
//! - RON-backed [`RenderSettings`]
//!
//! ## Architecture
//!
//! A renderer owns a [`pathplay_motion::Timeline`]. Each call to
//! [`Renderer::update`] advances that timeline to the given timestamp and,
//! when the frame throttle allows, repaints the scene. Animations started
//! with [`Renderer::move_by`] therefore land on screen in the same cycle.

pub mod error;
pub mod flash;
pub mod recorder;
pub mod renderer;
pub mod settings;
pub mod throttle;

pub use error::RenderError;
pub use flash::Flash;
pub use recorder::{DrawCommand, FrameRecorder, RecordedFrame};
pub use renderer::{follow_element, paint_scene, Renderer};
pub use settings::{RenderSettings, SETTINGS_FORMAT_VERSION};
pub use throttle::FrameThrottle;
