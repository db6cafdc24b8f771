// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene model for PathPlay.
//!
//! This crate provides what an animation moves and a renderer paints:
//! - Points, waypoint paths and linear interpolation
//! - Paint styles
//! - Box and link elements with a `draw` capability
//! - The scene container queried by renderers each frame
//!
//! ## Architecture
//!
//! Elements are a closed set of variants sharing one position/visibility/style
//! record. Drawing goes through the [`Painter`] trait so the scene stays
//! independent of any backend.

pub mod element;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod scene;
pub mod style;

pub use element::{BoxShape, Element, ElementId, ElementKind, ElementRef, LinkShape};
pub use error::{ElementError, GeometryError, SceneError};
pub use geometry::{lerp, Path, Point};
pub use paint::{Drawable, Painter};
pub use scene::Scene;
pub use style::{BorderStyle, Color, ElementStyle, LineStyle, TextDecoration};
