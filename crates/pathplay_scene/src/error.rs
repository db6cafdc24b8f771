// SPDX-License-Identifier: MIT OR Apache-2.0
//! Construction and registry errors for scene objects.

use crate::element::ElementId;

/// Malformed geometry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite
    #[error("Coordinate is not a finite number: ({x}, {y})")]
    NonFiniteCoordinate {
        /// Offending x value
        x: f32,
        /// Offending y value
        y: f32,
    },
}

/// Invalid element construction or mutation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElementError {
    /// A box dimension was zero, negative or not finite
    #[error("Box {dimension} must be a positive finite number, got {value}")]
    RangeViolation {
        /// Which dimension failed ("width" or "height")
        dimension: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A link path needs both endpoints
    #[error("Link path needs at least 2 points, got {0}")]
    LinkPathTooShort(usize),

    /// Links follow their path and cannot be moved directly
    #[error("Link {0} cannot be repositioned with move_to; replace its path instead")]
    LinkNotMovable(ElementId),

    /// Operation only applies to links
    #[error("Element {0} is not a link")]
    NotALink(ElementId),

    /// Operation only applies to boxes
    #[error("Element {0} is not a box")]
    NotABox(ElementId),

    /// Bad geometry
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Scene container errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// Link endpoints must have a size to take a center from
    #[error("Element {0} has no size and cannot anchor a link")]
    NotBoxLike(ElementId),

    /// Element not registered
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    /// Element construction failed
    #[error(transparent)]
    Element(#[from] ElementError),
}
