// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drawable scene elements: boxes and links.

use crate::error::ElementError;
use crate::geometry::{Path, Point};
use crate::style::{ElementStyle, LineStyle};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Shared handle to an element.
///
/// Registries and animations hold clones of the handle; the element lives as
/// long as any holder does.
pub type ElementRef = Rc<RefCell<Element>>;

/// Unique identifier for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rectangle geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoxShape")]
pub struct BoxShape {
    width: f32,
    height: f32,
}

impl BoxShape {
    /// Create a box shape; both dimensions must be positive and finite
    pub fn new(width: f32, height: f32) -> Result<Self, ElementError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self { width, height })
    }

    /// Box width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Box height
    pub fn height(&self) -> f32 {
        self.height
    }
}

#[derive(Deserialize)]
struct RawBoxShape {
    width: f32,
    height: f32,
}

impl TryFrom<RawBoxShape> for BoxShape {
    type Error = ElementError;

    fn try_from(raw: RawBoxShape) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

fn check_dimension(dimension: &'static str, value: f32) -> Result<(), ElementError> {
    // NaN fails the comparison as well
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ElementError::RangeViolation { dimension, value })
    }
}

/// A line between two anchors, optionally with arrowheads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinkShape")]
pub struct LinkShape {
    path: Path,
    line_style: LineStyle,
    arrow_start: bool,
    arrow_end: bool,
}

impl LinkShape {
    /// Create a link shape over a path of at least two points
    pub fn new(
        path: Path,
        line_style: LineStyle,
        arrow_start: bool,
        arrow_end: bool,
    ) -> Result<Self, ElementError> {
        if !path.is_traversable() {
            return Err(ElementError::LinkPathTooShort(path.len()));
        }
        Ok(Self {
            path,
            line_style,
            arrow_start,
            arrow_end,
        })
    }

    /// The link's route
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stroke pattern
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Whether an arrowhead is drawn at the start point
    pub fn arrow_start(&self) -> bool {
        self.arrow_start
    }

    /// Whether an arrowhead is drawn at the end point
    pub fn arrow_end(&self) -> bool {
        self.arrow_end
    }
}

#[derive(Deserialize)]
struct RawLinkShape {
    path: Path,
    line_style: LineStyle,
    arrow_start: bool,
    arrow_end: bool,
}

impl TryFrom<RawLinkShape> for LinkShape {
    type Error = ElementError;

    fn try_from(raw: RawLinkShape) -> Result<Self, Self::Error> {
        Self::new(raw.path, raw.line_style, raw.arrow_start, raw.arrow_end)
    }
}

/// Variant-specific element data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Axis-aligned rectangle anchored at its top-left corner
    Box(BoxShape),
    /// Line along a path
    Link(LinkShape),
}

impl ElementKind {
    /// Variant name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Link(_) => "link",
        }
    }
}

/// A drawable scene element.
///
/// Boxes move freely with [`Element::move_to`]. A link's position always
/// mirrors the start of its path and only changes through
/// [`Element::set_link_path`].
///
/// Elements serialize for export but are never read back: their IDs are
/// runtime identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    id: ElementId,
    position: Point,
    /// Whether the element is painted
    pub visible: bool,
    /// Paint style
    pub style: ElementStyle,
    /// Optional text drawn inside the element
    pub label: Option<String>,
    kind: ElementKind,
}

impl Element {
    /// Create a box with its top-left corner at `position`
    pub fn new_box(position: Point, width: f32, height: f32) -> Result<Self, ElementError> {
        position.validate()?;
        let shape = BoxShape::new(width, height)?;
        Ok(Self::with_kind(position, ElementKind::Box(shape)))
    }

    /// Create a link along `path`
    pub fn new_link(
        path: Path,
        line_style: LineStyle,
        arrow_start: bool,
        arrow_end: bool,
    ) -> Result<Self, ElementError> {
        let shape = LinkShape::new(path, line_style, arrow_start, arrow_end)?;
        let position = shape.path.start().unwrap_or_default();
        Ok(Self::with_kind(position, ElementKind::Link(shape)))
    }

    fn with_kind(position: Point, kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            position,
            visible: true,
            style: ElementStyle::default(),
            label: None,
            kind,
        }
    }

    /// Set the paint style (builder style)
    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the label (builder style)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> ElementRef {
        Rc::new(RefCell::new(self))
    }

    /// Element ID
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Current position (top-left corner for boxes, path start for links)
    pub fn position(&self) -> Point {
        self.position
    }

    /// Variant data
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Whether this element is a link
    pub fn is_link(&self) -> bool {
        matches!(self.kind, ElementKind::Link(_))
    }

    /// Width and height, if the element has an extent
    pub fn size(&self) -> Option<(f32, f32)> {
        match &self.kind {
            ElementKind::Box(shape) => Some((shape.width, shape.height)),
            ElementKind::Link(_) => None,
        }
    }

    /// Midpoint of the element's extent, if it has one
    pub fn center(&self) -> Option<Point> {
        self.size()
            .map(|(w, h)| self.position.offset(w / 2.0, h / 2.0))
    }

    /// Top-left and bottom-right corners, if the element has an extent
    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.size()
            .map(|(w, h)| (self.position, self.position.offset(w, h)))
    }

    /// Instantly move the element
    pub fn move_to(&mut self, position: Point) -> Result<(), ElementError> {
        if self.is_link() {
            return Err(ElementError::LinkNotMovable(self.id));
        }
        position.validate()?;
        self.position = position;
        Ok(())
    }

    /// Replace a link's path; the link's position follows the new start point
    pub fn set_link_path(&mut self, path: Path) -> Result<(), ElementError> {
        let ElementKind::Link(shape) = &mut self.kind else {
            return Err(ElementError::NotALink(self.id));
        };
        if !path.is_traversable() {
            return Err(ElementError::LinkPathTooShort(path.len()));
        }
        self.position = path.start().unwrap_or(self.position);
        shape.path = path;
        Ok(())
    }

    /// Resize a box
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ElementError> {
        let ElementKind::Box(shape) = &mut self.kind else {
            return Err(ElementError::NotABox(self.id));
        };
        *shape = BoxShape::new(width, height)?;
        Ok(())
    }
}
