// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drawing capability shared by elements and backends.

use crate::element::{BoxShape, Element, ElementKind, LinkShape};

/// Backend drawing primitives.
///
/// Elements call into a painter from [`Drawable::draw`]; the painter decides
/// how a box or link ends up on screen.
pub trait Painter {
    /// Paint a box element
    fn draw_box(&mut self, element: &Element, shape: &BoxShape);

    /// Paint a link element
    fn draw_link(&mut self, element: &Element, shape: &LinkShape);
}

/// Something that can paint itself through a [`Painter`]
pub trait Drawable {
    /// Issue drawing calls for this object
    fn draw(&self, painter: &mut dyn Painter);
}

impl Drawable for Element {
    fn draw(&self, painter: &mut dyn Painter) {
        if !self.visible {
            return;
        }
        match self.kind() {
            ElementKind::Box(shape) => painter.draw_box(self, shape),
            ElementKind::Link(shape) => painter.draw_link(self, shape),
        }
    }
}
