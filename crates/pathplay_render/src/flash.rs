// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time-based blinking border for flashing elements.

use pathplay_scene::{Color, ElementStyle};

/// Blink pattern: lit for the first half of every period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    /// Full on/off cycle in milliseconds
    pub period_ms: f64,
    /// Border color while lit
    pub color: Color,
    /// Minimum border width while lit
    pub border_width: f32,
}

impl Default for Flash {
    fn default() -> Self {
        Self {
            period_ms: 500.0,
            color: Color::RED,
            border_width: 3.0,
        }
    }
}

impl Flash {
    /// Whether the highlight is showing at `now`.
    ///
    /// A non-positive period keeps the highlight on.
    pub fn is_lit(&self, now: f64) -> bool {
        if !(self.period_ms.is_finite() && self.period_ms > 0.0) {
            return true;
        }
        let half = self.period_ms / 2.0;
        (now.max(0.0) / half).floor() as u64 % 2 == 0
    }

    /// The style a flashing element is painted with at `now`
    pub fn apply(&self, style: &ElementStyle, now: f64) -> ElementStyle {
        if !self.is_lit(now) {
            return style.clone();
        }
        let mut lit = style.clone().with_border_color(self.color);
        lit.border_width = lit.border_width.max(self.border_width);
        lit
    }
}
