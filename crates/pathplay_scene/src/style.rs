// SPDX-License-Identifier: MIT OR Apache-2.0
//! Paint styles for elements and links.

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    /// Opaque white
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    /// Fully transparent
    pub const TRANSPARENT: Color = Color([0, 0, 0, 0]);
    /// Highlight red used for flashing borders
    pub const RED: Color = Color([220, 40, 40, 255]);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Create a color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Parse a CSS color such as `#ff8000`, `#f80`, `rgb(255, 128, 0)` or `orange`.
    ///
    /// The color is converted to sRGB and quantized to 8 bits per channel.
    pub fn parse(css: &str) -> Option<Self> {
        let parsed = DynamicColor::from_str(css.trim()).ok()?;
        let rgba = parsed.to_alpha_color::<Srgb>().to_rgba8();
        Some(Self([rgba.r, rgba.g, rgba.b, rgba.a]))
    }

    /// Format as `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Border stroke pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    /// Continuous line
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// No border
    None,
}

/// Stroke pattern for links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    /// Continuous line
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
}

impl LineStyle {
    /// Dash pattern in pixels, empty for solid lines
    pub fn dash_pattern(&self) -> &'static [f32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[6.0, 4.0],
            Self::Dotted => &[1.0, 3.0],
        }
    }
}

/// Text decoration line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextDecoration {
    /// Plain text
    #[default]
    None,
    /// Underlined
    Underline,
    /// Struck through
    LineThrough,
    /// Line above
    Overline,
}

/// Paint style shared by every element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementStyle {
    /// Border color
    pub border_color: Color,
    /// Border width in pixels
    pub border_width: f32,
    /// Border pattern
    pub border_style: BorderStyle,
    /// Fill color
    pub fill_color: Color,
    /// Text color
    pub text_color: Color,
    /// Text size in pixels
    pub text_size: f32,
    /// Font family
    pub font: String,
    /// Text decoration
    pub text_decoration: TextDecoration,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            border_color: Color::BLACK,
            border_width: 1.0,
            border_style: BorderStyle::Solid,
            fill_color: Color::WHITE,
            text_color: Color::BLACK,
            text_size: 14.0,
            font: "sans-serif".to_string(),
            text_decoration: TextDecoration::None,
        }
    }
}

impl ElementStyle {
    /// Set the border color (builder style)
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Set the border width and pattern (builder style)
    pub fn with_border(mut self, width: f32, style: BorderStyle) -> Self {
        self.border_width = width;
        self.border_style = style;
        self
    }

    /// Set the fill color (builder style)
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set text color, size and font (builder style)
    pub fn with_text(mut self, color: Color, size: f32, font: impl Into<String>) -> Self {
        self.text_color = color;
        self.text_size = size;
        self.font = font.into();
        self
    }

    /// Set the text decoration (builder style)
    pub fn with_text_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = decoration;
        self
    }
}
