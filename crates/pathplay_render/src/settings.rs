// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer settings, stored as RON.

use crate::flash::Flash;
use pathplay_motion::DEFAULT_FRAME_RATE;
use pathplay_scene::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Redraw rate and flash appearance for a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Settings format version
    pub version: u32,
    /// Maximum redraws per second; zero or less redraws on every update
    pub target_fps: f64,
    /// Full on/off flash cycle in milliseconds
    pub flash_period_ms: f64,
    /// Border color of a lit flashing element
    pub flash_color: Color,
    /// Minimum border width of a lit flashing element
    pub flash_border_width: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let flash = Flash::default();
        Self {
            version: SETTINGS_FORMAT_VERSION,
            target_fps: DEFAULT_FRAME_RATE,
            flash_period_ms: flash.period_ms,
            flash_color: flash.color,
            flash_border_width: flash.border_width,
        }
    }
}

impl RenderSettings {
    /// Set the redraw rate (builder style)
    pub fn with_target_fps(mut self, target_fps: f64) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Set the flash cycle and color (builder style)
    pub fn with_flash(mut self, period_ms: f64, color: Color) -> Self {
        self.flash_period_ms = period_ms;
        self.flash_color = color;
        self
    }

    /// Flash pattern described by these settings
    pub fn flash(&self) -> Flash {
        Flash {
            period_ms: self.flash_period_ms,
            color: self.flash_color,
            border_width: self.flash_border_width,
        }
    }

    /// Parse settings from RON text
    pub fn from_ron(content: &str) -> std::io::Result<Self> {
        let settings: RenderSettings = ron::from_str(content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Settings version {} is newer than supported version {}",
                    settings.version, SETTINGS_FORMAT_VERSION
                ),
            ));
        }

        Ok(settings)
    }

    /// Serialize to pretty-printed RON
    pub fn to_ron(&self) -> std::io::Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        ron::ser::to_string_pretty(self, config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&content)?;
        tracing::debug!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_ron()?)
    }
}
