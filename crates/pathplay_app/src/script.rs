// SPDX-License-Identifier: MIT OR Apache-2.0
//! Demo scripts: a scene plus the motions to play on it, stored as RON.

use indexmap::IndexMap;
use pathplay_motion::{Direction, PlaybackOptions};
use pathplay_render::RenderSettings;
use pathplay_scene::{
    Color, Element, ElementError, ElementRef, ElementStyle, LineStyle, Path, Point, Scene,
    SceneError,
};
use serde::{Deserialize, Serialize};

/// Current script format version
pub const SCRIPT_FORMAT_VERSION: u32 = 1;

/// Errors reading or building a script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text is not a valid script
    #[error("Invalid script: {0}")]
    Parse(String),

    /// Script was written by a newer version
    #[error("Script version {0} is newer than this build supports")]
    UnsupportedVersion(u32),

    /// Two boxes share a name
    #[error("Duplicate box name: {0}")]
    DuplicateName(String),

    /// A link or motion names a box that does not exist
    #[error("Unknown box: {0}")]
    UnknownBox(String),

    /// A fill color is not a valid CSS color
    #[error("Invalid color for {name}: {value}")]
    InvalidColor {
        /// Box name
        name: String,
        /// Offending value
        value: String,
    },

    /// A box or path was rejected
    #[error("Element error: {0}")]
    Element(#[from] ElementError),

    /// A link could not be built
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// A box placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Name used by links and motions
    pub name: String,
    /// Top-left x
    pub x: f32,
    /// Top-left y
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Text inside the box
    #[serde(default)]
    pub label: Option<String>,
    /// Fill color as hex
    #[serde(default)]
    pub fill: Option<String>,
    /// Add as a temporary object, painted after regular elements
    #[serde(default)]
    pub temporary: bool,
    /// Start with a flashing border
    #[serde(default)]
    pub flashing: bool,
}

/// A link between the centers of two boxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    /// Start box
    pub from: String,
    /// End box
    pub to: String,
    /// Stroke pattern
    #[serde(default)]
    pub line_style: LineStyle,
    /// Arrowhead at the start
    #[serde(default)]
    pub arrow_start: bool,
    /// Arrowhead at the end
    #[serde(default = "default_true")]
    pub arrow_end: bool,
}

fn default_true() -> bool {
    true
}

/// A box following a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSpec {
    /// Box to move
    pub target: String,
    /// Waypoints of the box's top-left corner
    pub path: Vec<Point>,
    /// Direction, duration, looping and yoyo
    #[serde(default)]
    pub options: PlaybackOptions,
}

/// A complete demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoScript {
    /// Script format version
    pub version: u32,
    /// Display name
    pub name: String,
    /// Renderer settings
    pub settings: RenderSettings,
    /// Host frame rate used to generate timestamps
    pub frame_rate: f64,
    /// Upper bound on frames; looping motions run until it is reached
    pub max_frames: usize,
    /// Boxes in paint order
    pub boxes: Vec<BoxSpec>,
    /// Links, painted after the boxes
    pub links: Vec<LinkSpec>,
    /// Motions, started together before the first frame
    pub motions: Vec<MotionSpec>,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self {
            version: SCRIPT_FORMAT_VERSION,
            name: "Untitled".to_string(),
            settings: RenderSettings::default(),
            frame_rate: pathplay_motion::DEFAULT_FRAME_RATE,
            max_frames: 600,
            boxes: Vec::new(),
            links: Vec::new(),
            motions: Vec::new(),
        }
    }
}

/// A script's scene with its boxes addressable by name
pub struct BuiltScene {
    /// The scene
    pub scene: Scene,
    /// Boxes by script name
    pub boxes: IndexMap<String, ElementRef>,
}

impl DemoScript {
    /// The demo played when no script is given: two boxes trading places
    pub fn builtin() -> Self {
        let cell = |name: &str, x: f32, fill: &str| BoxSpec {
            name: name.to_string(),
            x,
            y: 100.0,
            width: 60.0,
            height: 60.0,
            label: Some(name.to_uppercase()),
            fill: Some(fill.to_string()),
            temporary: false,
            flashing: false,
        };

        let mut pivot = cell("pivot", 400.0, "#ffe08a");
        pivot.y = 260.0;
        pivot.flashing = true;

        Self {
            name: "Swap".to_string(),
            max_frames: 240,
            boxes: vec![cell("left", 100.0, "#8ecae6"), cell("right", 250.0, "#f4a261"), pivot],
            links: vec![LinkSpec {
                from: "left".to_string(),
                to: "right".to_string(),
                line_style: LineStyle::Dashed,
                arrow_start: false,
                arrow_end: true,
            }],
            motions: vec![
                MotionSpec {
                    target: "left".to_string(),
                    path: vec![
                        Point::new(100.0, 100.0),
                        Point::new(100.0, 20.0),
                        Point::new(250.0, 20.0),
                        Point::new(250.0, 100.0),
                    ],
                    options: PlaybackOptions {
                        duration: 900.0,
                        ..PlaybackOptions::default()
                    },
                },
                MotionSpec {
                    target: "right".to_string(),
                    path: vec![
                        Point::new(100.0, 100.0),
                        Point::new(100.0, 180.0),
                        Point::new(250.0, 180.0),
                        Point::new(250.0, 100.0),
                    ],
                    options: PlaybackOptions {
                        direction: Direction::Backward,
                        duration: 900.0,
                        ..PlaybackOptions::default()
                    },
                },
                MotionSpec {
                    target: "pivot".to_string(),
                    path: vec![Point::new(400.0, 260.0), Point::new(520.0, 260.0)],
                    options: PlaybackOptions {
                        duration: 500.0,
                        looping: true,
                        yoyo: true,
                        ..PlaybackOptions::default()
                    },
                },
            ],
            ..Self::default()
        }
    }

    /// Parse a script from RON text
    pub fn from_ron(content: &str) -> Result<Self, ScriptError> {
        let script: DemoScript =
            ron::from_str(content).map_err(|e| ScriptError::Parse(e.to_string()))?;
        if script.version > SCRIPT_FORMAT_VERSION {
            return Err(ScriptError::UnsupportedVersion(script.version));
        }
        Ok(script)
    }

    /// Serialize to pretty-printed RON
    pub fn to_ron(&self) -> Result<String, ScriptError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    /// Load a script from a file
    pub fn load(path: &std::path::Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_ron(&content)?;
        tracing::info!("Loaded script '{}' from {}", script.name, path.display());
        Ok(script)
    }

    /// Save the script to a file
    pub fn save(&self, path: &std::path::Path) -> Result<(), ScriptError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Create the scene described by the script.
    ///
    /// Boxes are added first, in order, then links between box centers.
    pub fn build_scene(&self) -> Result<BuiltScene, ScriptError> {
        let mut scene = Scene::new();
        let mut boxes = IndexMap::new();

        for spec in &self.boxes {
            if boxes.contains_key(&spec.name) {
                return Err(ScriptError::DuplicateName(spec.name.clone()));
            }
            let element = spec.to_element()?.into_ref();
            let id = if spec.temporary {
                scene.add_temporary_object(element.clone())
            } else {
                scene.add_element(element.clone())
            };
            if spec.flashing {
                scene.add_flashing_element(id);
            }
            boxes.insert(spec.name.clone(), element);
        }

        for link in &self.links {
            let from = lookup(&boxes, &link.from)?;
            let to = lookup(&boxes, &link.to)?;
            let element = scene.create_link(
                &from.borrow(),
                &to.borrow(),
                link.line_style,
                link.arrow_start,
                link.arrow_end,
            )?;
            scene.add_element(element.into_ref());
        }

        tracing::debug!(
            "Built scene '{}': {} elements, {} temporary objects",
            self.name,
            scene.element_count(),
            scene.temporary_object_count()
        );
        Ok(BuiltScene { scene, boxes })
    }

    /// Resolve a motion's target and path against a built scene
    pub fn motion_target(
        &self,
        built: &BuiltScene,
        motion: &MotionSpec,
    ) -> Result<(ElementRef, Path), ScriptError> {
        let target = lookup(&built.boxes, &motion.target)?.clone();
        let path = Path::new(motion.path.clone()).map_err(ElementError::from)?;
        Ok((target, path))
    }
}

impl BoxSpec {
    fn to_element(&self) -> Result<Element, ScriptError> {
        let mut style = ElementStyle::default();
        if let Some(fill) = &self.fill {
            let color = Color::parse(fill).ok_or_else(|| ScriptError::InvalidColor {
                name: self.name.clone(),
                value: fill.clone(),
            })?;
            style = style.with_fill_color(color);
        }

        let mut element =
            Element::new_box(Point::new(self.x, self.y), self.width, self.height)?.with_style(style);
        element.label = self.label.clone();
        Ok(element)
    }
}

fn lookup<'a>(
    boxes: &'a IndexMap<String, ElementRef>,
    name: &str,
) -> Result<&'a ElementRef, ScriptError> {
    boxes
        .get(name)
        .ok_or_else(|| ScriptError::UnknownBox(name.to_string()))
}
