// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless backend that records what each frame would paint.

use crate::error::Result;
use crate::flash::Flash;
use crate::renderer::{follow_element, paint_scene, Renderer};
use crate::settings::RenderSettings;
use crate::throttle::FrameThrottle;
use indexmap::{IndexMap, IndexSet};
use pathplay_motion::{AnimationHandle, PlaybackOptions, Timeline};
use pathplay_scene::{
    BoxShape, Element, ElementId, ElementRef, ElementStyle, LineStyle, LinkShape, Painter, Path,
    Point, Scene,
};
use serde::Serialize;

/// One painting call with its resolved style
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// A box
    Box {
        /// Element painted
        id: ElementId,
        /// Top-left corner
        position: Point,
        /// Box width
        width: f32,
        /// Box height
        height: f32,
        /// Effective style, flash included
        style: ElementStyle,
        /// Text inside the box
        label: Option<String>,
    },
    /// A link
    Link {
        /// Element painted
        id: ElementId,
        /// Route of the link
        points: Vec<Point>,
        /// Stroke pattern
        line_style: LineStyle,
        /// Arrowhead at the start
        arrow_start: bool,
        /// Arrowhead at the end
        arrow_end: bool,
        /// Effective style, flash included
        style: ElementStyle,
    },
}

impl DrawCommand {
    /// Element this command paints
    pub fn id(&self) -> ElementId {
        match self {
            Self::Box { id, .. } | Self::Link { id, .. } => *id,
        }
    }

    /// Effective style of the command
    pub fn style(&self) -> &ElementStyle {
        match self {
            Self::Box { style, .. } | Self::Link { style, .. } => style,
        }
    }
}

/// Every command issued during one repaint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedFrame {
    /// Repaint counter, starting at 0
    pub index: u64,
    /// Timestamp passed to [`Renderer::update`]
    pub time: f64,
    /// Commands in paint order
    pub commands: Vec<DrawCommand>,
}

impl RecordedFrame {
    /// The command that painted `id`, if any
    pub fn command_for(&self, id: ElementId) -> Option<&DrawCommand> {
        self.commands.iter().find(|command| command.id() == id)
    }
}

/// Per-element bookkeeping, created on first draw
#[derive(Debug, Clone, Copy)]
struct NodeState {
    first_frame: u64,
    draws: u64,
}

/// A [`Renderer`] that keeps painted frames in memory.
///
/// Useful for tests and for exporting an animation without a display.
pub struct FrameRecorder {
    timeline: Timeline,
    settings: RenderSettings,
    flash: Flash,
    throttle: FrameThrottle,
    now: f64,
    frame_flashing: IndexSet<ElementId>,
    pending: Vec<DrawCommand>,
    frames: Vec<RecordedFrame>,
    nodes: IndexMap<ElementId, NodeState>,
    painted: u64,
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl FrameRecorder {
    /// Create a recorder with its own timeline
    pub fn new(settings: RenderSettings) -> Self {
        Self::with_timeline(settings, Timeline::new())
    }

    /// Create a recorder that drives an existing timeline
    pub fn with_timeline(settings: RenderSettings, timeline: Timeline) -> Self {
        Self {
            timeline,
            flash: settings.flash(),
            throttle: FrameThrottle::new(settings.target_fps),
            settings,
            now: 0.0,
            frame_flashing: IndexSet::new(),
            pending: Vec::new(),
            frames: Vec::new(),
            nodes: IndexMap::new(),
            painted: 0,
        }
    }

    /// Timeline advanced by [`Renderer::update`]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Active settings
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Recorded frames, oldest first
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Most recent frame
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Take the recorded frames, leaving the history empty
    pub fn take_frames(&mut self) -> Vec<RecordedFrame> {
        std::mem::take(&mut self.frames)
    }

    /// Number of repaints so far
    pub fn frames_painted(&self) -> u64 {
        self.painted
    }

    /// Whether `id` has been painted and not removed since
    pub fn is_tracked(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of elements with bookkeeping
    pub fn tracked_count(&self) -> usize {
        self.nodes.len()
    }

    /// How often `id` has been painted
    pub fn draw_count(&self, id: ElementId) -> Option<u64> {
        self.nodes.get(&id).map(|node| node.draws)
    }

    /// Repaint index at which `id` was first painted
    pub fn first_drawn(&self, id: ElementId) -> Option<u64> {
        self.nodes.get(&id).map(|node| node.first_frame)
    }

    /// Remove an element from `scene` together with its bookkeeping and flash mark
    pub fn remove_element(&mut self, scene: &mut Scene, id: ElementId) -> Option<ElementRef> {
        scene.remove_flashing_element(id);
        self.nodes.shift_remove(&id);
        let removed = scene.remove_element(id);
        if removed.is_none() {
            tracing::warn!("Element {} is not in the scene", id);
        }
        removed
    }

    /// Remove a temporary object from `scene` together with its bookkeeping
    pub fn remove_temporary_object(
        &mut self,
        scene: &mut Scene,
        id: ElementId,
    ) -> Option<ElementRef> {
        self.nodes.shift_remove(&id);
        scene.remove_temporary_object(id)
    }

    fn track(&mut self, id: ElementId) {
        let frame = self.painted;
        self.nodes
            .entry(id)
            .or_insert_with(|| {
                tracing::trace!("Tracking element {} from frame {}", id, frame);
                NodeState {
                    first_frame: frame,
                    draws: 0,
                }
            })
            .draws += 1;
    }

    fn frame_style(&self, element: &Element) -> ElementStyle {
        if self.frame_flashing.contains(&element.id()) {
            self.flash.apply(&element.style, self.now)
        } else {
            element.style.clone()
        }
    }
}

impl Painter for FrameRecorder {
    fn draw_box(&mut self, element: &Element, shape: &BoxShape) {
        self.track(element.id());
        let command = DrawCommand::Box {
            id: element.id(),
            position: element.position(),
            width: shape.width(),
            height: shape.height(),
            style: self.frame_style(element),
            label: element.label.clone(),
        };
        self.pending.push(command);
    }

    fn draw_link(&mut self, element: &Element, shape: &LinkShape) {
        self.track(element.id());
        let command = DrawCommand::Link {
            id: element.id(),
            points: shape.path().points().to_vec(),
            line_style: shape.line_style(),
            arrow_start: shape.arrow_start(),
            arrow_end: shape.arrow_end(),
            style: self.frame_style(element),
        };
        self.pending.push(command);
    }
}

impl Renderer for FrameRecorder {
    fn active_draw_style(&self, element: &Element, scene: &Scene) -> ElementStyle {
        if scene.is_flashing(element.id()) {
            self.flash.apply(&element.style, self.now)
        } else {
            element.style.clone()
        }
    }

    fn move_by(
        &mut self,
        element: &ElementRef,
        path: Path,
        options: PlaybackOptions,
    ) -> Result<AnimationHandle> {
        follow_element(&self.timeline, element, path, options)
    }

    fn update(&mut self, scene: &Scene, now: f64) -> bool {
        self.now = now;
        self.timeline.tick(now);

        if !self.throttle.admit(now) {
            return false;
        }

        self.frame_flashing = scene.flashing_elements().collect();
        paint_scene(scene, self);

        let commands = std::mem::take(&mut self.pending);
        tracing::trace!(
            "Frame {} at {} ms: {} draw commands",
            self.painted,
            now,
            commands.len()
        );
        self.frames.push(RecordedFrame {
            index: self.painted,
            time: now,
            commands,
        });
        self.painted += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use pathplay_motion::{Direction, FixedRateClock, FrameClock};
    use pathplay_scene::Color;

    fn boxed(x: f32, y: f32) -> ElementRef {
        Element::new_box(Point::new(x, y), 20.0, 20.0)
            .unwrap()
            .into_ref()
    }

    fn run(recorder: &mut FrameRecorder, scene: &Scene, clock: &mut FixedRateClock, frames: usize) {
        for _ in 0..frames {
            recorder.update(scene, clock.next_frame());
        }
    }

    #[test]
    fn test_update_records_elements_then_temporaries() {
        let mut scene = Scene::new();
        let a = scene.add_element(boxed(0.0, 0.0));
        let ghost = scene.add_temporary_object(boxed(5.0, 5.0));
        let b = scene.add_element(boxed(50.0, 0.0));

        let mut recorder = FrameRecorder::default();
        assert!(recorder.update(&scene, 0.0));

        let frame = recorder.last_frame().unwrap();
        let ids: Vec<ElementId> = frame.commands.iter().map(DrawCommand::id).collect();
        assert_eq!(ids, vec![a, b, ghost]);
        assert_eq!(recorder.tracked_count(), 3);
    }

    #[test]
    fn test_links_record_their_route() {
        let mut scene = Scene::new();
        let from = boxed(0.0, 0.0);
        let to = boxed(100.0, 100.0);
        let link = scene
            .create_link(&from.borrow(), &to.borrow(), LineStyle::Dotted, false, true)
            .unwrap();
        let link_id = scene.add_element(link.into_ref());

        let mut recorder = FrameRecorder::default();
        recorder.update(&scene, 0.0);

        match recorder.last_frame().unwrap().command_for(link_id) {
            Some(DrawCommand::Link {
                points,
                line_style,
                arrow_end,
                ..
            }) => {
                assert_eq!(points, &vec![Point::new(10.0, 10.0), Point::new(110.0, 110.0)]);
                assert_eq!(*line_style, LineStyle::Dotted);
                assert!(*arrow_end);
            }
            other => panic!("expected a link command, got {other:?}"),
        }
    }

    #[test]
    fn test_flashing_border_blinks() {
        let settings = RenderSettings::default().with_flash(200.0, Color::rgb(255, 200, 0));
        let mut recorder = FrameRecorder::new(settings.with_target_fps(0.0));
        let mut scene = Scene::new();
        let element = boxed(0.0, 0.0);
        let id = scene.add_element(element.clone());
        scene.add_flashing_element(id);

        recorder.update(&scene, 0.0);
        let lit = recorder.last_frame().unwrap().command_for(id).unwrap().style().clone();
        assert_eq!(lit.border_color, Color::rgb(255, 200, 0));
        assert_eq!(recorder.active_draw_style(&element.borrow(), &scene), lit);

        recorder.update(&scene, 150.0);
        let dark = recorder.last_frame().unwrap().command_for(id).unwrap().style().clone();
        assert_eq!(dark, element.borrow().style);

        scene.remove_flashing_element(id);
        recorder.update(&scene, 200.0);
        let plain = recorder.last_frame().unwrap().command_for(id).unwrap().style().clone();
        assert_eq!(plain, element.borrow().style);
    }

    #[test]
    fn test_move_by_is_driven_by_update() {
        let mut scene = Scene::new();
        let element = boxed(0.0, 0.0);
        let id = scene.add_element(element.clone());
        let path = Path::new(vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
        ])
        .unwrap();
        let options = PlaybackOptions {
            direction: Direction::Backward,
            duration: 100.0,
            ..PlaybackOptions::default()
        };

        let mut recorder = FrameRecorder::default();
        let handle = recorder.move_by(&element, path, options).unwrap();
        assert_eq!(element.borrow().position(), Point::new(0.0, 0.0));

        let mut clock = FixedRateClock::default();
        run(&mut recorder, &scene, &mut clock, 30);

        assert!(handle.is_finished());
        assert_eq!(element.borrow().position(), Point::new(0.0, 0.0));

        let first = recorder.frames()[0].command_for(id).unwrap();
        match first {
            DrawCommand::Box { position, .. } => assert_eq!(*position, Point::new(30.0, 30.0)),
            other => panic!("expected a box command, got {other:?}"),
        }
    }

    #[test]
    fn test_move_by_rejects_links() {
        let path = Path::line(Point::default(), Point::new(1.0, 1.0)).unwrap();
        let link = Element::new_link(path.clone(), LineStyle::Solid, false, false)
            .unwrap()
            .into_ref();

        let mut recorder = FrameRecorder::default();
        let result = recorder.move_by(&link, path, PlaybackOptions::default());
        assert!(matches!(result, Err(RenderError::LinkNotMovable(_))));
        assert!(recorder.timeline().is_idle());
    }

    #[test]
    fn test_throttle_skips_repaints_but_not_animation() {
        let mut scene = Scene::new();
        let element = boxed(0.0, 0.0);
        scene.add_element(element.clone());

        let mut recorder = FrameRecorder::new(RenderSettings::default().with_target_fps(30.0));
        let path = Path::line(Point::new(0.0, 0.0), Point::new(60.0, 0.0)).unwrap();
        recorder
            .move_by(&element, path, PlaybackOptions::default())
            .unwrap();

        let mut clock = FixedRateClock::default();
        run(&mut recorder, &scene, &mut clock, 4);

        assert_eq!(recorder.frames_painted(), 2);
        assert_eq!(recorder.timeline().frame_count(), 4);
    }

    #[test]
    fn test_remove_element_clears_side_table_and_flash() {
        let mut scene = Scene::new();
        let id = scene.add_element(boxed(0.0, 0.0));
        scene.add_flashing_element(id);

        let mut recorder = FrameRecorder::default();
        recorder.update(&scene, 0.0);
        assert_eq!(recorder.draw_count(id), Some(1));
        assert_eq!(recorder.first_drawn(id), Some(0));

        assert!(recorder.remove_element(&mut scene, id).is_some());
        assert!(!recorder.is_tracked(id));
        assert!(!scene.is_flashing(id));
        assert!(!scene.contains_element(id));
        assert!(recorder.remove_element(&mut scene, id).is_none());
    }

    #[test]
    fn test_hidden_elements_are_not_recorded() {
        let mut scene = Scene::new();
        let element = boxed(0.0, 0.0);
        element.borrow_mut().visible = false;
        let id = scene.add_element(element);

        let mut recorder = FrameRecorder::default();
        recorder.update(&scene, 0.0);
        assert!(recorder.last_frame().unwrap().commands.is_empty());
        assert!(!recorder.is_tracked(id));
    }

    #[test]
    fn test_take_frames() {
        let scene = Scene::new();
        let mut recorder = FrameRecorder::default();
        let mut clock = FixedRateClock::default();
        run(&mut recorder, &scene, &mut clock, 3);

        let frames = recorder.take_frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].index, 2);
        assert!(recorder.frames().is_empty());
        assert_eq!(recorder.frames_painted(), 3);
    }
}
