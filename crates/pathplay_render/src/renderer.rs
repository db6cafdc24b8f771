// SPDX-License-Identifier: MIT OR Apache-2.0
//! The contract every drawing backend fulfils.

use crate::error::{RenderError, Result};
use pathplay_motion::{AnimationHandle, FollowPath, PlaybackOptions, Timeline};
use pathplay_scene::{Drawable, Element, ElementRef, ElementStyle, Painter, Path, Scene};
use std::cell::RefCell;
use std::rc::Rc;

/// A drawing backend.
///
/// Backends paint boxes and links through [`Painter`] and add three
/// operations on top. None of them has a default body, so a backend missing
/// one is rejected at compile time.
pub trait Renderer: Painter {
    /// Style `element` is painted with right now, including any flash highlight
    fn active_draw_style(&self, element: &Element, scene: &Scene) -> ElementStyle;

    /// Animate `element` along `path`, redrawn by this renderer's update cycle.
    ///
    /// Fails with [`RenderError::LinkNotMovable`] for links and passes
    /// playback errors through unchanged.
    fn move_by(
        &mut self,
        element: &ElementRef,
        path: Path,
        options: PlaybackOptions,
    ) -> Result<AnimationHandle>;

    /// Advance animations to `now` and repaint when the frame rate allows.
    ///
    /// Returns whether a repaint happened.
    fn update(&mut self, scene: &Scene, now: f64) -> bool;
}

/// Paint every scene element, then every temporary object, in insertion order
pub fn paint_scene(scene: &Scene, painter: &mut dyn Painter) {
    for drawable in scene.drawables() {
        drawable.borrow().draw(painter);
    }
}

/// Start playback on `timeline` that moves `element` to each reported position.
///
/// The animation holds a weak handle: once every owner drops the element,
/// the animation cancels itself on its next update, looping or not.
pub fn follow_element(
    timeline: &Timeline,
    element: &ElementRef,
    path: Path,
    options: PlaybackOptions,
) -> Result<AnimationHandle> {
    let element_id = {
        let element = element.borrow();
        if element.is_link() {
            return Err(RenderError::LinkNotMovable(element.id()));
        }
        element.id()
    };

    let target = Rc::downgrade(element);
    let slot: Rc<RefCell<Option<AnimationHandle>>> = Rc::default();
    let own_handle = Rc::clone(&slot);
    let handle = FollowPath::new(path)
        .options(options)
        .on_update(move |update| {
            let Some(element) = target.upgrade() else {
                if let Some(handle) = own_handle.borrow().as_ref() {
                    tracing::debug!("Element {} dropped, cancelling animation {}", element_id, handle.id());
                    handle.cancel();
                }
                return;
            };
            let Ok(mut element) = element.try_borrow_mut() else {
                tracing::warn!("Element {} is busy, skipping position update", element_id);
                return;
            };
            if let Err(e) = element.move_to(update.position) {
                tracing::warn!("Ignoring position update for {}: {}", element_id, e);
            }
        })
        .start(timeline)?;
    *slot.borrow_mut() = Some(handle.clone());

    tracing::debug!(
        "Element {} following path as animation {} ({} ms, {})",
        element_id,
        handle.id(),
        options.duration,
        options.direction.name()
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathplay_motion::{FixedRateClock, MotionError};
    use pathplay_scene::{BoxShape, LineStyle, LinkShape, Point};

    #[derive(Default)]
    struct OrderPainter {
        labels: Vec<String>,
    }

    impl Painter for OrderPainter {
        fn draw_box(&mut self, element: &Element, _shape: &BoxShape) {
            self.labels.push(element.label.clone().unwrap_or_default());
        }

        fn draw_link(&mut self, _element: &Element, _shape: &LinkShape) {
            self.labels.push("link".to_string());
        }
    }

    fn labelled_box(label: &str) -> ElementRef {
        Element::new_box(Point::default(), 10.0, 10.0)
            .unwrap()
            .with_label(label)
            .into_ref()
    }

    #[test]
    fn test_paint_order_elements_then_temporaries() {
        let mut scene = Scene::new();
        scene.add_temporary_object(labelled_box("ghost"));
        scene.add_element(labelled_box("a"));
        scene.add_element(labelled_box("b"));

        let mut painter = OrderPainter::default();
        paint_scene(&scene, &mut painter);
        assert_eq!(painter.labels, vec!["a", "b", "ghost"]);
    }

    #[test]
    fn test_follow_element_moves_box_to_path_end() {
        let timeline = Timeline::new();
        let element = labelled_box("mover");
        let path = Path::new(vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 40.0),
        ])
        .unwrap();
        let options = PlaybackOptions {
            duration: 200.0,
            ..PlaybackOptions::default()
        };

        let handle = follow_element(&timeline, &element, path, options).unwrap();
        timeline.run_until_idle(&mut FixedRateClock::default(), 1000);

        assert!(handle.is_finished());
        assert_eq!(element.borrow().position(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_follow_element_rejects_links() {
        let timeline = Timeline::new();
        let path = Path::line(Point::default(), Point::new(5.0, 5.0)).unwrap();
        let link = Element::new_link(path.clone(), LineStyle::Solid, false, true)
            .unwrap()
            .into_ref();
        let link_id = link.borrow().id();

        let result = follow_element(&timeline, &link, path, PlaybackOptions::default());
        assert_eq!(result.unwrap_err(), RenderError::LinkNotMovable(link_id));
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_follow_element_propagates_playback_errors() {
        let timeline = Timeline::new();
        let path = Path::new(vec![Point::new(1.0, 1.0)]).unwrap();

        let result = follow_element(&timeline, &labelled_box("x"), path, PlaybackOptions::default());
        assert_eq!(
            result.unwrap_err(),
            RenderError::Motion(MotionError::PathTooShort(1))
        );
    }

    #[test]
    fn test_dropped_element_stops_receiving_updates() {
        let timeline = Timeline::new();
        let element = labelled_box("temp");
        let path = Path::line(Point::default(), Point::new(100.0, 0.0)).unwrap();

        let handle = follow_element(&timeline, &element, path, PlaybackOptions::default()).unwrap();
        timeline.tick(0.0);
        drop(element);
        timeline.run_until_idle(&mut FixedRateClock::default().starting_at(16.0), 1000);

        assert!(handle.is_cancelled());
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_dropped_element_cancels_looping_motion() {
        let timeline = Timeline::new();
        let element = labelled_box("temp");
        let path = Path::line(Point::default(), Point::new(100.0, 0.0)).unwrap();
        let options = PlaybackOptions {
            duration: 100.0,
            looping: true,
            ..PlaybackOptions::default()
        };

        let handle = follow_element(&timeline, &element, path, options).unwrap();
        timeline.tick(0.0);
        timeline.tick(16.0);
        assert!(!timeline.is_idle());

        drop(element);
        timeline.tick(32.0);

        assert!(handle.is_cancelled());
        assert!(timeline.is_idle());
    }
}
