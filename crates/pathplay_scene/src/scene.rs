// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene container: registered elements, temporary objects and flash marks.

use crate::element::{Element, ElementId, ElementRef};
use crate::error::SceneError;
use crate::geometry::Path;
use crate::style::LineStyle;
use indexmap::{IndexMap, IndexSet};

/// Registry of what a renderer paints each frame.
///
/// Three independent collections:
/// - `elements`: persistent drawables, painted in insertion order
/// - `temporary_objects`: ephemeral drawables painted after the elements
/// - `flashing`: ids of registered elements drawn with a blinking border
///
/// Removing an element does not clear its flash mark.
#[derive(Debug, Default)]
pub struct Scene {
    /// Persistent drawables
    elements: IndexMap<ElementId, ElementRef>,
    /// Ephemeral drawables (highlights, markers)
    temporary_objects: IndexMap<ElementId, ElementRef>,
    /// Flash membership
    flashing: IndexSet<ElementId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element
    pub fn add_element(&mut self, element: ElementRef) -> ElementId {
        let id = element.borrow().id();
        self.elements.insert(id, element);
        id
    }

    /// Unregister an element, keeping the paint order of the rest
    pub fn remove_element(&mut self, element_id: ElementId) -> Option<ElementRef> {
        self.elements.shift_remove(&element_id)
    }

    /// Get a registered element
    pub fn element(&self, element_id: ElementId) -> Option<&ElementRef> {
        self.elements.get(&element_id)
    }

    /// Whether an element is registered
    pub fn contains_element(&self, element_id: ElementId) -> bool {
        self.elements.contains_key(&element_id)
    }

    /// Registered elements in paint order
    pub fn elements(&self) -> impl Iterator<Item = &ElementRef> {
        self.elements.values()
    }

    /// Number of registered elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Add a temporary object
    pub fn add_temporary_object(&mut self, object: ElementRef) -> ElementId {
        let id = object.borrow().id();
        self.temporary_objects.insert(id, object);
        id
    }

    /// Remove a temporary object
    pub fn remove_temporary_object(&mut self, object_id: ElementId) -> Option<ElementRef> {
        self.temporary_objects.shift_remove(&object_id)
    }

    /// Temporary objects in paint order
    pub fn temporary_objects(&self) -> impl Iterator<Item = &ElementRef> {
        self.temporary_objects.values()
    }

    /// Number of temporary objects
    pub fn temporary_object_count(&self) -> usize {
        self.temporary_objects.len()
    }

    /// Mark an element as flashing. Returns false if it already was.
    pub fn add_flashing_element(&mut self, element_id: ElementId) -> bool {
        self.flashing.insert(element_id)
    }

    /// Clear an element's flash mark. Returns false if it was not flashing.
    pub fn remove_flashing_element(&mut self, element_id: ElementId) -> bool {
        self.flashing.shift_remove(&element_id)
    }

    /// Whether an element is marked as flashing
    pub fn is_flashing(&self, element_id: ElementId) -> bool {
        self.flashing.contains(&element_id)
    }

    /// Ids marked as flashing
    pub fn flashing_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.flashing.iter().copied()
    }

    /// Everything paintable: elements first, then temporary objects
    pub fn drawables(&self) -> impl Iterator<Item = &ElementRef> {
        self.elements.values().chain(self.temporary_objects.values())
    }

    /// Build a link running from the center of `from` to the center of `to`.
    ///
    /// The link is returned, not registered.
    pub fn create_link(
        &self,
        from: &Element,
        to: &Element,
        line_style: LineStyle,
        arrow_start: bool,
        arrow_end: bool,
    ) -> Result<Element, SceneError> {
        let start = from.center().ok_or(SceneError::NotBoxLike(from.id()))?;
        let end = to.center().ok_or(SceneError::NotBoxLike(to.id()))?;
        let path = Path::line(start, end).map_err(crate::error::ElementError::from)?;
        let link = Element::new_link(path, line_style, arrow_start, arrow_end)?;

        tracing::debug!("Created link {} from {} to {}", link.id(), from.id(), to.id());
        Ok(link)
    }

    /// Like [`Scene::create_link`] but looks both endpoints up by id
    pub fn create_link_between(
        &self,
        from: ElementId,
        to: ElementId,
        line_style: LineStyle,
        arrow_start: bool,
        arrow_end: bool,
    ) -> Result<Element, SceneError> {
        let from = self.element(from).ok_or(SceneError::ElementNotFound(from))?;
        let to = self.element(to).ok_or(SceneError::ElementNotFound(to))?;
        self.create_link(&from.borrow(), &to.borrow(), line_style, arrow_start, arrow_end)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.elements.clear();
        self.temporary_objects.clear();
        self.flashing.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> ElementRef {
        Element::new_box(Point::new(x, y), w, h).unwrap().into_ref()
    }

    #[test]
    fn test_create_link_between_box_centers() {
        let scene = Scene::new();
        let a = boxed(0.0, 0.0, 50.0, 50.0);
        let b = boxed(100.0, 100.0, 50.0, 50.0);

        let link = scene
            .create_link(&a.borrow(), &b.borrow(), LineStyle::Solid, false, true)
            .unwrap();

        let crate::element::ElementKind::Link(shape) = link.kind() else {
            panic!("expected a link");
        };
        assert_eq!(
            shape.path().points(),
            &[Point::new(25.0, 25.0), Point::new(125.0, 125.0)]
        );
        assert!(!shape.arrow_start());
        assert!(shape.arrow_end());
    }

    #[test]
    fn test_create_link_rejects_links_as_endpoints() {
        let scene = Scene::new();
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let path = Path::line(Point::default(), Point::new(5.0, 5.0)).unwrap();
        let link = Element::new_link(path, LineStyle::Solid, false, false).unwrap();

        let result = scene.create_link(&a.borrow(), &link, LineStyle::Solid, false, false);
        assert_eq!(result.unwrap_err(), SceneError::NotBoxLike(link.id()));
    }

    #[test]
    fn test_create_link_between_ids() {
        let mut scene = Scene::new();
        let a = scene.add_element(boxed(0.0, 0.0, 10.0, 10.0));
        let b = scene.add_element(boxed(20.0, 0.0, 10.0, 10.0));

        let link = scene
            .create_link_between(a, b, LineStyle::Dotted, true, true)
            .unwrap();
        assert_eq!(link.position(), Point::new(5.0, 5.0));

        let missing = ElementId::new();
        assert_eq!(
            scene.create_link_between(a, missing, LineStyle::Solid, false, false).unwrap_err(),
            SceneError::ElementNotFound(missing)
        );
    }

    #[test]
    fn test_add_remove_elements_keeps_order() {
        let mut scene = Scene::new();
        let a = scene.add_element(boxed(0.0, 0.0, 1.0, 1.0));
        let b = scene.add_element(boxed(1.0, 0.0, 1.0, 1.0));
        let c = scene.add_element(boxed(2.0, 0.0, 1.0, 1.0));

        scene.remove_element(b);
        let order: Vec<_> = scene.elements().map(|e| e.borrow().id()).collect();
        assert_eq!(order, vec![a, c]);
        assert!(!scene.contains_element(b));
    }

    #[test]
    fn test_removed_element_stays_usable() {
        let mut scene = Scene::new();
        let element = boxed(0.0, 0.0, 5.0, 5.0);
        let id = scene.add_element(element.clone());

        scene.remove_element(id);
        element.borrow_mut().move_to(Point::new(9.0, 9.0)).unwrap();
        assert_eq!(element.borrow().position(), Point::new(9.0, 9.0));
    }

    #[test]
    fn test_removing_element_keeps_flash_mark() {
        let mut scene = Scene::new();
        let id = scene.add_element(boxed(0.0, 0.0, 5.0, 5.0));

        assert!(scene.add_flashing_element(id));
        assert!(!scene.add_flashing_element(id));
        scene.remove_element(id);

        assert!(scene.is_flashing(id));
        assert!(scene.remove_flashing_element(id));
        assert!(!scene.is_flashing(id));
    }

    #[test]
    fn test_temporary_objects_paint_after_elements() {
        let mut scene = Scene::new();
        let highlight = scene.add_temporary_object(boxed(0.0, 0.0, 5.0, 5.0));
        let element = scene.add_element(boxed(0.0, 0.0, 5.0, 5.0));

        let order: Vec<_> = scene.drawables().map(|e| e.borrow().id()).collect();
        assert_eq!(order, vec![element, highlight]);
        assert_eq!(scene.temporary_object_count(), 1);

        scene.remove_temporary_object(highlight);
        assert_eq!(scene.temporary_object_count(), 0);
        assert_eq!(scene.element_count(), 1);
    }
}
