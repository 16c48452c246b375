//! Group shape for combining multiple shapes.

use super::{Color, Point, Shape, ShapeId, ShapeTrait};
use crate::render::Surface;
use uuid::Uuid;

/// A group of shapes that can be manipulated as a single unit.
/// Groups can contain other groups, enabling nested hierarchies.
///
/// The group caches its anchor: the minimum x and minimum y over the start
/// corners of every leaf it contains, at any depth. The cache is rebuilt
/// whenever a child is added or removed and shifted exactly on move.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) id: ShapeId,
    /// Child shapes in this group, back to front.
    children: Vec<Shape>,
    anchor: Option<Point>,
}

impl Group {
    /// Create a new group from a list of shapes.
    pub fn new(children: Vec<Shape>) -> Self {
        let mut group = Self {
            id: Uuid::new_v4(),
            children,
            anchor: None,
        };
        group.refresh_anchor();
        group
    }

    /// Get the children of this group.
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    /// Append a child on top of the group.
    pub fn add_child(&mut self, child: Shape) {
        self.children.push(child);
        self.refresh_anchor();
    }

    /// Remove a direct child by ID.
    pub fn remove_child(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.children.iter().position(|c| c.id() == id)?;
        let child = self.children.remove(index);
        self.refresh_anchor();
        Some(child)
    }

    /// Dissolve this group and return its children.
    pub fn ungroup(self) -> Vec<Shape> {
        self.children
    }

    /// Find a shape by ID within this group (including nested groups).
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        for child in &self.children {
            if child.id() == id {
                return Some(child);
            }
            if let Shape::Group(group) = child {
                if let Some(found) = group.find_shape(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Find a mutable shape by ID within this group (including nested groups).
    /// Callers must not change the geometry of what they find; the anchor
    /// would go stale.
    pub(crate) fn find_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        for child in &mut self.children {
            if child.id() == id {
                return Some(child);
            }
            if let Shape::Group(group) = child {
                if let Some(found) = group.find_shape_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Topmost leaf under `point`, searching nested groups.
    pub fn leaf_at(&self, point: Point) -> Option<ShapeId> {
        self.children.iter().rev().find_map(|child| match child {
            Shape::Group(group) => group.leaf_at(point),
            leaf if leaf.hit_test(point) => Some(leaf.id()),
            _ => None,
        })
    }

    fn refresh_anchor(&mut self) {
        self.anchor = self
            .children
            .iter()
            .filter_map(Shape::anchor)
            .reduce(Point::min);
    }
}

impl ShapeTrait for Group {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    fn hit_test(&self, point: Point) -> bool {
        // Hit if any child is hit
        self.children.iter().rev().any(|child| child.hit_test(point))
    }

    fn set_color(&mut self, color: Color) {
        for child in &mut self.children {
            child.set_color(color);
        }
    }

    fn move_to(&mut self, anchor: Point) {
        let Some(current) = self.anchor else {
            return;
        };
        let delta = anchor - current;
        self.anchor = Some(anchor);

        for child in &mut self.children {
            if let Some(child_anchor) = child.anchor() {
                child.move_to(child_anchor + delta);
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for child in &self.children {
            child.draw(surface);
        }
    }
}
