//! Shape definitions for the drawing canvas.

mod group;
mod line;
mod rectangle;

pub use group::Group;
pub use line::Line;
pub use rectangle::{CornerStyle, Rectangle};

use crate::render::Surface;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use uuid::Uuid;

/// A position on the canvas in whole pixels.
///
/// Point arithmetic saturates at the `i32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum of two points.
    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum of two points.
    pub fn max(self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl From<Point> for kurbo::Point {
    fn from(point: Point) -> Self {
        kurbo::Point::new(f64::from(point.x), f64::from(point.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

/// Unique identifier for shapes. Identifiers live only as long as the
/// in-memory document; they are not written to disk.
pub type ShapeId = Uuid;

/// Common trait for every node of the drawing tree.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Reference point used when the node is moved: the start corner of a
    /// leaf, the cached top-left of a group. Empty groups have none.
    fn anchor(&self) -> Option<Point>;

    /// Check if a canvas point hits this node.
    fn hit_test(&self, point: Point) -> bool;

    /// Recolor the node (recursively for groups).
    fn set_color(&mut self, color: Color);

    /// Translate the node so that its anchor lands on `anchor`.
    fn move_to(&mut self, anchor: Point);

    /// Emit one drawing primitive per leaf.
    fn draw(&self, surface: &mut dyn Surface);
}

/// A node of the drawing tree.
#[derive(Debug, Clone)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Group(Group),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Group(s) => s.id(),
        }
    }

    pub fn anchor(&self) -> Option<Point> {
        match self {
            Shape::Line(s) => s.anchor(),
            Shape::Rectangle(s) => s.anchor(),
            Shape::Group(s) => s.anchor(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Line(s) => s.hit_test(point),
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Group(s) => s.hit_test(point),
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Shape::Line(s) => s.set_color(color),
            Shape::Rectangle(s) => s.set_color(color),
            Shape::Group(s) => s.set_color(color),
        }
    }

    pub fn move_to(&mut self, anchor: Point) {
        match self {
            Shape::Line(s) => s.move_to(anchor),
            Shape::Rectangle(s) => s.move_to(anchor),
            Shape::Group(s) => s.move_to(anchor),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Shape::Line(s) => s.draw(surface),
            Shape::Rectangle(s) => s.draw(surface),
            Shape::Group(s) => s.draw(surface),
        }
    }

    /// Check if this shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    /// Get the group if this shape is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Get the rectangle if this shape is a rectangle.
    pub fn as_rectangle_mut(&mut self) -> Option<&mut Rectangle> {
        match self {
            Shape::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    /// Give this node, and every node below it, a fresh identifier.
    /// Used when a deep copy is about to be pasted next to its source.
    pub fn regenerate_ids(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Line(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Group(s) => {
                s.id = new_id;
                for child in s.children_mut() {
                    child.regenerate_ids();
                }
            }
        }
    }

    /// Structural equality: same variant, geometry, color, corner style and
    /// nesting. Identifiers are ignored.
    pub fn same_content(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Line(a), Shape::Line(b)) => {
                a.start == b.start && a.end == b.end && a.color == b.color
            }
            (Shape::Rectangle(a), Shape::Rectangle(b)) => {
                a.start == b.start && a.end == b.end && a.color == b.color && a.corner == b.corner
            }
            (Shape::Group(a), Shape::Group(b)) => {
                a.anchor() == b.anchor()
                    && a.children().len() == b.children().len()
                    && a.children()
                        .iter()
                        .zip(b.children())
                        .all(|(x, y)| x.same_content(y))
            }
            _ => false,
        }
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Group> for Shape {
    fn from(group: Group) -> Self {
        Shape::Group(group)
    }
}
