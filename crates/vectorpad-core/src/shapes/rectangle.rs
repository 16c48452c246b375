//! Rectangle shape.

use super::{Color, Point, ShapeId, ShapeTrait};
use crate::render::{Primitive, Surface};
use kurbo::Rect;
use uuid::Uuid;

/// Corner treatment of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerStyle {
    /// Sharp corners.
    #[default]
    Square,
    /// Rounded corners with the given radius in pixels.
    Rounded { radius: u32 },
}

impl CornerStyle {
    pub fn is_rounded(&self) -> bool {
        matches!(self, CornerStyle::Rounded { .. })
    }

    /// Corner radius (0 for square corners).
    pub fn radius(&self) -> u32 {
        match self {
            CornerStyle::Square => 0,
            CornerStyle::Rounded { radius } => *radius,
        }
    }
}

/// An axis-aligned rectangle spanned by two opposite corners.
///
/// `start` is not required to be the top-left corner; the corners are
/// normalized when the rectangle is drawn or hit-tested.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where drawing started (the anchor used when moving).
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Fill color.
    pub color: Color,
    /// Corner style.
    pub corner: CornerStyle,
}

impl Rectangle {
    /// Create a new square-cornered rectangle.
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
            corner: CornerStyle::Square,
        }
    }

    /// Create a new rounded rectangle.
    pub fn rounded(start: Point, end: Point, color: Color, radius: u32) -> Self {
        Self {
            corner: CornerStyle::Rounded { radius },
            ..Self::new(start, end, color)
        }
    }

    pub fn set_start(&mut self, start: Point) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    pub fn width(&self) -> u32 {
        self.start.x.abs_diff(self.end.x)
    }

    pub fn height(&self) -> u32 {
        self.start.y.abs_diff(self.end.y)
    }

    /// Top-left and bottom-right corners.
    pub fn normalized(&self) -> (Point, Point) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Get the normalized rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        let (min, max) = self.normalized();
        Rect::from_points(min, max)
    }

    /// Grow the corner radius by `step`. Square corners become rounded.
    pub fn increase_radius(&mut self, step: u32) {
        let radius = self.corner.radius().saturating_add(step);
        self.corner = CornerStyle::Rounded { radius };
    }

    /// Shrink the corner radius by `step`. Only rounded rectangles whose
    /// radius is at least `step` change; they stay rounded even at zero.
    pub fn decrease_radius(&mut self, step: u32) -> bool {
        match &mut self.corner {
            CornerStyle::Rounded { radius } if *radius >= step => {
                *radius -= step;
                true
            }
            _ => false,
        }
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn anchor(&self) -> Option<Point> {
        Some(self.start)
    }

    /// Pixel-rect collision: left and top edges are inside, right and
    /// bottom edges are not.
    fn hit_test(&self, point: Point) -> bool {
        let (min, max) = self.normalized();
        min.x <= point.x && point.x < max.x && min.y <= point.y && point.y < max.y
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn move_to(&mut self, anchor: Point) {
        let delta = anchor - self.start;
        self.start = anchor;
        self.end = self.end + delta;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_primitive(Primitive::Rect {
            rect: self.as_rect(),
            radius: f64::from(self.corner.radius()),
            color: self.color,
        });
    }
}
