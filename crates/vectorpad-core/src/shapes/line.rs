//! Line shape.

use super::{Color, Point, ShapeId, ShapeTrait};
use crate::render::{Primitive, Surface};
use kurbo::Line as KurboLine;
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point (the anchor used when moving).
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Stroke color.
    pub color: Color,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
        }
    }

    pub fn set_start(&mut self, start: Point) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn anchor(&self) -> Option<Point> {
        Some(self.start)
    }

    /// Coarse range test: the point must lie inside the box spanned from
    /// `start` to `end`, compared component-wise without normalizing. Lines
    /// drawn from the bottom or the right are therefore never hit.
    fn hit_test(&self, point: Point) -> bool {
        self.start.x <= point.x
            && point.x <= self.end.x
            && self.start.y <= point.y
            && point.y <= self.end.y
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
        surface.draw_primitive(Primitive::Line {
            line: self.as_kurbo(),
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sx: i32, sy: i32, ex: i32, ey: i32) -> Line {
        Line::new(Point::new(sx, sy), Point::new(ex, ey), Color::BLACK)
    }

    #[test]
    fn test_hit_test_inside_range() {
        let line = line(0, 0, 10, 10);
        assert!(line.hit_test(Point::new(5, 5)));
        // Loose test: anything in the spanned box counts.
        assert!(line.hit_test(Point::new(9, 1)));
        assert!(line.hit_test(Point::new(0, 0)));
        assert!(line.hit_test(Point::new(10, 10)));
        assert!(!line.hit_test(Point::new(11, 5)));
    }

    #[test]
    fn test_hit_test_reversed_line_misses() {
        let line = line(10, 10, 0, 0);
        assert!(!line.hit_test(Point::new(5, 5)));
    }

    #[test]
    fn test_move_preserves_extent() {
        let mut line = line(3, 4, 13, 24);
        line.move_to(Point::new(-7, 100));
        assert_eq!(line.start, Point::new(-7, 100));
        assert_eq!(line.end, Point::new(3, 120));
        assert_eq!(line.end.x - line.start.x, 10);
        assert_eq!(line.end.y - line.start.y, 20);
    }

    #[test]
    fn test_move_near_coordinate_limit_saturates() {
        let mut line = line(0, 0, i32::MAX, 0);
        line.move_to(Point::new(10, 0));
        assert_eq!(line.start, Point::new(10, 0));
        assert_eq!(line.end, Point::new(i32::MAX, 0));
    }

    #[test]
    fn test_draw_emits_one_primitive() {
        let line = Line::new(Point::new(1, 2), Point::new(3, 4), Color::RED);
        let mut drawn = Vec::new();
        line.draw(&mut |p: Primitive| drawn.push(p));
        assert_eq!(drawn.len(), 1);
        match &drawn[0] {
            Primitive::Line { line, color } => {
                assert_eq!(*color, Color::RED);
                assert_eq!(line.p0, kurbo::Point::new(1.0, 2.0));
                assert_eq!(line.p1, kurbo::Point::new(3.0, 4.0));
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }
}
