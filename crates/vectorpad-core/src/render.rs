//! Drawing surface abstraction.
//!
//! The core never rasterizes anything itself. Drawing a document walks the
//! shape tree and hands one [`Primitive`] per leaf to a [`Surface`]
//! supplied by the host application.

use crate::shapes::Color;
use kurbo::{Line, Rect};

/// A single leaf shape, ready to be painted.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// A stroked line segment.
    Line { line: Line, color: Color },
    /// A filled rectangle. `rect` is normalized; `radius` is 0 for square corners.
    Rect { rect: Rect, radius: f64, color: Color },
}

impl Primitive {
    /// Paint color for renderers working with peniko brushes.
    pub fn paint(&self) -> peniko::Color {
        match self {
            Primitive::Line { color, .. } | Primitive::Rect { color, .. } => (*color).into(),
        }
    }
}

/// Receiver of drawing primitives.
///
/// Any `FnMut(Primitive)` closure is a surface.
pub trait Surface {
    fn draw_primitive(&mut self, primitive: Primitive);
}

impl<F: FnMut(Primitive)> Surface for F {
    fn draw_primitive(&mut self, primitive: Primitive) {
        self(primitive)
    }
}
