//! Tool system for the editor.
//!
//! Every canvas click is interpreted by the current tool. Tools that need
//! two clicks (drawing, moving, copying) keep their intermediate state in
//! [`ToolState`] until the interaction completes or the tool changes.

use crate::config::EditorConfig;
use crate::shapes::{Color, Line, Point, Rectangle, Shape, ShapeId};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    /// Recolor the clicked shape (or whole group) with the current color.
    #[default]
    Recolor,
    Line,
    Rectangle,
    Delete,
    Move,
    Copy,
    /// Pick a single leaf, even inside a group, for corner radius editing.
    PickLeaf,
    /// Add the clicked shape to the pending grouping list.
    SelectForGroup,
    Ungroup,
}

impl ToolKind {
    /// Whether this tool creates new shapes.
    pub fn is_drawing(self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Rectangle)
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// First corner of a new shape has been placed.
    Drawing { start: Point, color: Color },
    /// A shape has been picked; further clicks move it.
    Moving { target: ShapeId },
    /// A deep copy is held; further clicks paste it.
    Pasting { source: Box<Shape> },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Color applied to new shapes and by the recolor tool.
    pub current_color: Color,
    /// Corner radius change per radius action.
    pub radius_step: u32,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::Idle,
            current_color: config.default_color,
            radius_step: config.radius_step,
        }
    }

    /// Set the current tool, abandoning any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.current_tool != tool {
            log::debug!("Tool changed: {:?} -> {:?}", self.current_tool, tool);
        }
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Place a corner for the drawing tools.
    ///
    /// The first click records the start corner and the current color; the
    /// second click completes the shape and returns it.
    pub fn place_corner(&mut self, point: Point) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            ToolState::Drawing { start, color } => self.create_shape(start, point, color),
            _ => {
                if self.current_tool.is_drawing() {
                    self.state = ToolState::Drawing {
                        start: point,
                        color: self.current_color,
                    };
                }
                None
            }
        }
    }

    /// Relocate the start corner of a shape that is still being drawn.
    pub fn relocate_pending(&mut self, point: Point) -> bool {
        match &mut self.state {
            ToolState::Drawing { start, .. } => {
                *start = point;
                true
            }
            _ => false,
        }
    }

    /// Start corner of the shape being drawn, if any.
    pub fn pending_start(&self) -> Option<Point> {
        match self.state {
            ToolState::Drawing { start, .. } => Some(start),
            _ => None,
        }
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    fn create_shape(&self, start: Point, end: Point, color: Color) -> Option<Shape> {
        match self.current_tool {
            ToolKind::Line => Some(Shape::Line(Line::new(start, end, color))),
            ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::new(start, end, color))),
            _ => None,
        }
    }
}
