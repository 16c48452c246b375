//! VectorPad Core Library
//!
//! Document model, editing tools and file formats for the VectorPad
//! drawing editor. Rendering and windowing are left to the host.

pub mod canvas;
pub mod config;
pub mod export;
pub mod render;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument, ClickOutcome, DocumentStats};
pub use config::EditorConfig;
pub use render::{Primitive, Surface};
pub use shapes::{Color, CornerStyle, Group, Line, Point, Rectangle, Shape, ShapeId, ShapeTrait};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use tools::{ToolKind, ToolManager, ToolState};
