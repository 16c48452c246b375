//! Canvas document and editor state management.

use crate::config::EditorConfig;
use crate::render::Surface;
use crate::shapes::{Color, Group, Point, Shape, ShapeId};
use crate::storage::{Storage, StorageResult};
use crate::tools::{ToolKind, ToolManager, ToolState};
use std::collections::HashMap;

/// A canvas document: the ordered top-level nodes of the drawing.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All top-level shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front); equals insertion order.
    z_order: Vec<ShapeId>,
}

/// Counts gathered by walking the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub top_level: usize,
    pub lines: usize,
    pub rectangles: usize,
    pub groups: usize,
    /// Deepest group nesting; 0 when there are no groups.
    pub max_depth: usize,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the document.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a top-level shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Clear all shapes from the document.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    /// Get a top-level shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Find a shape anywhere in the tree.
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id).or_else(|| {
            self.shapes_ordered()
                .filter_map(Shape::as_group)
                .find_map(|group| group.find_shape(id))
        })
    }

    fn find_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        if self.shapes.contains_key(&id) {
            return self.shapes.get_mut(&id);
        }
        self.shapes.values_mut().find_map(|shape| match shape {
            Shape::Group(group) => group.find_shape_mut(id),
            _ => None,
        })
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Top-level IDs in z-order (back to front).
    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of top-level shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Resolve the topmost top-level node under `point`.
    ///
    /// A hit on any leaf inside a group resolves to the outermost group.
    pub fn resolve(&self, point: Point) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.hit_test(point)))
    }

    /// Resolve the topmost leaf under `point`, descending into groups.
    pub fn resolve_leaf(&self, point: Point) -> Option<ShapeId> {
        self.z_order.iter().rev().find_map(|id| match self.shapes.get(id)? {
            Shape::Group(group) => group.leaf_at(point),
            leaf if leaf.hit_test(point) => Some(leaf.id()),
            _ => None,
        })
    }

    /// Move a top-level node so that its anchor lands on `to`.
    pub fn move_shape(&mut self, id: ShapeId, to: Point) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.move_to(to);
                true
            }
            None => false,
        }
    }

    /// Recolor a top-level node (every leaf of a group).
    pub fn recolor_shape(&mut self, id: ShapeId, color: Color) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.set_color(color);
                true
            }
            None => false,
        }
    }

    /// Deep copy of a top-level node with fresh IDs. The copy is not inserted.
    pub fn copy_shape(&self, id: ShapeId) -> Option<Shape> {
        let mut copy = self.shapes.get(&id)?.clone();
        copy.regenerate_ids();
        Some(copy)
    }

    /// Place a copy so that its anchor lands on `at` and add it on top.
    /// The pasted nodes receive fresh IDs.
    pub fn paste_shape(&mut self, mut shape: Shape, at: Point) -> ShapeId {
        shape.regenerate_ids();
        shape.move_to(at);
        self.add_shape(shape)
    }

    /// Group the given top-level shapes, in the given order, into a new
    /// group placed on top. IDs that are not top-level shapes and repeated
    /// IDs are skipped. Returns `None` when nothing is left to group.
    pub fn group_shapes(&mut self, shape_ids: &[ShapeId]) -> Option<ShapeId> {
        let mut picked: Vec<ShapeId> = Vec::with_capacity(shape_ids.len());
        for &id in shape_ids {
            if self.shapes.contains_key(&id) && !picked.contains(&id) {
                picked.push(id);
            }
        }

        if picked.is_empty() {
            log::debug!("Group requested with an empty selection");
            return None;
        }

        let children: Vec<Shape> = picked
            .iter()
            .filter_map(|&id| self.remove_shape(id))
            .collect();
        let group_id = self.add_shape(Shape::Group(Group::new(children)));
        log::debug!("Grouped {} shapes into {}", picked.len(), group_id);
        Some(group_id)
    }

    /// Ungroup a top-level group: its direct children are appended on top in
    /// their original order and the group is discarded. Nested groups stay
    /// intact. Returns the IDs of the lifted children, or `None` if the shape
    /// is not a top-level group.
    pub fn ungroup_shape(&mut self, group_id: ShapeId) -> Option<Vec<ShapeId>> {
        if !self.shapes.get(&group_id).is_some_and(Shape::is_group) {
            log::warn!("Ungroup rejected: {} is not a top-level group", group_id);
            return None;
        }
        let Some(Shape::Group(group)) = self.remove_shape(group_id) else {
            return None;
        };

        let children = group.ungroup();
        Some(children.into_iter().map(|child| self.add_shape(child)).collect())
    }

    /// Grow the corner radius of a rectangle anywhere in the tree.
    pub fn increase_radius(&mut self, id: ShapeId, step: u32) -> bool {
        match self.find_shape_mut(id).and_then(Shape::as_rectangle_mut) {
            Some(rect) => {
                rect.increase_radius(step);
                true
            }
            None => false,
        }
    }

    /// Shrink the corner radius of a rounded rectangle anywhere in the tree.
    pub fn decrease_radius(&mut self, id: ShapeId, step: u32) -> bool {
        self.find_shape_mut(id)
            .and_then(Shape::as_rectangle_mut)
            .is_some_and(|rect| rect.decrease_radius(step))
    }

    /// Draw every shape, back to front.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for shape in self.shapes_ordered() {
            shape.draw(surface);
        }
    }

    /// Structural equality of two documents, ignoring IDs.
    pub fn same_content(&self, other: &CanvasDocument) -> bool {
        self.len() == other.len()
            && self
                .shapes_ordered()
                .zip(other.shapes_ordered())
                .all(|(a, b)| a.same_content(b))
    }

    /// Count the nodes of the tree.
    pub fn stats(&self) -> DocumentStats {
        fn visit(shape: &Shape, depth: usize, stats: &mut DocumentStats) {
            match shape {
                Shape::Line(_) => stats.lines += 1,
                Shape::Rectangle(_) => stats.rectangles += 1,
                Shape::Group(group) => {
                    stats.groups += 1;
                    stats.max_depth = stats.max_depth.max(depth + 1);
                    for child in group.children() {
                        visit(child, depth + 1, stats);
                    }
                }
            }
        }

        let mut stats = DocumentStats {
            top_level: self.len(),
            ..DocumentStats::default()
        };
        for shape in self.shapes_ordered() {
            visit(shape, 0, &mut stats);
        }
        stats
    }
}

/// What a canvas click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing was hit or the tool had nothing to do.
    Nothing,
    /// The first corner of a new shape was placed.
    Started,
    Created(ShapeId),
    Recolored(ShapeId),
    Deleted(ShapeId),
    /// A shape was picked as the target of later clicks (move, radius edit).
    Picked(ShapeId),
    Moved(ShapeId),
    Copied(ShapeId),
    Pasted(ShapeId),
    /// A shape was added to the pending grouping list.
    Queued(ShapeId),
    Ungrouped(Vec<ShapeId>),
}

/// Editor state: the document plus everything the tools remember between
/// clicks. Not persisted.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Shapes marked for the next group action, in click order.
    pending_group: Vec<ShapeId>,
    /// Leaf picked for corner radius editing.
    picked_leaf: Option<ShapeId>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Create a new canvas with custom editor settings.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            tool_manager: ToolManager::with_config(config),
            pending_group: Vec::new(),
            picked_leaf: None,
        }
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            ..Self::new()
        }
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    /// Set the color used by new shapes and the recolor tool.
    pub fn set_color(&mut self, color: Color) {
        self.tool_manager.current_color = color;
    }

    /// Shapes waiting to be grouped.
    pub fn pending_group(&self) -> &[ShapeId] {
        &self.pending_group
    }

    /// Leaf picked for corner radius editing.
    pub fn picked_leaf(&self) -> Option<ShapeId> {
        self.picked_leaf
    }

    /// Handle a click on the canvas with the current tool.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        let outcome = match self.tool_manager.current_tool {
            ToolKind::Line | ToolKind::Rectangle => match self.tool_manager.place_corner(point) {
                Some(shape) => ClickOutcome::Created(self.document.add_shape(shape)),
                None => ClickOutcome::Started,
            },
            ToolKind::Recolor => match self.document.resolve(point) {
                Some(id) => {
                    self.document.recolor_shape(id, self.tool_manager.current_color);
                    ClickOutcome::Recolored(id)
                }
                None => ClickOutcome::Nothing,
            },
            ToolKind::Delete => match self.document.resolve(point) {
                Some(id) => {
                    self.document.remove_shape(id);
                    self.pending_group.retain(|&pending| pending != id);
                    ClickOutcome::Deleted(id)
                }
                None => ClickOutcome::Nothing,
            },
            ToolKind::Move => self.click_move(point),
            ToolKind::Copy => self.click_copy(point),
            ToolKind::PickLeaf => match self.document.resolve_leaf(point) {
                Some(id) => {
                    self.picked_leaf = Some(id);
                    ClickOutcome::Picked(id)
                }
                None => ClickOutcome::Nothing,
            },
            ToolKind::SelectForGroup => match self.document.resolve(point) {
                Some(id) => {
                    if !self.pending_group.contains(&id) {
                        self.pending_group.push(id);
                    }
                    ClickOutcome::Queued(id)
                }
                None => ClickOutcome::Nothing,
            },
            ToolKind::Ungroup => self
                .document
                .resolve(point)
                .and_then(|id| self.document.ungroup_shape(id))
                .map_or(ClickOutcome::Nothing, ClickOutcome::Ungrouped),
        };
        log::debug!(
            "Click at ({}, {}) with {:?}: {:?}",
            point.x,
            point.y,
            self.tool_manager.current_tool,
            outcome
        );
        outcome
    }

    fn click_move(&mut self, point: Point) -> ClickOutcome {
        if let ToolState::Moving { target } = self.tool_manager.state {
            if self.document.move_shape(target, point) {
                return ClickOutcome::Moved(target);
            }
            self.tool_manager.cancel();
        }
        match self.document.resolve(point) {
            Some(target) => {
                self.tool_manager.state = ToolState::Moving { target };
                ClickOutcome::Picked(target)
            }
            None => ClickOutcome::Nothing,
        }
    }

    fn click_copy(&mut self, point: Point) -> ClickOutcome {
        if let ToolState::Pasting { source } = &self.tool_manager.state {
            let copy = (**source).clone();
            return ClickOutcome::Pasted(self.document.paste_shape(copy, point));
        }
        let Some(id) = self.document.resolve(point) else {
            return ClickOutcome::Nothing;
        };
        match self.document.copy_shape(id) {
            Some(copy) => {
                self.tool_manager.state = ToolState::Pasting {
                    source: Box::new(copy),
                };
                ClickOutcome::Copied(id)
            }
            None => ClickOutcome::Nothing,
        }
    }

    /// Group every pending shape and clear the pending list.
    pub fn group_pending(&mut self) -> Option<ShapeId> {
        let pending = std::mem::take(&mut self.pending_group);
        self.document.group_shapes(&pending)
    }

    /// Grow the corner radius of the picked leaf.
    pub fn increase_radius(&mut self) -> bool {
        let step = self.tool_manager.radius_step;
        self.picked_leaf
            .is_some_and(|id| self.document.increase_radius(id, step))
    }

    /// Shrink the corner radius of the picked leaf.
    pub fn decrease_radius(&mut self) -> bool {
        let step = self.tool_manager.radius_step;
        self.picked_leaf
            .is_some_and(|id| self.document.decrease_radius(id, step))
    }

    /// Draw the document.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.document.draw(surface);
    }

    /// Save the document under `key`.
    pub fn save_to<S: Storage + ?Sized>(&self, storage: &S, key: &str) -> StorageResult<()> {
        storage.save(key, &self.document)
    }

    /// Replace the document with the one stored under `key`.
    ///
    /// The current document is kept untouched when loading fails.
    pub fn load_from<S: Storage + ?Sized>(&mut self, storage: &S, key: &str) -> StorageResult<()> {
        let document = storage.load(key).inspect_err(|e| {
            log::warn!("Keeping current document, failed to load {}: {}", key, e);
        })?;
        self.document = document;
        self.tool_manager.cancel();
        self.pending_group.clear();
        self.picked_leaf = None;
        Ok(())
    }
}
