//! Ordered shape collection.
//!
//! Position in the store is z-order: index 0 is drawn first (bottom) and the
//! last entry is on top. Hit testing walks from the top down.

use crate::decorator::StyledShape;
use crate::model::DesignerShape;
use crate::render_node::NodeId;

#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: Vec<StyledShape>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Adds a shape on top and returns its id.
    pub fn push(&mut self, shape: StyledShape) -> NodeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Inserts at `index`, clamped to the end of the store.
    pub fn insert_at(&mut self, index: usize, shape: StyledShape) -> usize {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
        index
    }

    /// Removes a shape, returning its former index and the shape.
    pub fn remove(&mut self, id: NodeId) -> Option<(usize, StyledShape)> {
        let index = self.index_of(id)?;
        Some((index, self.shapes.remove(index)))
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&StyledShape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut StyledShape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&StyledShape> {
        self.shapes.get(index)
    }

    /// Bottom-to-top iteration.
    pub fn iter(&self) -> impl Iterator<Item = &StyledShape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StyledShape> {
        self.shapes.iter_mut()
    }

    /// Ids in z-order, bottom first.
    pub fn ids(&self) -> Vec<NodeId> {
        self.shapes.iter().map(|s| s.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Removes every shape, returning them bottom first.
    pub fn clear(&mut self) -> Vec<StyledShape> {
        std::mem::take(&mut self.shapes)
    }

    /// Moves a shape to `index` (clamped). Returns the index it came from.
    pub fn move_to(&mut self, id: NodeId, index: usize) -> Option<usize> {
        let from = self.index_of(id)?;
        let shape = self.shapes.remove(from);
        let to = index.min(self.shapes.len());
        self.shapes.insert(to, shape);
        Some(from)
    }

    /// Topmost shape whose hit test accepts `(x, y)`.
    pub fn topmost_at(&self, x: f64, y: f64, tolerance: f64) -> Option<NodeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_with_tolerance(x, y, tolerance))
            .map(|s| s.id())
    }
}
