use std::collections::HashSet;

use crate::geometry::Bounds;
use crate::model::{DesignerShape, Point};
use crate::render_node::NodeId;
use crate::shape_store::ShapeStore;

/// Tracks which shapes are selected.
///
/// `SelectionManager` is responsible for:
/// - Membership of the selection set (a shape is either in it once or not at all)
/// - Keeping each shape's render-node highlight in step with membership
/// - Aggregate geometry of the selection (bounding box, centroid)
///
/// # Selection Model
///
/// Membership has no semantic order, but ids are reported in the order they
/// were added so multi-target commands behave deterministically. Every
/// removal, including [`SelectionManager::clear`], switches the shape's
/// highlight off so the renderer is never left drawing a stale indicator.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    members: HashSet<NodeId>,
    order: Vec<NodeId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape to the selection and highlights it.
    ///
    /// # Returns
    ///
    /// `false` if the shape is not in `store` or is already selected.
    pub fn add(&mut self, store: &mut ShapeStore, id: NodeId) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        let Some(shape) = store.get_mut(id) else {
            return false;
        };
        shape.node_mut().set_highlighted(true);
        self.members.insert(id);
        self.order.push(id);
        true
    }

    /// Removes a shape from the selection and clears its highlight.
    ///
    /// # Returns
    ///
    /// `true` if the shape was selected.
    pub fn remove(&mut self, store: &mut ShapeStore, id: NodeId) -> bool {
        if !self.members.remove(&id) {
            return false;
        }
        self.order.retain(|other| *other != id);
        if let Some(shape) = store.get_mut(id) {
            shape.node_mut().set_highlighted(false);
        }
        true
    }

    /// Flips membership of a shape.
    ///
    /// # Returns
    ///
    /// Whether the shape is selected afterwards.
    pub fn toggle(&mut self, store: &mut ShapeStore, id: NodeId) -> bool {
        if self.contains(id) {
            self.remove(store, id);
            false
        } else {
            self.add(store, id)
        }
    }

    /// Deselects everything, clearing each shape's highlight.
    pub fn clear(&mut self, store: &mut ShapeStore) {
        for id in self.order.drain(..) {
            if let Some(shape) = store.get_mut(id) {
                shape.node_mut().set_highlighted(false);
            }
        }
        self.members.clear();
    }

    /// Selects every shape in the store.
    pub fn select_all(&mut self, store: &mut ShapeStore) {
        for id in store.ids() {
            self.add(store, id);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected ids in the order they were added.
    pub fn ids(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    /// Selected ids in z-order, bottom first.
    pub fn ids_in_z_order(&self, store: &ShapeStore) -> Vec<NodeId> {
        store
            .ids()
            .into_iter()
            .filter(|id| self.members.contains(id))
            .collect()
    }

    /// Drops ids whose shapes are no longer in the store.
    pub fn retain_existing(&mut self, store: &ShapeStore) {
        self.order.retain(|id| store.contains(*id));
        self.members.retain(|id| store.contains(*id));
    }

    /// Union of the selected shapes' bounds.
    ///
    /// # Returns
    ///
    /// `None` when nothing selected is present in `store`.
    pub fn bounding_box(&self, store: &ShapeStore) -> Option<Bounds> {
        self.order
            .iter()
            .filter_map(|id| store.get(*id))
            .map(|s| s.bounds())
            .reduce(|a, b| a.union(&b))
    }

    /// Midpoint of [`SelectionManager::bounding_box`].
    pub fn centroid(&self, store: &ShapeStore) -> Option<Point> {
        self.bounding_box(store).map(|b| b.center())
    }
}
