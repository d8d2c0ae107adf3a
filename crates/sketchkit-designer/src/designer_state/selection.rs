//! Selection operations for designer state.

use tracing::debug;

use super::DesignerState;
use crate::geometry::Bounds;
use crate::model::Point;
use crate::render_node::NodeId;

impl DesignerState {
    /// Hit-tests the topmost shape at a canvas point.
    ///
    /// Without `multi` the hit replaces the selection and a miss clears it.
    /// With `multi` the hit is toggled and a miss changes nothing.
    pub fn select_at(&mut self, x: f64, y: f64, multi: bool) -> Option<NodeId> {
        let hit = self.store.topmost_at(x, y, self.options.hit_tolerance);
        match (hit, multi) {
            (Some(id), true) => {
                self.selection.toggle(&mut self.store, id);
            }
            (Some(id), false) => {
                self.selection.clear(&mut self.store);
                self.selection.add(&mut self.store, id);
            }
            (None, false) => self.selection.clear(&mut self.store),
            (None, true) => {}
        }
        debug!("Selection at ({}, {}): {} shape(s)", x, y, self.selection.len());
        hit
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&mut self.store);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.store);
    }

    /// Selected ids in z-order, back to front.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.selection.ids_in_z_order(&self.store)
    }

    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.selection.bounding_box(&self.store)
    }

    pub fn selection_centroid(&self) -> Option<Point> {
        self.selection.centroid(&self.store)
    }
}
