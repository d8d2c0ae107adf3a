//! Transform operations (move, rotate, recolor, resize, mirror, z-order)
//! for designer state.
//!
//! Every operation applies to the current selection and is a single undo
//! step. An empty selection is a no-op.

use sketchkit_core::{CommandError, Rgba};

use super::DesignerState;
use crate::commands::{
    ChangeZOrder, CompositeCommand, MirrorAxis, MirrorShapes, MoveShapes, RecolorShapes,
    ResizeShape, RotateShapes, UndoableCommand, ZPlacement,
};
use crate::decorator::PaintTarget;
use crate::model::ShapeGeometry;
use crate::render_node::NodeId;

impl DesignerState {
    pub fn move_selection(&mut self, dx: f64, dy: f64) -> Result<(), CommandError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(());
        }
        let cmd = MoveShapes::new(&self.store, &ids, dx, dy);
        self.execute(Box::new(cmd))
    }

    /// Sets an absolute rotation in degrees on every selected shape.
    pub fn rotate_selection(&mut self, degrees: f64) -> Result<(), CommandError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(());
        }
        let cmd = RotateShapes::new(&self.store, &ids, degrees);
        self.execute(Box::new(cmd))
    }

    pub fn set_selection_stroke(&mut self, color: Rgba) -> Result<(), CommandError> {
        self.recolor_selection(PaintTarget::Stroke, color)
    }

    pub fn set_selection_fill(&mut self, color: Rgba) -> Result<(), CommandError> {
        self.recolor_selection(PaintTarget::Fill, color)
    }

    fn recolor_selection(&mut self, target: PaintTarget, color: Rgba) -> Result<(), CommandError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(());
        }
        let cmd = RecolorShapes::new(&self.store, &ids, target, color);
        self.execute(Box::new(cmd))
    }

    pub fn mirror_selection(&mut self, axis: MirrorAxis) -> Result<(), CommandError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(());
        }
        self.execute(Box::new(MirrorShapes::new(ids, axis)))
    }

    /// Replaces one shape's geometry.
    pub fn resize_shape(&mut self, id: NodeId, after: ShapeGeometry) -> Result<(), CommandError> {
        let cmd = ResizeShape::from_current(&self.store, id, after)?;
        self.execute(Box::new(cmd))
    }

    /// Scales each selected shape about its own center.
    pub fn scale_selection(&mut self, factor: f64) -> Result<(), CommandError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(());
        }
        let mut steps: Vec<Box<dyn UndoableCommand>> = Vec::with_capacity(ids.len());
        for id in ids {
            steps.push(Box::new(ResizeShape::scaled(&self.store, id, factor)?));
        }
        self.execute(Box::new(CompositeCommand::new("Scale", steps)))
    }

    /// Moves the selection to the top, keeping its relative stacking.
    pub fn bring_to_front(&mut self) -> Result<(), CommandError> {
        let ids = self.selection.ids_in_z_order(&self.store);
        self.restack(ids, ZPlacement::Front, "Bring to Front")
    }

    /// Moves the selection to the bottom, keeping its relative stacking.
    pub fn send_to_back(&mut self) -> Result<(), CommandError> {
        let mut ids = self.selection.ids_in_z_order(&self.store);
        ids.reverse();
        self.restack(ids, ZPlacement::Back, "Send to Back")
    }

    fn restack(
        &mut self,
        ids: Vec<NodeId>,
        placement: ZPlacement,
        name: &str,
    ) -> Result<(), CommandError> {
        if ids.is_empty() {
            return Ok(());
        }
        let steps: Vec<Box<dyn UndoableCommand>> = ids
            .into_iter()
            .map(|id| Box::new(ChangeZOrder::new(id, placement)) as Box<dyn UndoableCommand>)
            .collect();
        self.execute(Box::new(CompositeCommand::new(name, steps)))
    }
}
