//! Shape creation, deletion and clipboard operations for designer state.

use sketchkit_core::{CommandError, Rgba};
use tracing::{debug, warn};

use super::DesignerState;
use crate::commands::{AddShape, CopyShapes, CutShapes, DeleteShapes, DuplicateShapes, PasteShapes};
use crate::decorator::StyledShape;
use crate::model::{DesignPolygon, DesignerShape, DrawingTool, Shape};
use crate::render_node::NodeId;

impl DesignerState {
    /// Switches the active tool, abandoning any unfinished creation.
    pub fn set_tool(&mut self, tool: DrawingTool) {
        if self.tool != tool {
            self.creating = None;
            self.cancel_polygon();
            debug!("Tool changed to {:?}", tool);
        }
        self.tool = tool;
    }

    pub fn tool(&self) -> DrawingTool {
        self.tool
    }

    /// Shape currently being sized by a drag, for preview rendering.
    pub fn pending_shape(&self) -> Option<&StyledShape> {
        self.creating.as_ref()
    }

    pub fn polygon_in_progress(&self) -> Option<&DesignPolygon> {
        self.polygon.as_ref()
    }

    /// Pointer-down on the canvas.
    ///
    /// Drag tools start a new shape, the text tool places the default label,
    /// the polygon tool adds a vertex and the select tool hit-tests.
    pub fn press(&mut self, x: f64, y: f64) -> Result<Option<NodeId>, CommandError> {
        let point = self.snap(x, y);
        match self.tool {
            DrawingTool::Select => Ok(self.select_at(x, y, false)),
            DrawingTool::Text => {
                let text = self.factory.default_text.clone();
                self.place_text(point.x, point.y, text)
            }
            DrawingTool::Polygon => self.polygon_click(point.x, point.y),
            tool => {
                if let Some(shape) = self.factory.create(tool, point.x, point.y) {
                    self.creating = Some(self.styled(shape));
                }
                Ok(None)
            }
        }
    }

    /// Pointer-move with the button held.
    pub fn drag(&mut self, x: f64, y: f64) {
        let point = self.snap(x, y);
        if let Some(shape) = self.creating.as_mut() {
            shape.on_drag(point.x, point.y);
        }
    }

    /// Pointer-up. Commits the dragged shape unless it has no extent.
    pub fn release(&mut self) -> Result<Option<NodeId>, CommandError> {
        let Some(mut shape) = self.creating.take() else {
            return Ok(None);
        };
        shape.on_release();
        if shape.base().is_degenerate() {
            debug!("Discarding zero-size {}", shape.shape_type());
            return Ok(None);
        }
        self.add_shape(shape).map(Some)
    }

    /// Places a text label with its top-left at `(x, y)`. Empty text is ignored.
    pub fn place_text(
        &mut self,
        x: f64,
        y: f64,
        text: impl Into<String>,
    ) -> Result<Option<NodeId>, CommandError> {
        let text = text.into();
        if text.is_empty() {
            return Ok(None);
        }
        let label = self.factory.text(x, y, text);
        let fill = label.color().unwrap_or(Rgba::BLACK);
        let shape = StyledShape::decorate(Shape::Text(label), self.options.default_stroke, fill);
        self.add_shape(shape).map(Some)
    }

    /// Adds a vertex to the polygon under construction, starting one if
    /// needed. A click near the first vertex closes the polygon once it
    /// has enough vertices.
    pub fn polygon_click(&mut self, x: f64, y: f64) -> Result<Option<NodeId>, CommandError> {
        let tolerance = self.options.polygon_close_tolerance;
        let closes = self
            .polygon
            .as_ref()
            .is_some_and(|p| p.can_close() && p.is_near_start(x, y, tolerance));
        if closes {
            return self.finish_polygon();
        }
        match self.polygon.as_mut() {
            Some(poly) => {
                poly.add_point(x, y);
                Ok(None)
            }
            None => {
                let mut poly = DesignPolygon::new();
                poly.add_point(x, y);
                self.polygon = Some(poly);
                Ok(None)
            }
        }
    }

    /// Closes and commits the polygon under construction.
    pub fn finish_polygon(&mut self) -> Result<Option<NodeId>, CommandError> {
        let Some(mut poly) = self.polygon.take() else {
            return Ok(None);
        };
        if !poly.close() {
            debug!("Discarding polygon with {} vertices", poly.vertex_count());
            return Ok(None);
        }
        let shape = self.styled(Shape::Polygon(poly));
        self.add_shape(shape).map(Some)
    }

    /// Abandons the polygon under construction. Nothing was registered.
    pub fn cancel_polygon(&mut self) {
        if let Some(poly) = self.polygon.take() {
            debug!("Cancelled polygon with {} vertices", poly.vertex_count());
        }
    }

    /// Copies the selection to the clipboard. Returns the number copied.
    pub fn copy_selection(&mut self) -> Result<usize, CommandError> {
        let ids = self.selection.ids_in_z_order(&self.store);
        if ids.is_empty() {
            return Ok(0);
        }
        let mut cmd = CopyShapes::new(ids);
        let (history, mut ctx) = self.split();
        history.run(&mut cmd, &mut ctx)?;
        Ok(cmd.copied())
    }

    pub fn cut_selection(&mut self) -> Result<(), CommandError> {
        let ids = self.selection.ids_in_z_order(&self.store);
        if ids.is_empty() {
            return Ok(());
        }
        let cmd = CutShapes::new(&self.store, ids);
        self.execute(Box::new(cmd))
    }

    /// Pastes the clipboard at `(x, y)` and selects the pasted shapes.
    pub fn paste_at(&mut self, x: f64, y: f64) -> Result<Vec<NodeId>, CommandError> {
        let before = self.store.len();
        self.execute(Box::new(PasteShapes::new(x, y)))?;
        let pasted = self.store.ids().split_off(before);
        self.select_only(&pasted);
        Ok(pasted)
    }

    /// Duplicates the selection at the configured offset and selects the copies.
    pub fn duplicate_selection(&mut self) -> Result<Vec<NodeId>, CommandError> {
        let ids = self.selection.ids_in_z_order(&self.store);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let offset = self.options.duplicate_offset;
        let before = self.store.len();
        self.execute(Box::new(DuplicateShapes::new(ids, offset, offset)))?;
        let copies = self.store.ids().split_off(before);
        self.select_only(&copies);
        Ok(copies)
    }

    /// Deletes the selected shapes. Returns the number removed.
    pub fn delete_selection(&mut self) -> Result<usize, CommandError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(0);
        }
        let cmd = DeleteShapes::new(&self.store, &ids);
        let count = cmd.target_count();
        self.execute(Box::new(cmd))?;
        Ok(count)
    }

    fn add_shape(&mut self, shape: StyledShape) -> Result<NodeId, CommandError> {
        let cmd = AddShape::new(shape);
        let id = cmd.id();
        self.execute(Box::new(cmd))?;
        Ok(id)
    }

    fn styled(&self, shape: Shape) -> StyledShape {
        StyledShape::decorate(shape, self.options.default_stroke, self.options.default_fill)
    }

    fn select_only(&mut self, ids: &[NodeId]) {
        self.selection.clear(&mut self.store);
        for id in ids {
            if !self.selection.add(&mut self.store, *id) {
                warn!("Shape {} missing after insert", id);
            }
        }
    }
}
