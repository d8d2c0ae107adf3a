//! Undoable editing commands.
//!
//! Each command captures whatever pre-state its inverse needs, either at
//! construction (multi-target move, rotate, recolor, delete) or on its first
//! execution (paste, mirror, z-order). `undo` restores captured values and
//! never recomputes them from the current model. Executing a command again
//! after an undo reapplies the same differential.

use sketchkit_core::{CommandError, Rgba, ShapeError};
use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::decorator::{PaintTarget, StyledShape};
use crate::model::{DesignerShape, ShapeGeometry};
use crate::render_node::NodeId;
use crate::selection_manager::SelectionManager;
use crate::shape_store::ShapeStore;

/// Everything a command may touch.
pub struct EditContext<'a> {
    pub store: &'a mut ShapeStore,
    pub selection: &'a mut SelectionManager,
    pub clipboard: &'a mut Clipboard,
}

impl EditContext<'_> {
    /// Removes a shape from the model, dropping it from the selection first.
    pub fn detach(&mut self, id: NodeId) -> Option<(usize, StyledShape)> {
        self.selection.remove(self.store, id);
        self.store.remove(id)
    }

    fn shape_mut(&mut self, id: NodeId) -> Result<&mut StyledShape, CommandError> {
        self.store.get_mut(id).ok_or_else(|| not_found(id))
    }
}

fn not_found(id: NodeId) -> CommandError {
    CommandError::ShapeNotFound { id: id.to_string() }
}

/// A command that can be executed against the model.
pub trait Command {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError>;

    /// Returns the name of the command for display.
    fn name(&self) -> &str;
}

/// A command with an inverse.
pub trait UndoableCommand: Command {
    /// Reverts the effect of the last `execute`.
    ///
    /// Fails with [`CommandError::InvalidUndoState`] if the command has never
    /// been executed.
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError>;
}

fn require_executed(executed: bool, name: &str) -> Result<(), CommandError> {
    if executed {
        Ok(())
    } else {
        Err(CommandError::InvalidUndoState {
            command: name.to_string(),
        })
    }
}

/// Adds a newly created shape on top of the model.
#[derive(Debug)]
pub struct AddShape {
    id: NodeId,
    /// Held while the shape is not in the model.
    pending: Option<StyledShape>,
    index: Option<usize>,
    executed: bool,
}

impl AddShape {
    pub fn new(shape: StyledShape) -> Self {
        Self {
            id: shape.id(),
            pending: Some(shape),
            index: None,
            executed: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Command for AddShape {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        if let Some(shape) = self.pending.take() {
            match self.index {
                Some(index) => {
                    ctx.store.insert_at(index, shape);
                }
                None => {
                    ctx.store.push(shape);
                }
            }
            debug!("Added shape {}", self.id);
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Add Shape"
    }
}

impl UndoableCommand for AddShape {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        if let Some((index, shape)) = ctx.detach(self.id) {
            self.index = Some(index);
            self.pending = Some(shape);
        }
        Ok(())
    }
}

/// Moves every target by the same offset from its captured geometry.
#[derive(Debug)]
pub struct MoveShapes {
    origins: Vec<(NodeId, ShapeGeometry)>,
    dx: f64,
    dy: f64,
    executed: bool,
}

impl MoveShapes {
    /// Captures each target's current geometry. Ids not in the store are ignored.
    pub fn new(store: &ShapeStore, ids: &[NodeId], dx: f64, dy: f64) -> Self {
        let origins = ids
            .iter()
            .filter_map(|id| store.get(*id).map(|s| (*id, s.geometry())))
            .collect();
        Self {
            origins,
            dx,
            dy,
            executed: false,
        }
    }

    pub fn target_count(&self) -> usize {
        self.origins.len()
    }
}

impl Command for MoveShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        for (id, before) in &self.origins {
            let moved = before.translated(self.dx, self.dy);
            ctx.shape_mut(*id)?.set_geometry(&moved)?;
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Move"
    }
}

impl UndoableCommand for MoveShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        for (id, before) in &self.origins {
            ctx.shape_mut(*id)?.set_geometry(before)?;
        }
        Ok(())
    }
}

/// Sets an absolute rotation on every target.
#[derive(Debug)]
pub struct RotateShapes {
    originals: Vec<(NodeId, f64)>,
    degrees: f64,
    executed: bool,
}

impl RotateShapes {
    pub fn new(store: &ShapeStore, ids: &[NodeId], degrees: f64) -> Self {
        let originals = ids
            .iter()
            .filter_map(|id| store.get(*id).map(|s| (*id, s.rotation())))
            .collect();
        Self {
            originals,
            degrees,
            executed: false,
        }
    }
}

impl Command for RotateShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        for (id, _) in &self.originals {
            ctx.shape_mut(*id)?.set_rotation(self.degrees);
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Rotate"
    }
}

impl UndoableCommand for RotateShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        for (id, degrees) in &self.originals {
            ctx.shape_mut(*id)?.set_rotation(*degrees);
        }
        Ok(())
    }
}

/// Changes the stroke or fill color of every target.
#[derive(Debug)]
pub struct RecolorShapes {
    target: PaintTarget,
    color: Rgba,
    originals: Vec<(NodeId, Option<Rgba>)>,
    executed: bool,
}

impl RecolorShapes {
    /// Captures each target's live color for the chosen channel.
    pub fn new(store: &ShapeStore, ids: &[NodeId], target: PaintTarget, color: Rgba) -> Self {
        let originals = ids
            .iter()
            .filter_map(|id| store.get(*id).map(|s| (*id, s.paint(target))))
            .collect();
        Self {
            target,
            color,
            originals,
            executed: false,
        }
    }
}

impl Command for RecolorShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        for (id, _) in &self.originals {
            ctx.shape_mut(*id)?.set_paint(self.target, Some(self.color));
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            PaintTarget::Stroke => "Change Stroke",
            PaintTarget::Fill => "Change Fill",
        }
    }
}

impl UndoableCommand for RecolorShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        for (id, color) in &self.originals {
            ctx.shape_mut(*id)?.set_paint(self.target, *color);
        }
        Ok(())
    }
}

/// Removes shapes from the model.
///
/// Original indices are captured at construction. Undo reinserts in
/// ascending index order so each shape lands back at its original z-position
/// regardless of the order the targets were removed in.
#[derive(Debug)]
pub struct DeleteShapes {
    targets: Vec<(NodeId, usize)>,
    removed: Vec<(usize, StyledShape)>,
    executed: bool,
}

impl DeleteShapes {
    pub fn new(store: &ShapeStore, ids: &[NodeId]) -> Self {
        let targets = ids
            .iter()
            .filter_map(|id| store.index_of(*id).map(|index| (*id, index)))
            .collect();
        Self {
            targets,
            removed: Vec::new(),
            executed: false,
        }
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl Command for DeleteShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        for (id, original_index) in &self.targets {
            if let Some((_, shape)) = ctx.detach(*id) {
                self.removed.push((*original_index, shape));
            }
        }
        debug!("Deleted {} shape(s)", self.removed.len());
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Delete"
    }
}

impl UndoableCommand for DeleteShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        let mut removed = std::mem::take(&mut self.removed);
        removed.sort_by_key(|(index, _)| *index);
        for (index, shape) in removed {
            ctx.store.insert_at(index, shape);
        }
        Ok(())
    }
}

/// Copies the targets onto the clipboard. Not undoable.
#[derive(Debug)]
pub struct CopyShapes {
    ids: Vec<NodeId>,
    copied: usize,
}

impl CopyShapes {
    /// `ids` should be in z-order so pasted groups stack the same way.
    pub fn new(ids: Vec<NodeId>) -> Self {
        Self { ids, copied: 0 }
    }

    pub fn copied(&self) -> usize {
        self.copied
    }
}

impl Command for CopyShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let mut entries = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let Some(shape) = ctx.store.get(*id) else {
                continue;
            };
            match shape.try_clone() {
                Ok(copy) => entries.push(copy),
                Err(e) => warn!("Skipping shape {} on copy: {}", id, e),
            }
        }

        self.copied = entries.len();
        if entries.is_empty() {
            debug!("Nothing copied; clipboard unchanged");
        } else {
            debug!("Copied {} shape(s) to clipboard", entries.len());
            ctx.clipboard.set(entries);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Copy"
    }
}

/// Copies the targets to the clipboard, then deletes them.
#[derive(Debug)]
pub struct CutShapes {
    copy: CopyShapes,
    delete: DeleteShapes,
    copied: bool,
}

impl CutShapes {
    pub fn new(store: &ShapeStore, ids: Vec<NodeId>) -> Self {
        let delete = DeleteShapes::new(store, &ids);
        Self {
            copy: CopyShapes::new(ids),
            delete,
            copied: false,
        }
    }
}

impl Command for CutShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        if !self.copied {
            self.copy.execute(ctx)?;
            if self.copy.copied() == 0 && self.delete.target_count() > 0 {
                return Err(ShapeError::CloneFailure {
                    reason: "no shape could be copied for cut".to_string(),
                }
                .into());
            }
            self.copied = true;
        }
        self.delete.execute(ctx)
    }

    fn name(&self) -> &str {
        "Cut"
    }
}

impl UndoableCommand for CutShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.copied, self.name())?;
        self.delete.undo(ctx)
    }
}

/// Inserts independent clones of the clipboard entries.
///
/// A single entry has its top-left placed at the target point; several
/// entries keep their relative layout with the group's bounding-box center
/// placed at the target point. If any clone fails nothing is inserted.
#[derive(Debug)]
pub struct PasteShapes {
    x: f64,
    y: f64,
    pasted: Vec<NodeId>,
    stash: Vec<StyledShape>,
    executed: bool,
}

impl PasteShapes {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pasted: Vec::new(),
            stash: Vec::new(),
            executed: false,
        }
    }

    pub fn pasted_ids(&self) -> &[NodeId] {
        &self.pasted
    }

    fn clone_from_clipboard(&self, clipboard: &Clipboard) -> Result<Vec<StyledShape>, CommandError> {
        if clipboard.is_empty() {
            return Err(CommandError::EmptyClipboard);
        }

        let mut clones = Vec::with_capacity(clipboard.len());
        for entry in clipboard.entries() {
            match entry.try_clone() {
                Ok(copy) => clones.push(copy),
                Err(e) => {
                    warn!(
                        "Paste aborted, discarding {} clone(s): {}",
                        clones.len(),
                        e
                    );
                    return Err(e.into());
                }
            }
        }

        if let [single] = clones.as_mut_slice() {
            single.set_x(self.x);
            single.set_y(self.y);
        } else if let Some(bounds) = clipboard.group_bounds() {
            let center = bounds.center();
            let (dx, dy) = (self.x - center.x, self.y - center.y);
            for shape in &mut clones {
                shape.translate(dx, dy);
            }
        }
        Ok(clones)
    }
}

impl Command for PasteShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let shapes = if self.executed {
            std::mem::take(&mut self.stash)
        } else {
            self.clone_from_clipboard(ctx.clipboard)?
        };

        if !self.executed {
            self.pasted = shapes.iter().map(|s| s.id()).collect();
        }
        for shape in shapes {
            ctx.store.push(shape);
        }
        debug!("Pasted {} shape(s) at ({}, {})", self.pasted.len(), self.x, self.y);
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Paste"
    }
}

impl UndoableCommand for PasteShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        for id in &self.pasted {
            if let Some((_, shape)) = ctx.detach(*id) {
                self.stash.push(shape);
            }
        }
        Ok(())
    }
}

/// Clones the targets in place, offset by a fixed distance.
#[derive(Debug)]
pub struct DuplicateShapes {
    ids: Vec<NodeId>,
    dx: f64,
    dy: f64,
    created: Vec<NodeId>,
    stash: Vec<StyledShape>,
    executed: bool,
}

impl DuplicateShapes {
    pub fn new(ids: Vec<NodeId>, dx: f64, dy: f64) -> Self {
        Self {
            ids,
            dx,
            dy,
            created: Vec::new(),
            stash: Vec::new(),
            executed: false,
        }
    }

    pub fn created_ids(&self) -> &[NodeId] {
        &self.created
    }
}

impl Command for DuplicateShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let shapes = if self.executed {
            std::mem::take(&mut self.stash)
        } else {
            let mut clones = Vec::with_capacity(self.ids.len());
            for id in &self.ids {
                let source = ctx.store.get(*id).ok_or_else(|| not_found(*id))?;
                let mut copy = source.try_clone()?;
                copy.translate(self.dx, self.dy);
                clones.push(copy);
            }
            self.created = clones.iter().map(|s| s.id()).collect();
            clones
        };

        for shape in shapes {
            ctx.store.push(shape);
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Duplicate"
    }
}

impl UndoableCommand for DuplicateShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        for id in &self.created {
            if let Some((_, shape)) = ctx.detach(*id) {
                self.stash.push(shape);
            }
        }
        Ok(())
    }
}

/// Replaces a shape's canonical geometry, restoring the exact prior
/// snapshot on undo.
#[derive(Debug)]
pub struct ResizeShape {
    id: NodeId,
    before: ShapeGeometry,
    after: ShapeGeometry,
    executed: bool,
}

impl ResizeShape {
    pub fn new(id: NodeId, before: ShapeGeometry, after: ShapeGeometry) -> Self {
        Self {
            id,
            before,
            after,
            executed: false,
        }
    }

    /// Captures the shape's current geometry as the "before" state.
    pub fn from_current(
        store: &ShapeStore,
        id: NodeId,
        after: ShapeGeometry,
    ) -> Result<Self, CommandError> {
        let before = store.get(id).ok_or_else(|| not_found(id))?.geometry();
        Ok(Self::new(id, before, after))
    }

    /// Uniform scale about the shape's own center.
    pub fn scaled(store: &ShapeStore, id: NodeId, factor: f64) -> Result<Self, CommandError> {
        let before = store.get(id).ok_or_else(|| not_found(id))?.geometry();
        let after = before.scaled(factor);
        Ok(Self::new(id, before, after))
    }

    pub fn before(&self) -> &ShapeGeometry {
        &self.before
    }

    pub fn after(&self) -> &ShapeGeometry {
        &self.after
    }
}

impl Command for ResizeShape {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        ctx.shape_mut(self.id)?.set_geometry(&self.after)?;
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "Resize"
    }
}

impl UndoableCommand for ResizeShape {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        ctx.shape_mut(self.id)?.set_geometry(&self.before)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Flip left/right (negates the x scale).
    Horizontal,
    /// Flip top/bottom (negates the y scale).
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MirrorState {
    scale: (f64, f64),
    translation: (f64, f64),
    position: (f64, f64),
}

/// Mirrors each target about its own center.
///
/// The pre-mirror transform and position are captured on first execution;
/// undo writes them back verbatim instead of negating again.
#[derive(Debug)]
pub struct MirrorShapes {
    ids: Vec<NodeId>,
    axis: MirrorAxis,
    captured: Vec<(NodeId, MirrorState)>,
    executed: bool,
}

impl MirrorShapes {
    pub fn new(ids: Vec<NodeId>, axis: MirrorAxis) -> Self {
        Self {
            ids,
            axis,
            captured: Vec::new(),
            executed: false,
        }
    }

    pub fn single(id: NodeId, axis: MirrorAxis) -> Self {
        Self::new(vec![id], axis)
    }
}

impl Command for MirrorShapes {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        if !self.executed {
            for id in &self.ids {
                let shape = ctx.store.get(*id).ok_or_else(|| not_found(*id))?;
                let node = shape.node();
                self.captured.push((
                    *id,
                    MirrorState {
                        scale: node.scale(),
                        translation: node.translation(),
                        position: (shape.x(), shape.y()),
                    },
                ));
            }
        }

        for (id, state) in &self.captured {
            let shape = ctx.shape_mut(*id)?;
            let (sx, sy) = state.scale;
            let (tx, ty) = state.translation;
            let node = shape.node_mut();
            match self.axis {
                MirrorAxis::Horizontal => node.set_scale(-sx, sy),
                MirrorAxis::Vertical => node.set_scale(sx, -sy),
            }
            node.set_translation(tx, ty);
            // the flip is about the center, so pinning the position keeps the box fixed
            shape.set_x(state.position.0);
            shape.set_y(state.position.1);
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        match self.axis {
            MirrorAxis::Horizontal => "Mirror Horizontal",
            MirrorAxis::Vertical => "Mirror Vertical",
        }
    }
}

impl UndoableCommand for MirrorShapes {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, self.name())?;
        for (id, state) in &self.captured {
            let shape = ctx.shape_mut(*id)?;
            let node = shape.node_mut();
            node.set_scale(state.scale.0, state.scale.1);
            node.set_translation(state.translation.0, state.translation.1);
            shape.set_x(state.position.0);
            shape.set_y(state.position.1);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZPlacement {
    Front,
    Back,
}

/// Brings a shape to the front or sends it to the back.
#[derive(Debug)]
pub struct ChangeZOrder {
    id: NodeId,
    placement: ZPlacement,
    original_index: Option<usize>,
}

impl ChangeZOrder {
    pub fn new(id: NodeId, placement: ZPlacement) -> Self {
        Self {
            id,
            placement,
            original_index: None,
        }
    }
}

impl Command for ChangeZOrder {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let target = match self.placement {
            ZPlacement::Front => usize::MAX,
            ZPlacement::Back => 0,
        };
        let from = ctx
            .store
            .move_to(self.id, target)
            .ok_or_else(|| not_found(self.id))?;
        if self.original_index.is_none() {
            self.original_index = Some(from);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.placement {
            ZPlacement::Front => "Bring to Front",
            ZPlacement::Back => "Send to Back",
        }
    }
}

impl UndoableCommand for ChangeZOrder {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let Some(index) = self.original_index else {
            return require_executed(false, self.name());
        };
        ctx.store
            .move_to(self.id, index)
            .ok_or_else(|| not_found(self.id))?;
        Ok(())
    }
}

/// Runs several commands as one undo step. Undo runs them in reverse.
pub struct CompositeCommand {
    name: String,
    commands: Vec<Box<dyn UndoableCommand>>,
    executed: bool,
}

impl CompositeCommand {
    pub fn new(name: impl Into<String>, commands: Vec<Box<dyn UndoableCommand>>) -> Self {
        Self {
            name: name.into(),
            commands,
            executed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for CompositeCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        for done in 0..self.commands.len() {
            if let Err(e) = self.commands[done].execute(ctx) {
                // unwind the steps that already ran
                for earlier in self.commands[..done].iter_mut().rev() {
                    earlier.undo(ctx)?;
                }
                return Err(e);
            }
        }
        self.executed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl UndoableCommand for CompositeCommand {
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_executed(self.executed, &self.name)?;
        for cmd in self.commands.iter_mut().rev() {
            cmd.undo(ctx)?;
        }
        Ok(())
    }
}
