//! Designer state manager for UI integration.
//! Owns the drawing model and routes every edit through the command invoker.
//!
//! This module is split into submodules for better organization:
//! - `shapes`: Shape creation, deletion, clipboard
//! - `selection`: Shape selection operations
//! - `transforms`: Move, rotate, recolor, resize, mirror, z-order
//! - `file_io`: Save/load operations

mod file_io;
mod selection;
mod shapes;
mod transforms;

pub use file_io::LoadOutcome;

use sketchkit_core::{CommandError, Rgba};
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::commands::{EditContext, UndoableCommand};
use crate::decorator::StyledShape;
use crate::history::CommandInvoker;
use crate::model::{DesignPolygon, DrawingTool, Point, ShapeFactory};
use crate::selection_manager::SelectionManager;
use crate::shape_store::ShapeStore;
use crate::viewport::{snap_to_grid, Viewport, DEFAULT_ZOOM_LEVELS};

/// Editing options for the designer
#[derive(Clone, Debug)]
pub struct DesignerOptions {
    pub hit_tolerance: f64,
    pub polygon_close_tolerance: f64,
    pub duplicate_offset: f64,
    pub default_stroke: Rgba,
    pub default_fill: Rgba,
    pub default_font_size: f64,
    pub default_text: String,
    pub zoom_levels: Vec<f64>,
    pub initial_zoom: f64,
    pub grid_spacing: f64,
    /// Snap pointer positions to the grid while creating shapes.
    pub snap_to_grid: bool,
}

impl Default for DesignerOptions {
    fn default() -> Self {
        Self {
            hit_tolerance: 5.0,
            polygon_close_tolerance: 10.0,
            duplicate_offset: 20.0,
            default_stroke: Rgba::BLACK,
            default_fill: Rgba::TRANSPARENT,
            default_font_size: crate::DEFAULT_FONT_SIZE,
            default_text: "Text".to_string(),
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            initial_zoom: 1.0,
            grid_spacing: 20.0,
            snap_to_grid: false,
        }
    }
}

/// Designer state for UI integration
#[derive(Debug)]
pub struct DesignerState {
    pub store: ShapeStore,
    pub selection: SelectionManager,
    pub clipboard: Clipboard,
    pub viewport: Viewport,
    pub options: DesignerOptions,
    pub current_file_path: Option<std::path::PathBuf>,
    pub is_modified: bool,
    pub design_name: String,
    pub(crate) history: CommandInvoker,
    pub(crate) factory: ShapeFactory,
    pub(crate) tool: DrawingTool,
    /// Shape being sized by a drag gesture. Not in the store until release.
    pub(crate) creating: Option<StyledShape>,
    pub(crate) polygon: Option<DesignPolygon>,
}

impl DesignerState {
    /// Creates a new designer state.
    pub fn new() -> Self {
        Self::with_options(DesignerOptions::default())
    }

    pub fn with_options(options: DesignerOptions) -> Self {
        let factory = ShapeFactory::new(options.default_text.clone(), options.default_font_size);
        let viewport = Viewport::new(&options.zoom_levels, options.initial_zoom);
        Self {
            store: ShapeStore::new(),
            selection: SelectionManager::new(),
            clipboard: Clipboard::new(),
            viewport,
            options,
            current_file_path: None,
            is_modified: false,
            design_name: "Untitled".to_string(),
            history: CommandInvoker::new(),
            factory,
            tool: DrawingTool::Select,
            creating: None,
            polygon: None,
        }
    }

    /// Replaces the shape factory, e.g. to plug in a real text measurer.
    pub fn set_factory(&mut self, factory: ShapeFactory) {
        self.factory = factory;
    }

    pub fn factory(&self) -> &ShapeFactory {
        &self.factory
    }

    /// Executes `cmd` through the invoker and marks the design modified.
    pub fn execute(&mut self, cmd: Box<dyn UndoableCommand>) -> Result<(), CommandError> {
        let (history, mut ctx) = self.split();
        history.execute(cmd, &mut ctx)?;
        self.is_modified = true;
        Ok(())
    }

    /// Undoes the last command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, CommandError> {
        let (history, mut ctx) = self.split();
        let undone = history.undo(&mut ctx)?;
        if undone {
            self.selection.retain_existing(&self.store);
            self.is_modified = true;
        }
        Ok(undone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    /// Names of the commands on the undo stack, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.history()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        debug!("Cleared undo history");
    }

    pub(crate) fn split(&mut self) -> (&mut CommandInvoker, EditContext<'_>) {
        (
            &mut self.history,
            EditContext {
                store: &mut self.store,
                selection: &mut self.selection,
                clipboard: &mut self.clipboard,
            },
        )
    }

    /// Applies grid snapping when enabled.
    pub(crate) fn snap(&self, x: f64, y: f64) -> Point {
        let point = Point::new(x, y);
        if self.options.snap_to_grid {
            snap_to_grid(point, self.options.grid_spacing)
        } else {
            point
        }
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
