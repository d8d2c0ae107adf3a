//! # SketchKit Designer
//!
//! Editing core for a 2D vector drawing tool: shape model, style
//! decorators, undoable commands, selection and persistence. Rendering and
//! input handling live outside this crate; they read the render node each
//! shape owns and drive [`DesignerState`].
//!
//! ## Core Components
//!
//! - **Geometry**: segment distance, ray-casting point-in-polygon, shoelace
//!   area, convexity, bounding boxes
//! - **Shapes**: lines, rectangles, ellipses, text labels and free-form
//!   polygons behind the [`DesignerShape`] trait
//! - **Decorators**: stroke and fill layers wrapped around a base shape
//! - **Commands**: every edit is a command with a captured inverse, run
//!   through a LIFO [`CommandInvoker`]
//! - **Selection**: identity-based selection with highlight tracking
//! - **Serialization**: flat [`ShapeData`] records in a versioned JSON file
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (controller)
//!   ├── ShapeStore (z-ordered StyledShapes)
//!   ├── SelectionManager
//!   ├── Clipboard
//!   ├── Viewport (zoom/pan)
//!   └── CommandInvoker (undo stack)
//!
//! StyledShape = Fill(Stroke(Base(Shape)))
//!   └── Shape owns a RenderNode (paint, transform, highlight)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sketchkit_designer::{DesignerState, DrawingTool};
//!
//! let mut state = DesignerState::new();
//! state.set_tool(DrawingTool::Rectangle);
//! state.press(10.0, 10.0).unwrap();
//! state.drag(60.0, 40.0);
//! let id = state.release().unwrap();
//! assert!(id.is_some());
//! assert_eq!(state.store.len(), 1);
//!
//! state.undo().unwrap();
//! assert!(state.store.is_empty());
//! ```

pub mod clipboard;
pub mod commands;
pub mod decorator;
pub mod geometry;
pub mod history;
pub mod model;
pub mod render_node;
pub mod selection_manager;
pub mod serialization;
pub mod shape_store;
pub mod viewport;

// Integration modules
pub mod designer_state;

/// Font size used for text when none is configured or recorded.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

pub use clipboard::Clipboard;
pub use commands::{
    AddShape, ChangeZOrder, Command, CompositeCommand, CopyShapes, CutShapes, DeleteShapes,
    DuplicateShapes, EditContext, MirrorAxis, MirrorShapes, MoveShapes, PasteShapes,
    RecolorShapes, ResizeShape, RotateShapes, UndoableCommand, ZPlacement,
};
pub use decorator::{FillDecorator, PaintTarget, StrokeDecorator, StyledShape};
pub use geometry::Bounds;
pub use history::CommandInvoker;
pub use model::{
    DesignEllipse, DesignLine, DesignPolygon, DesignRectangle, DesignText, DesignerShape,
    DrawingTool, EstimatedTextMeasure, Point, Shape, ShapeFactory, ShapeGeometry, ShapeType,
    TextExtent, TextMeasure,
};
pub use render_node::{NodeId, RenderNode};
pub use selection_manager::SelectionManager;
pub use serialization::{
    ByteChannel, DrawingFile, FileChannel, FileSummary, LoadIssue, LoadReport, MemoryChannel,
    ShapeData,
};
pub use shape_store::ShapeStore;
pub use viewport::Viewport;

// State and integration
pub use designer_state::{DesignerOptions, DesignerState, LoadOutcome};
