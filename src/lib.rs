//! # SketchKit
//!
//! Editing core for a 2D vector drawing tool:
//! - Lines, rectangles, ellipses, text labels and free-form polygons
//! - Stroke and fill style layers
//! - Undoable editing commands, selection and clipboard
//! - Versioned JSON drawing files
//!
//! ## Architecture
//!
//! SketchKit is organized as a workspace with multiple crates:
//!
//! 1. **sketchkit-core** - Colors and error types
//! 2. **sketchkit-designer** - Shape model, commands, selection, persistence
//! 3. **sketchkit-settings** - Configuration files
//! 4. **sketchkit** - Binary and glue that integrates all crates

use std::path::Path;

use anyhow::Context;

pub use sketchkit_core::{CommandError, Error, PersistenceError, Result, Rgba, ShapeError};
pub use sketchkit_designer as designer;
pub use sketchkit_designer::{
    DesignerOptions, DesignerShape, DesignerState, DrawingTool, LoadOutcome, NodeId, Shape,
    ShapeType, StyledShape,
};
pub use sketchkit_settings::{Config, DesignerSettings, FileSettings, SettingsError, ViewSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging to stdout in the given format.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_level(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

/// Editing options derived from the designer and view settings.
pub fn designer_options(config: &Config) -> DesignerOptions {
    let designer = &config.designer;
    let view = &config.view;
    DesignerOptions {
        hit_tolerance: designer.hit_tolerance,
        polygon_close_tolerance: designer.polygon_close_tolerance,
        duplicate_offset: designer.duplicate_offset,
        default_stroke: designer.default_stroke,
        default_fill: designer.default_fill,
        default_font_size: designer.default_font_size,
        default_text: designer.default_text.clone(),
        zoom_levels: view.zoom_levels.clone(),
        initial_zoom: view.initial_zoom,
        grid_spacing: view.grid_spacing,
        snap_to_grid: view.snap_to_grid,
    }
}

/// Loads settings from `path`, falling back to defaults when the file does
/// not exist.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!("No settings at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load_from_file(path)
        .with_context(|| format!("failed to load settings from {}", path.display()))
}

/// Creates a designer configured from `config` and loads a drawing into it.
pub fn open_drawing(
    path: &Path,
    config: &Config,
) -> anyhow::Result<(DesignerState, LoadOutcome)> {
    let mut state = DesignerState::with_options(designer_options(config));
    let outcome = state.load_from_file(path)?;
    Ok((state, outcome))
}
