//! File I/O operations (save, load, new) for designer state.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use super::DesignerState;
use crate::serialization::{
    load_shapes, save_shapes, ByteChannel, FileChannel, FileSummary, LoadIssue,
};

/// What a load put into the model and what it had to leave out.
#[derive(Debug)]
pub struct LoadOutcome {
    pub loaded: usize,
    pub skipped: Vec<LoadIssue>,
    pub summary: FileSummary,
}

impl DesignerState {
    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        self.save_with(&mut FileChannel, path)
    }

    /// Save design through an arbitrary byte channel.
    pub fn save_with(
        &mut self,
        channel: &mut dyn ByteChannel,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let written = save_shapes(channel, path, &self.design_name, self.store.iter())
            .with_context(|| format!("failed to save design to {}", path.display()))?;

        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(written)
    }

    /// Load design from file.
    ///
    /// The model is replaced by every shape that could be rebuilt; the rest
    /// are returned in [`LoadOutcome::skipped`]. Selection and undo history
    /// are cleared.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<LoadOutcome> {
        self.load_with(&mut FileChannel, path)
    }

    pub fn load_with(
        &mut self,
        channel: &mut dyn ByteChannel,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<LoadOutcome> {
        let path = path.as_ref();
        let (file, report) = load_shapes(channel, path, self.factory.measure())
            .with_context(|| format!("failed to load design from {}", path.display()))?;

        self.reset_model();
        let loaded = report.shapes.len();
        for shape in report.shapes {
            self.store.push(shape);
        }
        for issue in &report.errors {
            warn!("Skipped {} #{}: {}", issue.shape_type, issue.index, issue.error);
        }

        self.design_name = file.metadata.name.clone();
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;

        let summary = file.summarize();
        info!("Loaded {}", summary);
        Ok(LoadOutcome {
            loaded,
            skipped: report.errors,
            summary,
        })
    }

    /// Create new design (clear all).
    pub fn new_design(&mut self) {
        self.reset_model();
        self.viewport.reset();
        self.current_file_path = None;
        self.is_modified = false;
        self.design_name = "Untitled".to_string();
    }

    /// Mark design as modified.
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Title shown to the user: the file name when saved, otherwise the
    /// design name, with a trailing `*` when there are unsaved changes.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.design_name.clone());
        if self.is_modified {
            format!("{}*", name)
        } else {
            name
        }
    }

    fn reset_model(&mut self) {
        self.selection.clear(&mut self.store);
        self.store.clear();
        self.history.clear();
        self.creating = None;
        self.polygon = None;
    }
}
