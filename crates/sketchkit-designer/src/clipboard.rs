//! Clipboard service for copy, cut and paste.
//!
//! Owned by the editor controller and handed to commands through the edit
//! context. Entries are private deep copies; pasting clones them again so
//! the clipboard can be pasted any number of times.

use crate::decorator::StyledShape;
use crate::geometry::Bounds;
use crate::model::DesignerShape;

#[derive(Debug, Default)]
pub struct Clipboard {
    entries: Vec<StyledShape>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the clipboard contents.
    pub fn set(&mut self, entries: Vec<StyledShape>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[StyledShape] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Combined bounds of every entry.
    pub fn group_bounds(&self) -> Option<Bounds> {
        self.entries
            .iter()
            .map(|s| s.bounds())
            .reduce(|a, b| a.union(&b))
    }
}
