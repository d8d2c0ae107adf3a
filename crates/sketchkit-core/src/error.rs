//! Error handling for SketchKit
//!
//! Provides error types for each layer of the editor core:
//! - Shape errors (cloning, geometry snapshots)
//! - Command errors (undo state, clipboard, missing targets)
//! - Persistence errors (byte channel, record decoding)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape error type
///
/// Raised when a shape's internal state cannot support the requested operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The shape could not be deep-copied because its state is malformed
    #[error("Clone failed: {reason}")]
    CloneFailure {
        /// What made the state unclonable.
        reason: String,
    },

    /// A geometry snapshot was applied to a shape of a different kind
    #[error("Geometry mismatch: expected {expected}, found {found}")]
    GeometryMismatch {
        /// The shape kind being modified.
        expected: String,
        /// The kind the snapshot was taken from.
        found: String,
    },

    /// A geometry value is unusable (non-finite or otherwise invalid)
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Description of the invalid value.
        reason: String,
    },
}

/// Command error type
///
/// Represents failures while executing or undoing editing commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Paste was requested with nothing on the clipboard
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// A command referenced a shape that is not in the model
    #[error("Shape not found: {id}")]
    ShapeNotFound {
        /// The missing shape identifier.
        id: String,
    },

    /// Undo was requested on a command that never executed
    #[error("Cannot undo '{command}' before it has been executed")]
    InvalidUndoState {
        /// Display name of the command.
        command: String,
    },

    /// A shape operation failed while the command was running
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Persistence error type
///
/// Represents failures while reading, writing or decoding drawings.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Standard I/O error from the byte channel
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not a valid drawing document
    #[error("Malformed payload: {reason}")]
    MalformedPayload {
        /// Decoder message.
        reason: String,
    },

    /// A record carries a type tag no shape variant answers to
    #[error("Unsupported shape type: {tag}")]
    UnsupportedShapeType {
        /// The unknown tag.
        tag: String,
    },

    /// A polygon record has an unusable vertex payload
    #[error("Malformed polygon data: {reason}")]
    MalformedPolygonData {
        /// What is wrong with the payload.
        reason: String,
    },

    /// A record carries a color channel outside `0.0..=1.0`
    #[error("Invalid color: {reason}")]
    InvalidColor {
        /// Which channel is out of range.
        reason: String,
    },

    /// The document was written by an incompatible format version
    #[error("Unsupported file format version: {version}")]
    UnsupportedVersion {
        /// The version string found in the document.
        version: String,
    },

    /// A record decoded but produced an invalid shape
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Main error type for SketchKit
#[derive(Error, Debug)]
pub enum Error {
    /// Shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }

    /// Check if this is a command error
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }
}

/// Result type alias for SketchKit operations
pub type Result<T> = std::result::Result<T, Error>;
