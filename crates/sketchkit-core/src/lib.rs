//! # SketchKit Core
//!
//! Core types shared by every SketchKit crate: the RGBA color used for
//! stroke and fill paint, and the error hierarchy for shapes, commands
//! and persistence.

pub mod color;
pub mod error;

pub use color::Rgba;
pub use error::{CommandError, Error, PersistenceError, Result, ShapeError};
