//! SketchKit Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod error;

pub use config::{Config, DesignerSettings, FileSettings, ViewSettings, CONFIG_VERSION};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
