//! Configuration and settings management for SketchKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Designer defaults (tolerances, default paint, text)
//! - View preferences (zoom levels, grid)
//! - File history (last directory, recent files)

use serde::{Deserialize, Serialize};
use sketchkit_core::Rgba;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Current configuration schema version
pub const CONFIG_VERSION: u32 = 1;

/// Designer defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    /// Hit-test tolerance in canvas units
    pub hit_tolerance: f64,
    /// Distance from the first vertex that closes a polygon
    pub polygon_close_tolerance: f64,
    /// Offset applied to duplicated shapes
    pub duplicate_offset: f64,
    pub default_stroke: Rgba,
    pub default_fill: Rgba,
    pub default_font_size: f64,
    pub default_text: String,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            hit_tolerance: 5.0,
            polygon_close_tolerance: 10.0,
            duplicate_offset: 20.0,
            default_stroke: Rgba::BLACK,
            default_fill: Rgba::TRANSPARENT,
            default_font_size: 16.0,
            default_text: "Text".to_string(),
        }
    }
}

/// View preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Discrete zoom levels, ascending
    pub zoom_levels: Vec<f64>,
    /// Zoom level on startup; must be one of `zoom_levels`
    pub initial_zoom: f64,
    pub grid_spacing: f64,
    pub show_grid: bool,
    /// Snap new shapes to the grid
    pub snap_to_grid: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom_levels: vec![0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0],
            initial_zoom: 1.0,
            grid_spacing: 20.0,
            show_grid: false,
            snap_to_grid: false,
        }
    }
}

/// File history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub last_directory: Option<PathBuf>,
    /// Most recent first
    pub recent_files: Vec<PathBuf>,
    pub max_recent_files: usize,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            last_directory: None,
            recent_files: Vec::new(),
            max_recent_files: 10,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub designer: DesignerSettings,
    pub view: ViewSettings,
    pub files: FileSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            designer: DesignerSettings::default(),
            view: ViewSettings::default(),
            files: FileSettings::default(),
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the config file, `<platform config dir>/sketchkit`.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("sketchkit"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Default config file location.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file. `.toml` files are read as TOML, anything
    /// else as JSON.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file, choosing the format by extension. Missing
    /// parent directories are created.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let designer = &self.designer;
        if !is_positive(designer.hit_tolerance) {
            return Err(ConfigError::out_of_range(
                "designer.hit_tolerance",
                designer.hit_tolerance,
            ));
        }
        if !is_positive(designer.polygon_close_tolerance) {
            return Err(ConfigError::out_of_range(
                "designer.polygon_close_tolerance",
                designer.polygon_close_tolerance,
            ));
        }
        if !designer.duplicate_offset.is_finite() {
            return Err(ConfigError::out_of_range(
                "designer.duplicate_offset",
                designer.duplicate_offset,
            ));
        }
        if !is_positive(designer.default_font_size) {
            return Err(ConfigError::out_of_range(
                "designer.default_font_size",
                designer.default_font_size,
            ));
        }

        let view = &self.view;
        if view.zoom_levels.is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "view.zoom_levels".to_string(),
                reason: "at least one zoom level is required".to_string(),
            });
        }
        if view.zoom_levels.iter().any(|z| !is_positive(*z)) {
            return Err(ConfigError::InvalidSetting {
                key: "view.zoom_levels".to_string(),
                reason: "zoom levels must be positive".to_string(),
            });
        }
        if view.zoom_levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidSetting {
                key: "view.zoom_levels".to_string(),
                reason: "zoom levels must be strictly ascending".to_string(),
            });
        }
        if !view.zoom_levels.contains(&view.initial_zoom) {
            return Err(ConfigError::InvalidSetting {
                key: "view.initial_zoom".to_string(),
                reason: format!("{} is not a configured zoom level", view.initial_zoom),
            });
        }
        if !is_positive(view.grid_spacing) {
            return Err(ConfigError::out_of_range("view.grid_spacing", view.grid_spacing));
        }

        if self.files.max_recent_files == 0 {
            return Err(ConfigError::out_of_range("files.max_recent_files", 0));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        // Remove if already in list
        self.files.recent_files.retain(|f| f != &path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.files.last_directory = Some(parent.to_path_buf());
        }

        // Add to front
        self.files.recent_files.insert(0, path);

        // Trim to max size
        self.files
            .recent_files
            .truncate(self.files.max_recent_files);
    }
}
