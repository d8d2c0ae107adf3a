//! Viewport and coordinate transformation for canvas rendering.
//!
//! Converts between screen coordinates (pixels, origin top-left) and canvas
//! coordinates. Both spaces have +Y pointing down. Zoom steps through a
//! fixed ascending list of levels.

use std::fmt;

use crate::model::Point;

/// Zoom levels used when none are configured.
pub const DEFAULT_ZOOM_LEVELS: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0];

#[derive(Debug, Clone)]
pub struct Viewport {
    levels: Vec<f64>,
    index: usize,
    pan_x: f64,
    pan_y: f64,
}

impl Viewport {
    /// Creates a viewport over `levels`, starting at the level nearest `initial`.
    ///
    /// Non-positive or non-finite levels are discarded; an empty list falls
    /// back to [`DEFAULT_ZOOM_LEVELS`].
    pub fn new(levels: &[f64], initial: f64) -> Self {
        let mut levels: Vec<f64> = levels
            .iter()
            .copied()
            .filter(|z| z.is_finite() && *z > 0.0)
            .collect();
        levels.sort_by(|a, b| a.total_cmp(b));
        levels.dedup();
        if levels.is_empty() {
            levels = DEFAULT_ZOOM_LEVELS.to_vec();
        }

        let mut viewport = Self {
            levels,
            index: 0,
            pan_x: 0.0,
            pan_y: 0.0,
        };
        viewport.set_zoom(initial);
        viewport
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.levels[self.index]
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Snaps to the configured level nearest `zoom`.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.index = self
            .levels
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - zoom).abs().total_cmp(&(*b - zoom).abs()))
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    /// Steps to the next larger level. Returns `false` at the top level.
    pub fn zoom_in(&mut self) -> bool {
        if self.index + 1 < self.levels.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Steps to the next smaller level. Returns `false` at the bottom level.
    pub fn zoom_out(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Resets zoom to the level nearest 1.0.
    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0);
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts screen (pixel) coordinates to canvas coordinates.
    ///
    /// ```text
    /// canvas = (screen - pan) / zoom
    /// ```
    pub fn screen_to_canvas(&self, px: f64, py: f64) -> Point {
        let zoom = self.zoom();
        Point::new((px - self.pan_x) / zoom, (py - self.pan_y) / zoom)
    }

    pub fn canvas_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        let zoom = self.zoom();
        (x * zoom + self.pan_x, y * zoom + self.pan_y)
    }

    /// Zooms one level while keeping `screen_point` fixed on screen.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, zoom_in: bool) -> bool {
        let anchor = self.screen_to_canvas(screen_x, screen_y);
        let changed = if zoom_in { self.zoom_in() } else { self.zoom_out() };
        if changed {
            let zoom = self.zoom();
            self.pan_x = screen_x - anchor.x * zoom;
            self.pan_y = screen_y - anchor.y * zoom;
        }
        changed
    }

    /// Resets viewport to default state (1:1 zoom, no pan).
    pub fn reset(&mut self) {
        self.reset_zoom();
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

/// Rounds a canvas point to the nearest grid intersection. A non-positive
/// spacing leaves the point unchanged.
pub fn snap_to_grid(point: Point, spacing: f64) -> Point {
    if spacing <= 0.0 || !spacing.is_finite() {
        return point;
    }
    Point::new(
        (point.x / spacing).round() * spacing,
        (point.y / spacing).round() * spacing,
    )
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom(),
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&DEFAULT_ZOOM_LEVELS, 1.0)
    }
}
