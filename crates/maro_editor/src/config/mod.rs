//! Editor configuration
//!
//! Grid limits, history depth, view parameters and tool defaults. Stored as
//! JSON in the platform config directory; every field falls back to its
//! default when missing from the file.

mod file;

pub use file::ConfigError;

use maro_core::{BrushSize, GridLimits};
use serde::{Deserialize, Serialize};

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Allowed range for grid columns and rows
    pub limits: GridLimits,
    /// Columns of a new level
    pub default_cols: u32,
    /// Rows of a new level
    pub default_rows: u32,
    /// Maximum number of undo steps
    pub history_capacity: usize,
    /// Tile edge length in screen pixels at zoom 1.0
    pub tile_size: f32,
    /// Size of the editing viewport in pixels
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom change per wheel notch or key press
    pub zoom_step: f32,
    /// Pixels of grid that must stay on screen while panning
    pub view_margin: f32,
    pub default_brush: BrushSize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            limits: GridLimits::default(),
            default_cols: 20,
            default_rows: 15,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            tile_size: 40.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            zoom_min: 0.5,
            zoom_max: 3.0,
            zoom_step: 0.1,
            view_margin: 40.0,
            default_brush: BrushSize::One,
        }
    }
}

impl EditorConfig {
    /// Check that the values can drive an editor session
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.limits.min == 0 || self.limits.min > self.limits.max {
            return invalid("grid limits must satisfy 1 <= min <= max");
        }
        if !self.limits.contains(self.default_cols, self.default_rows) {
            return invalid("default grid size is outside the grid limits");
        }
        if self.history_capacity == 0 {
            return invalid("history capacity must be at least 1");
        }
        if !(self.tile_size > 0.0) {
            return invalid("tile size must be positive");
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return invalid("viewport must have a positive size");
        }
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return invalid("zoom range must satisfy 0 < min <= max");
        }
        if !(self.zoom_step > 0.0) {
            return invalid("zoom step must be positive");
        }
        if self.view_margin < 0.0 {
            return invalid("view margin cannot be negative");
        }
        Ok(())
    }
}
