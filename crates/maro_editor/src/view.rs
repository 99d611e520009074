//! Screen <-> grid coordinate mapping under pan and zoom
//!
//! Screen space has its origin at the viewport's top-left corner with y
//! pointing down. A cell is `tile_size * zoom` pixels wide and the grid's
//! top-left corner sits at `offset`.

use maro_core::CellPos;

use crate::config::EditorConfig;

/// On-screen rectangle of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl ScreenRect {
    pub fn top_left(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// Pan offset and zoom of the editing viewport
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    offset_x: f32,
    offset_y: f32,
    zoom: f32,
    tile_size: f32,
    viewport_width: f32,
    viewport_height: f32,
    zoom_min: f32,
    zoom_max: f32,
    zoom_step: f32,
    margin: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ViewTransform {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0_f32.clamp(config.zoom_min, config.zoom_max),
            tile_size: config.tile_size,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_step: config.zoom_step,
            margin: config.view_margin,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    /// Edge length of one cell on screen
    pub fn cell_size(&self) -> f32 {
        self.tile_size * self.zoom
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Update the viewport size (e.g. on window resize)
    pub fn set_viewport(&mut self, width: f32, height: f32, cols: u32, rows: u32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
        self.clamp_offset(cols, rows);
    }

    /// Map a screen pixel to the cell under it. The result may lie outside
    /// the grid; callers bounds-check before use.
    pub fn screen_to_grid(&self, px: f32, py: f32) -> CellPos {
        let size = self.cell_size();
        let gx = ((px - self.offset_x) / size).floor();
        let gy = ((py - self.offset_y) / size).floor();
        CellPos::new(gx as i32, gy as i32)
    }

    /// On-screen rectangle covered by a cell
    pub fn grid_to_screen(&self, gx: i32, gy: i32) -> ScreenRect {
        ScreenRect {
            x: self.cell_edge(self.offset_x, gx),
            y: self.cell_edge(self.offset_y, gy),
            size: self.cell_size(),
        }
    }

    /// Leading screen edge of cell `g` along one axis. Float rounding can
    /// leave `offset + g * size` a hair short of the cell, so step it
    /// forward until it floors back to `g`.
    fn cell_edge(&self, offset: f32, g: i32) -> f32 {
        let size = self.cell_size();
        let mut edge = offset + g as f32 * size;
        for _ in 0..16 {
            if ((edge - offset) / size).floor() >= g as f32 {
                break;
            }
            let magnitude = edge.abs().max(offset.abs());
            edge += 2.0 * (next_up(magnitude) - magnitude);
        }
        edge
    }

    /// Set the zoom directly, clamped to the configured range
    pub fn set_zoom(&mut self, zoom: f32, cols: u32, rows: u32) {
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        self.clamp_offset(cols, rows);
    }

    /// Change zoom by whole steps. With an anchor, the point under it stays
    /// put on screen (up to offset clamping).
    pub fn zoom_by(
        &mut self,
        steps: i32,
        anchor: Option<(f32, f32)>,
        cols: u32,
        rows: u32,
    ) -> bool {
        if steps == 0 {
            return false;
        }
        let target = self.zoom + steps as f32 * self.zoom_step;
        // Snap to the step grid so repeated steps don't drift
        let snapped = (target / self.zoom_step).round() * self.zoom_step;
        let zoom = snapped.clamp(self.zoom_min, self.zoom_max);
        if (zoom - self.zoom).abs() < f32::EPSILON {
            return false;
        }

        if let Some((ax, ay)) = anchor {
            let old_size = self.cell_size();
            let new_size = self.tile_size * zoom;
            let cell_x = (ax - self.offset_x) / old_size;
            let cell_y = (ay - self.offset_y) / old_size;
            self.offset_x = ax - cell_x * new_size;
            self.offset_y = ay - cell_y * new_size;
        }
        self.zoom = zoom;
        self.clamp_offset(cols, rows);
        true
    }

    pub fn zoom_in(&mut self, anchor: Option<(f32, f32)>, cols: u32, rows: u32) -> bool {
        self.zoom_by(1, anchor, cols, rows)
    }

    pub fn zoom_out(&mut self, anchor: Option<(f32, f32)>, cols: u32, rows: u32) -> bool {
        self.zoom_by(-1, anchor, cols, rows)
    }

    /// Move the grid by a screen-space delta
    pub fn pan(&mut self, dx: f32, dy: f32, cols: u32, rows: u32) {
        self.offset_x += dx;
        self.offset_y += dy;
        self.clamp_offset(cols, rows);
    }

    /// Put the grid's top-left corner back at the viewport origin
    pub fn reset_pan(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Keep at least `margin` pixels of the grid (or all of it, if smaller)
    /// inside the viewport on each axis
    pub fn clamp_offset(&mut self, cols: u32, rows: u32) {
        let size = self.cell_size();
        let (width, height) = (cols as f32 * size, rows as f32 * size);
        self.offset_x = clamp_axis(self.offset_x, width, self.viewport_width, self.margin);
        self.offset_y = clamp_axis(self.offset_y, height, self.viewport_height, self.margin);
    }
}

/// Smallest float greater than a finite non-negative `v`
fn next_up(v: f32) -> f32 {
    if v <= 0.0 {
        f32::from_bits(1)
    } else {
        f32::from_bits(v.to_bits() + 1)
    }
}

fn clamp_axis(offset: f32, extent: f32, viewport: f32, margin: f32) -> f32 {
    let visible = margin.min(extent).min(viewport);
    let min = visible - extent;
    let max = viewport - visible;
    offset.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_grid_floors() {
        let view = ViewTransform::default();
        assert_eq!(view.screen_to_grid(0.0, 0.0), CellPos::new(0, 0));
        assert_eq!(view.screen_to_grid(39.9, 79.9), CellPos::new(0, 1));
        assert_eq!(view.screen_to_grid(40.0, 80.0), CellPos::new(1, 2));
        assert_eq!(view.screen_to_grid(39.97, 0.0), CellPos::new(0, 0));
        assert_eq!(view.screen_to_grid(-1.0, -0.5), CellPos::new(-1, -1));
    }

    #[test]
    fn test_grid_to_screen_round_trips_at_all_zooms() {
        let mut view = ViewTransform::default();
        let (cols, rows) = (60, 45);
        view.pan(-137.3, -91.7, cols, rows);

        for _ in 0..30 {
            for gy in [0, 1, 7, 44] {
                for gx in [0, 3, 19, 59] {
                    let rect = view.grid_to_screen(gx, gy);
                    let (x, y) = rect.top_left();
                    assert_eq!(view.screen_to_grid(x, y), CellPos::new(gx, gy));
                    let (cx, cy) = rect.center();
                    assert_eq!(view.screen_to_grid(cx, cy), CellPos::new(gx, gy));
                }
            }
            view.zoom_in(Some((333.3, 222.2)), cols, rows);
        }
        assert!((view.zoom() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped_and_stepped() {
        let mut view = ViewTransform::default();
        for _ in 0..20 {
            view.zoom_out(None, 20, 15);
        }
        assert!((view.zoom() - 0.5).abs() < 1e-6);
        assert!(!view.zoom_out(None, 20, 15));

        view.zoom_in(None, 20, 15);
        assert!((view.zoom() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_keeps_anchor_stationary() {
        let mut view = ViewTransform::default();
        let (cols, rows) = (100, 100);
        let anchor = (410.0, 310.0);
        let before = view.screen_to_grid(anchor.0, anchor.1);

        view.zoom_in(Some(anchor), cols, rows);
        view.zoom_in(Some(anchor), cols, rows);

        assert_eq!(view.screen_to_grid(anchor.0, anchor.1), before);
        let (ox, oy) = view.offset();
        // The anchor sits at cell (10.25, 7.75) before and after
        assert!((ox - (410.0 - 10.25 * 48.0)).abs() < 1e-3);
        assert!((oy - (310.0 - 7.75 * 48.0)).abs() < 1e-3);
    }

    #[test]
    fn test_pan_keeps_margin_visible() {
        let mut view = ViewTransform::default();
        let (cols, rows) = (20, 15);

        view.pan(-10_000.0, -10_000.0, cols, rows);
        assert_eq!(view.offset(), (40.0 - 800.0, 40.0 - 600.0));

        view.pan(20_000.0, 20_000.0, cols, rows);
        assert_eq!(view.offset(), (800.0 - 40.0, 600.0 - 40.0));

        view.reset_pan();
        assert_eq!(view.offset(), (0.0, 0.0));
    }
}
