//! Editor tools - painting strokes and region capture
//!
//! A stroke covers everything painted between pointer press and release.
//! It is recorded as a single undo step.

use maro_core::{CellPos, Level, TileCode};

/// What a primary click does in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    /// Paint the selected tile with the current brush
    #[default]
    Paint,
    /// Paint the empty tile with the current brush
    Erase,
    /// Two clicks select a rectangle and copy it
    Capture,
}

impl EditorTool {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::Paint => "Paint",
            EditorTool::Erase => "Erase",
            EditorTool::Capture => "Copy Region",
        }
    }

    /// Returns all tools for UI enumeration
    pub fn all() -> &'static [EditorTool] {
        &[EditorTool::Paint, EditorTool::Erase, EditorTool::Capture]
    }
}

/// Tracks a paint stroke for undo support
#[derive(Debug, Clone, Default)]
pub struct PaintStroke {
    /// Tile being painted during this stroke
    tile: Option<TileCode>,
    /// Last cell painted, for line interpolation during drag
    last_cell: Option<CellPos>,
    /// Level state before the stroke started
    snapshot: Option<Level>,
    /// Number of cell changes made during this stroke
    changes: usize,
}

impl PaintStroke {
    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Start a stroke, remembering the pre-stroke level
    pub fn begin(&mut self, level: &Level, tile: TileCode, at: CellPos) {
        self.tile = Some(tile);
        self.last_cell = Some(at);
        self.snapshot = Some(level.clone());
        self.changes = 0;
    }

    pub fn tile(&self) -> Option<TileCode> {
        self.tile
    }

    pub fn last_cell(&self) -> Option<CellPos> {
        self.last_cell
    }

    /// Cells between the last painted cell and `to`, excluding the former
    pub fn advance(&mut self, to: CellPos) -> Vec<CellPos> {
        let cells = match self.last_cell {
            Some(from) if from == to => Vec::new(),
            Some(from) => bresenham_line(from.x, from.y, to.x, to.y)
                .into_iter()
                .skip(1)
                .map(CellPos::from)
                .collect(),
            None => vec![to],
        };
        self.last_cell = Some(to);
        cells
    }

    pub fn record_changes(&mut self, count: usize) {
        self.changes += count;
    }

    /// End the stroke. Returns the pre-stroke level if anything changed.
    pub fn finish(&mut self) -> Option<Level> {
        let snapshot = self.snapshot.take();
        let changed = self.changes > 0;
        self.tile = None;
        self.last_cell = None;
        self.changes = 0;
        snapshot.filter(|_| changed)
    }
}

/// Bresenham's line algorithm - generates all tile coordinates along a line
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        points.push((x, y));

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bresenham_endpoints_and_continuity() {
        let points = bresenham_line(0, 0, 5, 2);
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(5, 2)));
        assert_eq!(points.len(), 6);
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
        }
        assert_eq!(bresenham_line(2, 2, 2, 2), vec![(2, 2)]);
    }

    #[test]
    fn test_stroke_advance_skips_previous_cell() {
        let level = Level::new(10, 10);
        let mut stroke = PaintStroke::default();
        stroke.begin(&level, TileCode::GROUND, CellPos::new(0, 0));

        assert_eq!(
            stroke.advance(CellPos::new(3, 0)),
            vec![CellPos::new(1, 0), CellPos::new(2, 0), CellPos::new(3, 0)]
        );
        assert!(stroke.advance(CellPos::new(3, 0)).is_empty());
        assert_eq!(stroke.last_cell(), Some(CellPos::new(3, 0)));
    }

    #[test]
    fn test_stroke_without_changes_yields_nothing() {
        let level = Level::new(10, 10);
        let mut stroke = PaintStroke::default();
        stroke.begin(&level, TileCode::GROUND, CellPos::new(0, 0));
        assert!(stroke.is_active());
        assert!(stroke.finish().is_none());
        assert!(!stroke.is_active());

        stroke.begin(&level, TileCode::GROUND, CellPos::new(0, 0));
        stroke.record_changes(3);
        assert_eq!(stroke.finish(), Some(level));
    }
}
