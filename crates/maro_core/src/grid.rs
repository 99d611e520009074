//! The rectangular tile grid

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Range;

use crate::{LevelError, TileCode};

/// A grid cell coordinate: `x` is the column, `y` the row
///
/// Coordinates are signed so that positions derived from the pointer can
/// lie outside the grid; every accessor bounds-checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this position by another, `None` if either coordinate overflows
    pub fn checked_offset(self, by: CellPos) -> Option<CellPos> {
        Some(CellPos::new(self.x.checked_add(by.x)?, self.y.checked_add(by.y)?))
    }
}

// Row-major so that iteration follows the grid's reading order
impl Ord for CellPos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for CellPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for CellPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Allowed range for both grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self { min: 5, max: 100 }
    }
}

impl GridLimits {
    pub fn contains(&self, cols: u32, rows: u32) -> bool {
        (self.min..=self.max).contains(&cols) && (self.min..=self.max).contains(&rows)
    }

    /// Reject dimensions outside the limits
    pub fn check(&self, cols: u32, rows: u32) -> Result<(), LevelError> {
        if self.contains(cols, rows) {
            Ok(())
        } else {
            Err(LevelError::DimensionsOutOfRange {
                cols,
                rows,
                limits: *self,
            })
        }
    }
}

/// A rows x cols array of tile codes, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<TileCode>,
}

impl Grid {
    /// Create a grid filled with the empty tile
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![TileCode::EMPTY; (cols * rows) as usize],
        }
    }

    /// Build a grid from rows of equal length
    pub fn from_rows(rows: Vec<Vec<TileCode>>) -> Result<Self, LevelError> {
        let expected = rows.first().map(Vec::len).ok_or(LevelError::EmptyGrid)?;
        if expected == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    found: tiles.len(),
                });
            }
            cells.extend_from_slice(tiles);
        }

        Ok(Self {
            cols: expected as u32,
            rows: rows.len() as u32,
            cells,
        })
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.cols && (y as u32) < self.rows
    }

    /// Columns and rows of a rectangle that fall inside the grid.
    ///
    /// The rectangle may start anywhere and extend past `i32`; either range
    /// is empty when there is no overlap.
    pub fn clip(&self, x: i64, y: i64, width: u32, height: u32) -> (Range<i32>, Range<i32>) {
        (clip_span(x, width, self.cols), clip_span(y, height, self.rows))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.cols as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the tile at a position, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<TileCode> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set the tile at a position, returning the previous tile.
    ///
    /// Out-of-bounds writes are ignored and return `None`.
    pub fn set(&mut self, x: i32, y: i32, tile: TileCode) -> Option<TileCode> {
        let index = self.index(x, y)?;
        Some(std::mem::replace(&mut self.cells[index], tile))
    }

    /// A single row, `None` when out of bounds
    pub fn row(&self, y: u32) -> Option<&[TileCode]> {
        if y >= self.rows {
            return None;
        }
        let start = (y * self.cols) as usize;
        Some(&self.cells[start..start + self.cols as usize])
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[TileCode]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }

    /// Iterate every cell with its position, in reading order
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, TileCode)> + '_ {
        let cols = self.cols.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, tile)| {
            (CellPos::new((i % cols) as i32, (i / cols) as i32), *tile)
        })
    }

    /// Copy into a grid of new dimensions, keeping the overlapping
    /// top-left region and filling the rest with the empty tile
    pub fn resized(&self, cols: u32, rows: u32) -> Grid {
        let mut grid = Grid::new(cols, rows);
        let keep_cols = self.cols.min(cols) as usize;
        for y in 0..self.rows.min(rows) {
            let src = (y * self.cols) as usize;
            let dst = (y * cols) as usize;
            grid.cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }
        grid
    }
}

fn clip_span(start: i64, len: u32, limit: u32) -> Range<i32> {
    let limit = i64::from(limit);
    let lo = start.clamp(0, limit);
    let hi = start.saturating_add(i64::from(len)).clamp(lo, limit);
    lo as i32..hi as i32
}
