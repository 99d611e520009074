//! Level: a tile grid plus the properties of its entity tiles

use std::collections::BTreeMap;

use crate::{BrushSize, CellPos, EntityProperties, Grid, GridLimits, LevelError, TileCode};

/// A level being edited
///
/// Every entity tile on the grid has exactly one properties record of the
/// matching kind, and every record sits on such a tile. All mutators keep
/// this association intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    grid: Grid,
    entities: BTreeMap<CellPos, EntityProperties>,
}

/// Tile and entity counts for a level
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelStats {
    pub cols: u32,
    pub rows: u32,
    pub tiles: BTreeMap<TileCode, usize>,
    pub entities: usize,
}

impl Level {
    /// Create a new empty level
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            entities: BTreeMap::new(),
        }
    }

    /// Create a new empty level, rejecting dimensions outside the limits
    pub fn with_limits(cols: u32, rows: u32, limits: &GridLimits) -> Result<Self, LevelError> {
        limits.check(cols, rows)?;
        Ok(Self::new(cols, rows))
    }

    /// Wrap a grid, giving every entity tile default properties
    pub fn from_grid(grid: Grid) -> Self {
        let entities = grid
            .iter()
            .filter_map(|(pos, tile)| EntityProperties::default_for_tile(tile).map(|p| (pos, p)))
            .collect();
        Self { grid, entities }
    }

    /// Combine a grid with explicit entity properties.
    ///
    /// Each record must lie inside the grid on a tile of its kind and hold
    /// in-range values. Entity tiles without a record get defaults.
    pub fn from_parts(
        grid: Grid,
        entities: impl IntoIterator<Item = (CellPos, EntityProperties)>,
    ) -> Result<Self, LevelError> {
        let mut level = Self::from_grid(grid);
        for (pos, props) in entities {
            level.check_properties(pos, &props)?;
            level.entities.insert(pos, props);
        }
        Ok(level)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Entity properties keyed by cell, in reading order
    #[inline]
    pub fn entities(&self) -> &BTreeMap<CellPos, EntityProperties> {
        &self.entities
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    /// Get the tile at a position, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<TileCode> {
        self.grid.get(x, y)
    }

    /// Get the entity properties at a position
    pub fn properties(&self, x: i32, y: i32) -> Option<&EntityProperties> {
        self.entities.get(&CellPos::new(x, y))
    }

    /// Set the tile at a position. Returns whether anything changed.
    ///
    /// Out-of-bounds writes are ignored. Overwriting with a non-entity tile
    /// drops the cell's properties; placing an entity tile keeps properties
    /// of the same kind and otherwise stores that kind's defaults.
    pub fn set(&mut self, x: i32, y: i32, tile: TileCode) -> bool {
        let Some(previous) = self.grid.set(x, y, tile) else {
            return false;
        };
        let pos = CellPos::new(x, y);

        match tile.entity_kind() {
            Some(kind) => {
                let keep = self.entities.get(&pos).is_some_and(|p| p.kind() == kind);
                if !keep {
                    self.entities.insert(pos, EntityProperties::default_for(kind));
                }
            }
            None => {
                self.entities.remove(&pos);
            }
        }

        previous != tile
    }

    /// Place an entity tile with explicit properties. Returns whether
    /// anything changed; out-of-bounds placement is ignored.
    pub fn place_entity(&mut self, x: i32, y: i32, props: EntityProperties) -> bool {
        let Some(previous) = self.grid.set(x, y, props.tile_code()) else {
            return false;
        };
        let old = self.entities.insert(CellPos::new(x, y), props);
        previous != props.tile_code() || old != Some(props)
    }

    /// Replace the properties of an existing entity tile
    pub fn set_properties(
        &mut self,
        x: i32,
        y: i32,
        props: EntityProperties,
    ) -> Result<(), LevelError> {
        let pos = CellPos::new(x, y);
        self.check_properties(pos, &props)?;
        self.entities.insert(pos, props);
        Ok(())
    }

    fn check_properties(&self, pos: CellPos, props: &EntityProperties) -> Result<(), LevelError> {
        let (x, y) = (pos.x, pos.y);
        let tile = self
            .grid
            .get(x, y)
            .ok_or(LevelError::EntityOutOfBounds { x, y })?;
        if tile != props.tile_code() {
            return Err(LevelError::EntityTileMismatch { x, y, tile });
        }
        props
            .validate()
            .map_err(|source| LevelError::InvalidProperties { x, y, source })
    }

    /// Apply `set` to every cell of a square brush centred at (cx, cy).
    ///
    /// Cells outside the grid are skipped. Returns the number of cells
    /// that changed.
    pub fn paint_brush(&mut self, cx: i32, cy: i32, tile: TileCode, brush: BrushSize) -> usize {
        let radius = i64::from(brush.radius());
        let side = brush.side();
        self.fill_clipped(i64::from(cx) - radius, i64::from(cy) - radius, side, side, tile)
    }

    /// Set every in-bounds cell of a rectangle to one tile
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, tile: TileCode) -> usize {
        self.fill_clipped(i64::from(x), i64::from(y), width, height, tile)
    }

    fn fill_clipped(&mut self, x: i64, y: i64, width: u32, height: u32, tile: TileCode) -> usize {
        let (xs, ys) = self.grid.clip(x, y, width, height);
        let mut changed = 0;
        for cy in ys {
            for cx in xs.clone() {
                if self.set(cx, cy, tile) {
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Resize the level, keeping the overlapping top-left region.
    ///
    /// Dimensions outside the limits are rejected and the level is left
    /// untouched. Properties of cells outside the new bounds are dropped.
    pub fn resize(&mut self, cols: u32, rows: u32, limits: &GridLimits) -> Result<(), LevelError> {
        limits.check(cols, rows)?;
        let grid = self.grid.resized(cols, rows);
        self.entities.retain(|pos, _| grid.in_bounds(pos.x, pos.y));
        self.grid = grid;
        Ok(())
    }

    /// Tile and entity counts
    pub fn stats(&self) -> LevelStats {
        let mut tiles = BTreeMap::new();
        for (_, tile) in self.grid.iter() {
            *tiles.entry(tile).or_insert(0) += 1;
        }
        LevelStats {
            cols: self.cols(),
            rows: self.rows(),
            tiles,
            entities: self.entities.len(),
        }
    }
}
