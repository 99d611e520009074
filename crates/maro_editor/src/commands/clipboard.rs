//! Rectangular region capture and copy/paste

use log::debug;
use maro_core::{CellPos, EntityProperties, Level, TileCode};
use std::collections::BTreeMap;

/// A rectangle of grid cells, inclusive of both defining corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl RegionRect {
    /// Normalize two opposite corners into a rectangle
    pub fn from_corners(a: CellPos, b: CellPos) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x).saturating_add(1),
            height: a.y.abs_diff(b.y).saturating_add(1),
        }
    }

    /// The whole grid of a level
    pub fn full(level: &Level) -> Self {
        Self {
            x: 0,
            y: 0,
            width: level.cols(),
            height: level.rows(),
        }
    }

    pub fn origin(&self) -> CellPos {
        CellPos::new(self.x, self.y)
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.x) + i64::from(self.width)
            && y < i64::from(self.y) + i64::from(self.height)
    }
}

/// A captured rectangle of tiles plus the entities inside it
///
/// Only the part of the rectangle that overlapped the grid is stored;
/// every other cell of the region reads as the empty tile.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardRegion {
    width: u32,
    height: u32,
    /// Top-left of the stored part, relative to the region's top-left cell
    offset: (u32, u32),
    stored_width: u32,
    stored_height: u32,
    tiles: Vec<TileCode>,
    /// Entity properties keyed relative to the stored part's top-left cell
    entities: BTreeMap<CellPos, EntityProperties>,
}

impl ClipboardRegion {
    /// Read a rectangle from a level
    pub fn capture(level: &Level, rect: RegionRect) -> Self {
        let (xs, ys) = level
            .grid()
            .clip(i64::from(rect.x), i64::from(rect.y), rect.width, rect.height);
        let (xs, ys) = if xs.is_empty() || ys.is_empty() {
            (0..0, 0..0)
        } else {
            (xs, ys)
        };
        let offset = (
            (i64::from(xs.start) - i64::from(rect.x)).max(0) as u32,
            (i64::from(ys.start) - i64::from(rect.y)).max(0) as u32,
        );

        let mut tiles = Vec::with_capacity(xs.len() * ys.len());
        for y in ys.clone() {
            for x in xs.clone() {
                tiles.push(level.get(x, y).unwrap_or(TileCode::EMPTY));
            }
        }

        let entities = level
            .entities()
            .iter()
            .filter(|(pos, _)| xs.contains(&pos.x) && ys.contains(&pos.y))
            .map(|(pos, props)| (CellPos::new(pos.x - xs.start, pos.y - ys.start), *props))
            .collect();

        Self {
            width: rect.width,
            height: rect.height,
            offset,
            stored_width: xs.len() as u32,
            stored_height: ys.len() as u32,
            tiles,
            entities,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Position inside the stored part for a region-local cell
    fn stored_pos(&self, x: u32, y: u32) -> Option<CellPos> {
        let sx = i64::from(x) - i64::from(self.offset.0);
        let sy = i64::from(y) - i64::from(self.offset.1);
        let inside = (0..i64::from(self.stored_width)).contains(&sx)
            && (0..i64::from(self.stored_height)).contains(&sy);
        inside.then_some(CellPos::new(sx as i32, sy as i32))
    }

    /// Tile at a region-local position
    pub fn get(&self, x: u32, y: u32) -> Option<TileCode> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let tile = self.stored_pos(x, y).map_or(TileCode::EMPTY, |pos| {
            self.tiles[pos.y as usize * self.stored_width as usize + pos.x as usize]
        });
        Some(tile)
    }

    /// Entity properties at a region-local position
    pub fn entity_at(&self, x: u32, y: u32) -> Option<&EntityProperties> {
        self.entities.get(&self.stored_pos(x, y)?)
    }

    /// Number of entities in the region
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Write the region into a level with its top-left cell at `dest`.
    ///
    /// Cells landing outside the grid are skipped. Returns the number of
    /// cells that changed.
    pub fn paste_into(&self, level: &mut Level, dest: CellPos) -> usize {
        let (dx, dy) = (i64::from(dest.x), i64::from(dest.y));
        let (xs, ys) = level.grid().clip(dx, dy, self.width, self.height);
        let mut changed = 0;
        for ty in ys {
            for tx in xs.clone() {
                let (lx, ly) = ((i64::from(tx) - dx) as u32, (i64::from(ty) - dy) as u32);
                let written = match self.entity_at(lx, ly) {
                    Some(props) => level.place_entity(tx, ty, *props),
                    None => {
                        let tile = self.get(lx, ly).unwrap_or(TileCode::EMPTY);
                        level.set(tx, ty, tile)
                    }
                };
                if written {
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// Progress of a two-click region capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing { anchor: CellPos },
}

/// Holds at most one copied region and the capture in progress
#[derive(Debug, Clone, Default)]
pub struct TileClipboard {
    region: Option<ClipboardRegion>,
    capture: CaptureState,
}

impl TileClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.capture, CaptureState::Capturing { .. })
    }

    /// First click: remember the anchor corner, replacing any capture in progress
    pub fn begin_capture(&mut self, anchor: CellPos) {
        self.capture = CaptureState::Capturing { anchor };
    }

    /// Second click: finish the capture and return the normalized rectangle.
    ///
    /// Returns `None` when no capture was in progress.
    pub fn complete_capture(&mut self, opposite: CellPos) -> Option<RegionRect> {
        match std::mem::take(&mut self.capture) {
            CaptureState::Capturing { anchor } => Some(RegionRect::from_corners(anchor, opposite)),
            CaptureState::Idle => None,
        }
    }

    /// Abort a capture without producing a region. Returns whether one was
    /// in progress.
    pub fn cancel_capture(&mut self) -> bool {
        std::mem::take(&mut self.capture) != CaptureState::Idle
    }

    /// Copy a rectangle from the level, replacing the stored region
    pub fn copy(&mut self, level: &Level, rect: RegionRect) -> &ClipboardRegion {
        debug!(
            "Copied {}x{} region at ({}, {})",
            rect.width, rect.height, rect.x, rect.y
        );
        self.region.insert(ClipboardRegion::capture(level, rect))
    }

    pub fn has_content(&self) -> bool {
        self.region.is_some()
    }

    pub fn content(&self) -> Option<&ClipboardRegion> {
        self.region.as_ref()
    }

    /// Paste the stored region at `dest`. An empty clipboard changes nothing.
    pub fn paste(&self, level: &mut Level, dest: CellPos) -> usize {
        self.region
            .as_ref()
            .map_or(0, |region| region.paste_into(level, dest))
    }

    pub fn clear(&mut self) {
        self.region = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> Level {
        let mut level = Level::new(6, 6);
        level.fill_rect(0, 5, 6, 1, TileCode::GROUND);
        level.place_entity(1, 1, EntityProperties::enemy(50, 1.0));
        level.place_entity(2, 2, EntityProperties::coin(9));
        level.set(3, 1, TileCode::SPIKE);
        level
    }

    #[test]
    fn test_rect_from_corners_is_normalized() {
        let rect = RegionRect::from_corners(CellPos::new(4, 1), CellPos::new(2, 3));
        assert_eq!(
            rect,
            RegionRect {
                x: 2,
                y: 1,
                width: 3,
                height: 3
            }
        );
        let single = RegionRect::from_corners(CellPos::new(2, 2), CellPos::new(2, 2));
        assert_eq!((single.width, single.height), (1, 1));
    }

    #[test]
    fn test_capture_rebases_entities() {
        let level = sample_level();
        let region = ClipboardRegion::capture(
            &level,
            RegionRect::from_corners(CellPos::new(1, 1), CellPos::new(3, 2)),
        );
        assert_eq!(region.width(), 3);
        assert_eq!(region.height(), 2);
        assert_eq!(region.get(0, 0), Some(TileCode::ENEMY));
        assert_eq!(region.get(2, 0), Some(TileCode::SPIKE));
        assert_eq!(
            region.entity_at(0, 0),
            Some(&EntityProperties::enemy(50, 1.0))
        );
        assert_eq!(
            region.entity_at(1, 1),
            Some(&EntityProperties::coin(9))
        );
    }

    #[test]
    fn test_capture_outside_grid_is_empty() {
        let level = sample_level();
        let region = ClipboardRegion::capture(
            &level,
            RegionRect::from_corners(CellPos::new(4, 4), CellPos::new(7, 7)),
        );
        assert_eq!(region.get(1, 1), Some(TileCode::GROUND));
        assert_eq!(region.get(3, 3), Some(TileCode::EMPTY));
    }

    #[test]
    fn test_capture_far_outside_grid_stores_overlap_only() {
        let level = sample_level();
        let rect =
            RegionRect::from_corners(CellPos::new(-70000, -70000), CellPos::new(70000, 70000));
        assert_eq!((rect.width, rect.height), (140001, 140001));

        let region = ClipboardRegion::capture(&level, rect);
        assert_eq!(region.tiles.len(), 36);
        assert_eq!(region.entity_count(), 2);
        assert_eq!(region.get(70001, 70001), Some(TileCode::ENEMY));
        assert_eq!(region.entity_at(70001, 70001), Some(&EntityProperties::enemy(50, 1.0)));
        assert_eq!(region.get(0, 0), Some(TileCode::EMPTY));
        assert_eq!(region.get(140001, 0), None);

        let whole = RegionRect::from_corners(
            CellPos::new(i32::MIN, i32::MIN),
            CellPos::new(i32::MAX, i32::MAX),
        );
        assert_eq!(whole.width, u32::MAX);
        assert!(whole.contains(CellPos::new(i32::MAX - 1, 0)));
        let region = ClipboardRegion::capture(&level, whole);
        assert_eq!(region.tiles.len(), 36);

        let far =
            RegionRect::from_corners(CellPos::new(i32::MAX, 0), CellPos::new(i32::MAX - 3, 3));
        let region = ClipboardRegion::capture(&level, far);
        assert!(region.tiles.is_empty());
        assert_eq!(region.get(2, 2), Some(TileCode::EMPTY));
    }

    #[test]
    fn test_paste_at_extreme_destination_is_clipped() {
        let mut level = sample_level();
        let before = level.clone();
        let mut clipboard = TileClipboard::new();
        clipboard.copy(&level, RegionRect::from_corners(CellPos::new(0, 0), CellPos::new(2, 2)));

        for dest in [(i32::MAX, 0), (0, i32::MAX), (i32::MIN, i32::MIN), (i32::MAX, i32::MAX)] {
            assert_eq!(clipboard.paste(&mut level, CellPos::from(dest)), 0);
        }
        assert_eq!(level, before);

        // Only the bottom-right cell of the region lands on the grid
        assert_eq!(clipboard.paste(&mut level, CellPos::new(-2, -2)), 1);
        assert_eq!(level.get(0, 0), Some(TileCode::COIN));
        assert_eq!(level.properties(0, 0), Some(&EntityProperties::coin(9)));
    }

    #[test]
    fn test_paste_at_own_origin_is_idempotent() {
        let mut level = sample_level();
        let before = level.clone();
        let mut clipboard = TileClipboard::new();
        let rect = RegionRect::from_corners(CellPos::new(0, 0), CellPos::new(4, 5));

        clipboard.copy(&level, rect);
        assert_eq!(clipboard.paste(&mut level, rect.origin()), 0);
        assert_eq!(level, before);
    }

    #[test]
    fn test_paste_clips_to_grid() {
        let mut level = Level::new(6, 6);
        level.fill_rect(0, 0, 3, 3, TileCode::GROUND);
        let mut clipboard = TileClipboard::new();
        clipboard.copy(&level, RegionRect::from_corners(CellPos::new(0, 0), CellPos::new(2, 2)));

        let changed = clipboard.paste(&mut level, CellPos::new(5, 5));
        assert_eq!(changed, 1);
        assert_eq!(level.get(5, 5), Some(TileCode::GROUND));
        assert_eq!(level.get(4, 4), Some(TileCode::EMPTY));
    }

    #[test]
    fn test_paste_moves_entities_and_clears_overwritten() {
        let mut level = sample_level();
        let mut clipboard = TileClipboard::new();
        // Copy the spike and the empty cell beside it
        clipboard.copy(&level, RegionRect::from_corners(CellPos::new(3, 1), CellPos::new(4, 1)));
        clipboard.paste(&mut level, CellPos::new(1, 1));
        assert_eq!(level.get(1, 1), Some(TileCode::SPIKE));
        assert_eq!(level.properties(1, 1), None);

        clipboard.copy(&level, RegionRect::from_corners(CellPos::new(2, 2), CellPos::new(2, 2)));
        clipboard.paste(&mut level, CellPos::new(4, 3));
        assert_eq!(level.properties(4, 3), Some(&EntityProperties::coin(9)));
        assert_eq!(level.properties(2, 2), Some(&EntityProperties::coin(9)));
    }

    #[test]
    fn test_empty_clipboard_paste_is_noop() {
        let mut level = sample_level();
        let before = level.clone();
        let clipboard = TileClipboard::new();
        assert_eq!(clipboard.paste(&mut level, CellPos::new(0, 0)), 0);
        assert_eq!(level, before);
    }

    #[test]
    fn test_capture_state_machine() {
        let mut clipboard = TileClipboard::new();
        assert_eq!(clipboard.complete_capture(CellPos::new(1, 1)), None);

        clipboard.begin_capture(CellPos::new(3, 3));
        assert!(clipboard.is_capturing());
        assert!(clipboard.cancel_capture());
        assert_eq!(clipboard.capture_state(), CaptureState::Idle);
        assert!(!clipboard.cancel_capture());

        clipboard.begin_capture(CellPos::new(3, 3));
        let rect = clipboard.complete_capture(CellPos::new(1, 2)).unwrap();
        assert_eq!(rect.origin(), CellPos::new(1, 2));
        assert!(!clipboard.is_capturing());
    }

    #[test]
    fn test_new_copy_replaces_region() {
        let level = sample_level();
        let mut clipboard = TileClipboard::new();
        clipboard.copy(&level, RegionRect::from_corners(CellPos::new(0, 0), CellPos::new(1, 1)));
        clipboard.copy(&level, RegionRect::from_corners(CellPos::new(0, 5), CellPos::new(0, 5)));
        let region = clipboard.content().unwrap();
        assert_eq!((region.width(), region.height()), (1, 1));
        assert_eq!(region.get(0, 0), Some(TileCode::GROUND));
    }
}
