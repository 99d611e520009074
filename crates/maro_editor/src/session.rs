//! Editor session: the level being edited plus everything that acts on it
//!
//! All mutation entry points take a history checkpoint on their own, once
//! per logical action. An action that ends up changing nothing records no
//! undo step.

use log::{debug, info, warn};
use maro_core::{
    load_level, save_level, BrushSize, CellPos, EntityProperties, Level, LevelError, TileCode,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::commands::{EditHistory, PendingAction, RegionRect, TileClipboard};
use crate::config::EditorConfig;
use crate::tools::{EditorTool, PaintStroke};
use crate::view::ViewTransform;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("No file path set")]
    NoPath,
    #[error("no entity at ({x},{y})")]
    NoEntity { x: i32, y: i32 },
}

/// A single editing session
#[derive(Debug, Clone)]
pub struct EditorSession {
    level: Level,
    history: EditHistory,
    clipboard: TileClipboard,
    view: ViewTransform,
    stroke: PaintStroke,
    config: EditorConfig,
    /// Last completed capture rectangle
    selection: Option<RegionRect>,
    current_tile: TileCode,
    brush: BrushSize,
    tool: EditorTool,
    dirty: bool,
    path: Option<PathBuf>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Start a session with a blank level of the configured default size
    pub fn new(config: EditorConfig) -> Self {
        let limits = config.limits;
        let cols = config.default_cols.max(limits.min).min(limits.max);
        let rows = config.default_rows.max(limits.min).min(limits.max);
        Self {
            level: Level::new(cols, rows),
            history: EditHistory::new(config.history_capacity),
            clipboard: TileClipboard::new(),
            view: ViewTransform::from_config(&config),
            stroke: PaintStroke::default(),
            selection: None,
            current_tile: TileCode::GROUND,
            brush: config.default_brush,
            tool: EditorTool::default(),
            dirty: false,
            path: None,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The level being edited, for drawing
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// An owned copy of the level, safe to hand to background I/O
    pub fn snapshot(&self) -> Level {
        self.level.clone()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn clipboard(&self) -> &TileClipboard {
        &self.clipboard
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn selection(&self) -> Option<RegionRect> {
        self.selection
    }

    pub fn current_tile(&self) -> TileCode {
        self.current_tile
    }

    pub fn brush(&self) -> BrushSize {
        self.brush
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ------------------------------------------------------------------
    // Tool state
    // ------------------------------------------------------------------

    pub fn select_tile(&mut self, tile: TileCode) {
        self.current_tile = tile;
    }

    pub fn set_brush(&mut self, brush: BrushSize) {
        self.brush = brush;
    }

    pub fn cycle_brush(&mut self) -> BrushSize {
        self.brush = self.brush.next();
        self.brush
    }

    pub fn set_tool(&mut self, tool: EditorTool) {
        if tool != EditorTool::Capture {
            self.clipboard.cancel_capture();
        }
        self.tool = tool;
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Run one logical mutation, recording an undo step if it changed the level
    fn edit<R>(&mut self, action: &str, f: impl FnOnce(&mut Level) -> R) -> R {
        self.finish_stroke();
        let before = self.level.clone();
        let result = f(&mut self.level);
        if self.level != before {
            self.history.push_snapshot(before);
            self.dirty = true;
            debug!("{} (undo depth {})", action, self.history.undo_depth());
        }
        result
    }

    /// Paint the current tile with the current brush centred at a cell
    pub fn paint(&mut self, x: i32, y: i32) -> bool {
        let (tile, brush) = (self.current_tile, self.brush);
        self.edit("Paint", |level| level.paint_brush(x, y, tile, brush) > 0)
    }

    /// Erase with the current brush centred at a cell
    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        let brush = self.brush;
        self.edit("Erase", |level| level.paint_brush(x, y, TileCode::EMPTY, brush) > 0)
    }

    /// Paint at a screen position, ignoring positions off the grid
    pub fn paint_at_screen(&mut self, px: f32, py: f32) -> bool {
        let cell = self.view.screen_to_grid(px, py);
        self.level.in_bounds(cell.x, cell.y) && self.paint(cell.x, cell.y)
    }

    /// Erase at a screen position, ignoring positions off the grid
    pub fn erase_at_screen(&mut self, px: f32, py: f32) -> bool {
        let cell = self.view.screen_to_grid(px, py);
        self.level.in_bounds(cell.x, cell.y) && self.erase(cell.x, cell.y)
    }

    /// Start a drag stroke painting the current tile
    pub fn begin_paint_stroke(&mut self, x: i32, y: i32) {
        let tile = self.current_tile;
        self.begin_stroke(x, y, tile);
    }

    /// Start a drag stroke painting the empty tile
    pub fn begin_erase_stroke(&mut self, x: i32, y: i32) {
        self.begin_stroke(x, y, TileCode::EMPTY);
    }

    fn begin_stroke(&mut self, x: i32, y: i32, tile: TileCode) {
        self.finish_stroke();
        let at = CellPos::new(x, y);
        self.stroke.begin(&self.level, tile, at);
        let changed = self.level.paint_brush(x, y, tile, self.brush);
        self.stroke.record_changes(changed);
    }

    /// Extend the active stroke to a cell, filling the cells in between
    pub fn stroke_to(&mut self, x: i32, y: i32) {
        let Some(tile) = self.stroke.tile() else {
            return;
        };
        for cell in self.stroke.advance(CellPos::new(x, y)) {
            let changed = self.level.paint_brush(cell.x, cell.y, tile, self.brush);
            self.stroke.record_changes(changed);
        }
    }

    /// Finish the active stroke. Returns whether it recorded an undo step.
    pub fn end_stroke(&mut self) -> bool {
        self.finish_stroke()
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_active()
    }

    fn finish_stroke(&mut self) -> bool {
        match self.stroke.finish() {
            Some(before) => {
                self.history.push_snapshot(before);
                self.dirty = true;
                debug!("Paint stroke (undo depth {})", self.history.undo_depth());
                true
            }
            None => false,
        }
    }

    /// Place an entity tile with explicit properties
    pub fn place_entity(
        &mut self,
        x: i32,
        y: i32,
        props: EntityProperties,
    ) -> Result<bool, EditorError> {
        props.validate().map_err(|source| LevelError::InvalidProperties { x, y, source })?;
        Ok(self.edit("Place entity", |level| level.place_entity(x, y, props)))
    }

    /// Replace the properties of an existing entity tile
    pub fn set_entity_properties(
        &mut self,
        x: i32,
        y: i32,
        props: EntityProperties,
    ) -> Result<(), EditorError> {
        self.edit("Edit entity", |level| level.set_properties(x, y, props))?;
        Ok(())
    }

    /// Apply one field edit from a property dialog, given as text
    pub fn edit_entity_field(
        &mut self,
        x: i32,
        y: i32,
        field: &str,
        text: &str,
    ) -> Result<(), EditorError> {
        let mut props = *self
            .level
            .properties(x, y)
            .ok_or(EditorError::NoEntity { x, y })?;
        props
            .set_field(field, text)
            .map_err(|source| LevelError::InvalidProperties { x, y, source })?;
        self.set_entity_properties(x, y, props)
    }

    /// Resize the level. Out-of-range sizes are rejected without changes.
    pub fn resize(&mut self, cols: u32, rows: u32) -> Result<(), EditorError> {
        let limits = self.config.limits;
        if let Err(e) = limits.check(cols, rows) {
            warn!("Rejected resize: {}", e);
            return Err(e.into());
        }
        self.edit("Resize", |level| level.resize(cols, rows, &limits))?;
        self.selection = None;
        self.view.reset_pan();
        self.view.clamp_offset(cols, rows);
        info!("Resized level to {}x{}", cols, rows);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.finish_stroke();
        let undone = self.history.undo(&mut self.level);
        if undone {
            self.dirty = true;
            self.clamp_view();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.finish_stroke();
        let redone = self.history.redo(&mut self.level);
        if redone {
            self.dirty = true;
            self.clamp_view();
        }
        redone
    }

    // ------------------------------------------------------------------
    // Region capture and clipboard
    // ------------------------------------------------------------------

    /// First capture click
    pub fn begin_capture(&mut self, x: i32, y: i32) {
        self.clipboard.begin_capture(CellPos::new(x, y));
    }

    /// Second capture click: select the rectangle and copy it
    pub fn complete_capture(&mut self, x: i32, y: i32) -> Option<RegionRect> {
        let rect = self.clipboard.complete_capture(CellPos::new(x, y))?;
        self.copy(rect);
        Some(rect)
    }

    /// Abort a capture in progress
    pub fn cancel_capture(&mut self) -> bool {
        self.clipboard.cancel_capture()
    }

    /// Copy a rectangle into the clipboard and make it the selection
    pub fn copy(&mut self, rect: RegionRect) {
        self.clipboard.copy(&self.level, rect);
        self.selection = Some(rect);
    }

    /// Copy a rectangle, then clear it to the empty tile as one undo step
    pub fn cut(&mut self, rect: RegionRect) -> bool {
        self.copy(rect);
        self.edit("Cut", |level| {
            level.fill_rect(rect.x, rect.y, rect.width, rect.height, TileCode::EMPTY) > 0
        })
    }

    /// Paste the clipboard with its top-left cell at `(x, y)`
    pub fn paste(&mut self, x: i32, y: i32) -> bool {
        if !self.clipboard.has_content() {
            return false;
        }
        self.finish_stroke();
        let before = self.level.clone();
        let changed = self.clipboard.paste(&mut self.level, CellPos::new(x, y)) > 0;
        if changed {
            self.history.push_snapshot(before);
            self.dirty = true;
            debug!("Paste at ({}, {})", x, y);
        }
        changed
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    pub fn zoom_in(&mut self, anchor: Option<(f32, f32)>) -> bool {
        self.view.zoom_in(anchor, self.level.cols(), self.level.rows())
    }

    pub fn zoom_out(&mut self, anchor: Option<(f32, f32)>) -> bool {
        self.view.zoom_out(anchor, self.level.cols(), self.level.rows())
    }

    /// Zoom by whole steps (positive zooms in), anchored at a screen point
    pub fn zoom_by(&mut self, steps: i32, anchor: Option<(f32, f32)>) -> bool {
        self.view.zoom_by(steps, anchor, self.level.cols(), self.level.rows())
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.view.pan(dx, dy, self.level.cols(), self.level.rows());
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.view
            .set_viewport(width, height, self.level.cols(), self.level.rows());
    }

    /// Cell under a screen position (may be outside the grid)
    pub fn cell_at(&self, px: f32, py: f32) -> CellPos {
        self.view.screen_to_grid(px, py)
    }

    fn clamp_view(&mut self) {
        self.view.clamp_offset(self.level.cols(), self.level.rows());
    }

    // ------------------------------------------------------------------
    // Whole-level operations
    // ------------------------------------------------------------------

    /// Swap in a new level. History is cleared: the previous content cannot
    /// be reached by undo.
    pub fn replace_level(&mut self, level: Level) {
        self.stroke = PaintStroke::default();
        self.clipboard.cancel_capture();
        self.level = level;
        self.history.clear();
        self.selection = None;
        self.dirty = false;
        self.view.reset_pan();
        self.clamp_view();
    }

    /// Start over with a blank level
    pub fn new_level(&mut self, cols: u32, rows: u32) -> Result<(), EditorError> {
        let level = Level::with_limits(cols, rows, &self.config.limits)?;
        self.replace_level(level);
        self.path = None;
        Ok(())
    }

    /// Load a level file. On failure the current session is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<(), EditorError> {
        let level = load_level(path, &self.config.limits)?;
        self.replace_level(level);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to a file and make it the current path
    pub fn save_as(&mut self, path: &Path) -> Result<(), EditorError> {
        save_level(path, &self.level)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to the current path if set
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.path.clone().ok_or(EditorError::NoPath)?;
        self.save_as(&path)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Dispatch a discrete action. `cursor` is the cell under the pointer,
    /// used as the paste destination. Returns whether anything happened.
    pub fn apply_action(
        &mut self,
        action: PendingAction,
        cursor: Option<CellPos>,
        anchor: Option<(f32, f32)>,
    ) -> Result<bool, EditorError> {
        let handled = match action {
            PendingAction::Undo => self.undo(),
            PendingAction::Redo => self.redo(),
            PendingAction::Copy => match self.selection {
                Some(rect) => {
                    self.copy(rect);
                    true
                }
                None => false,
            },
            PendingAction::Cut => match self.selection {
                Some(rect) => self.cut(rect),
                None => false,
            },
            PendingAction::Paste => match cursor {
                Some(cell) => self.paste(cell.x, cell.y),
                None => false,
            },
            PendingAction::Save => {
                self.save()?;
                true
            }
            PendingAction::CancelCapture => self.cancel_capture(),
            PendingAction::CycleBrush => {
                self.cycle_brush();
                true
            }
            PendingAction::ZoomIn => self.zoom_in(anchor),
            PendingAction::ZoomOut => self.zoom_out(anchor),
            PendingAction::SelectTile(tile) => {
                self.select_tile(tile);
                true
            }
            PendingAction::SelectTool(tool) => {
                self.set_tool(tool);
                true
            }
        };
        Ok(handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maro_core::GridLimits;

    fn small_session(cols: u32, rows: u32) -> EditorSession {
        EditorSession::new(EditorConfig {
            limits: GridLimits { min: 1, max: 100 },
            default_cols: cols,
            default_rows: rows,
            ..Default::default()
        })
    }

    fn all_tiles(session: &EditorSession) -> Vec<TileCode> {
        session.level().grid().iter().map(|(_, tile)| tile).collect()
    }

    #[test]
    fn test_brush_paint_is_one_undo_step() {
        let mut session = small_session(3, 3);
        session.select_tile(TileCode::GROUND);
        session.set_brush(BrushSize::Three);

        assert!(session.paint(1, 1));
        assert!(all_tiles(&session).iter().all(|t| *t == TileCode::GROUND));
        assert_eq!(session.history().undo_depth(), 1);

        assert!(session.undo());
        assert!(all_tiles(&session).iter().all(|t| *t == TileCode::EMPTY));
        assert!(session.redo());
        assert!(all_tiles(&session).iter().all(|t| *t == TileCode::GROUND));
    }

    #[test]
    fn test_noop_edit_records_nothing() {
        let mut session = small_session(5, 5);
        session.select_tile(TileCode::EMPTY);
        assert!(!session.paint(2, 2));
        assert!(!session.paint(-3, 9));
        assert!(!session.history().can_undo());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_history_keeps_last_twenty_steps() {
        let mut session = small_session(30, 1);
        session.select_tile(TileCode::GROUND);
        for x in 0..25 {
            session.paint(x, 0);
        }
        assert_eq!(session.history().undo_depth(), 20);

        while session.undo() {}
        // The first five paints fell off the bottom of the history
        assert_eq!(session.level().get(4, 0), Some(TileCode::GROUND));
        assert_eq!(session.level().get(5, 0), Some(TileCode::EMPTY));
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut session = small_session(5, 5);
        session.select_tile(TileCode::SPIKE);
        session.paint(0, 0);
        session.paint(1, 0);
        session.undo();
        assert!(session.history().can_redo());

        session.paint(2, 0);
        assert!(!session.history().can_redo());
        assert!(!session.redo());
    }

    #[test]
    fn test_drag_stroke_is_single_step() {
        let mut session = small_session(10, 10);
        session.select_tile(TileCode::GROUND);
        session.begin_paint_stroke(0, 0);
        session.stroke_to(4, 0);
        session.stroke_to(4, 3);
        assert!(session.end_stroke());

        for x in 0..=4 {
            assert_eq!(session.level().get(x, 0), Some(TileCode::GROUND));
        }
        assert_eq!(session.level().get(4, 2), Some(TileCode::GROUND));
        assert_eq!(session.history().undo_depth(), 1);

        session.undo();
        assert!(all_tiles(&session).iter().all(|t| *t == TileCode::EMPTY));
    }

    #[test]
    fn test_undo_finishes_active_stroke() {
        let mut session = small_session(5, 5);
        session.select_tile(TileCode::GROUND);
        session.begin_paint_stroke(1, 1);
        assert!(session.is_stroking());

        assert!(session.undo());
        assert!(!session.is_stroking());
        assert_eq!(session.level().get(1, 1), Some(TileCode::EMPTY));
    }

    #[test]
    fn test_capture_copy_and_paste() {
        let mut session = small_session(8, 8);
        session.place_entity(1, 1, EntityProperties::enemy(300, 4.0)).unwrap();
        session.select_tile(TileCode::GROUND);
        session.paint(2, 1);

        session.begin_capture(2, 2);
        let rect = session.complete_capture(1, 1).unwrap();
        assert_eq!(rect, RegionRect::from_corners(CellPos::new(1, 1), CellPos::new(2, 2)));
        assert_eq!(session.selection(), Some(rect));

        let depth = session.history().undo_depth();
        assert!(session.paste(5, 5));
        assert_eq!(session.history().undo_depth(), depth + 1);
        assert_eq!(session.level().get(6, 5), Some(TileCode::GROUND));
        assert_eq!(
            session.level().properties(5, 5),
            Some(&EntityProperties::enemy(300, 4.0))
        );

        session.undo();
        assert_eq!(session.level().get(5, 5), Some(TileCode::EMPTY));
        assert_eq!(session.level().properties(5, 5), None);
    }

    #[test]
    fn test_cancel_capture_keeps_clipboard() {
        let mut session = small_session(5, 5);
        assert!(!session.paste(0, 0));

        session.begin_capture(0, 0);
        assert!(session.cancel_capture());
        assert!(!session.clipboard().has_content());
        assert_eq!(session.complete_capture(3, 3), None);
    }

    #[test]
    fn test_cut_clears_region_in_one_step() {
        let mut session = small_session(6, 6);
        session.select_tile(TileCode::GROUND);
        session.set_brush(BrushSize::Three);
        session.paint(1, 1);
        let painted = session.snapshot();

        let corner = RegionRect::from_corners(CellPos::new(0, 0), CellPos::new(2, 2));
        assert!(session.cut(corner));
        assert!(all_tiles(&session).iter().all(|t| *t == TileCode::EMPTY));
        session.paste(3, 3);
        assert_eq!(session.level().get(5, 5), Some(TileCode::GROUND));

        session.undo();
        session.undo();
        assert_eq!(session.level(), &painted);
    }

    #[test]
    fn test_entity_field_edits() {
        let mut session = small_session(5, 5);
        session.select_tile(TileCode::ENEMY);
        session.paint(2, 2);
        assert_eq!(
            session.level().properties(2, 2),
            Some(&EntityProperties::default_for_tile(TileCode::ENEMY).unwrap())
        );

        session.edit_entity_field(2, 2, "health", "250").unwrap();
        assert_eq!(
            session.level().properties(2, 2),
            Some(&EntityProperties::enemy(250, 2.0))
        );

        let before = session.snapshot();
        assert!(session.edit_entity_field(2, 2, "health", "5000").is_err());
        assert!(session.edit_entity_field(2, 2, "speed", "fast").is_err());
        assert!(session.edit_entity_field(2, 2, "value", "3").is_err());
        assert!(matches!(
            session.edit_entity_field(0, 0, "health", "10"),
            Err(EditorError::NoEntity { x: 0, y: 0 })
        ));
        assert_eq!(session.level(), &before);

        session.undo();
        assert_eq!(
            session.level().properties(2, 2),
            Some(&EntityProperties::enemy(100, 2.0))
        );
    }

    #[test]
    fn test_resize_rejects_out_of_range() {
        let mut session = EditorSession::default();
        let before = session.snapshot();

        assert!(session.resize(4, 20).is_err());
        assert!(session.resize(20, 101).is_err());
        assert_eq!(session.level(), &before);
        assert!(!session.history().can_undo());

        session.resize(30, 10).unwrap();
        assert_eq!((session.level().cols(), session.level().rows()), (30, 10));
        session.undo();
        assert_eq!(session.level(), &before);
    }

    #[test]
    fn test_resize_resets_pan() {
        let mut session = EditorSession::default();
        session.pan(-200.0, -150.0);
        let panned = session.view().offset();
        assert_eq!(panned, (-200.0, -150.0));

        assert!(session.resize(200, 10).is_err());
        assert_eq!(session.view().offset(), panned);

        session.resize(30, 20).unwrap();
        assert_eq!(session.view().offset(), (0.0, 0.0));
    }

    #[test]
    fn test_extreme_coordinates_are_noops() {
        let mut session = small_session(5, 5);
        session.select_tile(TileCode::GROUND);
        session.set_brush(BrushSize::Three);
        let before = session.snapshot();
        let extremes = [(i32::MAX, 0), (i32::MIN, 0), (0, i32::MAX), (i32::MIN, i32::MAX)];

        for (x, y) in extremes {
            assert!(!session.paint(x, y));
            assert!(!session.erase(x, y));
        }

        session.copy(RegionRect::from_corners(CellPos::new(0, 0), CellPos::new(2, 2)));
        for (x, y) in extremes {
            assert!(!session.paste(x, y));
        }
        let beyond = RegionRect {
            x: i32::MAX,
            y: 0,
            width: u32::MAX,
            height: 3,
        };
        assert!(!session.cut(beyond));

        session.begin_capture(-70000, -70000);
        let rect = session.complete_capture(70000, 70000).unwrap();
        assert_eq!((rect.width, rect.height), (140001, 140001));
        assert!(!session.paste(i32::MAX, i32::MAX));

        assert_eq!(session.level(), &before);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_replace_level_clears_history() {
        let mut session = small_session(5, 5);
        session.select_tile(TileCode::GROUND);
        session.paint(0, 0);
        session.paint(1, 0);
        session.undo();

        session.replace_level(Level::new(7, 7));
        assert!(!session.history().can_undo());
        assert!(!session.history().can_redo());
        assert!(!session.undo());
        assert_eq!(session.level().cols(), 7);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_save_without_path() {
        let mut session = EditorSession::default();
        assert!(matches!(session.save(), Err(EditorError::NoPath)));
        assert!(matches!(
            session.apply_action(PendingAction::Save, None, None),
            Err(EditorError::NoPath)
        ));
    }

    #[test]
    fn test_apply_actions() {
        let mut session = small_session(6, 6);
        session.select_tile(TileCode::COIN);
        session.paint(0, 0);

        session.begin_capture(0, 0);
        session.complete_capture(0, 0);
        assert!(session
            .apply_action(PendingAction::Paste, Some(CellPos::new(3, 3)), None)
            .unwrap());
        assert_eq!(session.level().get(3, 3), Some(TileCode::COIN));

        assert!(!session
            .apply_action(PendingAction::Paste, None, None)
            .unwrap());
        assert!(session.apply_action(PendingAction::Undo, None, None).unwrap());
        assert_eq!(session.level().get(3, 3), Some(TileCode::EMPTY));

        session
            .apply_action(PendingAction::CycleBrush, None, None)
            .unwrap();
        assert_eq!(session.brush(), BrushSize::Three);
        session
            .apply_action(PendingAction::SelectTile(TileCode::SPIKE), None, None)
            .unwrap();
        assert_eq!(session.current_tile(), TileCode::SPIKE);
        assert!(session.apply_action(PendingAction::ZoomIn, None, None).unwrap());
        assert!((session.view().zoom() - 1.1).abs() < 1e-5);
    }
}
