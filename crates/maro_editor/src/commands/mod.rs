//! Undo/redo history, region clipboard and editor actions

pub mod clipboard;
mod history;
#[cfg(feature = "bevy")]
mod shortcuts;

pub use clipboard::{CaptureState, ClipboardRegion, RegionRect, TileClipboard};
pub use history::EditHistory;
#[cfg(feature = "bevy")]
pub use shortcuts::handle_keyboard_shortcuts;

use maro_core::TileCode;

use crate::tools::EditorTool;

/// A discrete editor action, typically produced by a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Undo,
    Redo,
    /// Copy the current selection again
    Copy,
    /// Copy the current selection, then clear it to the empty tile
    Cut,
    /// Paste the clipboard with its top-left cell under the cursor
    Paste,
    Save,
    /// Abort a region capture in progress
    CancelCapture,
    CycleBrush,
    ZoomIn,
    ZoomOut,
    SelectTile(TileCode),
    SelectTool(EditorTool),
}
