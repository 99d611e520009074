//! Keyboard shortcut handling

use bevy::prelude::*;
use maro_core::TileCode;

use super::PendingAction;
use crate::plugin::EditorInputState;
use crate::tools::EditorTool;

/// Palette slots reachable from the number row
const PALETTE_KEYS: [KeyCode; 6] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
];

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_state: ResMut<EditorInputState>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if ctrl {
        // Ctrl+Z - Undo
        if keyboard.just_pressed(KeyCode::KeyZ) && !shift {
            input_state.pending_action = Some(PendingAction::Undo);
        }
        // Ctrl+Shift+Z or Ctrl+Y - Redo
        if (keyboard.just_pressed(KeyCode::KeyZ) && shift) || keyboard.just_pressed(KeyCode::KeyY) {
            input_state.pending_action = Some(PendingAction::Redo);
        }
        // Ctrl+C - Copy
        if keyboard.just_pressed(KeyCode::KeyC) {
            input_state.pending_action = Some(PendingAction::Copy);
        }
        // Ctrl+X - Cut
        if keyboard.just_pressed(KeyCode::KeyX) {
            input_state.pending_action = Some(PendingAction::Cut);
        }
        // Ctrl+V - Paste
        if keyboard.just_pressed(KeyCode::KeyV) {
            input_state.pending_action = Some(PendingAction::Paste);
        }
        // Ctrl+S - Save
        if keyboard.just_pressed(KeyCode::KeyS) {
            input_state.pending_action = Some(PendingAction::Save);
        }
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        input_state.pending_action = Some(PendingAction::CancelCapture);
    }

    if keyboard.just_pressed(KeyCode::KeyB) {
        input_state.pending_action = Some(PendingAction::CycleBrush);
    }

    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        input_state.pending_action = Some(PendingAction::ZoomIn);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        input_state.pending_action = Some(PendingAction::ZoomOut);
    }

    // Tool keys
    if keyboard.just_pressed(KeyCode::KeyP) {
        input_state.pending_action = Some(PendingAction::SelectTool(EditorTool::Paint));
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        input_state.pending_action = Some(PendingAction::SelectTool(EditorTool::Erase));
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        input_state.pending_action = Some(PendingAction::SelectTool(EditorTool::Capture));
    }

    for (key, tile) in PALETTE_KEYS.iter().zip(TileCode::palette()) {
        if keyboard.just_pressed(*key) {
            input_state.pending_action = Some(PendingAction::SelectTile(*tile));
        }
    }
}
