//! Bevy integration: the editor session as a resource plus input systems
//!
//! Screen coordinates come straight from `Window::cursor_position`, which
//! shares the view transform's convention (top-left origin, y down).

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use std::path::PathBuf;

use crate::commands::{handle_keyboard_shortcuts, PendingAction};
use crate::config::EditorConfig;
use crate::session::EditorSession;
use crate::tools::EditorTool;

/// Adds the level editor to a Bevy app
pub struct MaroEditorPlugin {
    pub config: EditorConfig,
    /// Level file opened at startup
    pub level_path: Option<PathBuf>,
}

impl Default for MaroEditorPlugin {
    fn default() -> Self {
        Self {
            config: EditorConfig::load(),
            level_path: None,
        }
    }
}

impl Plugin for MaroEditorPlugin {
    fn build(&self, app: &mut App) {
        let mut session = EditorSession::new(self.config.clone());
        if let Some(path) = &self.level_path {
            match session.open(path) {
                Ok(()) => info!("MaroEditorPlugin: opened {}", path.display()),
                Err(e) => warn!("MaroEditorPlugin: could not open {}: {}", path.display(), e),
            }
        }

        app.insert_resource(Editor(session))
            .init_resource::<EditorInputState>()
            .add_systems(
                Update,
                (
                    handle_keyboard_shortcuts,
                    process_pending_action,
                    handle_viewport_input,
                    handle_zoom_input,
                )
                    .chain(),
            );
    }
}

/// The editing session shared by all editor systems
#[derive(Resource, Deref, DerefMut)]
pub struct Editor(pub EditorSession);

/// Per-frame input bookkeeping
#[derive(Resource, Default)]
pub struct EditorInputState {
    /// Action requested by a shortcut, consumed once per frame
    pub pending_action: Option<PendingAction>,
    /// Cursor position on the previous frame of a middle-button drag
    pub pan_last: Option<Vec2>,
}

impl EditorInputState {
    pub fn is_panning(&self) -> bool {
        self.pan_last.is_some()
    }
}

/// Run the action queued by the shortcut system
fn process_pending_action(
    mut editor: ResMut<Editor>,
    mut input_state: ResMut<EditorInputState>,
    windows: Query<&Window>,
) {
    let Some(action) = input_state.pending_action.take() else {
        return;
    };
    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position());
    let cell = cursor.map(|c| editor.cell_at(c.x, c.y));
    let anchor = cursor.map(|c| (c.x, c.y));

    match editor.apply_action(action, cell, anchor) {
        Ok(true) => debug!("Applied {:?}", action),
        Ok(false) => {}
        Err(e) => warn!("{:?} failed: {}", action, e),
    }
}

/// System to handle viewport input (painting, capture clicks, panning)
fn handle_viewport_input(
    mut editor: ResMut<Editor>,
    mut input_state: ResMut<EditorInputState>,
    windows: Query<&Window>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let size = (window.width(), window.height());
    if editor.view().viewport() != size {
        editor.set_viewport(size.0, size.1);
    }

    let Some(cursor) = window.cursor_position() else {
        input_state.pan_last = None;
        editor.end_stroke();
        return;
    };

    // Middle mouse drag pans
    if mouse_buttons.pressed(MouseButton::Middle) {
        if let Some(last) = input_state.pan_last {
            let delta = cursor - last;
            editor.pan(delta.x, delta.y);
        }
        input_state.pan_last = Some(cursor);
    } else {
        input_state.pan_last = None;
    }

    let cell = editor.cell_at(cursor.x, cursor.y);
    let tool = editor.tool();

    if tool == EditorTool::Capture && mouse_buttons.just_pressed(MouseButton::Left) {
        if editor.clipboard().is_capturing() {
            if let Some(rect) = editor.complete_capture(cell.x, cell.y) {
                info!("Copied {}x{} region", rect.width, rect.height);
            }
        } else {
            editor.begin_capture(cell.x, cell.y);
        }
    } else if mouse_buttons.just_pressed(MouseButton::Left) {
        match tool {
            EditorTool::Erase => editor.begin_erase_stroke(cell.x, cell.y),
            _ => editor.begin_paint_stroke(cell.x, cell.y),
        }
    } else if mouse_buttons.just_pressed(MouseButton::Right) {
        editor.begin_erase_stroke(cell.x, cell.y);
    } else if editor.is_stroking()
        && (mouse_buttons.pressed(MouseButton::Left) || mouse_buttons.pressed(MouseButton::Right))
    {
        editor.stroke_to(cell.x, cell.y);
    }

    if mouse_buttons.just_released(MouseButton::Left)
        || mouse_buttons.just_released(MouseButton::Right)
    {
        editor.end_stroke();
    }
}

/// System to handle zoom input
#[allow(deprecated)] // EventReader is deprecated but still works in Bevy 0.17
fn handle_zoom_input(
    mut editor: ResMut<Editor>,
    mut scroll_events: bevy::ecs::event::EventReader<MouseWheel>,
    windows: Query<&Window>,
) {
    let Ok(window) = windows.single() else { return };
    let anchor = window.cursor_position().map(|c| (c.x, c.y));

    for event in scroll_events.read() {
        if event.y == 0.0 {
            continue;
        }
        let steps = if event.y > 0.0 { 1 } else { -1 };
        editor.zoom_by(steps, anchor);
    }
}
