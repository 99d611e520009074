//! Maro level editor
//!
//! Editing engine for Maro's tile-grid levels: an [`EditorSession`] owns the
//! level and routes every edit through bounded undo history, the region
//! clipboard and the pan/zoom view transform.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use maro_editor::config::EditorConfig;
//! use maro_editor::session::EditorSession;
//! use maro_editor::maro_core::TileCode;
//!
//! let mut session = EditorSession::new(EditorConfig::load());
//! session.select_tile(TileCode::GROUND);
//! session.paint(3, 4);
//! session.undo();
//! ```
//!
//! With the `bevy` feature, [`plugin::MaroEditorPlugin`] wires the session
//! to keyboard and mouse input.

pub mod commands;
pub mod config;
#[cfg(feature = "bevy")]
pub mod plugin;
pub mod session;
pub mod tools;
pub mod view;

pub use maro_core;

pub use session::{EditorError, EditorSession};
