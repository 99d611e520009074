//! Core data structures for the Maro level editor
//!
//! This crate provides the fundamental types for representing tile-based levels:
//! - `TileCode` - A single-character tile identifier with palette metadata
//! - `Grid` - A rectangular array of tile codes
//! - `Level` - A grid plus the typed properties of its entity tiles
//! - `EntityProperties` - Per-kind property records (enemy, coin)
//! - `LevelFormat` - JSON and legacy plain-text persistence

mod brush;
mod entity;
mod error;
mod format;
mod grid;
mod level;
mod tile;

pub use brush::BrushSize;
pub use entity::{CoinProperties, EnemyProperties, EntityKind, EntityProperties};
pub use error::{LevelError, PropertyError};
pub use format::{load_level, save_level, LevelFormat};
pub use grid::{CellPos, Grid, GridLimits};
pub use level::{Level, LevelStats};
pub use tile::{TileCode, FALLBACK_COLOR};
