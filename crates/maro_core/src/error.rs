//! Error types for level loading, validation and property edits

use thiserror::Error;

use crate::{GridLimits, TileCode};

/// Errors from parsing or validating a single entity property
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertyError {
    #[error("{kind} has no field '{field}'")]
    UnknownField { kind: &'static str, field: String },
    #[error("'{text}' is not a valid number for {field}")]
    InvalidNumber { field: String, text: String },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("malformed properties: {0}")]
    Malformed(String),
}

/// Errors from level construction, loading, saving and resizing
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level has no rows")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {col}: {text:?} is not a single-character tile code")]
    InvalidTileCode { row: usize, col: usize, text: String },
    #[error("{cols}x{rows} is outside the allowed {}..={} range", .limits.min, .limits.max)]
    DimensionsOutOfRange {
        cols: u32,
        rows: u32,
        limits: GridLimits,
    },
    #[error("entity key {0:?} is not an \"x,y\" coordinate")]
    BadEntityKey(String),
    #[error("entity at ({x},{y}) lies outside the grid")]
    EntityOutOfBounds { x: i32, y: i32 },
    #[error("entity at ({x},{y}) sits on tile '{tile}', which does not match its properties")]
    EntityTileMismatch { x: i32, y: i32, tile: TileCode },
    #[error("entity at ({x},{y}): {source}")]
    InvalidProperties {
        x: i32,
        y: i32,
        #[source]
        source: PropertyError,
    },
}
