//! Level file formats: JSON with entity metadata, and legacy plain text
//!
//! JSON layout:
//! ```json
//! {
//!   "grid": [["G", " "], ["C", "E"]],
//!   "entities": { "0,1": { "value": 5 }, "1,1": { "health": 50, "speed": 2.0 } }
//! }
//! ```
//! Entity keys are `"x,y"` (column, row). The record's shape follows the
//! tile at that cell. The text form has one line per row and no metadata.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::{CellPos, EntityProperties, Grid, GridLimits, Level, LevelError, TileCode};

/// On-disk layout of a JSON level
#[derive(Debug, Serialize, Deserialize)]
struct LevelFile {
    grid: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    entities: BTreeMap<String, serde_json::Value>,
}

/// Supported level file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFormat {
    #[default]
    Json,
    Text,
}

impl LevelFormat {
    /// Pick the format from a file extension: `.txt` is text, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => LevelFormat::Text,
            _ => LevelFormat::Json,
        }
    }

    /// Whether this format stores entity properties
    pub fn keeps_entities(self) -> bool {
        matches!(self, LevelFormat::Json)
    }

    /// Parse a level and check its dimensions against the limits
    pub fn parse(self, content: &str, limits: &GridLimits) -> Result<Level, LevelError> {
        let level = match self {
            LevelFormat::Json => parse_json(content)?,
            LevelFormat::Text => Level::from_grid(parse_text(content)?),
        };
        limits.check(level.cols(), level.rows())?;
        Ok(level)
    }

    /// Encode a level
    pub fn encode(self, level: &Level) -> Result<String, LevelError> {
        match self {
            LevelFormat::Json => encode_json(level),
            LevelFormat::Text => Ok(encode_text(level.grid())),
        }
    }
}

fn parse_json(content: &str) -> Result<Level, LevelError> {
    let file: LevelFile = serde_json::from_str(content)?;

    let rows = file
        .grid
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .into_iter()
                .enumerate()
                .map(|(col, text)| {
                    TileCode::from_str_code(&text)
                        .ok_or(LevelError::InvalidTileCode { row, col, text })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let grid = Grid::from_rows(rows)?;

    let mut entities = Vec::with_capacity(file.entities.len());
    for (key, value) in file.entities {
        let pos = parse_entity_key(&key)?;
        let (x, y) = (pos.x, pos.y);
        let tile = grid.get(x, y).ok_or(LevelError::EntityOutOfBounds { x, y })?;
        let kind = tile
            .entity_kind()
            .ok_or(LevelError::EntityTileMismatch { x, y, tile })?;
        let props = EntityProperties::from_json(kind, value)
            .map_err(|source| LevelError::InvalidProperties { x, y, source })?;
        entities.push((pos, props));
    }

    Level::from_parts(grid, entities)
}

fn parse_entity_key(key: &str) -> Result<CellPos, LevelError> {
    let bad_key = || LevelError::BadEntityKey(key.to_string());
    let (x, y) = key.split_once(',').ok_or_else(bad_key)?;
    let x = x.trim().parse().map_err(|_| bad_key())?;
    let y = y.trim().parse().map_err(|_| bad_key())?;
    Ok(CellPos::new(x, y))
}

fn encode_json(level: &Level) -> Result<String, LevelError> {
    let file = LevelFile {
        grid: level
            .grid()
            .iter_rows()
            .map(|row| row.iter().map(|t| t.to_string()).collect())
            .collect(),
        entities: level
            .entities()
            .iter()
            .map(|(pos, props)| (format!("{},{}", pos.x, pos.y), props.to_json()))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse the legacy text form.
///
/// Older tools stripped trailing spaces, so short rows are padded with the
/// empty tile up to the widest row. Trailing empty lines are ignored.
fn parse_text(content: &str) -> Result<Grid, LevelError> {
    let mut lines: Vec<&str> = content.lines().collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let rows = lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            let mut tiles = line
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    TileCode::new(ch).ok_or_else(|| LevelError::InvalidTileCode {
                        row,
                        col,
                        text: ch.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            tiles.resize(width, TileCode::EMPTY);
            Ok(tiles)
        })
        .collect::<Result<Vec<_>, LevelError>>()?;

    Grid::from_rows(rows)
}

fn encode_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(((grid.cols() + 1) * grid.rows()) as usize);
    for row in grid.iter_rows() {
        out.extend(row.iter().map(|t| t.as_char()));
        out.push('\n');
    }
    out
}

/// Load a level from a file, picking the format from its extension
pub fn load_level(path: &Path, limits: &GridLimits) -> Result<Level, LevelError> {
    let content = std::fs::read_to_string(path)?;
    let level = LevelFormat::from_path(path).parse(&content, limits)?;
    info!(
        "Loaded level {:?}: {}x{} with {} entities",
        path,
        level.cols(),
        level.rows(),
        level.entities().len()
    );
    Ok(level)
}

/// Save a level to a file, picking the format from its extension
pub fn save_level(path: &Path, level: &Level) -> Result<(), LevelError> {
    let format = LevelFormat::from_path(path);
    if !format.keeps_entities() && !level.entities().is_empty() {
        warn!(
            "Saving {:?} as text drops properties of {} entities",
            path,
            level.entities().len()
        );
    }
    let content = format.encode(level)?;
    std::fs::write(path, content)?;
    info!("Saved level to {:?}", path);
    Ok(())
}
