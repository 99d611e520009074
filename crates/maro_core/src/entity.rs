//! Typed property records for entity tiles
//!
//! Each entity tile kind carries a fixed, validated field set. Values are
//! stored as numbers; text coming from property dialogs is parsed and
//! range-checked by [`EntityProperties::set_field`] before it is accepted.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::{PropertyError, TileCode};

pub const ENEMY_HEALTH_RANGE: RangeInclusive<u32> = 1..=1000;
pub const ENEMY_SPEED_RANGE: RangeInclusive<f32> = 0.1..=10.0;
pub const COIN_VALUE_RANGE: RangeInclusive<u32> = 1..=100;

/// The kinds of entity a tile can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Enemy,
    Coin,
}

impl EntityKind {
    /// The tile code that represents this kind on the grid
    pub fn tile_code(self) -> TileCode {
        match self {
            EntityKind::Enemy => TileCode::ENEMY,
            EntityKind::Coin => TileCode::COIN,
        }
    }

    /// Get display name for UI
    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::Enemy => "Enemy",
            EntityKind::Coin => "Coin",
        }
    }

    /// Field names editable for this kind, in dialog order
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            EntityKind::Enemy => &["health", "speed"],
            EntityKind::Coin => &["value"],
        }
    }
}

/// Properties of an enemy tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyProperties {
    pub health: u32,
    pub speed: f32,
}

impl Default for EnemyProperties {
    fn default() -> Self {
        Self {
            health: 100,
            speed: 2.0,
        }
    }
}

/// Properties of a coin tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoinProperties {
    pub value: u32,
}

impl Default for CoinProperties {
    fn default() -> Self {
        Self { value: 1 }
    }
}

/// Properties attached to an entity tile, keyed by the tile's kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityProperties {
    Enemy(EnemyProperties),
    Coin(CoinProperties),
}

impl EntityProperties {
    /// Default properties for a kind
    pub fn default_for(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Enemy => EntityProperties::Enemy(EnemyProperties::default()),
            EntityKind::Coin => EntityProperties::Coin(CoinProperties::default()),
        }
    }

    /// Default properties for a tile code, if it is an entity tile
    pub fn default_for_tile(tile: TileCode) -> Option<Self> {
        tile.entity_kind().map(Self::default_for)
    }

    pub fn enemy(health: u32, speed: f32) -> Self {
        EntityProperties::Enemy(EnemyProperties { health, speed })
    }

    pub fn coin(value: u32) -> Self {
        EntityProperties::Coin(CoinProperties { value })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityProperties::Enemy(_) => EntityKind::Enemy,
            EntityProperties::Coin(_) => EntityKind::Coin,
        }
    }

    /// The tile code these properties belong on
    pub fn tile_code(&self) -> TileCode {
        self.kind().tile_code()
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), PropertyError> {
        match self {
            EntityProperties::Enemy(enemy) => {
                check_range("health", enemy.health, &ENEMY_HEALTH_RANGE)?;
                check_range("speed", enemy.speed, &ENEMY_SPEED_RANGE)
            }
            EntityProperties::Coin(coin) => check_range("value", coin.value, &COIN_VALUE_RANGE),
        }
    }

    /// Parse and apply a single field from its text form.
    ///
    /// On any error the properties are left unchanged.
    pub fn set_field(&mut self, field: &str, text: &str) -> Result<(), PropertyError> {
        let text = text.trim();
        let mut updated = *self;
        match (&mut updated, field) {
            (EntityProperties::Enemy(enemy), "health") => enemy.health = parse_field(field, text)?,
            (EntityProperties::Enemy(enemy), "speed") => enemy.speed = parse_field(field, text)?,
            (EntityProperties::Coin(coin), "value") => coin.value = parse_field(field, text)?,
            _ => {
                return Err(PropertyError::UnknownField {
                    kind: self.kind().display_name(),
                    field: field.to_string(),
                })
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Field names and their text form, for property dialogs
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            EntityProperties::Enemy(enemy) => vec![
                ("health", enemy.health.to_string()),
                ("speed", enemy.speed.to_string()),
            ],
            EntityProperties::Coin(coin) => vec![("value", coin.value.to_string())],
        }
    }

    /// Encode as the kind-specific JSON record used in level files
    pub fn to_json(&self) -> serde_json::Value {
        let encoded = match self {
            EntityProperties::Enemy(enemy) => serde_json::to_value(enemy),
            EntityProperties::Coin(coin) => serde_json::to_value(coin),
        };
        // Plain structs of numbers always encode
        encoded.unwrap_or(serde_json::Value::Null)
    }

    /// Decode a kind-specific JSON record and validate its ranges
    pub fn from_json(kind: EntityKind, value: serde_json::Value) -> Result<Self, PropertyError> {
        let props = match kind {
            EntityKind::Enemy => serde_json::from_value(value).map(EntityProperties::Enemy),
            EntityKind::Coin => serde_json::from_value(value).map(EntityProperties::Coin),
        }
        .map_err(|e| PropertyError::Malformed(e.to_string()))?;
        props.validate()?;
        Ok(props)
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, text: &str) -> Result<T, PropertyError> {
    text.parse().map_err(|_| PropertyError::InvalidNumber {
        field: field.to_string(),
        text: text.to_string(),
    })
}

fn check_range<T>(
    field: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> Result<(), PropertyError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PropertyError::OutOfRange {
            field,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
        })
    }
}
