//! Tile codes and the built-in tile palette

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::EntityKind;

/// Display colour used for codes the palette does not name
pub const FALLBACK_COLOR: [u8; 3] = [255, 0, 255];

/// A single-character tile identifier
///
/// Any printable character other than a line break is a valid code, so
/// hand-written levels with codes outside the palette still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCode(char);

impl TileCode {
    pub const EMPTY: TileCode = TileCode(' ');
    pub const GROUND: TileCode = TileCode('G');
    pub const PLAYER: TileCode = TileCode('P');
    pub const COIN: TileCode = TileCode('C');
    pub const SPIKE: TileCode = TileCode('S');
    pub const ENEMY: TileCode = TileCode('E');

    /// Create a tile code, rejecting line breaks and control characters
    pub fn new(ch: char) -> Option<Self> {
        if ch.is_control() {
            None
        } else {
            Some(Self(ch))
        }
    }

    /// Parse a tile code from a string holding exactly one character
    pub fn from_str_code(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::new(ch),
            _ => None,
        }
    }

    /// The underlying character
    #[inline]
    pub fn as_char(self) -> char {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// Whether this code carries entity properties
    #[inline]
    pub fn is_entity(self) -> bool {
        self.entity_kind().is_some()
    }

    /// The entity kind stored at cells holding this code
    pub fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Self::ENEMY => Some(EntityKind::Enemy),
            Self::COIN => Some(EntityKind::Coin),
            _ => None,
        }
    }

    /// Get display name for UI
    pub fn display_name(self) -> &'static str {
        match self {
            Self::EMPTY => "Empty",
            Self::GROUND => "Ground",
            Self::PLAYER => "Player",
            Self::COIN => "Coin",
            Self::SPIKE => "Spike",
            Self::ENEMY => "Enemy",
            _ => "Unknown",
        }
    }

    /// RGB colour used to draw this tile in the editor
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::EMPTY => [0, 0, 0],
            Self::GROUND => [100, 100, 100],
            Self::PLAYER => [255, 0, 0],
            Self::COIN => [255, 255, 0],
            Self::SPIKE => [0, 255, 0],
            Self::ENEMY => [200, 0, 0],
            _ => FALLBACK_COLOR,
        }
    }

    /// Returns the palette tiles in selector order
    pub fn palette() -> &'static [TileCode] {
        &[
            Self::EMPTY,
            Self::GROUND,
            Self::PLAYER,
            Self::COIN,
            Self::SPIKE,
            Self::ENEMY,
        ]
    }
}

impl Default for TileCode {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TileCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.0.encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for TileCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TileCode::from_str_code(&s).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"a single printable character")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_subset() {
        assert!(TileCode::ENEMY.is_entity());
        assert!(TileCode::COIN.is_entity());
        assert!(!TileCode::GROUND.is_entity());
        assert!(!TileCode::EMPTY.is_entity());
        assert_eq!(TileCode::ENEMY.entity_kind(), Some(EntityKind::Enemy));
    }

    #[test]
    fn test_from_str_code() {
        assert_eq!(TileCode::from_str_code("G"), Some(TileCode::GROUND));
        assert_eq!(TileCode::from_str_code(" "), Some(TileCode::EMPTY));
        assert_eq!(TileCode::from_str_code(""), None);
        assert_eq!(TileCode::from_str_code("GG"), None);
        assert_eq!(TileCode::from_str_code("\n"), None);
    }

    #[test]
    fn test_unknown_code_uses_fallback_color() {
        let legacy = TileCode::new('X').unwrap();
        assert_eq!(legacy.color(), FALLBACK_COLOR);
        assert_eq!(legacy.display_name(), "Unknown");
    }

    #[test]
    fn test_serde_single_char() {
        let json = serde_json::to_string(&TileCode::COIN).unwrap();
        assert_eq!(json, "\"C\"");
        let back: TileCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TileCode::COIN);
        assert!(serde_json::from_str::<TileCode>("\"AB\"").is_err());
    }
}
