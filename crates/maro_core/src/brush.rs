//! Square brush sizes

use serde::{Deserialize, Serialize};

/// Side length of the square brush used by paint and erase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushSize {
    #[default]
    One,
    Three,
    Five,
}

impl BrushSize {
    /// Side length in cells
    pub fn side(self) -> u32 {
        match self {
            BrushSize::One => 1,
            BrushSize::Three => 3,
            BrushSize::Five => 5,
        }
    }

    /// Cells painted on each side of the centre
    pub fn radius(self) -> i32 {
        (self.side() / 2) as i32
    }

    /// Look up a brush by its side length
    pub fn from_side(side: u32) -> Option<Self> {
        match side {
            1 => Some(BrushSize::One),
            3 => Some(BrushSize::Three),
            5 => Some(BrushSize::Five),
            _ => None,
        }
    }

    /// The next size, wrapping from largest back to smallest
    pub fn next(self) -> Self {
        match self {
            BrushSize::One => BrushSize::Three,
            BrushSize::Three => BrushSize::Five,
            BrushSize::Five => BrushSize::One,
        }
    }

    /// Returns all sizes for UI enumeration
    pub fn all() -> &'static [BrushSize] {
        &[BrushSize::One, BrushSize::Three, BrushSize::Five]
    }
}
