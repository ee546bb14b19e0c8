use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Kind of a tile on the board. The engine only compares kinds; mapping a
/// kind to a colour or sprite is up to the presentation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileType {
    Red,
    Blue,
    Green,
    Yellow,
}

impl TileType {
    pub const ALL: [TileType; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    pub const COUNT: u8 = Self::ALL.len() as u8;

    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(EngineError::UnknownTileType(index))
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tile| tile.to_char() == c.to_ascii_uppercase())
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
