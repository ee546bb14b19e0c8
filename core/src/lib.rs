#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cascade::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use grid::*;
pub use input::*;
pub use scanner::*;
pub use source::*;
pub use tile::*;
pub use types::*;

mod cascade;
mod engine;
mod error;
mod event;
mod grid;
mod input;
mod scanner;
mod source;
mod tile;
mod types;

pub const WIDTH: Coord = 8;
pub const HEIGHT: Coord = 8;
pub const MIN_MATCH_NUM: Coord = 3;
pub const TYPE_COUNT: u8 = TileType::COUNT;

/// Upper bound on clear-and-refill passes for a single resolution. A random
/// refill settles in a handful of passes; hitting this means the refill
/// source keeps recreating matches.
pub const MAX_CASCADES: u32 = 1024;

/// Board parameters. Deserialized documents go through [`BoardConfig::new`],
/// so missing fields take their defaults and degenerate values are clamped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBoardConfig")]
pub struct BoardConfig {
    pub size: Coord2,
    pub min_match: Coord,
    pub tile_kinds: u8,
    pub max_cascades: u32,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, min_match: Coord, tile_kinds: u8) -> Self {
        Self {
            size,
            min_match,
            tile_kinds,
            max_cascades: MAX_CASCADES,
        }
    }

    pub fn new((size_x, size_y): Coord2, min_match: Coord, tile_kinds: u8) -> Self {
        let clamped = Self::new_unchecked(
            (size_x.max(1), size_y.max(1)),
            min_match.max(2),
            tile_kinds.clamp(1, TileType::COUNT),
        );
        if clamped != Self::new_unchecked((size_x, size_y), min_match, tile_kinds) {
            log::warn!(
                "Board config clamped to size {:?}, min match {}, {} tile kinds",
                clamped.size,
                clamped.min_match,
                clamped.tile_kinds
            );
        }
        clamped
    }

    pub const fn with_max_cascades(self, max_cascades: u32) -> Self {
        Self {
            max_cascades,
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked((WIDTH, HEIGHT), MIN_MATCH_NUM, TYPE_COUNT)
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawBoardConfig {
    size: Coord2,
    min_match: Coord,
    tile_kinds: u8,
    max_cascades: u32,
}

impl Default for RawBoardConfig {
    fn default() -> Self {
        let BoardConfig {
            size,
            min_match,
            tile_kinds,
            max_cascades,
        } = BoardConfig::default();
        Self {
            size,
            min_match,
            tile_kinds,
            max_cascades,
        }
    }
}

impl From<RawBoardConfig> for BoardConfig {
    fn from(raw: RawBoardConfig) -> Self {
        Self::new(raw.size, raw.min_match, raw.tile_kinds).with_max_cascades(raw.max_cascades)
    }
}
