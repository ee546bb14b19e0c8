use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Supplies tiles for cells being filled, either at board setup or when a
/// matched cell is refilled in place.
pub trait TileSource {
    fn next_tile(&mut self, coords: Coord2) -> TileType;
}

impl<F> TileSource for F
where
    F: FnMut(Coord2) -> TileType,
{
    fn next_tile(&mut self, coords: Coord2) -> TileType {
        self(coords)
    }
}

/// Uniform draw over the first `tile_kinds` tile types, reproducible from a seed.
#[derive(Clone, Debug)]
pub struct RandomTileSource {
    rng: SmallRng,
    tile_kinds: u8,
}

impl RandomTileSource {
    pub fn new(seed: u64, tile_kinds: u8) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            tile_kinds: tile_kinds.clamp(1, TileType::COUNT),
        }
    }

    pub fn for_config(seed: u64, config: &BoardConfig) -> Self {
        Self::new(seed, config.tile_kinds)
    }
}

impl TileSource for RandomTileSource {
    fn next_tile(&mut self, _coords: Coord2) -> TileType {
        let index = self.rng.random_range(0..self.tile_kinds);
        TileType::ALL[usize::from(index)]
    }
}

/// Replays a fixed sequence of tiles, starting over when it runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedTileSource {
    tiles: Vec<TileType>,
    position: usize,
}

impl ScriptedTileSource {
    /// An empty script yields `TileType::Red` forever.
    pub fn new(tiles: impl IntoIterator<Item = TileType>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
            position: 0,
        }
    }

    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl TileSource for ScriptedTileSource {
    fn next_tile(&mut self, _coords: Coord2) -> TileType {
        let tile = match self.tiles.len() {
            0 => TileType::Red,
            len => self.tiles[self.position % len],
        };
        self.position += 1;
        tile
    }
}
