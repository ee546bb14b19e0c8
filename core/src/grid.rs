use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single board position together with the tile it currently holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coords: Coord2,
    pub tile: TileType,
}

/// Rectangular board of tiles, indexed `(x, y)`.
///
/// Every position always holds a tile; clearing a cell is modelled by
/// overwriting it with its replacement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<TileType>,
}

impl Grid {
    pub fn from_fn(size: Coord2, mut f: impl FnMut(Coord2) -> TileType) -> Self {
        let tiles = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // shape comes from Coord2 so both indices fit
            f((x as Coord, y as Coord))
        });
        Self { tiles }
    }

    pub fn filled(size: Coord2, tile: TileType) -> Self {
        Self {
            tiles: Array2::from_elem(size.to_nd_index(), tile),
        }
    }

    /// Builds a grid from rows given top to bottom, so `rows[y][x]` ends up at `(x, y)`.
    pub fn from_rows<R: AsRef<[TileType]>>(size: Coord2, rows: &[R]) -> Result<Self> {
        if rows.len() != usize::from(size.1)
            || rows.iter().any(|row| row.as_ref().len() != usize::from(size.0))
        {
            return Err(EngineError::InvalidBoardShape);
        }

        Ok(Self::from_fn(size, |(x, y)| {
            rows[usize::from(y)].as_ref()[usize::from(x)]
        }))
    }

    /// Parses rows of tile letters such as `"RRBBBGGG"`.
    pub fn parse(size: Coord2, rows: &[&str]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| TileType::from_char(c).ok_or(EngineError::InvalidBoardShape))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(size, &rows)
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.tiles.dim();
        // shape is only ever built from a Coord2
        (x as Coord, y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(EngineError::OutOfRange(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<TileType> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    /// Unconditionally overwrites the tile at `coords`.
    pub fn set(&mut self, coords: Coord2, tile: TileType) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.tiles[coords.to_nd_index()] = tile;
        Ok(())
    }

    /// Exchanges the tiles at two positions. Adjacency is the caller's concern.
    pub fn swap_cells(&mut self, a: Coord2, b: Coord2) -> Result<()> {
        let a = self.validate_coords(a)?;
        let b = self.validate_coords(b)?;
        self.tiles.swap(a.to_nd_index(), b.to_nd_index());
        Ok(())
    }

    /// Every cell, row by row from the top-left corner.
    pub fn iter_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| {
            (0..width).map(move |x| Cell {
                coords: (x, y),
                tile: self.tiles[(x, y).to_nd_index()],
            })
        })
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for Grid {
    type Output = TileType;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                write!(f, "{}", self[(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
