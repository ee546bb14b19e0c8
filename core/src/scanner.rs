use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells marked for clearing by a single scan, deduplicated by coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    marked: BTreeSet<Coord2>,
}

impl MatchSet {
    pub fn found(&self) -> bool {
        !self.marked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.marked.contains(&coords)
    }

    /// Marked coordinates in `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.marked.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Coord2> {
        self.iter().collect()
    }

    fn mark(&mut self, coords: Coord2) {
        self.marked.insert(coords);
    }
}

/// Finds every run of at least `min_match` equal tiles along a row or column.
///
/// Only every `min_match`-th row and column is used as an anchor: any run of
/// `min_match` consecutive indices covers every residue class once, so each
/// qualifying run crosses an anchor at index `min_match - 1 (mod min_match)`.
/// From each anchor cell the scan walks both ways along the perpendicular
/// axis and marks the whole run if it is long enough.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchScanner {
    min_match: Coord,
}

impl MatchScanner {
    /// Runs shorter than two are not matches; smaller thresholds are raised to two.
    pub fn new(min_match: Coord) -> Self {
        Self {
            min_match: min_match.max(2),
        }
    }

    pub fn min_match(&self) -> Coord {
        self.min_match
    }

    pub fn scan(&self, grid: &Grid) -> MatchSet {
        let (width, height) = grid.size();
        let step = usize::from(self.min_match);
        let first_anchor = self.min_match - 1;
        let mut result = MatchSet::default();

        // anchor rows, runs along columns
        for y in (first_anchor..height).step_by(step) {
            for x in 0..width {
                let (min, max) = run_extent(y, height, |i| grid[(x, i)] == grid[(x, y)]);
                if max - min + 1 >= self.min_match {
                    (min..=max).for_each(|i| result.mark((x, i)));
                }
            }
        }

        // anchor columns, runs along rows
        for x in (first_anchor..width).step_by(step) {
            for y in 0..height {
                let (min, max) = run_extent(x, width, |i| grid[(i, y)] == grid[(x, y)]);
                if max - min + 1 >= self.min_match {
                    (min..=max).for_each(|i| result.mark((i, y)));
                }
            }
        }

        result
    }
}

/// Walks from `anchor` in both directions while `same` holds, returning the
/// inclusive bounds of the run.
fn run_extent(anchor: Coord, len: Coord, same: impl Fn(Coord) -> bool) -> (Coord, Coord) {
    let mut min = anchor;
    while min > 0 && same(min - 1) {
        min -= 1;
    }

    let mut max = anchor;
    while max + 1 < len && same(max + 1) {
        max += 1;
    }

    (min, max)
}
