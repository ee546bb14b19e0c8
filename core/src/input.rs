use serde::{Deserialize, Serialize};

use crate::*;

/// Picks the swap direction for a drag, given the pointer offset from the
/// pressed cell in board units (`y` grows with the row index).
///
/// The dominant axis wins; an exact diagonal counts as vertical.
pub fn direction_from_gesture((dx, dy): (f32, f32)) -> Direction {
    if dx * dx > dy * dy {
        if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dy < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(Coord2),
}

/// Tracks the single cell a pointer is holding and turns a drag off that
/// cell into a swap attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionGuard {
    bounds: Coord2,
    selection: Selection,
}

impl SelectionGuard {
    pub fn new(bounds: Coord2) -> Self {
        Self {
            bounds,
            selection: Selection::Unselected,
        }
    }

    pub fn for_config(config: &BoardConfig) -> Self {
        Self::new(config.size)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.selection, Selection::Selected(_))
    }

    /// Pointer pressed on `coords`. Only one cell can be held at a time.
    pub fn select(&mut self, coords: Coord2) -> Result<()> {
        if !in_bounds(coords, self.bounds) {
            return Err(EngineError::OutOfRange(coords));
        }
        if self.is_selected() {
            return Err(EngineError::AlreadySelected);
        }

        log::trace!("({}, {}) selected", coords.0, coords.1);
        self.selection = Selection::Selected(coords);
        Ok(())
    }

    /// Pointer released without leaving the cell.
    pub fn release(&mut self) -> Result<Coord2> {
        let Selection::Selected(coords) = self.selection else {
            return Err(EngineError::NothingSelected);
        };

        self.selection = Selection::Unselected;
        Ok(coords)
    }

    /// Pointer dragged off the held cell. Always releases the selection.
    ///
    /// Yields no attempt when `busy` (a swap is still in flight) or when the
    /// drag points off the board.
    pub fn drag_out(
        &mut self,
        pointer_delta: (f32, f32),
        busy: bool,
    ) -> Result<Option<SwapAttempt>> {
        let origin = self.release()?;
        if busy {
            log::debug!("drag from {:?} ignored, swap in flight", origin);
            return Ok(None);
        }

        let direction = direction_from_gesture(pointer_delta);
        Ok(neighbor(origin, direction, self.bounds).map(|to| SwapAttempt { from: origin, to }))
    }
}

impl<R: TileSource> MatchEngine<R> {
    /// Feeds a drag gesture from `guard` straight into `request_swap`.
    pub fn swap_from_drag(
        &mut self,
        guard: &mut SelectionGuard,
        pointer_delta: (f32, f32),
    ) -> Result<Option<SwapOutcome>> {
        match guard.drag_out(pointer_delta, self.is_busy())? {
            Some(SwapAttempt { from, to }) => self.request_swap(from, to).map(Some),
            None => Ok(None),
        }
    }
}
