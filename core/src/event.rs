use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// State transitions published to presentation collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    SwapStarted { from: Coord2, to: Coord2 },
    CellsCleared(Vec<Coord2>),
    CellsRefilled(Vec<Cell>),
    SwapCommitted { from: Coord2, to: Coord2 },
    SwapReverted { from: Coord2, to: Coord2 },
}

pub trait EventSink {
    fn emit(&mut self, event: EngineEvent);
}

impl EventSink for Vec<EngineEvent> {
    fn emit(&mut self, event: EngineEvent) {
        self.push(event);
    }
}

/// Discards everything, used while setting up a board.
impl EventSink for () {
    fn emit(&mut self, _event: EngineEvent) {}
}
