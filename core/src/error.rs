use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Coordinates {0:?} are outside the board")]
    OutOfRange(Coord2),
    #[error("Cannot swap {from:?} with {to:?}, cells must be adjacent and on the board")]
    InvalidSwap { from: Coord2, to: Coord2 },
    #[error("A swap is already in flight")]
    SwapBusy,
    #[error("No swap is waiting for this step")]
    NoSwapInFlight,
    #[error("A cell is already selected")]
    AlreadySelected,
    #[error("No cell is selected")]
    NothingSelected,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown tile type index {0}")]
    UnknownTileType(u8),
}

pub type Result<T> = core::result::Result<T, EngineError>;
