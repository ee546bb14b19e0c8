use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Two adjacent cells proposed for exchange.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAttempt {
    pub from: Coord2,
    pub to: Coord2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// The swap produced a match; the board was cascaded to a stable state.
    Committed { cleared: CellCount, passes: u32 },
    /// No match, the two tiles were swapped back.
    Reverted,
}

impl SwapOutcome {
    pub const fn is_committed(self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapPhase {
    /// Tiles exchanged, verdict pending.
    Tentative,
    /// Verdict applied, waiting for the presentation to finish.
    Resolved(SwapOutcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    SwapInFlight { attempt: SwapAttempt, phase: SwapPhase },
}

impl EngineState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Owns the board and arbitrates swaps, one at a time.
///
/// A swap runs `begin_swap` → `resolve_swap` → `finish_swap`, or
/// `request_swap` → `finish_swap` when the verdict is wanted immediately.
/// The engine stays busy until `finish_swap` acknowledges that the
/// presentation of the swap is over, so a second swap can never race an
/// animation still in progress.
#[derive(Clone, Debug)]
pub struct MatchEngine<R = RandomTileSource> {
    config: BoardConfig,
    grid: Grid,
    resolver: CascadeResolver,
    refill: R,
    state: EngineState,
    events: Vec<EngineEvent>,
}

impl MatchEngine<RandomTileSource> {
    /// Random board from `seed`, already cleared of matches.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        let mut source = RandomTileSource::for_config(seed, &config);
        let grid = Grid::from_fn(config.size, |coords| source.next_tile(coords));
        Self::setup(config, grid, source)
    }
}

impl<R: TileSource> MatchEngine<R> {
    /// Fills every cell from `fill`, then cascades away any match the fill produced.
    pub fn new(config: BoardConfig, mut fill: impl TileSource, refill: R) -> Self {
        let grid = Grid::from_fn(config.size, |coords| fill.next_tile(coords));
        Self::setup(config, grid, refill)
    }

    /// Adopts a preset board as-is, matches included.
    pub fn from_grid(config: BoardConfig, grid: Grid, refill: R) -> Result<Self> {
        if grid.size() != config.size {
            return Err(EngineError::InvalidBoardShape);
        }

        Ok(Self {
            config,
            grid,
            resolver: CascadeResolver::for_config(&config),
            refill,
            state: EngineState::Idle,
            events: Vec::new(),
        })
    }

    fn setup(config: BoardConfig, mut grid: Grid, mut refill: R) -> Self {
        let resolver = CascadeResolver::for_config(&config);
        let report = resolver.resolve(&mut grid, &mut refill, &mut ());
        log::debug!(
            "board {:?} set up, {} setup passes cleared {} cells",
            config.size,
            report.passes,
            report.cleared
        );

        Self {
            config,
            grid,
            resolver,
            refill,
            state: EngineState::Idle,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        !self.state.is_idle()
    }

    /// Read-only view of the board.
    pub fn snapshot(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<TileType> {
        self.grid.get(coords)
    }

    pub fn find_matches(&self) -> MatchSet {
        self.resolver.scanner().scan(&self.grid)
    }

    /// Takes every event published since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        core::mem::take(&mut self.events)
    }

    /// Cascades any match currently on the board. Only allowed while idle.
    pub fn stabilize(&mut self) -> Result<bool> {
        self.check_idle()?;
        let report = self
            .resolver
            .resolve(&mut self.grid, &mut self.refill, &mut self.events);
        Ok(report.applied_any())
    }

    /// Swaps and resolves in one step. The engine stays busy until `finish_swap`.
    pub fn request_swap(&mut self, from: Coord2, to: Coord2) -> Result<SwapOutcome> {
        self.begin_swap(from, to)?;
        self.resolve_swap()
    }

    /// Validates and applies the swap tentatively.
    pub fn begin_swap(&mut self, from: Coord2, to: Coord2) -> Result<SwapAttempt> {
        let attempt = self.validate_swap(from, to)?;
        self.check_idle()?;

        self.grid.swap_cells(from, to)?;
        self.state = EngineState::SwapInFlight {
            attempt,
            phase: SwapPhase::Tentative,
        };
        self.events.push(EngineEvent::SwapStarted { from, to });
        log::debug!("swap {:?} <-> {:?} started", from, to);

        Ok(attempt)
    }

    /// Commits the tentative swap if it produced a match, otherwise swaps back.
    pub fn resolve_swap(&mut self) -> Result<SwapOutcome> {
        let EngineState::SwapInFlight {
            attempt,
            phase: SwapPhase::Tentative,
        } = self.state
        else {
            return Err(EngineError::NoSwapInFlight);
        };
        let SwapAttempt { from, to } = attempt;

        let report = self
            .resolver
            .resolve(&mut self.grid, &mut self.refill, &mut self.events);

        let outcome = if report.applied_any() {
            self.events.push(EngineEvent::SwapCommitted { from, to });
            log::debug!(
                "swap {:?} <-> {:?} committed after {} passes",
                from,
                to,
                report.passes
            );
            SwapOutcome::Committed {
                cleared: report.cleared,
                passes: report.passes,
            }
        } else {
            self.grid.swap_cells(from, to)?;
            self.events.push(EngineEvent::SwapReverted { from, to });
            log::debug!("swap {:?} <-> {:?} reverted", from, to);
            SwapOutcome::Reverted
        };

        self.state = EngineState::SwapInFlight {
            attempt,
            phase: SwapPhase::Resolved(outcome),
        };
        Ok(outcome)
    }

    /// Acknowledges the end of the swap presentation and returns to idle.
    pub fn finish_swap(&mut self) -> Result<SwapOutcome> {
        let EngineState::SwapInFlight {
            phase: SwapPhase::Resolved(outcome),
            ..
        } = self.state
        else {
            return Err(EngineError::NoSwapInFlight);
        };

        self.state = EngineState::Idle;
        Ok(outcome)
    }

    fn validate_swap(&self, from: Coord2, to: Coord2) -> Result<SwapAttempt> {
        if self.grid.contains(from) && self.grid.contains(to) && is_adjacent(from, to) {
            Ok(SwapAttempt { from, to })
        } else {
            Err(EngineError::InvalidSwap { from, to })
        }
    }

    fn check_idle(&self) -> Result<()> {
        if self.state.is_idle() {
            Ok(())
        } else {
            Err(EngineError::SwapBusy)
        }
    }
}
