use alloc::vec::Vec;

use crate::*;

/// Summary of a finished cascade.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Number of clear-and-refill passes applied.
    pub passes: u32,
    /// Total cells refilled across all passes, counting repeats.
    pub cleared: CellCount,
    /// Whether resolution stopped at the pass limit instead of a stable board.
    pub hit_limit: bool,
}

impl CascadeReport {
    pub const fn applied_any(&self) -> bool {
        self.passes > 0
    }
}

/// Clears matched cells, refills them in place and rescans until the board
/// holds no match. There is no gravity: a cleared cell is refilled at its
/// own coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CascadeResolver {
    scanner: MatchScanner,
    max_passes: u32,
}

impl CascadeResolver {
    pub fn new(scanner: MatchScanner, max_passes: u32) -> Self {
        Self {
            scanner,
            max_passes,
        }
    }

    pub fn for_config(config: &BoardConfig) -> Self {
        Self::new(MatchScanner::new(config.min_match), config.max_cascades)
    }

    pub fn scanner(&self) -> MatchScanner {
        self.scanner
    }

    pub fn resolve(
        &self,
        grid: &mut Grid,
        refill: &mut impl TileSource,
        events: &mut impl EventSink,
    ) -> CascadeReport {
        let mut report = CascadeReport::default();

        loop {
            let matches = self.scanner.scan(grid);
            if !matches.found() {
                return report;
            }

            if report.passes >= self.max_passes {
                log::error!(
                    "Cascade stopped after {} passes with {} cells still matched, the refill source keeps producing matches",
                    report.passes,
                    matches.len()
                );
                report.hit_limit = true;
                return report;
            }

            let cleared = matches.to_vec();
            events.emit(EngineEvent::CellsCleared(cleared.clone()));

            let refilled: Vec<Cell> = cleared
                .into_iter()
                .map(|coords| {
                    let tile = refill.next_tile(coords);
                    grid[coords] = tile;
                    Cell { coords, tile }
                })
                .collect();

            report.passes += 1;
            report.cleared = report
                .cleared
                .saturating_add(refilled.len().try_into().unwrap_or(CellCount::MAX));
            log::trace!("cascade pass {}: refilled {} cells", report.passes, refilled.len());
            events.emit(EngineEvent::CellsRefilled(refilled));
        }
    }
}
