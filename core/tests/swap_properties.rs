use proptest::prelude::*;
use swapmatch_core::{
    BoardConfig, CascadeResolver, Coord2, EngineError, EngineEvent, Grid, HEIGHT, MIN_MATCH_NUM,
    MatchEngine, MatchScanner, RandomTileSource, ScriptedTileSource, SwapOutcome, TYPE_COUNT,
    TileSource, TileType, WIDTH,
};

fn random_grid(seed: u64, config: &BoardConfig) -> Grid {
    let mut source = RandomTileSource::for_config(seed, config);
    Grid::from_fn(config.size, |coords| source.next_tile(coords))
}

fn adjacent_pairs(grid: &Grid) -> Vec<(Coord2, Coord2)> {
    grid.iter_cells()
        .flat_map(|cell| {
            grid.iter_neighbors(cell.coords)
                .filter(move |&to| to > cell.coords)
                .map(move |to| (cell.coords, to))
        })
        .collect()
}

proptest! {
    #[test]
    fn cascade_always_leaves_a_stable_board(seed in any::<u64>(), kinds in 3u8..=TileType::COUNT) {
        let config = BoardConfig::new((WIDTH, HEIGHT), MIN_MATCH_NUM, kinds);
        let resolver = CascadeResolver::for_config(&config);
        let mut grid = random_grid(seed, &config);
        let mut refill = RandomTileSource::for_config(seed.wrapping_add(1), &config);

        let report = resolver.resolve(&mut grid, &mut refill, &mut ());

        prop_assert!(!report.hit_limit);
        prop_assert!(!resolver.scanner().scan(&grid).found());
    }

    #[test]
    fn scan_is_idempotent_on_random_boards(seed in any::<u64>()) {
        let config = BoardConfig::default();
        let scanner = MatchScanner::new(config.min_match);
        let grid = random_grid(seed, &config);

        prop_assert_eq!(scanner.scan(&grid), scanner.scan(&grid));
    }

    #[test]
    fn every_match_crosses_an_anchor(seed in any::<u64>(), width in 3u8..12, height in 3u8..12) {
        let config = BoardConfig::new((width, height), MIN_MATCH_NUM, TYPE_COUNT);
        let grid = random_grid(seed, &config);
        let found = MatchScanner::new(MIN_MATCH_NUM).scan(&grid);

        // brute force: every horizontal or vertical triple must be marked
        for cell in grid.iter_cells() {
            let (x, y) = cell.coords;
            let triples = [
                [(x, y), (x + 1, y), (x + 2, y)],
                [(x, y), (x, y + 1), (x, y + 2)],
            ];
            for triple in triples {
                if triple.iter().all(|&c| grid.get(c) == Ok(cell.tile)) {
                    prop_assert!(triple.iter().all(|&c| found.contains(c)));
                }
            }
        }
    }
}

#[test]
fn every_adjacent_swap_commits_around_itself_or_reverts_cleanly() {
    for seed in 0..4 {
        let engine = MatchEngine::with_seed(BoardConfig::default(), seed);
        let before = engine.snapshot().clone();

        for (from, to) in adjacent_pairs(&before) {
            let mut trial = engine.clone();

            let outcome = trial.request_swap(from, to).unwrap();
            let events = trial.drain_events();

            match outcome {
                SwapOutcome::Committed { passes, .. } => {
                    assert!(passes >= 1);
                    let first_clear = events
                        .iter()
                        .find_map(|event| match event {
                            EngineEvent::CellsCleared(cells) => Some(cells),
                            _ => None,
                        })
                        .expect("commit clears cells");
                    assert!(first_clear.contains(&from) || first_clear.contains(&to));
                    assert_eq!(events.last(), Some(&EngineEvent::SwapCommitted { from, to }));
                    assert!(!trial.find_matches().found());
                }
                SwapOutcome::Reverted => {
                    assert_eq!(trial.snapshot(), &before);
                    assert_eq!(
                        events,
                        [
                            EngineEvent::SwapStarted { from, to },
                            EngineEvent::SwapReverted { from, to },
                        ]
                    );
                }
            }

            assert!(trial.is_busy());
            assert_eq!(trial.finish_swap(), Ok(outcome));
            assert!(!trial.is_busy());
        }
    }
}

#[test]
fn second_request_while_in_flight_is_busy() {
    let mut engine = MatchEngine::with_seed(BoardConfig::default(), 7);

    engine.begin_swap((3, 3), (3, 4)).unwrap();
    let tentative = engine.snapshot().clone();
    let events_before = engine.drain_events();

    assert_eq!(engine.request_swap((0, 0), (1, 0)), Err(EngineError::SwapBusy));
    assert_eq!(engine.snapshot(), &tentative);
    assert!(engine.drain_events().is_empty());
    assert_eq!(
        events_before,
        [EngineEvent::SwapStarted {
            from: (3, 3),
            to: (3, 4)
        }]
    );
}

#[test]
fn swap_leaving_the_board_is_invalid() {
    let mut engine = MatchEngine::with_seed(BoardConfig::default(), 11);
    let before = engine.snapshot().clone();

    for (from, to) in [((7, 3), (8, 3)), ((2, 7), (2, 8)), ((8, 8), (7, 8))] {
        assert_eq!(
            engine.request_swap(from, to),
            Err(EngineError::InvalidSwap { from, to })
        );
    }

    assert_eq!(engine.snapshot(), &before);
    assert!(!engine.is_busy());
}

#[test]
fn row_with_two_runs_refills_exactly_six_cells() {
    let grid = Grid::parse(
        (8, 8),
        &[
            "RBRBRBRB", //
            "BRBRBRBR", //
            "RBRBRBRB", //
            "BRBRBRBR", //
            "RRBBBGGG", //
            "BGRYRYRB", //
            "RBRBRBRB", //
            "BRBRBRBR", //
        ],
    )
    .unwrap();
    let refill = ScriptedTileSource::new([TileType::Yellow, TileType::Red]);
    let mut engine = MatchEngine::from_grid(BoardConfig::default(), grid.clone(), refill).unwrap();

    let matches = engine.find_matches();
    assert_eq!(
        matches.to_vec(),
        [(2, 4), (3, 4), (4, 4), (5, 4), (6, 4), (7, 4)]
    );

    assert_eq!(engine.stabilize(), Ok(true));

    let events = engine.drain_events();
    let EngineEvent::CellsRefilled(refilled) = &events[1] else {
        panic!("expected refill, got {events:?}");
    };
    assert_eq!(refilled.len(), 6);
    assert_eq!(engine.tile_at((0, 4)), Ok(TileType::Red));
    assert_eq!(engine.tile_at((1, 4)), Ok(TileType::Red));
    let changed: Vec<Coord2> = grid
        .iter_cells()
        .filter(|cell| engine.snapshot()[cell.coords] != cell.tile)
        .map(|cell| cell.coords)
        .collect();
    assert!(changed.iter().all(|coords| matches.contains(*coords)));
}

#[test]
fn corner_swap_without_match_reverts() {
    let grid = Grid::parse(
        (8, 8),
        &[
            "RBGYRBGY", //
            "GYRBGYRB", //
            "RBGYRBGY", //
            "GYRBGYRB", //
            "RBGYRBGY", //
            "GYRBGYRB", //
            "RBGYRBGY", //
            "GYRBGYRB", //
        ],
    )
    .unwrap();
    let mut engine =
        MatchEngine::from_grid(BoardConfig::default(), grid.clone(), |_: Coord2| TileType::Red)
            .unwrap();

    assert_eq!(engine.request_swap((0, 0), (1, 0)), Ok(SwapOutcome::Reverted));
    assert_eq!(engine.finish_swap(), Ok(SwapOutcome::Reverted));

    assert_eq!(engine.snapshot(), &grid);
    let events = engine.drain_events();
    assert!(events.contains(&EngineEvent::SwapReverted {
        from: (0, 0),
        to: (1, 0)
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, EngineEvent::CellsCleared(_))));
}
