use battleship_advisor::{
    fleet, search, Board, Coordinate, SearchBudget, SearchOutcome, TOTAL_FLEET_AREA,
};

fn coords(cells: &[(usize, usize)]) -> Vec<Coordinate> {
    cells.iter().map(|&cell| Coordinate::from(cell)).collect()
}

/// Cells left open on the "bottom row" fixture. Each ship has one natural
/// home, and row 9 offers every straight ship an alternative.
fn open_cells() -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    for r in 0..2 {
        open.extend((0..5).map(|c| (r, c)));
        open.extend([(r, 7), (r, 8)]);
    }
    open.extend((0..5).map(|c| (3, c)));
    for r in 4..6 {
        open.extend([(r, 7), (r, 8)]);
    }
    open.extend((0..4).map(|c| (5, c)));
    open.extend((0..3).map(|c| (7, c)));
    open.extend((0..10).map(|c| (9, c)));
    open
}

/// Every cell not in `open` plus `extra`.
fn misses_outside(open: &[(usize, usize)], extra: &[(usize, usize)]) -> Vec<Coordinate> {
    let mut cells: Vec<(usize, usize)> = (0..10)
        .flat_map(|r| (0..10).map(move |c| (r, c)))
        .filter(|cell| !open.contains(cell))
        .collect();
    cells.extend_from_slice(extra);
    coords(&cells)
}

fn bottom_row_board(hits: &[(usize, usize)], extra_misses: &[(usize, usize)]) -> Board {
    Board::from_marks(&coords(hits), &misses_outside(&open_cells(), extra_misses)).unwrap()
}

fn coverage_sum(outcome: &SearchOutcome) -> f64 {
    outcome.coverage.iter().flatten().sum()
}

fn bottom_row(outcome: &SearchOutcome) -> Vec<f64> {
    (0..10).map(|c| outcome.coverage_at(9, c)).collect()
}

#[test]
fn test_single_consistent_configuration() {
    let home: Vec<(usize, usize)> = open_cells().into_iter().filter(|&(r, _)| r != 9).collect();
    let board = Board::from_marks(&[], &misses_outside(&home, &[])).unwrap();
    let outcome = search(&board, fleet(), SearchBudget::unlimited());

    assert_eq!(outcome.configurations, 1);
    assert_eq!(outcome.estimated, 1.0);
    assert!(outcome.is_exhaustive());
    for &(r, c) in &home {
        assert_eq!(outcome.coverage_at(r, c), 1.0, "cell ({}, {})", r, c);
    }
    assert_eq!(coverage_sum(&outcome), TOTAL_FLEET_AREA as f64);
}

#[test]
fn test_exhaustive_count_on_constrained_board() {
    let board = bottom_row_board(&[], &[]);
    let outcome = search(&board, fleet(), SearchBudget::unlimited());

    assert!(outcome.is_exhaustive());
    assert_eq!(outcome.configurations, 182);
    assert_eq!(outcome.estimated, 182.0);
    assert_eq!(
        bottom_row(&outcome),
        vec![64.0, 108.0, 132.0, 138.0, 138.0, 138.0, 138.0, 132.0, 108.0, 64.0]
    );
    // the carrier has exactly one legal spot
    assert_eq!(outcome.coverage_at(0, 0), 182.0);
    assert_eq!(outcome.coverage_at(7, 1), 32.0);
    assert_eq!(outcome.coverage_at(8, 0), 0.0);
    assert_eq!(coverage_sum(&outcome), 182.0 * TOTAL_FLEET_AREA as f64);
}

#[test]
fn test_hits_must_be_covered() {
    let board = bottom_row_board(&[(9, 0)], &[]);
    let outcome = search(&board, fleet(), SearchBudget::unlimited());

    assert!(outcome.is_exhaustive());
    assert_eq!(outcome.configurations, 64);
    assert_eq!(
        bottom_row(&outcome),
        vec![64.0, 64.0, 64.0, 54.0, 46.0, 35.0, 46.0, 48.0, 40.0, 20.0]
    );
}

#[test]
fn test_two_hits_and_an_extra_miss() {
    let board = bottom_row_board(&[(9, 0), (3, 2)], &[(9, 4)]);
    let outcome = search(&board, fleet(), SearchBudget::unlimited());

    assert!(outcome.is_exhaustive());
    assert_eq!(outcome.configurations, 14);
    assert_eq!(
        bottom_row(&outcome),
        vec![14.0, 14.0, 14.0, 9.0, 0.0, 7.0, 9.0, 10.0, 9.0, 7.0]
    );
    assert_eq!(outcome.coverage_at(3, 2), 14.0);
}

#[test]
fn test_unreachable_hit_has_no_configuration() {
    let board = Board::from_marks(
        &coords(&[(5, 5)]),
        &coords(&[(4, 5), (6, 5), (5, 4), (5, 6)]),
    )
    .unwrap();
    let outcome = search(&board, fleet(), SearchBudget::nodes(20_000));

    assert_eq!(outcome.configurations, 0);
    assert_eq!(outcome.estimated, 0.0);
    assert!(outcome.is_exhaustive());
    assert_eq!(coverage_sum(&outcome), 0.0);
}

#[test]
fn test_more_hits_than_fleet_cells() {
    let hits: Vec<(usize, usize)> = (0..31).map(|i| (i / 10, i % 10)).collect();
    let board = Board::from_marks(&coords(&hits), &[]).unwrap();
    let outcome = search(&board, fleet(), SearchBudget::nodes(20_000));

    assert_eq!(outcome.configurations, 0);
    assert_eq!(outcome.nodes, 0);
    assert!(outcome.is_exhaustive());
}

#[test]
fn test_blank_board_is_truncated_under_budget() {
    let outcome = search(&Board::new(), fleet(), SearchBudget::nodes(20_000));

    assert!(outcome.truncated);
    assert!(outcome.configurations > 0);
    assert!(outcome.nodes <= 20_000);
    // the estimate extrapolates past what was reached
    assert!(outcome.estimated > outcome.configurations as f64);
    let mass = coverage_sum(&outcome) / outcome.estimated;
    assert!((mass - TOTAL_FLEET_AREA as f64).abs() < 1e-9, "mass {}", mass);
    for r in 0..10 {
        for c in 0..10 {
            assert!(outcome.coverage_at(r, c) <= outcome.estimated * (1.0 + 1e-12));
        }
    }
}

#[test]
fn test_truncated_blank_board_stays_symmetric() {
    let outcome = search(&Board::new(), fleet(), SearchBudget::nodes(100_000));
    assert!(outcome.truncated);
    let p = |r: usize, c: usize| outcome.coverage_at(r, c) / outcome.estimated;

    let mut worst = 0.0f64;
    for r in 0..10 {
        for c in 0..10 {
            for (rr, cc) in [(r, 9 - c), (9 - r, c), (c, r), (9 - r, 9 - c)] {
                worst = worst.max((p(r, c) - p(rr, cc)).abs());
            }
        }
    }
    assert!(worst < 0.03, "largest gap between mirrored cells: {}", worst);
    // corners hold the fewest placements
    assert!(p(0, 0) < p(4, 4));
    assert!(p(9, 9) < p(5, 5));
}

#[test]
fn test_budget_too_small_for_one_dive() {
    let outcome = search(&Board::new(), fleet(), SearchBudget::nodes(5));
    assert!(outcome.truncated);
    assert_eq!(outcome.configurations, 0);
}

#[test]
fn test_node_budget_is_deterministic() {
    let board = Board::from_marks(&coords(&[(4, 4)]), &coords(&[(4, 5), (0, 0)])).unwrap();
    let first = search(&board, fleet(), SearchBudget::nodes(10_000));
    let second = search(&board, fleet(), SearchBudget::nodes(10_000));
    assert_eq!(first, second);
}
