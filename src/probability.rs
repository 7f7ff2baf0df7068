//! Turning search coverage into per-cell ship probabilities.

use core::fmt;

use crate::board::{Board, CellStatus};
use crate::config::BOARD_SIZE;
use crate::placement::enumerate;
use crate::search::SearchOutcome;
use crate::ship::ShipTemplate;

/// Probabilities indexed `[row][col]`.
pub type Matrix = [[f64; BOARD_SIZE]; BOARD_SIZE];

/// Why a grid is not an exact answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approximation {
    /// The search budget ran out before every configuration was counted.
    SearchBudgetExceeded,
    /// No fleet configuration fits the evidence.
    NoValidConfiguration,
}

impl Approximation {
    /// Stable snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Approximation::SearchBudgetExceeded => "search_budget_exceeded",
            Approximation::NoValidConfiguration => "no_valid_configuration",
        }
    }
}

impl fmt::Display for Approximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approximation::SearchBudgetExceeded => write!(f, "search budget exceeded"),
            Approximation::NoValidConfiguration => {
                write!(f, "no fleet configuration matches the evidence")
            }
        }
    }
}

/// How a [`ProbabilityGrid`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Estimate {
    /// Every consistent configuration was counted.
    Exact,
    /// Some configurations were counted before the budget ran out.
    Partial,
    /// Nothing was counted; the grid is the independent-ship density.
    Fallback(Approximation),
}

impl Estimate {
    pub fn is_exact(&self) -> bool {
        matches!(self, Estimate::Exact)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Estimate::Fallback(_))
    }

    pub fn approximation(&self) -> Option<Approximation> {
        match self {
            Estimate::Exact => None,
            Estimate::Partial => Some(Approximation::SearchBudgetExceeded),
            Estimate::Fallback(reason) => Some(*reason),
        }
    }
}

/// Per-cell probability that a ship occupies the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityGrid {
    cells: Matrix,
    estimate: Estimate,
    configurations: u64,
    estimated: f64,
}

impl ProbabilityGrid {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &Matrix {
        &self.cells
    }

    pub fn estimate(&self) -> Estimate {
        self.estimate
    }

    /// Configurations the search reached (zero for fallback grids).
    pub fn configurations(&self) -> u64 {
        self.configurations
    }

    /// Estimated number of consistent configurations. Exact when the grid is.
    pub fn estimated_configurations(&self) -> f64 {
        self.estimated
    }

    /// Sum over all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }
}

/// Combine search coverage with the board's certain cells.
///
/// Hits are always 1.0 and misses always 0.0. Unknown cells get their share
/// of the estimated configurations; when nothing was reached they get the
/// independent-ship density from [`independent_density`] instead.
pub fn aggregate(outcome: &SearchOutcome, board: &Board, fleet: &[ShipTemplate]) -> ProbabilityGrid {
    let (mut cells, estimate) = if outcome.configurations > 0 && outcome.estimated > 0.0 {
        let total = outcome.estimated;
        let mut cells = [[0.0f64; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                // scaled sums can round a hair past 1 on forced cells
                *cell = (outcome.coverage[r][c] / total).min(1.0);
            }
        }
        let estimate = if outcome.truncated {
            Estimate::Partial
        } else {
            Estimate::Exact
        };
        (cells, estimate)
    } else {
        let reason = if outcome.truncated {
            Approximation::SearchBudgetExceeded
        } else {
            Approximation::NoValidConfiguration
        };
        (independent_density(board, fleet), Estimate::Fallback(reason))
    };

    for (r, row) in cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            match board.status(r, c) {
                CellStatus::Hit => *cell = 1.0,
                CellStatus::Miss => *cell = 0.0,
                CellStatus::Unknown => {}
            }
        }
    }

    let grid = ProbabilityGrid {
        cells,
        estimate,
        configurations: outcome.configurations,
        estimated: outcome.estimated,
    };
    if outcome.configurations > 0 {
        let area: usize = fleet.iter().map(|s| s.area()).sum();
        let drift = grid.total() - area as f64;
        debug_assert!(drift < 1e-6 && drift > -1e-6, "probability mass drifted by {}", drift);
    }
    grid
}

/// Per-cell count of legal single-ship placements summed over the fleet,
/// normalized so the busiest cell is 1.0. Ships are treated independently, so
/// this is only a rough guide.
pub fn independent_density(board: &Board, fleet: &[ShipTemplate]) -> Matrix {
    let mut counts = [[0u64; BOARD_SIZE]; BOARD_SIZE];
    for &ship in fleet {
        for placement in enumerate(ship, board) {
            for (r, c) in placement.footprint().iter_set_bits() {
                counts[r][c] += 1;
            }
        }
    }

    let max = counts.iter().flatten().copied().max().unwrap_or(0);
    let mut matrix = [[0.0f64; BOARD_SIZE]; BOARD_SIZE];
    if max == 0 {
        return matrix;
    }
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            matrix[r][c] = counts[r][c] as f64 / max as f64;
        }
    }
    matrix
}
