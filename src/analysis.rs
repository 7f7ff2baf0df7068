//! One full pass from board to probabilities and targets.

use alloc::vec::Vec;

use crate::board::Board;
use crate::config::{fleet, DEFAULT_SUGGESTIONS};
use crate::probability::{aggregate, ProbabilityGrid};
use crate::search::{search, SearchBudget};
use crate::suggest::{rank, Suggestion};

/// Settings for each analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub budget: SearchBudget,
    /// Number of ranked targets to return.
    pub suggestions: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

/// Probability grid plus ranked targets for one board.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub grid: ProbabilityGrid,
    pub suggestions: Vec<Suggestion>,
}

/// Search, aggregate and rank for `board` using the standard fleet.
pub fn analyze(board: &Board, config: &AdvisorConfig) -> Analysis {
    let ships = fleet();
    let outcome = search(board, ships, config.budget);
    let grid = aggregate(&outcome, board, ships);
    let suggestions = rank(&grid, board, config.suggestions);
    Analysis { grid, suggestions }
}
