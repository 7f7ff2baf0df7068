//! Ranking unexplored cells as next targets.

use alloc::vec::Vec;

use crate::board::{Board, CellStatus};
use crate::config::BOARD_SIZE;
use crate::probability::ProbabilityGrid;

/// A recommended target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    pub row: usize,
    pub col: usize,
    pub probability: f64,
}

/// The `k` most likely unexplored cells, highest probability first. Ties go
/// to the lower row, then the lower column. Cells with zero probability are
/// never suggested.
pub fn rank(grid: &ProbabilityGrid, board: &Board, k: usize) -> Vec<Suggestion> {
    let mut candidates: Vec<Suggestion> = (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
        .filter(|&(row, col)| board.status(row, col) == CellStatus::Unknown)
        .map(|(row, col)| Suggestion {
            row,
            col,
            probability: grid.get(row, col),
        })
        .filter(|s| s.probability > 0.0)
        .collect();

    candidates.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then_with(|| a.row.cmp(&b.row))
            .then_with(|| a.col.cmp(&b.col))
    });
    candidates.truncate(k);
    candidates
}
