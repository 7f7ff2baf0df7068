//! Observed board state: which cells are confirmed hits, confirmed misses, or
//! still unexplored.

use core::fmt;

use crate::common::ValidationError;
use crate::config::{BOARD_SIZE, BB};

/// A grid coordinate as reported by the caller. Signed so that negative input
/// can be rejected as out of bounds instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: i64,
    pub col: i64,
}

impl Coordinate {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Board cell for this coordinate, or `OutOfBounds`.
    pub fn cell(self) -> Result<(usize, usize), ValidationError> {
        let size = BOARD_SIZE as i64;
        if (0..size).contains(&self.row) && (0..size).contains(&self.col) {
            Ok((self.row as usize, self.col as usize))
        } else {
            Err(ValidationError::OutOfBounds {
                row: self.row,
                col: self.col,
            })
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row as i64, col as i64)
    }
}

/// Status of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    Unknown,
    Hit,
    Miss,
}

/// The authoritative 10×10 record of hits and misses.
///
/// Updates always replace the whole record; nothing is merged with what was
/// there before.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    hits: BB,
    misses: BB,
}

impl Board {
    /// Create an empty board (every cell `Unknown`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from complete hit and miss sets.
    pub fn from_marks(hits: &[Coordinate], misses: &[Coordinate]) -> Result<Self, ValidationError> {
        let hits = collect(hits)?;
        let misses = collect(misses)?;
        if let Some((row, col)) = (hits & misses).iter_set_bits().next() {
            return Err(ValidationError::ConflictingMark { row, col });
        }
        Ok(Self { hits, misses })
    }

    /// Replace the entire board with the given hit and miss sets. On error the
    /// board is left exactly as it was.
    pub fn replace(&mut self, hits: &[Coordinate], misses: &[Coordinate]) -> Result<(), ValidationError> {
        *self = Self::from_marks(hits, misses)?;
        Ok(())
    }

    /// Mark every cell `Unknown`.
    pub fn reset(&mut self) {
        self.hits.clear_all();
        self.misses.clear_all();
    }

    /// Copy of the current state for the search to work on.
    pub fn snapshot(&self) -> Board {
        *self
    }

    /// Status of the cell at (`row`, `col`). Cells off the board read as
    /// `Unknown`; callers are expected to stay in bounds.
    pub fn status(&self, row: usize, col: usize) -> CellStatus {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE, "cell ({}, {}) off board", row, col);
        if self.hits.get(row, col).unwrap_or(false) {
            CellStatus::Hit
        } else if self.misses.get(row, col).unwrap_or(false) {
            CellStatus::Miss
        } else {
            CellStatus::Unknown
        }
    }

    /// Bitboard of confirmed hits.
    pub fn hits(&self) -> BB {
        self.hits
    }

    /// Bitboard of confirmed misses.
    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Bitboard of cells with no recorded shot.
    pub fn unknown(&self) -> BB {
        !(self.hits | self.misses)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn miss_count(&self) -> usize {
        self.misses.count_ones()
    }

    /// True when no shot has been recorded.
    pub fn is_blank(&self) -> bool {
        self.hits.is_empty() && self.misses.is_empty()
    }
}

fn collect(coords: &[Coordinate]) -> Result<BB, ValidationError> {
    let mut board = BB::new();
    for coord in coords {
        let (row, col) = coord.cell()?;
        board.set(row, col).map_err(|_| ValidationError::OutOfBounds {
            row: coord.row,
            col: coord.col,
        })?;
    }
    Ok(board)
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for r in 0..BOARD_SIZE {
            write!(f, "  ")?;
            for c in 0..BOARD_SIZE {
                let ch = match self.status(r, c) {
                    CellStatus::Hit => 'X',
                    CellStatus::Miss => 'o',
                    CellStatus::Unknown => '.',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
