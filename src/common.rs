//! Error types shared by the board, placement and fleet layout code.

use core::fmt;

use crate::bitboard::BitBoardError;

/// Reasons a hit/miss update is rejected. The board keeps its previous state
/// whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A coordinate lies outside `[0, BOARD_SIZE)` on either axis.
    OutOfBounds { row: i64, col: i64 },
    /// The same coordinate was reported as both a hit and a miss.
    ConflictingMark { row: usize, col: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the board", row, col)
            }
            ValidationError::ConflictingMark { row, col } => {
                write!(f, "Coordinate ({}, {}) is marked as both hit and miss", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

/// Errors raised while building placements or laying out a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Underlying bitboard error (placement leaves the board).
    BitBoardError(BitBoardError),
    /// Random placement gave up after repeated overlaps.
    UnableToPlaceShip(&'static str),
}

impl From<BitBoardError> for LayoutError {
    fn from(err: BitBoardError) -> Self {
        LayoutError::BitBoardError(err)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            LayoutError::UnableToPlaceShip(name) => write!(f, "Unable to place {}", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
