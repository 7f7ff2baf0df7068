//! Single-ship placements: legal footprint enumeration against a board and
//! random fleet layouts.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::board::Board;
use crate::common::LayoutError;
use crate::config::{BOARD_SIZE, BB};
use crate::ship::{Orientation, ShipTemplate};

/// A ship template anchored at a top-left cell in a given orientation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    ship: ShipTemplate,
    orientation: Orientation,
    row: usize,
    col: usize,
    footprint: BB,
}

impl Placement {
    /// Anchor `ship` at (`row`, `col`). Fails if the footprint leaves the board.
    pub fn new(
        ship: ShipTemplate,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, LayoutError> {
        let (height, width) = ship.dimensions(orientation);
        let footprint = BB::rectangle(row, col, height, width)?;
        Ok(Self {
            ship,
            orientation,
            row,
            col,
            footprint,
        })
    }

    pub fn ship(&self) -> ShipTemplate {
        self.ship
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Top-left cell (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Cells covered by the ship.
    pub fn footprint(&self) -> BB {
        self.footprint
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Placement {{ ship: \"{}\", origin: ({}, {}), orientation: {:?} }}",
            self.ship.name(),
            self.row,
            self.col,
            self.orientation,
        )
    }
}

/// Every placement of one template that stays on the board and avoids all
/// misses. Anchors are visited row-major, and at each anchor the native
/// orientation comes before the transposed one.
///
/// Hits are ignored here; whether the fleet as a whole explains them is the
/// search's concern.
#[derive(Clone)]
pub struct Placements {
    ship: ShipTemplate,
    blocked: BB,
    cursor: usize,
}

/// Lazily enumerate the legal placements of `ship` on `board`.
pub fn enumerate(ship: ShipTemplate, board: &Board) -> Placements {
    Placements {
        ship,
        blocked: board.misses(),
        cursor: 0,
    }
}

impl Iterator for Placements {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        let orientations = self.ship.orientations();
        while self.cursor < BOARD_SIZE * BOARD_SIZE * orientations.len() {
            let anchor = self.cursor / orientations.len();
            let orientation = orientations[self.cursor % orientations.len()];
            self.cursor += 1;

            let (row, col) = (anchor / BOARD_SIZE, anchor % BOARD_SIZE);
            let (height, width) = self.ship.dimensions(orientation);
            if row + height > BOARD_SIZE || col + width > BOARD_SIZE {
                continue;
            }
            let placement = match Placement::new(self.ship, orientation, row, col) {
                Ok(p) => p,
                Err(_) => {
                    debug_assert!(false, "in-bounds anchor ({}, {}) rejected", row, col);
                    continue;
                }
            };
            if placement.footprint().intersects(self.blocked) {
                continue;
            }
            return Some(placement);
        }
        None
    }
}

/// Randomly place every ship in `fleet` without overlaps.
pub fn random_layout<R: Rng + ?Sized>(
    rng: &mut R,
    fleet: &[ShipTemplate],
) -> Result<Vec<Placement>, LayoutError> {
    let mut occupied = BB::new();
    let mut layout = Vec::with_capacity(fleet.len());
    for &ship in fleet {
        let placement = random_placement(rng, ship, occupied)?;
        occupied |= placement.footprint();
        layout.push(placement);
    }
    Ok(layout)
}

/// Returns a random placement of `ship` that avoids `occupied`.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    ship: ShipTemplate,
    occupied: BB,
) -> Result<Placement, LayoutError> {
    let mut attempts = 0;
    while attempts < 100 {
        attempts += 1;
        let orientations = ship.orientations();
        let orient = orientations[rng.random_range(0..orientations.len())];
        let (height, width) = ship.dimensions(orient);
        let r = rng.random_range(0..=BOARD_SIZE - height);
        let c = rng.random_range(0..=BOARD_SIZE - width);
        let placement = Placement::new(ship, orient, r, c)?;
        if !placement.footprint().intersects(occupied) {
            return Ok(placement);
        }
    }
    Err(LayoutError::UnableToPlaceShip(ship.name()))
}
