//! Board dimensions, the fleet catalog and default search settings.

use crate::bitboard::BitBoard;
use crate::ship::ShipTemplate;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 6;

/// Bitboard covering one 10×10 board.
pub type BB = BitBoard<u128, BOARD_SIZE>;

/// The fixed fleet, in catalog order.
pub const FLEET: [ShipTemplate; NUM_SHIPS] = [
    ShipTemplate::new("Carrier", 2, 5),
    ShipTemplate::new("Battleship", 1, 5),
    ShipTemplate::new("Cruiser", 1, 4),
    ShipTemplate::new("Submarine", 1, 3),
    ShipTemplate::new("Destroyer", 2, 2),
    ShipTemplate::new("Destroyer", 2, 2),
];

/// Total number of cells covered by the standard fleet.
pub const TOTAL_FLEET_AREA: usize = 10 + 5 + 4 + 3 + 4 + 4;

/// Number of ranked targets returned with each analysis.
pub const DEFAULT_SUGGESTIONS: usize = 10;

/// Placements the search may make before it stops and reports an estimate.
/// Well under a second in release builds.
pub const DEFAULT_NODE_BUDGET: u64 = 500_000;

/// Read-only view of the fleet catalog.
pub fn fleet() -> &'static [ShipTemplate] {
    &FLEET
}

/// Look up a ship template by name. Returns `None` for unknown names.
pub fn ship_by_name(name: &str) -> Option<ShipTemplate> {
    FLEET.iter().copied().find(|def| def.name() == name)
}
