use battleship_advisor::{
    enumerate, fleet, random_layout, ship_by_name, Board, Coordinate, Orientation, BB,
    TOTAL_FLEET_AREA,
};
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn test_empty_board_placement_counts() {
    let board = Board::new();
    let count = |name: &str| enumerate(ship_by_name(name).unwrap(), &board).count();
    assert_eq!(count("Carrier"), 108);
    assert_eq!(count("Battleship"), 120);
    assert_eq!(count("Cruiser"), 140);
    assert_eq!(count("Submarine"), 160);
    assert_eq!(count("Destroyer"), 81);
}

#[test]
fn test_enumeration_order_starts_at_origin() {
    let cruiser = ship_by_name("Cruiser").unwrap();
    let mut placements = enumerate(cruiser, &Board::new());
    let first = placements.next().unwrap();
    let second = placements.next().unwrap();
    assert_eq!(first.ship(), cruiser);
    assert_eq!(first.origin(), (0, 0));
    assert_eq!(first.orientation(), Orientation::Horizontal);
    assert_eq!(second.origin(), (0, 0));
    assert_eq!(second.orientation(), Orientation::Vertical);
    assert_eq!(
        first.footprint(),
        BB::from_cells([(0, 0), (0, 1), (0, 2), (0, 3)]).unwrap()
    );
}

#[test]
fn test_square_ship_has_one_orientation() {
    let destroyer = ship_by_name("Destroyer").unwrap();
    assert!(enumerate(destroyer, &Board::new()).all(|p| p.orientation() == Orientation::Horizontal));
}

#[test]
fn test_misses_block_placements_but_hits_do_not() {
    let submarine = ship_by_name("Submarine").unwrap();
    let missed = Board::from_marks(&[], &[Coordinate::new(0, 0)]).unwrap();
    let hit = Board::from_marks(&[Coordinate::new(0, 0)], &[]).unwrap();

    // (0,0) sits in one horizontal and one vertical submarine footprint
    assert_eq!(enumerate(submarine, &missed).count(), 158);
    assert_eq!(enumerate(submarine, &hit).count(), 160);
    assert!(enumerate(submarine, &missed).all(|p| !p.footprint().intersects(missed.misses())));
}

#[test]
fn test_enumeration_restarts_from_clone() {
    let carrier = ship_by_name("Carrier").unwrap();
    let placements = enumerate(carrier, &Board::new());
    let first: Vec<_> = placements.clone().collect();
    let second: Vec<_> = placements.collect();
    assert_eq!(first, second);
}

#[test]
fn test_random_layout_never_overlaps() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..50 {
        let layout = random_layout(&mut rng, fleet()).unwrap();
        assert_eq!(layout.len(), fleet().len());
        let mut occupied = BB::new();
        for placement in &layout {
            assert!(!placement.footprint().intersects(occupied));
            occupied |= placement.footprint();
        }
        assert_eq!(occupied.count_ones(), TOTAL_FLEET_AREA);
    }
}
