use battleship_advisor::{analyze, ui, AdvisorConfig, Board, Coordinate, SearchBudget};

#[test]
fn parse_cells_accepts_pairs() {
    let cells = ui::parse_cells(" 0,1; 9 , 9 ;").unwrap();
    assert_eq!(cells, vec![Coordinate::new(0, 1), Coordinate::new(9, 9)]);
    assert!(ui::parse_cells("").unwrap().is_empty());
    // range checks belong to the board
    assert_eq!(ui::parse_cells("-1,3").unwrap(), vec![Coordinate::new(-1, 3)]);
}

#[test]
fn parse_cells_rejects_garbage() {
    assert!(ui::parse_cells("1;2").is_err());
    assert!(ui::parse_cells("a,b").is_err());
}

#[test]
fn rendering_marks_known_cells() {
    let board = Board::from_marks(&[Coordinate::new(0, 0)], &[Coordinate::new(0, 1)]).unwrap();
    let config = AdvisorConfig {
        budget: SearchBudget::nodes(2_000),
        ..AdvisorConfig::default()
    };
    let analysis = analyze(&board, &config);

    let grid = ui::render_probability_board(&analysis.grid, &board);
    let first_row = grid.lines().nth(1).unwrap();
    assert!(first_row.starts_with(" 0     X    ·"));
    assert_eq!(grid.lines().count(), 11);

    let targets = ui::render_suggestions(&analysis.suggestions);
    assert_eq!(targets.lines().count(), analysis.suggestions.len());
    assert_eq!(ui::render_suggestions(&[]), "No targets left to suggest.\n");
}
