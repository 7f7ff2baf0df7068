#![cfg(feature = "std")]

//! Terminal rendering for the `analyze` command.

use crate::{
    analysis::Analysis,
    board::{Board, CellStatus, Coordinate},
    config::BOARD_SIZE,
    probability::ProbabilityGrid,
    suggest::Suggestion,
};

/// Parse `"r,c;r,c"` into coordinates. Whitespace is ignored and an empty
/// string gives an empty list.
pub fn parse_cells(input: &str) -> anyhow::Result<Vec<Coordinate>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (row, col) = pair
                .split_once(',')
                .ok_or_else(|| anyhow::anyhow!("expected \"row,col\", got {:?}", pair))?;
            let row = row
                .trim()
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("bad row in {:?}: {}", pair, e))?;
            let col = col
                .trim()
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("bad column in {:?}: {}", pair, e))?;
            Ok(Coordinate::new(row, col))
        })
        .collect()
}

/// Render the grid with hits as `  X ` and misses as `  · `.
pub fn render_probability_board(grid: &ProbabilityGrid, board: &Board) -> String {
    let mut out = String::from("   ");
    for c in 0..BOARD_SIZE {
        out.push_str(&format!(" {:>4}", c));
    }
    out.push('\n');
    for r in 0..BOARD_SIZE {
        out.push_str(&format!("{:2} ", r));
        for c in 0..BOARD_SIZE {
            match board.status(r, c) {
                CellStatus::Hit => out.push_str("    X"),
                CellStatus::Miss => out.push_str("    ·"),
                CellStatus::Unknown => out.push_str(&format!(" {:4.2}", grid.get(r, c))),
            }
        }
        out.push('\n');
    }
    out
}

/// Render the ranked targets, one per line.
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return String::from("No targets left to suggest.\n");
    }
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        out.push_str(&format!(
            "{:2}. ({}, {})  {:5.1}%\n",
            i + 1,
            s.row,
            s.col,
            s.probability * 100.0
        ));
    }
    out
}

/// Print a full analysis to stdout.
pub fn print_analysis(analysis: &Analysis, board: &Board) {
    println!(
        "\nProbability distribution ({:?}, {} configurations):",
        analysis.grid.estimate(),
        analysis.grid.configurations()
    );
    print!("{}", render_probability_board(&analysis.grid, board));
    println!("\nSuggested targets:");
    print!("{}", render_suggestions(&analysis.suggestions));
}
