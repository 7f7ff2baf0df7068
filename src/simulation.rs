#![cfg(feature = "std")]

//! Self-play against a hidden random fleet, always firing at the top
//! suggestion. Used to judge targeting quality.

use rand::Rng;
use serde::Serialize;

use crate::{
    analysis::{analyze, AdvisorConfig},
    board::{Board, Coordinate},
    config::{fleet, BB, BOARD_SIZE, TOTAL_FLEET_AREA},
    placement::random_layout,
    probability::Estimate,
};

/// Summary of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub shots: usize,
    pub hits: usize,
    pub exact_turns: usize,
    pub partial_turns: usize,
    pub fallback_turns: usize,
    /// Every ship cell was hit.
    pub fleet_sunk: bool,
}

/// Hide a random fleet and shoot at it until every ship cell is hit.
pub fn simulate_game<R: Rng + ?Sized>(
    rng: &mut R,
    config: &AdvisorConfig,
) -> anyhow::Result<SimulationReport> {
    let layout = random_layout(rng, fleet()).map_err(|e| anyhow::anyhow!(e))?;
    let ship_map = layout
        .iter()
        .fold(BB::new(), |map, placement| map | placement.footprint());

    let mut board = Board::new();
    let mut hits: Vec<Coordinate> = Vec::new();
    let mut misses: Vec<Coordinate> = Vec::new();
    let mut report = SimulationReport {
        shots: 0,
        hits: 0,
        exact_turns: 0,
        partial_turns: 0,
        fallback_turns: 0,
        fleet_sunk: false,
    };

    while hits.len() < TOTAL_FLEET_AREA && report.shots < BOARD_SIZE * BOARD_SIZE {
        let analysis = analyze(&board, config);
        match analysis.grid.estimate() {
            Estimate::Exact => report.exact_turns += 1,
            Estimate::Partial => report.partial_turns += 1,
            Estimate::Fallback(_) => report.fallback_turns += 1,
        }
        let target = match analysis.suggestions.first() {
            Some(s) => (s.row, s.col),
            None => match board.unknown().iter_set_bits().next() {
                Some(cell) => cell,
                None => break,
            },
        };

        report.shots += 1;
        if ship_map.get(target.0, target.1)? {
            hits.push(Coordinate::from(target));
        } else {
            misses.push(Coordinate::from(target));
        }
        board.replace(&hits, &misses).map_err(|e| anyhow::anyhow!(e))?;
        log::debug!("shot {} at {:?}: {} hits so far", report.shots, target, hits.len());
    }

    report.hits = hits.len();
    report.fleet_sunk = hits.len() == TOTAL_FLEET_AREA;
    Ok(report)
}
