//! Fleet configuration search.
//!
//! Counts every way the whole fleet can sit on the board at once: ships on
//! legal placements, no two ships sharing a cell, every hit covered by some
//! ship. Each accepted configuration adds its weight to the coverage of every
//! cell it occupies.
//!
//! The search is a depth-first backtrack over ships ordered largest first.
//! It carries an occupancy bitboard and the set of hits that no placed ship
//! covers yet, and abandons a branch as soon as the remaining ships cannot
//! cover those hits (capacity) or cannot reach one of them (reachability).
//!
//! Blank or sparse boards admit far too many configurations to count, so every
//! search runs under a [`SearchBudget`]. Each node splits its remaining node
//! budget evenly across its candidate placements, visiting them in
//! bit-reversed order. A node that runs out after visiting `v` of its `n`
//! candidates scales what its children found by `n / v`, so a truncated
//! search is an estimate of the full counts (Knuth's tree-size estimator)
//! rather than a sample biased toward the branches visited first. With
//! enough budget every scale is 1 and the result is the exact count.

use alloc::vec::Vec;
use core::time::Duration;

use crate::board::Board;
use crate::config::{BOARD_SIZE, BB, DEFAULT_NODE_BUDGET};
use crate::placement::enumerate;
use crate::ship::ShipTemplate;

/// Nodes between wall-clock checks.
const CLOCK_STRIDE: u64 = 1024;

const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Weighted coverage indexed `[row][col]`. Whole numbers when the search is
/// exhaustive.
pub type CoverageGrid = [[f64; BOARD_SIZE]; BOARD_SIZE];

/// Limits on how much work one search may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Ship placements the search may make in total.
    pub max_nodes: u64,
    /// Wall-clock limit. Only enforced with the `std` feature. Once it fires
    /// the result depends on machine speed.
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    /// Budget limited only by node count, which keeps results reproducible.
    pub const fn nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes,
            time_limit: None,
        }
    }

    /// No limit at all. Only sensible on heavily constrained boards.
    pub const fn unlimited() -> Self {
        Self::nodes(u64::MAX)
    }

    pub const fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Node-limited only, so repeated searches of one board agree.
impl Default for SearchBudget {
    fn default() -> Self {
        Self::nodes(DEFAULT_NODE_BUDGET)
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Per-cell estimated number of configurations occupying the cell.
    pub coverage: CoverageGrid,
    /// Configurations actually reached.
    pub configurations: u64,
    /// Estimated number of consistent configurations. Equal to
    /// `configurations` when the search is exhaustive.
    pub estimated: f64,
    /// Ship placements made.
    pub nodes: u64,
    /// True when the budget ran out before the space was exhausted.
    pub truncated: bool,
}

impl SearchOutcome {
    /// True when every consistent configuration was counted.
    pub fn is_exhaustive(&self) -> bool {
        !self.truncated
    }

    pub fn coverage_at(&self, row: usize, col: usize) -> f64 {
        self.coverage[row][col]
    }
}

/// Count the fleet configurations consistent with `board`.
pub fn search(board: &Board, fleet: &[ShipTemplate], budget: SearchBudget) -> SearchOutcome {
    let mut ships: Vec<ShipTemplate> = fleet.to_vec();
    // Largest first; identical templates end up adjacent so their symmetry can
    // be broken by placement index.
    ships.sort_by(|a, b| {
        b.area()
            .cmp(&a.area())
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.height().cmp(&b.height()))
    });

    let slots: Vec<Slot> = ships
        .iter()
        .enumerate()
        .map(|(i, &ship)| Slot {
            footprints: enumerate(ship, board).map(|p| p.footprint()).collect(),
            twin: i > 0 && ships[i - 1] == ship,
        })
        .collect();

    let mut remaining_area = alloc::vec![0usize; ships.len() + 1];
    for i in (0..ships.len()).rev() {
        remaining_area[i] = remaining_area[i + 1] + ships[i].area();
    }

    let mut state = Search {
        slots,
        remaining_area,
        counted: 0,
        nodes: 0,
        truncated: false,
        expired: false,
        clock: Clock::start(budget.time_limit),
    };
    let mut totals = [0.0f64; CELLS];
    let root = state.descend(0, BB::new(), board.hits(), 0, budget.max_nodes, &mut totals);

    let mut coverage = [[0.0f64; BOARD_SIZE]; BOARD_SIZE];
    for (idx, weight) in totals.iter().enumerate() {
        coverage[idx / BOARD_SIZE][idx % BOARD_SIZE] = *weight;
    }
    log::debug!(
        "fleet search: {} configurations reached, {:.3e} estimated, {} nodes, truncated={}",
        state.counted,
        root.weight,
        state.nodes,
        state.truncated
    );
    SearchOutcome {
        coverage,
        configurations: state.counted,
        estimated: root.weight,
        nodes: state.nodes,
        truncated: state.truncated,
    }
}

/// Legal footprints for one ship in search order.
struct Slot {
    footprints: Vec<BB>,
    /// Same template as the previous slot.
    twin: bool,
}

#[derive(Default, Clone, Copy)]
struct Branch {
    /// Estimated configurations below this node.
    weight: f64,
    nodes: u64,
}

struct Search {
    slots: Vec<Slot>,
    /// `remaining_area[d]` is the total area of ships `d..`.
    remaining_area: Vec<usize>,
    counted: u64,
    nodes: u64,
    truncated: bool,
    expired: bool,
    clock: Clock,
}

impl Search {
    /// Place ships `depth..` given the cells already `occupied` and the hits
    /// still `uncovered`, spending at most `budget` nodes. `floor` is the
    /// first placement index this ship may use. The subtree's weighted
    /// coverage is added to `out`.
    fn descend(
        &mut self,
        depth: usize,
        occupied: BB,
        uncovered: BB,
        floor: usize,
        budget: u64,
        out: &mut [f64; CELLS],
    ) -> Branch {
        if depth == self.slots.len() {
            if !uncovered.is_empty() {
                return Branch::default();
            }
            self.counted += 1;
            return Branch {
                weight: 1.0,
                nodes: 0,
            };
        }
        if uncovered.count_ones() > self.remaining_area[depth] {
            return Branch::default();
        }
        if !uncovered.is_empty() && !self.reachable(depth, occupied).contains(uncovered) {
            return Branch::default();
        }

        let last = depth + 1 == self.slots.len();
        let candidates: Vec<usize> = self.slots[depth]
            .footprints
            .iter()
            .enumerate()
            .skip(floor)
            .filter(|(_, fp)| !fp.intersects(occupied) && (!last || fp.contains(uncovered)))
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return Branch::default();
        }

        let next_is_twin = self.slots.get(depth + 1).map_or(false, |s| s.twin);
        // a child needs one node per ship still to place to reach full depth
        let dive = (self.slots.len() - depth) as u64;
        let offset = rotation(self.nodes, candidates.len());

        let mut below = [0.0f64; CELLS];
        let mut branch = Branch::default();
        let mut remaining = budget;
        let mut visited = 0usize;
        for pos in SpreadOrder::new(candidates.len()) {
            if self.expired {
                self.truncated = true;
                break;
            }
            let left = (candidates.len() - visited) as u64;
            let share = (remaining / left).max(dive);
            if share > remaining {
                self.truncated = true;
                break;
            }

            let index = candidates[(pos + offset) % candidates.len()];
            let footprint = self.slots[depth].footprints[index];
            let child_floor = if next_is_twin { index + 1 } else { 0 };
            self.tick();
            let child = self.descend(
                depth + 1,
                occupied | footprint,
                uncovered & !footprint,
                child_floor,
                share - 1,
                &mut below,
            );

            visited += 1;
            remaining -= 1 + child.nodes;
            branch.nodes += 1 + child.nodes;
            if child.weight > 0.0 {
                for (r, c) in footprint.iter_set_bits() {
                    below[r * BOARD_SIZE + c] += child.weight;
                }
                branch.weight += child.weight;
            }
        }
        if visited == 0 || branch.weight == 0.0 {
            branch.weight = 0.0;
            return branch;
        }

        // unvisited candidates are assumed to look like the visited ones
        let scale = candidates.len() as f64 / visited as f64;
        branch.weight *= scale;
        for (total, weight) in out.iter_mut().zip(below.iter()) {
            *total += weight * scale;
        }
        branch
    }

    /// Union of every placement of ships `depth..` that avoids `occupied`.
    fn reachable(&self, depth: usize, occupied: BB) -> BB {
        let mut reach = BB::new();
        for slot in &self.slots[depth..] {
            for fp in &slot.footprints {
                if !fp.intersects(occupied) {
                    reach |= *fp;
                }
            }
        }
        reach
    }

    fn tick(&mut self) {
        self.nodes += 1;
        if self.nodes % CLOCK_STRIDE == 0 && self.clock.passed() {
            self.expired = true;
        }
    }
}

/// Starting offset into a node's candidates, so that consecutive thin dives
/// do not all take the same first placement.
fn rotation(nodes: u64, len: usize) -> usize {
    (nodes.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32) as usize % len
}

/// Indices `0..len` in bit-reversed (van der Corput) order: every prefix is
/// spread roughly evenly over the range.
struct SpreadOrder {
    len: usize,
    bits: u32,
    next: usize,
}

impl SpreadOrder {
    fn new(len: usize) -> Self {
        Self {
            len,
            bits: len.next_power_of_two().trailing_zeros(),
            next: 0,
        }
    }
}

impl Iterator for SpreadOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < (1usize << self.bits) {
            let i = self.next;
            self.next += 1;
            let reversed = if self.bits == 0 {
                0
            } else {
                i.reverse_bits() >> (usize::BITS - self.bits)
            };
            if reversed < self.len {
                return Some(reversed);
            }
        }
        None
    }
}

struct Clock {
    #[cfg(feature = "std")]
    deadline: Option<std::time::Instant>,
}

impl Clock {
    #[cfg(feature = "std")]
    fn start(limit: Option<Duration>) -> Self {
        Self {
            deadline: limit.and_then(|l| std::time::Instant::now().checked_add(l)),
        }
    }

    #[cfg(not(feature = "std"))]
    fn start(_limit: Option<Duration>) -> Self {
        Self {}
    }

    #[cfg(feature = "std")]
    fn passed(&self) -> bool {
        self.deadline
            .map_or(false, |d| std::time::Instant::now() >= d)
    }

    #[cfg(not(feature = "std"))]
    fn passed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_order_is_a_permutation() {
        for len in [1usize, 2, 3, 7, 8, 81, 140] {
            let mut seen: Vec<usize> = SpreadOrder::new(len).collect();
            assert_eq!(seen.len(), len);
            seen.sort_unstable();
            assert!(seen.iter().copied().eq(0..len));
        }
    }

    #[test]
    fn spread_order_prefix_covers_both_halves() {
        let order: Vec<usize> = SpreadOrder::new(100).take(2).collect();
        assert_eq!(order[0], 0);
        assert!(order[1] >= 50);
    }

    #[test]
    fn rotation_stays_in_range() {
        for nodes in 0..500u64 {
            assert!(rotation(nodes, 7) < 7);
        }
    }
}
