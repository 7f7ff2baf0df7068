#![cfg(feature = "std")]

//! The shared, lock-protected board and the operations the service exposes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    analysis::{analyze, AdvisorConfig, Analysis},
    board::{Board, Coordinate},
    common::ValidationError,
    config::{BOARD_SIZE, FLEET},
    protocol::{AdvisorApi, BoardInfoResponse, ProbabilitiesResponse, ShipInfo, UpdateBoardRequest},
};

/// Owns the single board of a running service.
///
/// Every update, reset and analysis runs under the same lock, so a search
/// never observes a board that is half way through being replaced.
pub struct Advisor {
    board: Mutex<Board>,
    config: AdvisorConfig,
}

impl Advisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            board: Mutex::new(Board::new()),
            config,
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    // The board is a plain value assigned in one step, so a panic elsewhere
    // cannot leave it inconsistent.
    fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the board with the complete hit and miss sets.
    pub fn replace(&self, hits: &[Coordinate], misses: &[Coordinate]) -> Result<(), ValidationError> {
        let mut board = self.lock();
        board.replace(hits, misses)?;
        log::info!(
            "board replaced: {} hits, {} misses",
            board.hit_count(),
            board.miss_count()
        );
        Ok(())
    }

    /// Forget every shot.
    pub fn reset(&self) {
        self.lock().reset();
        log::info!("board reset");
    }

    pub fn snapshot(&self) -> Board {
        self.lock().snapshot()
    }

    /// Run the search against the current board. Blocks for up to the
    /// configured search budget.
    pub fn analyze(&self) -> Analysis {
        let board = self.lock();
        let analysis = analyze(&board, &self.config);
        log::info!(
            "analysis: {:?} over {} configurations (~{:.3e}), {} suggestions",
            analysis.grid.estimate(),
            analysis.grid.configurations(),
            analysis.grid.estimated_configurations(),
            analysis.suggestions.len()
        );
        analysis
    }

    /// Board size, fleet and shot counts.
    pub fn info(&self) -> BoardInfoResponse {
        let board = self.snapshot();
        BoardInfoResponse {
            success: true,
            board_size: BOARD_SIZE,
            ships: FLEET.iter().map(ShipInfo::from).collect(),
            total_hits: board.hit_count(),
            total_misses: board.miss_count(),
        }
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(AdvisorConfig::default())
    }
}

#[async_trait::async_trait]
impl AdvisorApi for Arc<Advisor> {
    async fn update_board(&self, request: UpdateBoardRequest) -> anyhow::Result<()> {
        self.replace(&request.hits, &request.misses)
            .map_err(|e| anyhow::anyhow!(e))
    }

    async fn probabilities(&self) -> anyhow::Result<ProbabilitiesResponse> {
        let advisor = Arc::clone(self);
        let analysis = tokio::task::spawn_blocking(move || advisor.analyze())
            .await
            .map_err(|e| anyhow::anyhow!("analysis task failed: {}", e))?;
        Ok(ProbabilitiesResponse::from(&analysis))
    }

    async fn reset_board(&self) -> anyhow::Result<()> {
        self.reset();
        Ok(())
    }

    async fn board_info(&self) -> anyhow::Result<BoardInfoResponse> {
        Ok(self.info())
    }
}
