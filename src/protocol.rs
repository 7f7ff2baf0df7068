#![cfg(feature = "std")]

//! JSON bodies exchanged with the presentation layer, and the API the HTTP
//! server dispatches to.

use serde::{Deserialize, Serialize};

use crate::{
    analysis::Analysis,
    board::Coordinate,
    config::BOARD_SIZE,
    ship::ShipTemplate,
    suggest::Suggestion,
};

/// Body of `POST /update-board`. Both lists hold the complete current sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBoardRequest {
    #[serde(default)]
    pub hits: Vec<Coordinate>,
    #[serde(default)]
    pub misses: Vec<Coordinate>,
}

/// Success reply for commands without a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Reply for any rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Body of `GET /get-probabilities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitiesResponse {
    pub success: bool,
    pub probabilities: [[f64; BOARD_SIZE]; BOARD_SIZE],
    pub suggestions: Vec<Suggestion>,
    /// Every consistent configuration was counted.
    pub exact: bool,
    /// The grid is the independent-ship density, not search output.
    pub fallback: bool,
    /// `search_budget_exceeded` or `no_valid_configuration` when not exact.
    pub approximation: Option<String>,
    pub configurations: u64,
    /// Estimated total; equals `configurations` when `exact`.
    pub estimated_configurations: f64,
}

impl From<&Analysis> for ProbabilitiesResponse {
    fn from(analysis: &Analysis) -> Self {
        let estimate = analysis.grid.estimate();
        Self {
            success: true,
            probabilities: *analysis.grid.rows(),
            suggestions: analysis.suggestions.clone(),
            exact: estimate.is_exact(),
            fallback: estimate.is_fallback(),
            approximation: estimate.approximation().map(|a| a.as_str().to_string()),
            configurations: analysis.grid.configurations(),
            estimated_configurations: analysis.grid.estimated_configurations(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipInfo {
    pub name: String,
    pub height: usize,
    pub width: usize,
}

impl From<&ShipTemplate> for ShipInfo {
    fn from(ship: &ShipTemplate) -> Self {
        Self {
            name: ship.name().to_string(),
            height: ship.height(),
            width: ship.width(),
        }
    }
}

/// Body of `GET /board-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfoResponse {
    pub success: bool,
    pub board_size: usize,
    pub ships: Vec<ShipInfo>,
    pub total_hits: usize,
    pub total_misses: usize,
}

/// Operations behind the HTTP routes.
#[async_trait::async_trait]
pub trait AdvisorApi: Send + Sync {
    async fn update_board(&self, request: UpdateBoardRequest) -> anyhow::Result<()>;
    async fn probabilities(&self) -> anyhow::Result<ProbabilitiesResponse>;
    async fn reset_board(&self) -> anyhow::Result<()>;
    async fn board_info(&self) -> anyhow::Result<BoardInfoResponse>;
}
