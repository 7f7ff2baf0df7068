#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
pub mod advisor;
mod analysis;
mod bitboard;
mod board;
mod common;
mod config;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod probability;
#[cfg(feature = "std")]
pub mod protocol;
mod search;
#[cfg(feature = "std")]
pub mod server;
mod ship;
#[cfg(feature = "std")]
pub mod simulation;
mod suggest;
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

#[cfg(feature = "std")]
pub use advisor::Advisor;
pub use analysis::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::*;
pub use probability::*;
#[cfg(feature = "std")]
pub use protocol::*;
pub use search::*;
#[cfg(feature = "std")]
pub use server::Server;
pub use ship::*;
#[cfg(feature = "std")]
pub use simulation::{simulate_game, SimulationReport};
pub use suggest::*;
#[cfg(feature = "std")]
pub use transport::http::HttpTransport;
