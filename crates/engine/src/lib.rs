//! Chess rules engine: placement, pseudo-legal move patterns, the legality
//! filter, check/checkmate/stalemate detection and reversible moves.

pub mod board;
pub mod error;
pub mod game;
pub mod logger;
pub mod perft;
pub mod types;
pub mod zobrist;

pub use board::{Board, MoveSnapshot, RookSnapshot};
pub use error::{ChessError, ChessResult};
pub use game::Game;
pub use logger::GameLogger;
pub use perft::PerftResult;
pub use types::*;
