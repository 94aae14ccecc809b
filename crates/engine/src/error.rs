//! Error types for the rules engine.
//!
//! All of these are recoverable: the caller re-prompts or ignores the input.

use thiserror::Error;

use crate::types::{Color, GameStatus, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Coordinates outside the 8x8 board
    #[error("Invalid square: ({row}, {col}) is off the board")]
    InvalidSquare { row: i32, col: i32 },

    /// Unparseable algebraic square name
    #[error("Invalid square notation: {0:?}")]
    InvalidNotation(String),

    /// No piece at the move's origin
    #[error("No piece at source square {0}")]
    EmptySource(Square),

    /// Pseudo-legal pattern missing or rejected by the legality filter
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("No {0} king on the board")]
    NoKingFound(Color),

    /// Piece on `square` belongs to the side not on move
    #[error("Piece on {square} belongs to {color}, who is not on move")]
    WrongTurn { square: Square, color: Color },

    #[error("Game is over: {0:?}")]
    GameOver(GameStatus),
}

pub type ChessResult<T> = Result<T, ChessError>;
