//! Turn-keeping game session driven by a UI or a demo loop.

use crate::board::{Board, MoveSnapshot};
use crate::error::{ChessError, ChessResult};
use crate::logger::GameLogger;
use crate::types::*;

#[derive(Debug, Clone, Copy)]
enum Mover {
    Human,
    Ai { time_ms: u128, eval: i32 },
}

#[derive(Debug)]
pub struct Game {
    board: Board,
    current_turn: Color,
    status: GameStatus,
    // Snapshot plus the status it replaced, for undo
    history: Vec<(MoveSnapshot, GameStatus)>,
    logger: GameLogger,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Start from an arbitrary position with `to_move` on move.
    pub fn from_board(mut board: Board, to_move: Color) -> Self {
        let status = board.status_for(to_move);
        Self {
            board,
            current_turn: to_move,
            status,
            history: Vec::new(),
            logger: GameLogger::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for collaborators that run their own mutate/restore
    /// cycles (the search engine). The board must be handed back unchanged.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn history(&self) -> impl Iterator<Item = &MoveSnapshot> {
        self.history.iter().map(|(snapshot, _)| snapshot)
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    /// Legal destinations for highlighting; empty unless the piece on
    /// `square` belongs to the side on move.
    pub fn legal_destinations(&mut self, square: Square) -> Vec<Square> {
        match self.board.get(square) {
            Some(piece) if piece.color == self.current_turn && !self.is_over() => {
                self.board.legal_moves_from(square)
            }
            _ => Vec::new(),
        }
    }

    /// Human move: validated, auto-promoted, then the turn passes.
    pub fn make_move(&mut self, from: Square, to: Square) -> ChessResult<MoveSnapshot> {
        self.play(Move::new(from, to), Mover::Human)
    }

    /// Move chosen by the AI, logged with its search time and evaluation.
    pub fn make_ai_move(&mut self, mv: Move, time_ms: u128, eval: i32) -> ChessResult<MoveSnapshot> {
        self.play(mv, Mover::Ai { time_ms, eval })
    }

    fn play(&mut self, mv: Move, mover: Mover) -> ChessResult<MoveSnapshot> {
        if self.is_over() {
            return Err(ChessError::GameOver(self.status));
        }

        let piece = self.board.get(mv.from).ok_or(ChessError::EmptySource(mv.from))?;
        if piece.color != self.current_turn {
            return Err(ChessError::WrongTurn {
                square: mv.from,
                color: piece.color,
            });
        }

        let snapshot = self.board.try_make_move(mv)?;
        self.history.push((snapshot, self.status));
        self.current_turn = self.current_turn.opposite();
        self.status = self.board.status_for(self.current_turn);

        match mover {
            Mover::Human => self.logger.log_human_move(mv, snapshot.is_capture()),
            Mover::Ai { time_ms, eval } => self.logger.log_ai_move(mv, time_ms, eval),
        }
        if snapshot.promoted {
            self.logger.log_with_indent(&format!("👑 Pawn promoted to Queen on {}", mv.to));
        }
        self.logger.log_status(self.status);

        Ok(snapshot)
    }

    /// Take back the last move, restoring board, turn and status.
    pub fn undo_last(&mut self) -> Option<MoveSnapshot> {
        let (snapshot, previous_status) = self.history.pop()?;
        self.board.unmake_move(&snapshot);
        self.current_turn = self.current_turn.opposite();
        self.status = previous_status;
        self.logger.log_undo(snapshot.mv);
        Some(snapshot)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
