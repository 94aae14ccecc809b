use std::cmp::Reverse;

use engine::board::validation::is_castling_shape;
use engine::{Board, Move, PieceKind};

use crate::types::piece_value;

const CASTLING_BONUS: i32 = 20000;
const CAPTURE_BONUS: i32 = 10000;
const CENTER_BONUS: i32 = 50;
const NEAR_CENTER_BONUS: i32 = 20;
const DEVELOPMENT_BONUS: i32 = 10;

/// Ordering heuristic; only affects how early the search prunes.
pub fn score_move(board: &Board, mv: Move) -> i32 {
    let Some(mover) = board.get(mv.from) else {
        return 0;
    };
    let mut score = 0;

    if mover.kind == PieceKind::King && is_castling_shape(mv.from, mv.to) {
        score += CASTLING_BONUS;
    }

    // MVV-LVA
    if let Some(victim) = board.get(mv.to) {
        score += CAPTURE_BONUS + piece_value(victim.kind) - piece_value(mover.kind) / 10;
    }

    let (row, col) = (mv.to.row(), mv.to.col());
    if (3..=4).contains(&row) && (3..=4).contains(&col) {
        score += CENTER_BONUS;
    } else if (2..=5).contains(&row) && (2..=5).contains(&col) {
        score += NEAR_CENTER_BONUS;
    }

    if matches!(mover.kind, PieceKind::Knight | PieceKind::Bishop) && !mover.has_moved {
        score += DEVELOPMENT_BONUS;
    }

    score
}

/// Highest score first; equal scores keep generation order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(score_move(board, mv)));
}
