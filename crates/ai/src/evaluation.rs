use engine::{Board, Color};

use crate::piece_square_tables::positional_bonus;
use crate::types::piece_value;

/// Static score from `perspective`'s point of view: material plus the
/// positional tables. Positive favours `perspective`.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    evaluate_detailed(board, perspective).2
}

/// Returns (material, positional, total) for `perspective`.
pub fn evaluate_detailed(board: &Board, perspective: Color) -> (i32, i32, i32) {
    let mut material = 0;
    let mut positional = 0;

    for piece in board.pieces() {
        let sign = if piece.color == perspective { 1 } else { -1 };
        material += sign * piece_value(piece.kind);
        positional += sign * positional_bonus(&piece);
    }

    (material, positional, material + positional)
}
