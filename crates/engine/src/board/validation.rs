use crate::types::*;
use super::Board;
use super::moves::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};

impl Board {
    /// Direct threat scan: is `square` attacked by any piece of `by_color`?
    /// Never calls back into move generation.
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        self.check_pawn_threats(square, by_color)
            || self.check_step_threats(square, by_color, &KNIGHT_OFFSETS, PieceKind::Knight)
            || self.check_step_threats(square, by_color, &KING_OFFSETS, PieceKind::King)
            || self.check_sliding_threats(square, by_color, &ROOK_DIRECTIONS, PieceKind::Rook)
            || self.check_sliding_threats(square, by_color, &BISHOP_DIRECTIONS, PieceKind::Bishop)
    }

    fn check_pawn_threats(&self, square: Square, by_color: Color) -> bool {
        // An attacking pawn stands one step behind the square from its own side
        let back = -by_color.pawn_direction();
        [-1, 1].into_iter().any(|dc| {
            square
                .offset(back, dc)
                .and_then(|from| self.get(from))
                .is_some_and(|p| p.color == by_color && p.kind == PieceKind::Pawn)
        })
    }

    fn check_step_threats(&self, square: Square, by_color: Color, offsets: &[(i8, i8)], kind: PieceKind) -> bool {
        offsets.iter().any(|&(dr, dc)| {
            square
                .offset(dr, dc)
                .and_then(|from| self.get(from))
                .is_some_and(|p| p.color == by_color && p.kind == kind)
        })
    }

    /// Casts a ray per direction; the first piece hit attacks if it is a
    /// `slider` or a Queen of `by_color`.
    fn check_sliding_threats(&self, square: Square, by_color: Color, directions: &[(i8, i8)], slider: PieceKind) -> bool {
        for &(dr, dc) in directions {
            let mut current = square;
            while let Some(next) = current.offset(dr, dc) {
                if let Some(piece) = self.get(next) {
                    if piece.color == by_color && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
        false
    }

    /// A color without a King on the board is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Ok(king) => self.is_square_attacked(king, color.opposite()),
            Err(_) => false,
        }
    }

    /// Legality filter for a pseudo-legal move. Simulates the move on this
    /// board and restores every touched square before answering.
    pub fn is_legal_move(&mut self, from: Square, to: Square, color: Color) -> bool {
        let piece = match self.get(from) {
            Some(piece) if piece.color == color => piece,
            _ => return false,
        };

        if piece.kind == PieceKind::King && is_castling_shape(from, to) {
            return self.is_castling_path_safe(piece, to);
        }

        let captured = self.get(to);
        self.set(from, None);
        self.set(to, Some(piece));
        let in_check = self.is_in_check(color);
        self.set(to, captured);
        self.set(from, Some(piece));

        !in_check
    }

    /// Walks the King one square at a time toward `to`, testing check after
    /// each placement (the final square included).
    fn is_castling_path_safe(&mut self, king: Piece, to: Square) -> bool {
        let color = king.color;
        if self.is_in_check(color) {
            return false;
        }

        let from = king.position;
        let step: i8 = if to.col() > from.col() { 1 } else { -1 };
        let mut path = vec![(from, Some(king))];
        let mut current = from;
        while current != to {
            match current.offset(0, step) {
                Some(next) => {
                    path.push((next, self.get(next)));
                    current = next;
                }
                None => return false,
            }
        }

        self.set(from, None);
        let mut safe = true;
        for i in 1..path.len() {
            if i > 1 {
                let (previous, original) = path[i - 1];
                self.set(previous, original);
            }
            self.set(path[i].0, Some(king));
            if self.is_in_check(color) {
                safe = false;
                break;
            }
        }

        for &(square, original) in path.iter().rev() {
            self.set(square, original);
        }
        safe
    }

    /// Every legal move for `color`, origins in scan order.
    pub fn legal_moves(&mut self, color: Color) -> Vec<Move> {
        let pieces: Vec<Piece> = self.pieces_of(color).collect();
        let mut moves = Vec::new();

        for piece in pieces {
            for target in piece.get_valid_moves(self) {
                if self.is_legal_move(piece.position, target, color) {
                    moves.push(Move::new(piece.position, target));
                }
            }
        }

        moves
    }

    /// Legal destinations of the piece on `square` (empty if none).
    pub fn legal_moves_from(&mut self, square: Square) -> Vec<Square> {
        let Some(piece) = self.get(square) else {
            return Vec::new();
        };
        piece
            .get_valid_moves(self)
            .into_iter()
            .filter(|&target| self.is_legal_move(square, target, piece.color))
            .collect()
    }

    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let pieces: Vec<Piece> = self.pieces_of(color).collect();
        for piece in pieces {
            for target in piece.get_valid_moves(self) {
                if self.is_legal_move(piece.position, target, color) {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Status with `color` to move: checkmate, stalemate, check or in progress.
    pub fn status_for(&mut self, color: Color) -> GameStatus {
        let in_check = self.is_in_check(color);
        match (in_check, self.has_legal_move(color)) {
            (true, false) => GameStatus::Checkmate(color),
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(color),
            (false, true) => GameStatus::InProgress,
        }
    }
}

/// King move of exactly two columns along its row.
pub fn is_castling_shape(from: Square, to: Square) -> bool {
    from.row() == to.row() && from.col().abs_diff(to.col()) == 2
}
