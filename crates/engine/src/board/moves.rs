use crate::types::*;
use super::Board;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// Columns of the castling King and Rooks
pub(crate) const KING_HOME_COL: u8 = 4;
pub(crate) const KINGSIDE_ROOK_COL: u8 = 7;
pub(crate) const QUEENSIDE_ROOK_COL: u8 = 0;

impl Piece {
    /// Pseudo-legal destinations: follows the movement pattern and occupancy
    /// but ignores whether the mover's own King is left in check.
    pub fn get_valid_moves(&self, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(board),
            PieceKind::Knight => self.step_moves(board, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.sliding_moves(board, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.sliding_moves(board, &ROOK_DIRECTIONS),
            PieceKind::Queen => {
                let mut moves = self.sliding_moves(board, &ROOK_DIRECTIONS);
                moves.extend(self.sliding_moves(board, &BISHOP_DIRECTIONS));
                moves
            }
            PieceKind::King => self.king_moves(board),
        }
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Square> {
        let mut moves = Vec::new();
        let direction = self.color.pawn_direction();

        // Forward moves only onto empty squares
        if let Some(forward) = self.position.offset(direction, 0) {
            if board.is_empty(forward) {
                moves.push(forward);

                if self.position.row() == self.color.pawn_start_row() {
                    if let Some(double) = forward.offset(direction, 0) {
                        if board.is_empty(double) {
                            moves.push(double);
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for dc in [-1, 1] {
            if let Some(target) = self.position.offset(direction, dc) {
                if matches!(board.get(target), Some(other) if other.is_enemy_of(self)) {
                    moves.push(target);
                }
            }
        }

        moves
    }

    fn step_moves(&self, board: &Board, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| self.position.offset(dr, dc))
            .filter(|&target| match board.get(target) {
                None => true,
                Some(other) => other.is_enemy_of(self),
            })
            .collect()
    }

    fn sliding_moves(&self, board: &Board, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();

        for &(dr, dc) in directions {
            let mut current = self.position;
            while let Some(target) = current.offset(dr, dc) {
                match board.get(target) {
                    None => moves.push(target),
                    Some(other) => {
                        if other.is_enemy_of(self) {
                            moves.push(target); // Capture, then blocked
                        }
                        break;
                    }
                }
                current = target;
            }
        }

        moves
    }

    fn king_moves(&self, board: &Board) -> Vec<Square> {
        let mut moves = self.step_moves(board, &KING_OFFSETS);

        let home = Square::new_unchecked(self.color.home_row(), KING_HOME_COL);
        if self.has_moved || self.position != home || board.is_in_check(self.color) {
            return moves;
        }

        if self.can_castle(board, KINGSIDE_ROOK_COL) {
            moves.push(Square::new_unchecked(home.row(), KING_HOME_COL + 2));
        }
        if self.can_castle(board, QUEENSIDE_ROOK_COL) {
            moves.push(Square::new_unchecked(home.row(), KING_HOME_COL - 2));
        }

        moves
    }

    /// Rook state, empty path and unattacked transit squares. Uses the
    /// direct threat scan so it never re-enters move generation.
    fn can_castle(&self, board: &Board, rook_col: u8) -> bool {
        let row = self.position.row();
        let rook_square = Square::new_unchecked(row, rook_col);

        match board.get(rook_square) {
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == self.color && !rook.has_moved => {}
            _ => return false,
        }

        let (between, transit) = if rook_col == KINGSIDE_ROOK_COL {
            (5..=6, 4..=6)
        } else {
            (1..=3, 2..=4)
        };

        if between.into_iter().any(|col| !board.is_empty(Square::new_unchecked(row, col))) {
            return false;
        }

        let attacker = self.color.opposite();
        !transit
            .into_iter()
            .any(|col| board.is_square_attacked(Square::new_unchecked(row, col), attacker))
    }
}
