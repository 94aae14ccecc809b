use crate::error::ChessError;
use crate::types::*;
use super::Board;
use super::moves::{KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use super::validation::is_castling_shape;

/// Rook relocated by a castling move, with its state before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookSnapshot {
    pub from: Square,
    pub to: Square,
    pub rook: Piece,
}

/// Everything needed to reverse a move exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSnapshot {
    pub mv: Move,
    /// The mover as it was before the move (prior square and moved-flag)
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
    pub rook: Option<RookSnapshot>,
}

impl MoveSnapshot {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castling(&self) -> bool {
        self.rook.is_some()
    }
}

impl Board {
    /// Relocate a piece and mark it moved; a two-column King move also
    /// relocates the matching Rook. No legality checking and no promotion.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), ChessError> {
        self.relocate(Move::new(from, to), false).map(|_| ())
    }

    /// Trial move used by search: like `apply_move`, plus auto-promotion to a
    /// Queen. The snapshot reverses it through `unmake_move`.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveSnapshot, ChessError> {
        self.relocate(mv, true)
    }

    /// Validated move: the destination must be pseudo-legal for the piece and
    /// pass the legality filter.
    pub fn try_make_move(&mut self, mv: Move) -> Result<MoveSnapshot, ChessError> {
        let piece = self.get(mv.from).ok_or(ChessError::EmptySource(mv.from))?;

        let pseudo_legal = piece.get_valid_moves(self).contains(&mv.to);
        if !pseudo_legal || !self.is_legal_move(mv.from, mv.to, piece.color) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        self.make_move(mv)
    }

    /// Exact reverse of the move that produced `snapshot`.
    pub fn unmake_move(&mut self, snapshot: &MoveSnapshot) {
        if let Some(rook) = &snapshot.rook {
            self.set(rook.to, None);
            self.set(rook.from, Some(rook.rook));
        }
        self.set(snapshot.mv.to, snapshot.captured);
        self.set(snapshot.mv.from, Some(snapshot.moved));
    }

    fn relocate(&mut self, mv: Move, promote: bool) -> Result<MoveSnapshot, ChessError> {
        let moved = self.get(mv.from).ok_or(ChessError::EmptySource(mv.from))?;
        let captured = self.get(mv.to);

        let rook = if moved.kind == PieceKind::King && is_castling_shape(mv.from, mv.to) {
            self.castling_rook(moved.color, mv)
        } else {
            None
        };

        let mut piece = moved;
        piece.has_moved = true;
        let promoted = promote && moved.kind == PieceKind::Pawn && mv.to.row() == moved.color.promotion_row();
        if promoted {
            piece.kind = PieceKind::Queen;
        }

        self.set(mv.from, None);
        self.set(mv.to, Some(piece));

        if let Some(snapshot) = &rook {
            let mut rook_piece = snapshot.rook;
            rook_piece.has_moved = true;
            self.set(snapshot.from, None);
            self.set(snapshot.to, Some(rook_piece));
        }

        Ok(MoveSnapshot {
            mv,
            moved,
            captured,
            promoted,
            rook,
        })
    }

    /// Rook that accompanies a castling King: column 7 lands beside the King
    /// on the kingside, column 0 on the queenside.
    fn castling_rook(&self, color: Color, mv: Move) -> Option<RookSnapshot> {
        let row = mv.from.row();
        let (rook_col, landing_col) = if mv.to.col() > mv.from.col() {
            (KINGSIDE_ROOK_COL, mv.from.col() + 1)
        } else {
            (QUEENSIDE_ROOK_COL, mv.from.col() - 1)
        };

        let from = Square::new(row, rook_col).ok()?;
        let to = Square::new(row, landing_col).ok()?;
        match self.get(from) {
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == color => {
                Some(RookSnapshot { from, to, rook })
            }
            _ => None,
        }
    }
}
