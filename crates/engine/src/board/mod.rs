use crate::error::ChessError;
use crate::types::*;
use crate::zobrist;

// Declare submodules
pub mod moves;
pub mod validation;
pub mod state;
pub mod debug;

pub use state::{MoveSnapshot, RookSnapshot};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Authoritative piece placement.
///
/// `set` is the only mutation primitive; everything else composes it, so the
/// king cache and the fingerprint can never drift from the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    king_positions: [Option<Square>; 2],
    hash: u64,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    /// A board with no pieces, for building positions with `set`.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            king_positions: [None; 2],
            hash: 0,
        }
    }

    fn setup_starting_position(&mut self) {
        for color in [Color::Black, Color::White] {
            let home = color.home_row();
            let pawns = color.pawn_start_row();
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                let col = col as u8;
                let square = Square::new_unchecked(home, col);
                self.set(square, Some(Piece::new(kind, color, square)));

                let square = Square::new_unchecked(pawns, col);
                self.set(square, Some(Piece::new(PieceKind::Pawn, color, square)));
            }
        }
    }

    // Basic board operations
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    /// Overwrite a slot. A placed piece takes the slot as its position, and a
    /// placed King becomes its color's cached king square.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        let (row, col) = (square.row() as usize, square.col() as usize);

        if let Some(old) = self.squares[row][col].take() {
            self.hash ^= zobrist::piece_key(&old, square);
            if old.kind == PieceKind::King && self.king_positions[old.color.index()] == Some(square) {
                self.king_positions[old.color.index()] = None;
            }
        }

        if let Some(mut piece) = piece {
            piece.position = square;
            self.hash ^= zobrist::piece_key(&piece, square);
            if piece.kind == PieceKind::King {
                self.king_positions[piece.color.index()] = Some(square);
            }
            self.squares[row][col] = Some(piece);
        }
    }

    pub fn is_valid(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn king_square(&self, color: Color) -> Result<Square, ChessError> {
        self.king_positions[color.index()].ok_or(ChessError::NoKingFound(color))
    }

    /// Incremental Zobrist digest of the placement (kind, color, square, and
    /// whether each King/Rook is still unmoved).
    pub fn fingerprint(&self) -> u64 {
        self.hash
    }

    /// Occupied squares in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|slot| *slot)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
