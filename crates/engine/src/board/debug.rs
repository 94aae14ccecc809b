use std::fmt;

use crate::types::*;
use crate::zobrist;
use super::Board;

impl Board {
    /// Checks the placement invariants: every piece records its own slot,
    /// each king cache matches the King on the board, and the incremental
    /// fingerprint equals a from-scratch recomputation.
    pub fn verify_integrity(&self) -> bool {
        let mut kings = [None; 2];
        let mut hash = 0u64;

        for square in Square::all() {
            if let Some(piece) = self.get(square) {
                if piece.position != square {
                    return false;
                }
                if piece.kind == PieceKind::King {
                    kings[piece.color.index()] = Some(square);
                }
                hash ^= zobrist::piece_key(&piece, square);
            }
        }

        kings == self.king_positions && hash == self.hash
    }

    /// Board diagram, one line per row starting at row 0.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(8 * 12);
        for row in 0..8u8 {
            out.push_str(&format!("{} ", 8 - row));
            for col in 0..8u8 {
                let square = Square::new_unchecked(row, col);
                out.push(self.get(square).map_or('.', |piece| piece.symbol()));
            }
            out.push('\n');
        }
        out.push_str("  abcdefgh\n");
        out
    }

    /// Builds a position from eight 8-character rows, row 0 (rank 8) first.
    /// `.` is empty, upper case is White. All pieces start unmoved.
    ///
    /// Panics on a malformed diagram.
    #[cfg(any(test, feature = "test-util"))]
    pub fn from_diagram(rows: [&str; 8]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), 8, "diagram row {} must have 8 squares", row);
            for (col, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_initial(ch)
                    .unwrap_or_else(|| panic!("unknown piece letter {:?}", ch));
                let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
                let square = Square::new_unchecked(row as u8, col as u8);
                board.set(square, Some(Piece::new(kind, color, square)));
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}
