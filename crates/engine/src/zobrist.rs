//! Deterministic Zobrist keys, generated at compile time.
//!
//! The board XORs a piece's key in and out on every placement, so its
//! fingerprint is always current and identical across runs.

use crate::types::{Color, Piece, PieceKind, Square};

const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

const fn splitmix64(n: u64) -> u64 {
    let mut z = n.wrapping_mul(SEED).wrapping_add(SEED);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

const fn generate<const N: usize>(offset: u64) -> [[u64; 64]; N] {
    let mut keys = [[0u64; 64]; N];
    let mut table = 0;
    while table < N {
        let mut square = 0;
        while square < 64 {
            keys[table][square] = splitmix64(offset + (table * 64 + square) as u64 + 1);
            square += 1;
        }
        table += 1;
    }
    keys
}

// [color * 6 + kind][square]
const PIECE_KEYS: [[u64; 64]; 12] = generate::<12>(0);

// Extra key for a King or Rook that has not moved yet, so castling
// eligibility is part of the fingerprint.
const UNMOVED_KEYS: [[u64; 64]; 2] = generate::<2>(12 * 64);

/// XORed into search keys when Black is on move.
pub const BLACK_TO_MOVE: u64 = splitmix64(14 * 64 + 1);

pub fn piece_key(piece: &Piece, square: Square) -> u64 {
    let table = piece.color.index() * 6 + piece.kind.index();
    let mut key = PIECE_KEYS[table][square.index()];
    if !piece.has_moved && matches!(piece.kind, PieceKind::King | PieceKind::Rook) {
        key ^= UNMOVED_KEYS[piece.color.index()][square.index()];
    }
    key
}

pub fn side_key(color: Color) -> u64 {
    match color {
        Color::White => 0,
        Color::Black => BLACK_TO_MOVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for table in PIECE_KEYS.iter().chain(UNMOVED_KEYS.iter()) {
            for &key in table.iter() {
                assert_ne!(key, 0);
                assert!(seen.insert(key), "duplicate zobrist key");
            }
        }
        assert!(seen.insert(BLACK_TO_MOVE));
    }

    #[test]
    fn test_moved_flag_changes_rook_key_only() {
        let sq = Square::new_unchecked(7, 7);
        let mut rook = Piece::new(PieceKind::Rook, Color::White, sq);
        let unmoved = piece_key(&rook, sq);
        rook.has_moved = true;
        assert_ne!(unmoved, piece_key(&rook, sq));

        let mut knight = Piece::new(PieceKind::Knight, Color::White, sq);
        let before = piece_key(&knight, sq);
        knight.has_moved = true;
        assert_eq!(before, piece_key(&knight, sq));
    }
}
