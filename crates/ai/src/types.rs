use engine::{Move, PieceKind};

/// Search result containing best move and evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub evaluation: i32,
    pub depth: u32,
    pub nodes_searched: u64,
}

/// Material value of a piece kind. A King is worth the mate score.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

/// Flat mate score, no distance-to-mate adjustment
pub const MATE_SCORE: i32 = 20000;
pub const DRAW_SCORE: i32 = 0;

/// Window bound; larger than any reachable score
pub const INFINITY: i32 = 1_000_000;

/// Maximum search depth
pub const MAX_DEPTH: u32 = 8;
