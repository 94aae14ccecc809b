use std::time::Instant;

use crate::board::Board;
use crate::types::{Color, Move};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }

    fn absorb(&mut self, other: &PerftResult) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

/// Counts leaf positions reachable in exactly `depth` plies with `side` to move.
pub fn perft(board: &mut Board, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in board.legal_moves(side) {
        let Ok(snapshot) = board.make_move(mv) else {
            continue;
        };
        nodes += perft(board, side.opposite(), depth - 1);
        board.unmake_move(&snapshot);
    }

    nodes
}

/// Perft that also classifies the moves of the final ply.
pub fn perft_detailed(board: &mut Board, side: Color, depth: u32) -> PerftResult {
    let start_time = Instant::now();
    let mut result = count_detailed(board, side, depth);
    result.time_ms = start_time.elapsed().as_millis();
    result
}

fn count_detailed(board: &mut Board, side: Color, depth: u32) -> PerftResult {
    let mut result = PerftResult::new();
    if depth == 0 {
        result.nodes = 1;
        return result;
    }

    for mv in board.legal_moves(side) {
        let Ok(snapshot) = board.make_move(mv) else {
            continue;
        };

        if depth == 1 {
            result.nodes += 1;
            if snapshot.is_capture() {
                result.captures += 1;
            }
            if snapshot.is_castling() {
                result.castles += 1;
            }
            if snapshot.promoted {
                result.promotions += 1;
            }
            let opponent = side.opposite();
            if board.is_in_check(opponent) {
                result.checks += 1;
                if !board.has_legal_move(opponent) {
                    result.checkmates += 1;
                }
            }
        } else {
            let sub_result = count_detailed(board, side.opposite(), depth - 1);
            result.absorb(&sub_result);
        }

        board.unmake_move(&snapshot);
    }

    result
}

/// Per-root-move node counts, largest subtree first.
pub fn perft_divide(board: &mut Board, side: Color, depth: u32) -> Vec<(Move, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    for mv in board.legal_moves(side) {
        let Ok(snapshot) = board.make_move(mv) else {
            continue;
        };
        let nodes = perft(board, side.opposite(), depth - 1);
        results.push((mv, nodes));
        board.unmake_move(&snapshot);
    }

    results.sort_by(|a, b| b.1.cmp(&a.1));
    results
}

/// Runs one depth against a known count and logs the outcome.
pub fn run_perft_test(board: &mut Board, side: Color, depth: u32, expected: u64) -> bool {
    log::info!("Running perft depth {} (expected: {})", depth, expected);

    let start_time = Instant::now();
    let nodes = perft(board, side, depth);
    let elapsed = start_time.elapsed();

    let success = nodes == expected;
    let status = if success { "✅ PASS" } else { "❌ FAIL" };
    log::info!(
        "{} - Depth {}: {} nodes in {:.3}s",
        status,
        depth,
        nodes,
        elapsed.as_secs_f64()
    );

    if !success {
        log::warn!("Expected: {}, Got: {}", expected, nodes);
    }

    success
}

/// Known node counts from the starting position, White to move. Without en
/// passant, depth 5 is 258 leaves short of the standard 4_865_609.
pub const STARTING_POSITION_COUNTS: &[(u32, u64)] = &[(1, 20), (2, 400), (3, 8_902), (4, 197_281), (5, 4_865_351)];
