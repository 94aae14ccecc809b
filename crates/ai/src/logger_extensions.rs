use engine::{Board, Color, GameLogger};

use crate::evaluation::evaluate_detailed;
use crate::piece_square_tables::positional_bonus;
use crate::types::SearchResult;

pub trait AILoggerExtensions {
    fn log_search_summary(&mut self, result: &SearchResult, time_ms: u128);
    fn log_evaluation_breakdown(&mut self, board: &Board, perspective: Color);
}

impl AILoggerExtensions for GameLogger {
    fn log_search_summary(&mut self, result: &SearchResult, time_ms: u128) {
        let best = result
            .best_move
            .map_or_else(|| "None".to_string(), |mv| mv.to_string());
        self.log_with_indent(&format!(
            "🧠 Search depth {}: best {} | eval {} | {} nodes in {}ms",
            result.depth, best, result.evaluation, result.nodes_searched, time_ms
        ));
    }

    fn log_evaluation_breakdown(&mut self, board: &Board, perspective: Color) {
        if !self.should_log_advanced() {
            return;
        }

        self.log_with_indent(&format!("🔬 EVALUATION for {}:", perspective));
        self.increase_indent();
        for piece in board.pieces() {
            let sign = if piece.color == perspective { 1 } else { -1 };
            let bonus = positional_bonus(&piece);
            if bonus != 0 {
                self.log_with_indent(&format!(
                    "├─ {} {} - PST value = {:+}",
                    piece.symbol(),
                    piece.position,
                    sign * bonus
                ));
            }
        }
        let (material, pst, total) = evaluate_detailed(board, perspective);
        self.log_with_indent(&format!(
            "└─ Material={:+} PST={:+} Total={:+}",
            material,
            pst,
            total
        ));
        self.decrease_indent();
    }
}
