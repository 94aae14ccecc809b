use std::time::Instant;

use engine::{zobrist, Board, ChessResult, Color, Game, Move};

use crate::config::AiConfig;
use crate::error::AiError;
use crate::evaluation::{evaluate, evaluate_detailed};
use crate::logger_extensions::AILoggerExtensions;
use crate::ordering::order_moves;
use crate::transposition::{NodeType, TranspositionTable};
use crate::types::*;

/// Fixed-depth minimax player with alpha-beta pruning.
pub struct ChessAI {
    config: AiConfig,
    pub nodes_searched: u64,
    transposition_table: TranspositionTable,
    advanced_logging_enabled: bool,
    log_callback: Option<Box<dyn FnMut(&str)>>,
}

impl ChessAI {
    pub fn new(depth: u32, color: Color) -> Result<Self, AiError> {
        Self::from_config(AiConfig {
            depth,
            color,
            ..AiConfig::default()
        })
    }

    pub fn from_config(config: AiConfig) -> Result<Self, AiError> {
        config.validate()?;
        Ok(Self {
            config,
            nodes_searched: 0,
            transposition_table: TranspositionTable::new(),
            advanced_logging_enabled: false,
            log_callback: None,
        })
    }

    pub fn color(&self) -> Color {
        self.config.color
    }

    pub fn depth(&self) -> u32 {
        self.config.depth
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn set_advanced_logging<F>(&mut self, enabled: bool, callback: Option<F>)
    where
        F: FnMut(&str) + 'static,
    {
        self.advanced_logging_enabled = enabled;
        self.log_callback = callback.map(|f| Box::new(f) as Box<dyn FnMut(&str)>);
    }

    /// Best move for the AI's colour, or `None` when it has no legal move.
    /// The board is returned exactly as it was passed in.
    pub fn get_best_move(&mut self, board: &mut Board) -> Option<Move> {
        self.search_root(board).best_move
    }

    pub fn search_root(&mut self, board: &mut Board) -> SearchResult {
        self.nodes_searched = 0;
        self.transposition_table.clear();

        let color = self.config.color;
        let depth = self.config.depth;

        let mut moves = board.legal_moves(color);
        if moves.is_empty() {
            let evaluation = if board.is_in_check(color) { -MATE_SCORE } else { DRAW_SCORE };
            log::debug!("{} has no legal move (eval {})", color, evaluation);
            return SearchResult {
                best_move: None,
                evaluation,
                depth,
                nodes_searched: 0,
            };
        }

        order_moves(board, &mut moves);

        if self.advanced_logging_enabled {
            let (material, pst, total) = evaluate_detailed(board, color);
            self.log(&format!(
                "📊 Root Analysis - {} candidate moves for {} at depth {}",
                moves.len(),
                color,
                depth
            ));
            self.log(&format!("📊 Position Evaluation: Material={}, PST={}, Total={}", material, pst, total));
        }

        let mut best_move = None;
        let mut best_value = -INFINITY;
        let mut alpha = -INFINITY;
        let beta = INFINITY;

        for (move_index, &mv) in moves.iter().enumerate() {
            let Ok(snapshot) = board.make_move(mv) else {
                continue;
            };
            let extension = u32::from(self.config.capture_extension && snapshot.is_capture());
            let value = self.search(board, depth - 1 + extension, alpha, beta, false);
            board.unmake_move(&snapshot);

            log::trace!("root [{}/{}] {} -> {}", move_index + 1, moves.len(), mv, value);
            if self.advanced_logging_enabled {
                let marker = if snapshot.is_capture() { " [CAPTURE]" } else { "" };
                self.log(&format!(
                    "🎯 [{}/{}] {}{} scored {}",
                    move_index + 1,
                    moves.len(),
                    mv,
                    marker,
                    value
                ));
            }

            if value > best_value {
                if self.advanced_logging_enabled && best_move.is_some() {
                    self.log(&format!("    ⭐ NEW BEST! {} → {} ({})", best_value, value, mv));
                }
                best_value = value;
                best_move = Some(mv);
            }

            alpha = alpha.max(value);
            if beta <= alpha {
                break;
            }
        }

        log::debug!(
            "{} depth {}: best {} eval {} ({} nodes, {} table entries)",
            color,
            depth,
            best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string()),
            best_value,
            self.nodes_searched,
            self.transposition_table.len()
        );

        SearchResult {
            best_move,
            evaluation: best_value,
            depth,
            nodes_searched: self.nodes_searched,
        }
    }

    /// Searches the AI's colour and plays the result through `game`.
    /// Returns `Ok(None)` when the game is over, it is not the AI's turn or
    /// there is no legal move.
    pub fn play(&mut self, game: &mut Game) -> ChessResult<Option<Move>> {
        if game.is_over() || game.current_turn() != self.config.color {
            return Ok(None);
        }

        let start_time = Instant::now();
        let result = self.search_root(game.board_mut());
        let elapsed = start_time.elapsed().as_millis();

        let Some(mv) = result.best_move else {
            return Ok(None);
        };
        if game.logger().should_log_advanced() {
            let board = game.board().clone();
            game.logger_mut().log_evaluation_breakdown(&board, self.config.color);
        }
        game.logger_mut().log_search_summary(&result, elapsed);
        game.make_ai_move(mv, elapsed, result.evaluation)?;
        Ok(Some(mv))
    }

    /// Minimax value from the AI's point of view. `maximizing` is true when
    /// the AI is on move.
    fn search(&mut self, board: &mut Board, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes_searched += 1;

        let side = if maximizing { self.config.color } else { self.config.color.opposite() };
        let key = board.fingerprint() ^ zobrist::side_key(side);

        if self.config.use_transposition {
            if let Some(score) = self.transposition_table.probe(key, depth, alpha, beta) {
                return score;
            }
        }

        if depth == 0 {
            let score = evaluate(board, self.config.color);
            self.remember(key, 0, score, NodeType::Exact);
            return score;
        }

        let mut moves = board.legal_moves(side);
        if moves.is_empty() {
            let score = if !board.is_in_check(side) {
                DRAW_SCORE
            } else if maximizing {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
            self.remember(key, depth, score, NodeType::Exact);
            return score;
        }

        order_moves(board, &mut moves);
        let (original_alpha, original_beta) = (alpha, beta);
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let Ok(snapshot) = board.make_move(mv) else {
                continue;
            };
            let value = self.search(board, depth - 1, alpha, beta, !maximizing);
            board.unmake_move(&snapshot);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                break;
            }
        }

        let node_type = NodeType::classify(best, original_alpha, original_beta);
        self.remember(key, depth, best, node_type);
        best
    }

    fn remember(&mut self, key: u64, depth: u32, score: i32, node_type: NodeType) {
        if self.config.use_transposition {
            self.transposition_table.store(key, depth, score, node_type);
        }
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut callback) = self.log_callback {
            callback(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use engine::Square;
    use proptest::prelude::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to))
    }

    fn ai(config: AiConfig) -> ChessAI {
        ChessAI::from_config(config).unwrap()
    }

    // Plain minimax over the same ordering and root extension, no pruning
    fn minimax(board: &mut Board, ai: Color, depth: u32, maximizing: bool) -> i32 {
        if depth == 0 {
            return evaluate(board, ai);
        }
        let side = if maximizing { ai } else { ai.opposite() };
        let mut moves = board.legal_moves(side);
        if moves.is_empty() {
            return match (board.is_in_check(side), maximizing) {
                (false, _) => DRAW_SCORE,
                (true, true) => -MATE_SCORE,
                (true, false) => MATE_SCORE,
            };
        }
        order_moves(board, &mut moves);

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in moves {
            let snapshot = board.make_move(mv).unwrap();
            let value = minimax(board, ai, depth - 1, !maximizing);
            board.unmake_move(&snapshot);
            best = if maximizing { best.max(value) } else { best.min(value) };
        }
        best
    }

    fn reference_root(board: &mut Board, ai: Color, depth: u32, extension: bool) -> (Option<Move>, i32) {
        let mut moves = board.legal_moves(ai);
        order_moves(board, &mut moves);

        let mut best = (None, -INFINITY);
        for mv in moves {
            let snapshot = board.make_move(mv).unwrap();
            let extra = u32::from(extension && snapshot.is_capture());
            let value = minimax(board, ai, depth - 1 + extra, false);
            board.unmake_move(&snapshot);
            if value > best.1 {
                best = (Some(mv), value);
            }
        }
        best
    }

    fn tactical_position() -> Board {
        Board::from_diagram([
            "r...k..r",
            "ppp..ppp",
            "..n.....",
            "...qp...",
            "..B.P.b.",
            ".....N..",
            "PPP..PPP",
            "R..QK..R",
        ])
    }

    #[test]
    fn test_initial_position_black_depth_one() {
        let mut board = Board::new();
        let before = board.clone();
        let mut engine = ChessAI::new(1, Color::Black).unwrap();

        let best = engine.get_best_move(&mut board).unwrap();
        assert!(board.legal_moves(Color::Black).contains(&best));
        assert_eq!(board, before);
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        let cases = [
            (Board::new(), Color::White, 3),
            (Board::new(), Color::Black, 2),
            (tactical_position(), Color::White, 2),
            (tactical_position(), Color::Black, 2),
        ];

        for (mut board, color, depth) in cases {
            let mut engine = ai(AiConfig {
                depth,
                color,
                use_transposition: false,
                capture_extension: true,
            });
            let result = engine.search_root(&mut board);
            let (expected_move, expected_value) = reference_root(&mut board, color, depth, true);
            assert_eq!(result.best_move, expected_move, "{} depth {}", color, depth);
            assert_eq!(result.evaluation, expected_value, "{} depth {}", color, depth);
        }
    }

    #[test]
    fn test_transposition_table_matches_plain_minimax() {
        let cases = [
            (Board::new(), Color::White),
            (tactical_position(), Color::White),
            (tactical_position(), Color::Black),
        ];

        for (mut board, color) in cases {
            let config = AiConfig {
                depth: 3,
                color,
                use_transposition: true,
                capture_extension: false,
            };
            let with_table = ai(config.clone()).search_root(&mut board);
            let without = ai(AiConfig { use_transposition: false, ..config }).search_root(&mut board);
            let (expected_move, expected_value) = reference_root(&mut board, color, 3, false);

            assert_eq!(with_table.best_move, expected_move, "{}", color);
            assert_eq!(with_table.evaluation, expected_value, "{}", color);
            assert!(with_table.nodes_searched <= without.nodes_searched, "{}", color);
        }
    }

    #[test]
    fn test_transposition_table_saves_nodes_at_depth_four() {
        // a3 a6 b3 and b3 a6 a3 meet with one ply left
        let mut board = Board::new();
        let config = AiConfig {
            depth: 4,
            color: Color::White,
            use_transposition: true,
            capture_extension: false,
        };
        let with_table = ai(config.clone()).search_root(&mut board);
        let without = ai(AiConfig { use_transposition: false, ..config }).search_root(&mut board);

        assert!(with_table.nodes_searched < without.nodes_searched);
        assert!(board.legal_moves(Color::White).contains(&with_table.best_move.unwrap()));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_capture_extension_with_table() {
        let mut board = tactical_position();
        let before = board.clone();
        let config = AiConfig {
            depth: 3,
            color: Color::White,
            use_transposition: true,
            capture_extension: true,
        };
        let with_table = ai(config.clone()).search_root(&mut board);
        let without = ai(AiConfig { use_transposition: false, ..config }).search_root(&mut board);

        assert!(with_table.nodes_searched <= without.nodes_searched);
        assert!(board.legal_moves(Color::White).contains(&with_table.best_move.unwrap()));
        assert_eq!(board, before);
    }

    #[test]
    fn test_deeper_entry_answers_shallower_search() {
        let mut board = Board::new();
        let mut engine = ai(AiConfig { depth: 2, color: Color::White, ..AiConfig::default() });
        let key = board.fingerprint() ^ zobrist::side_key(Color::White);

        engine.transposition_table.store(key, 5, 12345, NodeType::Exact);
        assert_eq!(engine.search(&mut board, 2, -INFINITY, INFINITY, true), 12345);
        assert_eq!(engine.nodes_searched, 1);

        // shallower than requested: searched again and overwritten
        engine.transposition_table.clear();
        engine.nodes_searched = 0;
        engine.transposition_table.store(key, 1, 12345, NodeType::Exact);
        let value = engine.search(&mut board, 2, -INFINITY, INFINITY, true);
        assert_ne!(value, 12345);
        assert!(engine.nodes_searched > 1);
        assert_eq!(engine.transposition_table.probe(key, 2, -INFINITY, INFINITY), Some(value));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_bound_entry_only_used_when_it_settles_the_window() {
        let mut board = Board::new();
        let mut engine = ai(AiConfig { depth: 2, color: Color::White, ..AiConfig::default() });
        let key = board.fingerprint() ^ zobrist::side_key(Color::White);

        engine.transposition_table.store(key, 3, 500, NodeType::LowerBound);
        assert_eq!(engine.search(&mut board, 2, -INFINITY, 400, true), 500);
        assert_eq!(engine.nodes_searched, 1);

        engine.nodes_searched = 0;
        let value = engine.search(&mut board, 2, -INFINITY, INFINITY, true);
        assert_ne!(value, 500);
        assert!(engine.nodes_searched > 1);
    }

    #[test]
    fn test_table_ignored_when_disabled() {
        let mut board = Board::new();
        let mut engine = ai(AiConfig {
            depth: 2,
            color: Color::White,
            use_transposition: false,
            capture_extension: true,
        });
        let key = board.fingerprint() ^ zobrist::side_key(Color::White);

        engine.transposition_table.store(key, 5, 12345, NodeType::Exact);
        assert_ne!(engine.search(&mut board, 2, -INFINITY, INFINITY, true), 12345);
        assert!(engine.nodes_searched > 1);
    }

    #[test]
    fn test_finds_back_rank_mate() {
        let mut board = Board::from_diagram([
            ".......k",
            "......pp",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R.....K.",
        ]);
        let mut engine = ChessAI::new(2, Color::White).unwrap();
        let result = engine.search_root(&mut board);
        assert_eq!(result.best_move, Some(mv("a1", "a8")));
        assert_eq!(result.evaluation, MATE_SCORE);
        assert!(result.nodes_searched > 0);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let mut board = Board::from_diagram([
            "k..r....",
            "........",
            "........",
            "........",
            "...Q....",
            "........",
            "........",
            ".......K",
        ]);
        let mut engine = ChessAI::new(1, Color::Black).unwrap();
        assert_eq!(engine.get_best_move(&mut board), Some(mv("d8", "d4")));
    }

    #[test]
    fn test_no_legal_move_returns_none() {
        let mut board = Board::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            board.make_move(mv(from, to)).unwrap();
        }
        let mut engine = ChessAI::new(3, Color::White).unwrap();
        let result = engine.search_root(&mut board);
        assert_eq!(result.best_move, None);
        assert_eq!(result.evaluation, -MATE_SCORE);
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        assert!(matches!(
            ChessAI::new(0, Color::White),
            Err(AiError::InvalidDepth { depth: 0, max: MAX_DEPTH })
        ));
        assert!(ChessAI::new(MAX_DEPTH + 1, Color::Black).is_err());
        assert_eq!(ChessAI::new(MAX_DEPTH, Color::Black).unwrap().depth(), MAX_DEPTH);
    }

    #[test]
    fn test_advanced_logging_callback() {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lines);

        let mut engine = ChessAI::new(1, Color::White).unwrap();
        engine.set_advanced_logging(true, Some(move |line: &str| sink.borrow_mut().push(line.to_string())));
        engine.get_best_move(&mut Board::new());

        let lines = lines.borrow();
        assert!(lines[0].starts_with("📊 Root Analysis - 20 candidate moves"));
        assert_eq!(lines.iter().filter(|line| line.starts_with("🎯")).count(), 20);
    }

    #[test]
    fn test_play_through_game() {
        let mut game = Game::new();
        let mut engine = ChessAI::new(1, Color::Black).unwrap();
        assert_eq!(engine.play(&mut game), Ok(None));

        game.make_move(sq("e2"), sq("e4")).unwrap();
        let played = engine.play(&mut game).unwrap();
        assert!(played.is_some());
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.history().count(), 2);
        assert!(game.logger().log_buffer.contains("(AI move -"));
        assert!(game.board().verify_integrity());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn search_leaves_board_untouched(choices in proptest::collection::vec(any::<usize>(), 0..16)) {
            let mut board = Board::new();
            let mut side = Color::White;
            for choice in choices {
                let moves = board.legal_moves(side);
                if moves.is_empty() {
                    break;
                }
                board.make_move(moves[choice % moves.len()]).unwrap();
                side = side.opposite();
            }

            let before = board.clone();
            let legal = board.legal_moves(side);
            let mut engine = ChessAI::new(2, side).unwrap();
            let best = engine.get_best_move(&mut board);

            prop_assert_eq!(&board, &before);
            match best {
                Some(mv) => prop_assert!(legal.contains(&mv)),
                None => prop_assert!(legal.is_empty()),
            }
        }
    }
}
