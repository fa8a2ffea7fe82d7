//! Alpaca - Search Engine Module
//!
//! This module implements the chess search algorithm using:
//! - Iterative deepening over negamax alpha-beta
//! - Quiescence search over captures
//! - Transposition table lookups, stores and PV extraction
//! - Null Move Pruning (NMP)
//! - Check Extensions
//! - Killer/History heuristics
//!
//! The board is mutated in place with make/take throughout; a stopped
//! search unwinds by returning 0 from every level without storing.

use crate::board::Board;
use crate::evaluation::evaluate;
use crate::move_generator::{MoveGenerator, PV_MOVE_SCORE};
use crate::moves::Move;
use crate::transposition::{TranspositionTable, TT_ALPHA, TT_BETA, TT_EXACT};
use crate::types::*;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Nodes between budget checks; must be a power of two
pub const CHECK_INTERVAL: u64 = 2048;

/// Depth reduction applied to the null-move search
const NULL_MOVE_REDUCTION: i32 = 4;

/// Minimum remaining depth for a null-move try
const NULL_MOVE_MIN_DEPTH: i32 = 4;

// ============================================================================
// SEARCH INFO
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Uci,
    Console,
}

/// Limits and counters for one search call
#[derive(Debug)]
pub struct SearchInfo {
    pub depth: i32,
    pub start_time: Instant,
    pub stop_time: Option<Instant>,
    pub node_limit: Option<u64>,
    pub nodes: u64,
    pub stopped: bool,
    pub fail_high: u64,
    pub fail_high_first: u64,
    pub null_cutoffs: u64,
    pub mode: GameMode,
    pub post_thinking: bool,
    /// Raised from outside (input thread) to stop the search
    pub stop_signal: Arc<AtomicBool>,
}

impl SearchInfo {
    /// Depth-limited search with no deadline
    pub fn new(depth: i32) -> Self {
        SearchInfo {
            depth: depth.clamp(1, MAX_DEPTH as i32),
            start_time: Instant::now(),
            stop_time: None,
            node_limit: None,
            nodes: 0,
            stopped: false,
            fail_high: 0,
            fail_high_first: 0,
            null_cutoffs: 0,
            mode: GameMode::Uci,
            post_thinking: true,
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop once `budget` has elapsed from now
    pub fn set_time_budget(&mut self, budget: Duration) {
        self.start_time = Instant::now();
        self.stop_time = Some(self.start_time + budget);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Poll the deadline, node budget and external stop signal
    pub fn check_up(&mut self) {
        if let Some(stop_time) = self.stop_time {
            if Instant::now() > stop_time {
                self.stopped = true;
            }
        }
        if let Some(limit) = self.node_limit {
            if self.nodes >= limit {
                self.stopped = true;
            }
        }
        if self.stop_signal.load(Ordering::Relaxed) {
            self.stopped = true;
        }
    }

    /// Share of fail-highs that came from the first move tried
    pub fn ordering(&self) -> f64 {
        if self.fail_high == 0 {
            0.0
        } else {
            self.fail_high_first as f64 / self.fail_high as f64
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Progress after each completed iteration
#[derive(Debug)]
pub struct IterationReport<'a> {
    pub depth: i32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: &'a [Move],
    pub hashfull: usize,
    pub ordering: f64,
    pub mode: GameMode,
}

impl IterationReport<'_> {
    /// Protocol text for this iteration
    pub fn render(&self) -> String {
        let pv: Vec<String> = self.pv.iter().map(Move::to_uci).collect();
        let pv = pv.join(" ");
        match self.mode {
            GameMode::Uci => {
                let nps = if self.elapsed_ms > 0 { self.nodes * 1000 / self.elapsed_ms } else { 0 };
                format!(
                    "info score {} depth {} nodes {} nps {} time {} hashfull {} pv {}",
                    format_score(self.score),
                    self.depth,
                    self.nodes,
                    nps,
                    self.elapsed_ms,
                    self.hashfull,
                    pv
                )
            }
            GameMode::Console => format!(
                "{:>3} {:>7} {:>7} {:>10} {} (ordering {:.2})",
                self.depth,
                self.score,
                self.elapsed_ms / 10,
                self.nodes,
                pv,
                self.ordering
            ),
        }
    }
}

/// UCI score text: `cp N` or `mate N` (moves, negative when being mated)
pub fn format_score(score: i32) -> String {
    if score > IS_MATE {
        format!("mate {}", (INFINITE - score + 1) / 2)
    } else if score < -IS_MATE {
        format!("mate -{}", (INFINITE + score) / 2)
    } else {
        format!("cp {}", score)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: i32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

/// Null-move pruning preconditions
#[inline]
pub(crate) fn null_move_allowed(board: &Board, depth: i32, do_null: bool, in_check: bool) -> bool {
    do_null && !in_check && board.ply > 0 && board.big_pieces[board.side] > 0 && depth >= NULL_MOVE_MIN_DEPTH
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

pub struct SearchEngine {
    move_generator: MoveGenerator,
    pub tt: TranspositionTable,
}

impl SearchEngine {
    pub fn new(hash_mb: usize) -> Self {
        SearchEngine::with_table(TranspositionTable::new(hash_mb))
    }

    pub fn with_table(tt: TranspositionTable) -> Self {
        SearchEngine { move_generator: MoveGenerator::new(), tt }
    }

    /// Replace the table with one of a new size
    pub fn resize(&mut self, hash_mb: usize) {
        self.tt = TranspositionTable::new(hash_mb);
    }

    /// Forget everything learned in previous searches (new game)
    pub fn clear(&mut self) {
        self.tt.clear();
        self.move_generator.clear_heuristics();
    }

    fn clear_for_search(&mut self, board: &mut Board, info: &mut SearchInfo) {
        self.move_generator.clear_heuristics();
        self.tt.reset_stats();
        board.ply = 0;
        info.stopped = false;
        info.nodes = 0;
        info.fail_high = 0;
        info.fail_high_first = 0;
        info.null_cutoffs = 0;
    }

    /// Iterative deepening from depth 1 to `info.depth`
    pub fn search<F>(&mut self, board: &mut Board, info: &mut SearchInfo, mut report: F) -> SearchResult
    where
        F: FnMut(&IterationReport),
    {
        self.clear_for_search(board, info);
        info!(
            "search start: depth {} time {:?} nodes {:?}",
            info.depth,
            info.stop_time.map(|t| t.saturating_duration_since(info.start_time)),
            info.node_limit
        );

        let mut result = SearchResult { best_move: None, score: 0, depth: 0, nodes: 0, pv: Vec::new() };

        for current_depth in 1..=info.depth {
            let score = self.alpha_beta(board, info, -INFINITE, INFINITE, current_depth, true);
            if info.stopped {
                break;
            }

            let pv = self.get_pv_line(board, current_depth as usize);
            if let Some(&first) = pv.first() {
                result.best_move = Some(first);
            }
            result.score = score;
            result.depth = current_depth;
            result.pv = pv;

            debug!(
                "depth {} score {} nodes {} ordering {:.2} tt hits {} cuts {} writes {} overwrites {} null cuts {}",
                current_depth,
                score,
                info.nodes,
                info.ordering(),
                self.tt.hits,
                self.tt.cuts,
                self.tt.new_writes,
                self.tt.overwrites,
                info.null_cutoffs
            );

            if info.post_thinking {
                report(&IterationReport {
                    depth: current_depth,
                    score,
                    nodes: info.nodes,
                    elapsed_ms: info.elapsed_ms(),
                    pv: &result.pv,
                    hashfull: self.tt.hashfull(),
                    ordering: info.ordering(),
                    mode: info.mode,
                });
            }
        }

        if result.best_move.is_none() {
            let fallback = self
                .tt
                .lookup_move(board.pos_key)
                .filter(|&mv| self.move_generator.move_exists(board, mv))
                .or_else(|| self.move_generator.generate_legal_moves(board).first().copied());
            if fallback.is_some() {
                warn!("search stopped before depth 1 completed, using fallback move");
            }
            result.best_move = fallback;
        }

        result.nodes = info.nodes;
        info!(
            "search done: best {} score {} depth {} nodes {} in {} ms",
            result.best_move.map(|m| m.to_uci()).unwrap_or_else(|| "(none)".to_string()),
            result.score,
            result.depth,
            result.nodes,
            info.elapsed_ms()
        );
        result
    }

    /// Follow stored best moves from the root for up to `depth` plies
    pub fn get_pv_line(&mut self, board: &mut Board, depth: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(depth);

        while pv.len() < depth {
            let Some(mv) = self.tt.lookup_move(board.pos_key) else {
                break;
            };
            if !self.move_generator.move_exists(board, mv) {
                break;
            }
            board.make_move(mv);
            pv.push(mv);
        }

        for _ in 0..pv.len() {
            board.take_move();
        }
        pv
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        info: &mut SearchInfo,
        mut alpha: i32,
        beta: i32,
        mut depth: i32,
        do_null: bool,
    ) -> i32 {
        if depth <= 0 {
            return self.quiescence(board, info, alpha, beta);
        }

        if info.nodes & (CHECK_INTERVAL - 1) == 0 {
            info.check_up();
        }
        info.nodes += 1;

        if board.ply > 0 && (board.is_repetition() || board.is_fifty_moves()) {
            return 0;
        }

        if board.ply > MAX_DEPTH - 1 {
            return evaluate(board);
        }

        let in_check = board.in_check();
        if in_check {
            depth += 1;
        }

        let mut pv_move = Move::NONE;
        if let Some(hit) = self.tt.lookup(board.pos_key, depth, alpha, beta, board.ply) {
            if let Some(score) = hit.cutoff {
                return score;
            }
            pv_move = hit.best_move;
        }

        if null_move_allowed(board, depth, do_null, in_check) {
            board.make_null_move();
            let score = -self.alpha_beta(board, info, -beta, -beta + 1, depth - NULL_MOVE_REDUCTION, false);
            board.take_null_move();
            if info.stopped {
                return 0;
            }
            if score >= beta && score.abs() < IS_MATE {
                info.null_cutoffs += 1;
                return beta;
            }
        }

        let mut list = self.move_generator.generate_all_moves(board);
        if !pv_move.is_null() {
            list.boost(pv_move, PV_MOVE_SCORE);
        }

        let old_alpha = alpha;
        let mut legal = 0;
        let mut best_move = Move::NONE;
        let mut best_score = -INFINITE;

        for index in 0..list.len() {
            let mv = list.pick_next(index);
            if !board.make_move(mv) {
                continue;
            }
            legal += 1;
            let score = -self.alpha_beta(board, info, -beta, -alpha, depth - 1, true);
            board.take_move();

            if info.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;
                if score > alpha {
                    if score >= beta {
                        if legal == 1 {
                            info.fail_high_first += 1;
                        }
                        info.fail_high += 1;
                        if !mv.is_capture() {
                            self.move_generator.store_killer(board.ply, mv);
                        }
                        self.tt.store(board.pos_key, best_move, beta, TT_BETA, depth, board.ply);
                        return beta;
                    }
                    alpha = score;
                    if !mv.is_capture() {
                        self.move_generator.add_history(board.pieces[mv.from_sq], mv.to_sq, depth);
                    }
                }
            }
        }

        if legal == 0 {
            return if in_check { -INFINITE + board.ply as i32 } else { 0 };
        }

        if alpha != old_alpha {
            self.tt.store(board.pos_key, best_move, best_score, TT_EXACT, depth, board.ply);
        } else {
            self.tt.store(board.pos_key, best_move, alpha, TT_ALPHA, depth, board.ply);
        }
        alpha
    }

    fn quiescence(&mut self, board: &mut Board, info: &mut SearchInfo, mut alpha: i32, beta: i32) -> i32 {
        if info.nodes & (CHECK_INTERVAL - 1) == 0 {
            info.check_up();
        }
        info.nodes += 1;

        if board.is_repetition() || board.is_fifty_moves() {
            return 0;
        }

        if board.ply > MAX_DEPTH - 1 {
            return evaluate(board);
        }

        let stand_pat = evaluate(board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut list = self.move_generator.generate_all_captures(board);
        if list.is_empty() {
            return alpha;
        }
        let mut legal = 0;

        for index in 0..list.len() {
            let mv = list.pick_next(index);
            if !board.make_move(mv) {
                continue;
            }
            legal += 1;
            let score = -self.quiescence(board, info, -beta, -alpha);
            board.take_move();

            if info.stopped {
                return 0;
            }

            if score > alpha {
                if score >= beta {
                    if legal == 1 {
                        info.fail_high_first += 1;
                    }
                    info.fail_high += 1;
                    return beta;
                }
                alpha = score;
            }
        }

        alpha
    }
}

// ============================================================================
// GAME RESULT
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    FiftyMoveDraw,
    RepetitionDraw,
    InsufficientMaterial,
    Stalemate,
    /// The side that delivered mate
    Checkmate { winner: usize },
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::FiftyMoveDraw => write!(f, "1/2-1/2 {{fifty move rule}}"),
            GameResult::RepetitionDraw => write!(f, "1/2-1/2 {{3-fold repetition}}"),
            GameResult::InsufficientMaterial => write!(f, "1/2-1/2 {{insufficient material}}"),
            GameResult::Stalemate => write!(f, "1/2-1/2 {{stalemate}}"),
            GameResult::Checkmate { winner: WHITE } => write!(f, "1-0 {{white mates}}"),
            GameResult::Checkmate { .. } => write!(f, "0-1 {{black mates}}"),
        }
    }
}

/// Neither side can mate: no pawns, rooks or queens and at most one minor each
fn insufficient_material(board: &Board) -> bool {
    if board.count(WP) > 0 || board.count(BP) > 0 {
        return false;
    }
    if board.major_pieces[WHITE] > 0 || board.major_pieces[BLACK] > 0 {
        return false;
    }
    board.minor_pieces[WHITE] <= 1 && board.minor_pieces[BLACK] <= 1
}

/// Has the game ended in the current position?
pub fn game_result(board: &mut Board) -> Option<GameResult> {
    if board.fifty_move > 100 {
        return Some(GameResult::FiftyMoveDraw);
    }
    if board.repetition_count() >= 2 {
        return Some(GameResult::RepetitionDraw);
    }
    if insufficient_material(board) {
        return Some(GameResult::InsufficientMaterial);
    }

    let generator = MoveGenerator::new();
    if !generator.generate_legal_moves(board).is_empty() {
        return None;
    }
    if board.in_check() {
        Some(GameResult::Checkmate { winner: board.side ^ 1 })
    } else {
        Some(GameResult::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::parse_square;

    fn sq(s: &str) -> usize {
        parse_square(s).unwrap()
    }

    fn search_fen(fen: &str, depth: i32) -> SearchResult {
        let mut board = Board::from_fen(fen).unwrap();
        let mut engine = SearchEngine::new(16);
        let mut info = SearchInfo::new(depth);
        engine.search(&mut board, &mut info, |_| {})
    }

    #[test]
    fn test_null_move_preconditions() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/4P3/3QK3 w - - 0 1").unwrap();
        // Root
        assert!(!null_move_allowed(&board, 6, true, false));
        board.ply = 1;
        assert!(null_move_allowed(&board, 6, true, false));
        assert!(!null_move_allowed(&board, 6, true, true));
        assert!(!null_move_allowed(&board, 6, false, false));
        assert!(!null_move_allowed(&board, 3, true, false));

        // Only pawns besides the king
        let mut pawns = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        pawns.ply = 1;
        assert!(!null_move_allowed(&pawns, 6, true, false));
    }

    #[test]
    fn test_finds_back_rank_mate() {
        let result = search_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
        assert_eq!(result.best_move, Some(Move::quiet(A1, A8)));
        assert_eq!(result.score, INFINITE - 1);
        assert_eq!(format_score(result.score), "mate 1");
    }

    #[test]
    fn test_takes_hanging_queen() {
        let result = search_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 2);
        assert_eq!(result.best_move, Some(Move::capture(D1, sq("d5"), BQ)));
        assert!(result.score > 400);
    }

    #[test]
    fn test_no_move_when_mated_or_stalemated() {
        let mated = search_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 2);
        assert_eq!(mated.best_move, None);
        let stalemate = search_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2);
        assert_eq!(stalemate.best_move, None);
    }

    #[test]
    fn test_pv_starts_with_best_move() {
        let result = search_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 4);
        assert!(!result.pv.is_empty());
        assert_eq!(result.pv.first().copied(), result.best_move);
        assert!(result.pv.len() <= 4);
        assert_eq!(result.depth, 4);
    }

    #[test]
    fn test_search_restores_board() {
        let mut board = Board::new();
        let key = board.pos_key;
        let mut engine = SearchEngine::new(16);
        let mut info = SearchInfo::new(4);
        engine.search(&mut board, &mut info, |_| {});
        assert_eq!(board.pos_key, key);
        assert_eq!(board.his_ply(), 0);
        assert_eq!(board.ply, 0);
        assert!(board.check_board().is_ok());
    }

    #[test]
    fn test_node_limit_stops_search() {
        let mut board = Board::new();
        let mut engine = SearchEngine::new(16);
        let mut info = SearchInfo::new(MAX_DEPTH as i32);
        info.node_limit = Some(5_000);
        let result = engine.search(&mut board, &mut info, |_| {});
        assert!(info.stopped);
        assert!(result.best_move.is_some());
        // Overshoot is bounded by one polling interval
        assert!(info.nodes < 5_000 + CHECK_INTERVAL);
    }

    #[test]
    fn test_stop_signal_before_start_yields_fallback() {
        let mut board = Board::new();
        let mut engine = SearchEngine::new(16);
        let mut info = SearchInfo::new(10);
        info.stop_signal.store(true, Ordering::Relaxed);
        let result = engine.search(&mut board, &mut info, |_| {});
        assert!(info.stopped);
        assert_eq!(result.depth, 0);
        let best = result.best_move.unwrap();
        let generator = MoveGenerator::new();
        assert!(generator.move_exists(&mut board, best));
    }

    #[test]
    fn test_stopped_search_writes_nothing_to_table() {
        let mut board = Board::new();
        let mut engine = SearchEngine::new(16);
        let mut info = SearchInfo::new(10);
        info.stop_signal.store(true, Ordering::Relaxed);
        engine.search(&mut board, &mut info, |_| {});
        assert_eq!(engine.tt.new_writes, 0);
        assert_eq!(engine.tt.overwrites, 0);
        assert_eq!(engine.tt.hashfull(), 0);
    }

    #[test]
    fn test_reports_each_iteration() {
        let mut board = Board::new();
        let mut engine = SearchEngine::new(16);
        let mut info = SearchInfo::new(3);
        let mut depths = Vec::new();
        engine.search(&mut board, &mut info, |report| {
            depths.push(report.depth);
            assert!(report.render().starts_with("info score cp"));
        });
        assert_eq!(depths, vec![1, 2, 3]);

        let mut quiet = SearchInfo::new(2);
        quiet.post_thinking = false;
        let mut calls = 0;
        engine.search(&mut board, &mut quiet, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(35), "cp 35");
        assert_eq!(format_score(INFINITE - 3), "mate 2");
        assert_eq!(format_score(-(INFINITE - 2)), "mate -1");
    }

    #[test]
    fn test_game_results() {
        let mut mate = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(game_result(&mut mate), Some(GameResult::Checkmate { winner: WHITE }));

        let mut stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game_result(&mut stalemate), Some(GameResult::Stalemate));

        let mut bare = Board::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(game_result(&mut bare), Some(GameResult::InsufficientMaterial));

        let mut fifty = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 101 90").unwrap();
        assert_eq!(game_result(&mut fifty), Some(GameResult::FiftyMoveDraw));

        let mut start = Board::new();
        assert_eq!(game_result(&mut start), None);
        let generator = MoveGenerator::new();
        for _ in 0..2 {
            for text in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                let mv = generator.parse_move(&start, text).unwrap();
                assert!(start.make_move(mv));
            }
        }
        assert_eq!(game_result(&mut start), Some(GameResult::RepetitionDraw));
    }
}
