//! Alpaca - Move Generator Module
//!
//! This module generates pseudo-legal moves (all, or captures only) for the
//! side to move and scores them for ordering:
//! - Captures by MVV/LVA, above every quiet move
//! - Quiet moves by killer slot at the current ply, then history
//!
//! King safety is not checked here; `Board::make_move` rejects moves that
//! leave the mover in check.

use crate::attack::is_square_attacked;
use crate::bitboard::{parse_square, step, RANKS_BRD};
use crate::board::Board;
use crate::moves::{Move, MoveList};
use crate::types::*;

// ============================================================================
// ORDERING SCORES
// ============================================================================

pub const CAPTURE_BONUS: i32 = 1_000_000;
pub const EN_PASSANT_SCORE: i32 = 105 + CAPTURE_BONUS;
pub const KILLER_0_SCORE: i32 = 900_000;
pub const KILLER_1_SCORE: i32 = 800_000;
pub const PV_MOVE_SCORE: i32 = 2_000_000;

const VICTIM_SCORE: [i32; PIECE_NB] = [0, 100, 200, 300, 400, 500, 600, 100, 200, 300, 400, 500, 600];

/// Most valuable victim / least valuable attacker, `[victim][attacker]`
pub static MVV_LVA: [[i32; PIECE_NB]; PIECE_NB] = init_mvv_lva();

const fn init_mvv_lva() -> [[i32; PIECE_NB]; PIECE_NB] {
    let mut table = [[0i32; PIECE_NB]; PIECE_NB];
    let mut victim = WP as usize;
    while victim <= BK as usize {
        let mut attacker = WP as usize;
        while attacker <= BK as usize {
            table[victim][attacker] = VICTIM_SCORE[victim] + 6 - VICTIM_SCORE[attacker] / 100;
            attacker += 1;
        }
        victim += 1;
    }
    table
}

/// Move generator with the ordering heuristics it scores quiet moves by
pub struct MoveGenerator {
    /// Two quiet moves per ply that caused a beta cutoff
    pub killers: [[Move; MAX_DEPTH]; 2],
    /// Cutoff weight per (piece, destination)
    pub history: [[i32; BOARD_SQ_NUM]; PIECE_NB],
}

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator {
            killers: [[Move::NONE; MAX_DEPTH]; 2],
            history: [[0; BOARD_SQ_NUM]; PIECE_NB],
        }
    }

    /// Forget killers and history (start of a search)
    pub fn clear_heuristics(&mut self) {
        self.killers = [[Move::NONE; MAX_DEPTH]; 2];
        self.history = [[0; BOARD_SQ_NUM]; PIECE_NB];
    }

    /// Record a quiet move that failed high at `ply`
    pub fn store_killer(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_DEPTH || self.killers[0][ply] == mv {
            return;
        }
        self.killers[1][ply] = self.killers[0][ply];
        self.killers[0][ply] = mv;
    }

    /// Reward a quiet move that raised alpha
    pub fn add_history(&mut self, piece: u8, to_sq: usize, depth: i32) {
        self.history[piece as usize][to_sq] += depth;
    }

    // ========================================================================
    // GENERATION
    // ========================================================================

    /// Generate all pseudo-legal moves for the side to move
    pub fn generate_all_moves(&self, board: &Board) -> MoveList {
        let mut list = MoveList::new();
        self.generate(board, false, &mut list);
        list
    }

    /// Generate pseudo-legal captures (including en passant) for the side to move
    pub fn generate_all_captures(&self, board: &Board) -> MoveList {
        let mut list = MoveList::new();
        self.generate(board, true, &mut list);
        list
    }

    fn generate(&self, board: &Board, captures_only: bool, list: &mut MoveList) {
        debug_assert!(board.check_board().is_ok());
        let side = board.side;

        self.generate_pawn_moves(board, captures_only, list);

        if !captures_only {
            self.generate_castling(board, list);
        }

        // Sliders walk each ray to the first blocker
        for &piece in SLIDERS[side].iter() {
            let p = piece as usize;
            for &sq in board.squares_of(piece) {
                for &dir in &PIECE_DIR[p][..NUM_DIR[p]] {
                    let mut t_sq = step(sq, dir);
                    loop {
                        let target = board.pieces[t_sq];
                        if target == OFFBOARD {
                            break;
                        }
                        if target != EMPTY {
                            if PIECE_COL[target as usize] == side ^ 1 {
                                self.add_capture(board, Move::capture(sq, t_sq, target), list);
                            }
                            break;
                        }
                        if !captures_only {
                            self.add_quiet(board, Move::quiet(sq, t_sq), list);
                        }
                        t_sq = step(t_sq, dir);
                    }
                }
            }
        }

        // Knights and kings take a single step
        for &piece in STEPPERS[side].iter() {
            let p = piece as usize;
            for &sq in board.squares_of(piece) {
                for &dir in &PIECE_DIR[p][..NUM_DIR[p]] {
                    let t_sq = step(sq, dir);
                    let target = board.pieces[t_sq];
                    if target == OFFBOARD {
                        continue;
                    }
                    if target != EMPTY {
                        if PIECE_COL[target as usize] == side ^ 1 {
                            self.add_capture(board, Move::capture(sq, t_sq, target), list);
                        }
                        continue;
                    }
                    if !captures_only {
                        self.add_quiet(board, Move::quiet(sq, t_sq), list);
                    }
                }
            }
        }
    }

    fn generate_pawn_moves(&self, board: &Board, captures_only: bool, list: &mut MoveList) {
        let side = board.side;
        let pawn = pawn_of(side);
        let (forward, start_rank, last_rank) = if side == WHITE {
            (10i32, RANK_2, RANK_7)
        } else {
            (-10i32, RANK_7, RANK_2)
        };

        for &sq in board.squares_of(pawn) {
            let promoting = RANKS_BRD[sq] == last_rank;
            let push = step(sq, forward);

            if !captures_only && board.pieces[push] == EMPTY {
                self.add_pawn_move(board, sq, push, EMPTY, promoting, list);
                let double = step(push, forward);
                if RANKS_BRD[sq] == start_rank && board.pieces[double] == EMPTY {
                    self.add_quiet(board, Move::pawn_start(sq, double), list);
                }
            }

            for diag in [forward - 1, forward + 1] {
                let t_sq = step(sq, diag);
                let target = board.pieces[t_sq];
                if piece_valid(target) && PIECE_COL[target as usize] == side ^ 1 {
                    self.add_pawn_move(board, sq, t_sq, target, promoting, list);
                }
                if board.en_passant != NO_SQ && t_sq == board.en_passant {
                    list.push(Move::en_passant(sq, t_sq), EN_PASSANT_SCORE);
                }
            }
        }
    }

    fn generate_castling(&self, board: &Board, list: &mut MoveList) {
        let rights = board.castling_rights;
        let pieces = &board.pieces;

        if board.side == WHITE {
            if rights & CASTLE_WK != 0
                && pieces[F1] == EMPTY
                && pieces[G1] == EMPTY
                && !Self::any_attacked(board, &[E1, F1, G1], BLACK)
            {
                self.add_quiet(board, Move::castling(E1, G1), list);
            }
            if rights & CASTLE_WQ != 0
                && pieces[D1] == EMPTY
                && pieces[C1] == EMPTY
                && pieces[B1] == EMPTY
                && !Self::any_attacked(board, &[E1, D1, C1], BLACK)
            {
                self.add_quiet(board, Move::castling(E1, C1), list);
            }
        } else {
            if rights & CASTLE_BK != 0
                && pieces[F8] == EMPTY
                && pieces[G8] == EMPTY
                && !Self::any_attacked(board, &[E8, F8, G8], WHITE)
            {
                self.add_quiet(board, Move::castling(E8, G8), list);
            }
            if rights & CASTLE_BQ != 0
                && pieces[D8] == EMPTY
                && pieces[C8] == EMPTY
                && pieces[B8] == EMPTY
                && !Self::any_attacked(board, &[E8, D8, C8], WHITE)
            {
                self.add_quiet(board, Move::castling(E8, C8), list);
            }
        }
    }

    fn any_attacked(board: &Board, squares: &[usize], by: usize) -> bool {
        squares.iter().any(|&sq| is_square_attacked(board, sq, by))
    }

    /// Push a pawn move, expanding a far-rank arrival into four promotions
    fn add_pawn_move(&self, board: &Board, from: usize, to: usize, captured: u8, promoting: bool, list: &mut MoveList) {
        if promoting {
            for &promoted in PROMOTIONS[board.side].iter() {
                let mv = Move::new(from, to, captured, promoted, 0);
                if captured != EMPTY {
                    self.add_capture(board, mv, list);
                } else {
                    self.add_quiet(board, mv, list);
                }
            }
        } else if captured != EMPTY {
            self.add_capture(board, Move::capture(from, to, captured), list);
        } else {
            self.add_quiet(board, Move::quiet(from, to), list);
        }
    }

    #[inline]
    fn add_capture(&self, board: &Board, mv: Move, list: &mut MoveList) {
        let attacker = board.pieces[mv.from_sq] as usize;
        list.push(mv, MVV_LVA[mv.captured as usize][attacker] + CAPTURE_BONUS);
    }

    #[inline]
    fn add_quiet(&self, board: &Board, mv: Move, list: &mut MoveList) {
        let ply = board.ply;
        let score = if ply < MAX_DEPTH && self.killers[0][ply] == mv {
            KILLER_0_SCORE
        } else if ply < MAX_DEPTH && self.killers[1][ply] == mv {
            KILLER_1_SCORE
        } else {
            self.history[board.pieces[mv.from_sq] as usize][mv.to_sq]
        };
        list.push(mv, score);
    }

    // ========================================================================
    // LEGALITY HELPERS
    // ========================================================================

    /// Generate the moves that do not leave the mover in check
    pub fn generate_legal_moves(&self, board: &mut Board) -> Vec<Move> {
        let list = self.generate_all_moves(board);
        let mut legal = Vec::with_capacity(list.len());
        for mv in list.iter() {
            if board.make_move(mv) {
                board.take_move();
                legal.push(mv);
            }
        }
        legal
    }

    /// Is `mv` a legal move in the current position?
    pub fn move_exists(&self, board: &mut Board, mv: Move) -> bool {
        let list = self.generate_all_moves(board);
        if !list.contains(mv) {
            return false;
        }
        if !board.make_move(mv) {
            return false;
        }
        board.take_move();
        true
    }

    /// Match coordinate notation ("e2e4", "e7e8q") against generated moves
    pub fn parse_move(&self, board: &Board, text: &str) -> Option<Move> {
        let text = text.trim();
        if text.len() < 4 || text.len() > 5 || !text.is_ascii() {
            return None;
        }
        let from = parse_square(&text[0..2])?;
        let to = parse_square(&text[2..4])?;
        let promo = text[4..].chars().next();

        let list = self.generate_all_moves(board);
        let found = list.iter().find(|mv| {
            mv.from_sq == from
                && mv.to_sq == to
                && match promo {
                    Some(c) => promotion_char(mv.promoted) == Some(c.to_ascii_lowercase()),
                    None => !mv.is_promotion(),
                }
        });
        found
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}
