//! Alpaca - Position Evaluation Module
//!
//! This module provides static evaluation of chess positions considering:
//! - Material balance
//! - Piece positioning (piece-square tables, mirrored for black)
//! - Pawn structure (isolated and passed pawns)
//! - Rooks and queens on open / semi-open files
//! - King placement by game phase
//! - Bishop pair bonus
//!
//! Scores are centipawns from the side to move's point of view.

use crate::bitboard::*;
use crate::board::Board;
use crate::types::*;

// ============================================================================
// TERMS
// ============================================================================

pub const PAWN_ISOLATED: i32 = -10;
pub const PAWN_PASSED: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 200];
pub const ROOK_OPEN_FILE: i32 = 10;
pub const ROOK_SEMI_OPEN_FILE: i32 = 5;
pub const QUEEN_OPEN_FILE: i32 = 5;
pub const QUEEN_SEMI_OPEN_FILE: i32 = 3;
pub const BISHOP_PAIR: i32 = 30;

/// Opponent material at or below this switches the king to its endgame table
pub const ENDGAME_MATERIAL: i32 =
    PIECE_VAL[WR as usize] + 2 * PIECE_VAL[WN as usize] + 2 * PIECE_VAL[WP as usize];

// ============================================================================
// PIECE-SQUARE TABLES (white's view, a1 first)
// ============================================================================

const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    10,  10,   0, -10, -10,   0,  10,  10,
     5,   0,   0,   5,   5,   0,   0,   5,
     0,   0,  10,  20,  20,  10,   0,   0,
     5,   5,   5,  10,  10,   5,   5,   5,
    10,  10,  10,  20,  20,  10,  10,  10,
    20,  20,  20,  30,  30,  20,  20,  20,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT_TABLE: [i32; 64] = [
     0, -10,   0,   0,   0,   0, -10,   0,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,  10,  10,  10,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   5,   0,
     5,  10,  15,  20,  20,  15,  10,   5,
     5,  10,  10,  20,  20,  10,  10,   5,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const BISHOP_TABLE: [i32; 64] = [
     0,   0, -10,   0,   0, -10,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  15,  15,  10,   0,   0,
     0,  10,  15,  20,  20,  15,  10,   0,
     0,  10,  15,  20,  20,  15,  10,   0,
     0,   0,  10,  15,  15,  10,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const ROOK_TABLE: [i32; 64] = [
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
    25,  25,  25,  25,  25,  25,  25,  25,
     0,   0,   5,  10,  10,   5,   0,   0,
];

// King heads for the centre once the opponent is short of material
const KING_ENDGAME: [i32; 64] = [
   -50, -10,   0,   0,   0,   0, -10, -50,
   -10,   0,  10,  10,  10,  10,   0, -10,
     0,  10,  20,  20,  20,  20,  10,   0,
     0,  10,  20,  40,  40,  20,  10,   0,
     0,  10,  20,  40,  40,  20,  10,   0,
     0,  10,  20,  20,  20,  20,  10,   0,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -50, -10,   0,   0,   0,   0, -10, -50,
];

// Otherwise it stays home, preferably castled
const KING_OPENING: [i32; 64] = [
     0,   5,   5, -10, -10,   0,  10,   5,
   -30, -30, -30, -30, -30, -30, -30, -30,
   -50, -50, -50, -50, -50, -50, -50, -50,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
];

/// Table entry for a padded square, seen from `side`
#[inline]
fn pst(table: &[i32; 64], sq: usize, side: usize) -> i32 {
    let sq64 = SQ64[sq];
    if side == WHITE {
        table[sq64]
    } else {
        table[MIRROR64[sq64]]
    }
}

// ============================================================================
// MATERIAL DRAW
// ============================================================================

/// Known drawn piece combinations (only meaningful with no pawns on the board)
pub fn material_draw(board: &Board) -> bool {
    let n = |piece: u8| board.count(piece);
    let (wn, wb, wr, wq) = (n(WN), n(WB), n(WR), n(WQ));
    let (bn, bb, br, bq) = (n(BN), n(BB), n(BR), n(BQ));

    if wr == 0 && br == 0 && wq == 0 && bq == 0 {
        if bb == 0 && wb == 0 {
            wn < 3 && bn < 3
        } else if wn == 0 && bn == 0 {
            wb.abs_diff(bb) < 2
        } else {
            let white_weak = (wn < 3 && wb == 0) || (wb == 1 && wn == 0);
            let black_weak = (bn < 3 && bb == 0) || (bb == 1 && bn == 0);
            white_weak && black_weak
        }
    } else if wq == 0 && bq == 0 {
        let white_minors = wn + wb;
        let black_minors = bn + bb;
        if wr == 1 && br == 1 {
            white_minors < 2 && black_minors < 2
        } else if wr == 1 && br == 0 {
            white_minors == 0 && (black_minors == 1 || black_minors == 2)
        } else if br == 1 && wr == 0 {
            black_minors == 0 && (white_minors == 1 || white_minors == 2)
        } else {
            false
        }
    } else {
        false
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Positional score for one side's pieces (material excluded)
fn evaluate_side(board: &Board, side: usize) -> i32 {
    let them = side ^ 1;
    let own_pawns = board.pawns[side];
    let their_pawns = board.pawns[them];
    let passed_mask = if side == WHITE { &WHITE_PASSED_MASK } else { &BLACK_PASSED_MASK };
    let mut score = 0;

    for &sq in board.squares_of(pawn_of(side)) {
        let sq64 = SQ64[sq];
        score += pst(&PAWN_TABLE, sq, side);
        if ISOLATED_MASK[sq64] & own_pawns == 0 {
            score += PAWN_ISOLATED;
        }
        if passed_mask[sq64] & their_pawns == 0 {
            let rank = if side == WHITE { RANKS_BRD[sq] } else { RANK_8 - RANKS_BRD[sq] };
            score += PAWN_PASSED[rank];
        }
    }

    let [knight, bishop, rook, queen] = if side == WHITE { [WN, WB, WR, WQ] } else { [BN, BB, BR, BQ] };

    for &sq in board.squares_of(knight) {
        score += pst(&KNIGHT_TABLE, sq, side);
    }

    for &sq in board.squares_of(bishop) {
        score += pst(&BISHOP_TABLE, sq, side);
    }

    for &sq in board.squares_of(rook) {
        score += pst(&ROOK_TABLE, sq, side);
        let file = FILE_MASK[SQ64[sq]];
        if board.pawns[BOTH] & file == 0 {
            score += ROOK_OPEN_FILE;
        } else if own_pawns & file == 0 {
            score += ROOK_SEMI_OPEN_FILE;
        }
    }

    for &sq in board.squares_of(queen) {
        let file = FILE_MASK[SQ64[sq]];
        if board.pawns[BOTH] & file == 0 {
            score += QUEEN_OPEN_FILE;
        } else if own_pawns & file == 0 {
            score += QUEEN_SEMI_OPEN_FILE;
        }
    }

    let king_sq = board.king_sq[side];
    score += if board.material[them] <= ENDGAME_MATERIAL {
        pst(&KING_ENDGAME, king_sq, side)
    } else {
        pst(&KING_OPENING, king_sq, side)
    };

    if board.count(bishop) >= 2 {
        score += BISHOP_PAIR;
    }

    score
}

/// Static evaluation from the side to move's point of view
pub fn evaluate(board: &Board) -> i32 {
    if board.count(WP) == 0 && board.count(BP) == 0 && material_draw(board) {
        return 0;
    }

    let score = board.material[WHITE] - board.material[BLACK] + evaluate_side(board, WHITE)
        - evaluate_side(board, BLACK);

    if board.side == WHITE {
        score
    } else {
        -score
    }
}

/// Does the evaluation agree with that of the colour-mirrored position?
pub fn mirror_eval_holds(board: &Board) -> bool {
    evaluate(board) == evaluate(&board.mirror())
}
