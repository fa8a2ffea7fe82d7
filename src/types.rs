//! Alpaca - Type definitions and constants
//!
//! This module provides the piece values, side indices, padded square
//! constants and the per-piece classification tables. Move generation,
//! attack detection and evaluation read piece properties from these tables
//! only; nothing else branches on piece type.

// ============================================================================
// PIECES
// ============================================================================

/// Piece values. `EMPTY` doubles as "no piece" in moves and on the board.
pub const EMPTY: u8 = 0;
pub const WP: u8 = 1;
pub const WN: u8 = 2;
pub const WB: u8 = 3;
pub const WR: u8 = 4;
pub const WQ: u8 = 5;
pub const WK: u8 = 6;
pub const BP: u8 = 7;
pub const BN: u8 = 8;
pub const BB: u8 = 9;
pub const BR: u8 = 10;
pub const BQ: u8 = 11;
pub const BK: u8 = 12;

/// Square content of the padding ring around the playable 8x8 area.
pub const OFFBOARD: u8 = 13;

/// Number of distinct piece values (including `EMPTY`).
pub const PIECE_NB: usize = 13;

// ============================================================================
// SIDES
// ============================================================================

pub const WHITE: usize = 0;
pub const BLACK: usize = 1;
pub const BOTH: usize = 2;

// ============================================================================
// SQUARES (10x12 padded board)
// ============================================================================

pub const BOARD_SQ_NUM: usize = 120;

pub const A1: usize = 21;
pub const B1: usize = 22;
pub const C1: usize = 23;
pub const D1: usize = 24;
pub const E1: usize = 25;
pub const F1: usize = 26;
pub const G1: usize = 27;
pub const H1: usize = 28;

pub const A8: usize = 91;
pub const B8: usize = 92;
pub const C8: usize = 93;
pub const D8: usize = 94;
pub const E8: usize = 95;
pub const F8: usize = 96;
pub const G8: usize = 97;
pub const H8: usize = 98;

/// "No square" marker for the en passant target and unset king squares.
pub const NO_SQ: usize = 99;

pub const FILE_A: usize = 0;
pub const FILE_H: usize = 7;
pub const RANK_1: usize = 0;
pub const RANK_2: usize = 1;
pub const RANK_3: usize = 2;
pub const RANK_6: usize = 5;
pub const RANK_7: usize = 6;
pub const RANK_8: usize = 7;

/// Castling rights bitmasks
pub const CASTLE_WK: u8 = 1; // White kingside
pub const CASTLE_WQ: u8 = 2; // White queenside
pub const CASTLE_BK: u8 = 4; // Black kingside
pub const CASTLE_BQ: u8 = 8; // Black queenside

// ============================================================================
// LIMITS AND SCORES
// ============================================================================

/// Capacity of the game history (undo stack).
pub const MAX_GAME_MOVES: usize = 2048;
/// Capacity of a single move list.
pub const MAX_POSITION_MOVES: usize = 256;
/// Deepest search ply; also bounds killer tables.
pub const MAX_DEPTH: usize = 64;

pub const INFINITE: i32 = 30_000;
/// Scores beyond this magnitude are mate scores.
pub const IS_MATE: i32 = INFINITE - MAX_DEPTH as i32;

// ============================================================================
// PIECE CLASSIFICATION TABLES
// ============================================================================

/// Knights, bishops, rooks and queens.
pub const PIECE_BIG: [bool; PIECE_NB] = [
    false, false, true, true, true, true, false, false, true, true, true, true, false,
];
/// Rooks and queens.
pub const PIECE_MAJ: [bool; PIECE_NB] = [
    false, false, false, false, true, true, false, false, false, false, true, true, false,
];
/// Knights and bishops.
pub const PIECE_MIN: [bool; PIECE_NB] = [
    false, false, true, true, false, false, false, false, true, true, false, false, false,
];
pub const PIECE_VAL: [i32; PIECE_NB] = [
    0, 100, 325, 325, 550, 1000, 50000, 100, 325, 325, 550, 1000, 50000,
];
pub const PIECE_COL: [usize; PIECE_NB] = [
    BOTH, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, BLACK, BLACK, BLACK, BLACK, BLACK, BLACK,
];
pub const PIECE_PAWN: [bool; PIECE_NB] = [
    false, true, false, false, false, false, false, true, false, false, false, false, false,
];
pub const PIECE_KNIGHT: [bool; PIECE_NB] = [
    false, false, true, false, false, false, false, false, true, false, false, false, false,
];
pub const PIECE_KING: [bool; PIECE_NB] = [
    false, false, false, false, false, false, true, false, false, false, false, false, true,
];
pub const PIECE_ROOK_QUEEN: [bool; PIECE_NB] = [
    false, false, false, false, true, true, false, false, false, false, true, true, false,
];
pub const PIECE_BISHOP_QUEEN: [bool; PIECE_NB] = [
    false, false, false, true, false, true, false, false, false, true, false, true, false,
];
pub const PIECE_SLIDES: [bool; PIECE_NB] = [
    false, false, false, true, true, true, false, false, false, true, true, true, false,
];

/// Direction offsets for sliding pieces and steppers (padded board)
pub const KNIGHT_DIR: [i32; 8] = [-8, -19, -21, -12, 8, 19, 21, 12];
pub const ROOK_DIR: [i32; 4] = [-1, -10, 1, 10];
pub const BISHOP_DIR: [i32; 4] = [-9, -11, 11, 9];
pub const KING_DIR: [i32; 8] = [-1, -10, 1, 10, -9, -11, 11, 9];

pub const PIECE_DIR: [[i32; 8]; PIECE_NB] = [
    [0; 8],
    [0; 8],
    KNIGHT_DIR,
    [-9, -11, 11, 9, 0, 0, 0, 0],
    [-1, -10, 1, 10, 0, 0, 0, 0],
    KING_DIR,
    KING_DIR,
    [0; 8],
    KNIGHT_DIR,
    [-9, -11, 11, 9, 0, 0, 0, 0],
    [-1, -10, 1, 10, 0, 0, 0, 0],
    KING_DIR,
    KING_DIR,
];
pub const NUM_DIR: [usize; PIECE_NB] = [0, 0, 8, 4, 4, 8, 8, 0, 8, 4, 4, 8, 8];

/// Sliding / stepping piece lists per side, used to drive generation loops.
pub const SLIDERS: [[u8; 3]; 2] = [[WB, WR, WQ], [BB, BR, BQ]];
pub const STEPPERS: [[u8; 2]; 2] = [[WN, WK], [BN, BK]];

/// Promotion targets per side, in generation order.
pub const PROMOTIONS: [[u8; 4]; 2] = [[WQ, WR, WB, WN], [BQ, BR, BB, BN]];

/// Same piece type, other colour.
pub const SWAP_PIECE: [u8; PIECE_NB] = [EMPTY, BP, BN, BB, BR, BQ, BK, WP, WN, WB, WR, WQ, WK];

pub const PIECE_CHARS: &[u8; PIECE_NB] = b".PNBRQKpnbrqk";
pub const SIDE_CHARS: &[u8; 3] = b"wb-";

/// Check if a piece value is a real piece (not `EMPTY`, not the sentinel)
#[inline]
pub const fn piece_valid(piece: u8) -> bool {
    piece >= WP && piece <= BK
}

/// Check if a value is a real piece or `EMPTY`
#[inline]
pub const fn piece_valid_empty(piece: u8) -> bool {
    piece <= BK
}

#[inline]
pub const fn side_valid(side: usize) -> bool {
    side == WHITE || side == BLACK
}

/// Pawn of the given side
#[inline]
pub const fn pawn_of(side: usize) -> u8 {
    if side == WHITE {
        WP
    } else {
        BP
    }
}

/// King of the given side
#[inline]
pub const fn king_of(side: usize) -> u8 {
    if side == WHITE {
        WK
    } else {
        BK
    }
}

/// Convert file and rank (0-7) to a padded square index
#[inline]
pub const fn fr_to_sq(file: usize, rank: usize) -> usize {
    21 + file + rank * 10
}

/// FEN piece character to piece value
pub fn fen_to_piece(c: char) -> Option<u8> {
    match c {
        'P' => Some(WP),
        'N' => Some(WN),
        'B' => Some(WB),
        'R' => Some(WR),
        'Q' => Some(WQ),
        'K' => Some(WK),
        'p' => Some(BP),
        'n' => Some(BN),
        'b' => Some(BB),
        'r' => Some(BR),
        'q' => Some(BQ),
        'k' => Some(BK),
        _ => None,
    }
}

/// Piece value to FEN character
pub fn piece_to_fen(piece: u8) -> Option<char> {
    if piece_valid(piece) {
        Some(PIECE_CHARS[piece as usize] as char)
    } else {
        None
    }
}

/// Lowercase promotion letter for coordinate notation
pub fn promotion_char(piece: u8) -> Option<char> {
    if PIECE_KNIGHT[piece as usize] {
        Some('n')
    } else if PIECE_ROOK_QUEEN[piece as usize] && PIECE_BISHOP_QUEEN[piece as usize] {
        Some('q')
    } else if PIECE_ROOK_QUEEN[piece as usize] {
        Some('r')
    } else if PIECE_BISHOP_QUEEN[piece as usize] {
        Some('b')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_consistent() {
        for piece in WP..=BK {
            let p = piece as usize;
            // Every big piece is exactly one of major / minor
            if PIECE_BIG[p] {
                assert!(PIECE_MAJ[p] ^ PIECE_MIN[p], "piece {} big but not maj xor min", piece);
            }
            assert_eq!(PIECE_SLIDES[p], PIECE_ROOK_QUEEN[p] || PIECE_BISHOP_QUEEN[p]);
            assert_eq!(PIECE_COL[SWAP_PIECE[p] as usize], PIECE_COL[p] ^ 1);
            assert_eq!(PIECE_VAL[SWAP_PIECE[p] as usize], PIECE_VAL[p]);
        }
        assert!(!piece_valid(EMPTY));
        assert!(!piece_valid(OFFBOARD));
    }

    #[test]
    fn test_fen_chars_round_trip() {
        for piece in WP..=BK {
            let c = piece_to_fen(piece).unwrap();
            assert_eq!(fen_to_piece(c), Some(piece));
        }
        assert_eq!(fen_to_piece('x'), None);
    }

    #[test]
    fn test_promotion_chars() {
        assert_eq!(promotion_char(WQ), Some('q'));
        assert_eq!(promotion_char(BR), Some('r'));
        assert_eq!(promotion_char(WB), Some('b'));
        assert_eq!(promotion_char(BN), Some('n'));
        assert_eq!(promotion_char(WP), None);
    }

    #[test]
    fn test_padded_corners() {
        assert_eq!(fr_to_sq(0, 0), A1);
        assert_eq!(fr_to_sq(7, 7), H8);
        assert_eq!(fr_to_sq(4, 7), E8);
    }
}
