//! Alpaca - Board Geometry Module
//!
//! Compile-time lookup tables for the padded 10x12 board:
//! - 120 <-> 64 square index mapping
//! - File / rank of each padded square (sentinel for the border)
//! - Castling-rights decay mask
//! - Rank mirror for piece-square tables
//! - Pawn-structure masks (file, isolated, passed) over the 64-square index
//!
//! Also the small set of bit utilities the pawn bitboards need.

use crate::types::*;

// ============================================================================
// CONSTANTS
// ============================================================================

/// File / rank value stored for border squares of the padded board.
pub const OFFBOARD_FR: usize = 100;

/// 64-square index stored for border squares of the padded board.
pub const NO_SQ64: usize = 65;

pub const FILE_A_BB: u64 = 0x0101010101010101;

// ============================================================================
// PRECOMPUTED TABLES
// ============================================================================

/// Padded square of each 64-square index
pub static SQ120: [usize; 64] = init_sq120();

/// 64-square index of each padded square (`NO_SQ64` on the border)
pub static SQ64: [usize; BOARD_SQ_NUM] = init_sq64();

/// File of each padded square (`OFFBOARD_FR` on the border)
pub static FILES_BRD: [usize; BOARD_SQ_NUM] = init_files_brd();

/// Rank of each padded square (`OFFBOARD_FR` on the border)
pub static RANKS_BRD: [usize; BOARD_SQ_NUM] = init_ranks_brd();

/// Castling rights kept after a piece leaves or lands on each square.
/// `castle &= CASTLE_PERM[from] & CASTLE_PERM[to]` on every move.
pub static CASTLE_PERM: [u8; BOARD_SQ_NUM] = init_castle_perm();

/// Rank reflection of a 64-square index
pub static MIRROR64: [usize; 64] = init_mirror64();

/// Whole file containing each 64-square index
pub static FILE_MASK: [u64; 64] = init_file_mask();

/// Adjacent files of each 64-square index
pub static ISOLATED_MASK: [u64; 64] = init_isolated_mask();

/// Squares ahead of a white pawn on its own and adjacent files
pub static WHITE_PASSED_MASK: [u64; 64] = init_passed_mask(WHITE);

/// Squares ahead of a black pawn on its own and adjacent files
pub static BLACK_PASSED_MASK: [u64; 64] = init_passed_mask(BLACK);

// ============================================================================
// INITIALIZATION FUNCTIONS (const)
// ============================================================================

const fn init_sq120() -> [usize; 64] {
    let mut table = [0usize; 64];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[rank * 8 + file] = fr_to_sq(file, rank);
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn init_sq64() -> [usize; BOARD_SQ_NUM] {
    let mut table = [NO_SQ64; BOARD_SQ_NUM];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[fr_to_sq(file, rank)] = rank * 8 + file;
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn init_files_brd() -> [usize; BOARD_SQ_NUM] {
    let mut table = [OFFBOARD_FR; BOARD_SQ_NUM];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[fr_to_sq(file, rank)] = file;
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn init_ranks_brd() -> [usize; BOARD_SQ_NUM] {
    let mut table = [OFFBOARD_FR; BOARD_SQ_NUM];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[fr_to_sq(file, rank)] = rank;
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn init_castle_perm() -> [u8; BOARD_SQ_NUM] {
    let mut table = [15u8; BOARD_SQ_NUM];
    table[A1] = 15 & !CASTLE_WQ;
    table[E1] = 15 & !(CASTLE_WK | CASTLE_WQ);
    table[H1] = 15 & !CASTLE_WK;
    table[A8] = 15 & !CASTLE_BQ;
    table[E8] = 15 & !(CASTLE_BK | CASTLE_BQ);
    table[H8] = 15 & !CASTLE_BK;
    table
}

const fn init_mirror64() -> [usize; 64] {
    let mut table = [0usize; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = sq ^ 56;
        sq += 1;
    }
    table
}

const fn init_file_mask() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = FILE_A_BB << (sq & 7);
        sq += 1;
    }
    table
}

const fn init_isolated_mask() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = sq & 7;
        let mut mask = 0u64;
        if file > 0 {
            mask |= FILE_A_BB << (file - 1);
        }
        if file < 7 {
            mask |= FILE_A_BB << (file + 1);
        }
        table[sq] = mask;
        sq += 1;
    }
    table
}

const fn init_passed_mask(side: usize) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = sq & 7;
        let rank = sq >> 3;
        let mut mask = 0u64;
        let mut r = 0;
        while r < 8 {
            let ahead = if side == WHITE { r > rank } else { r < rank };
            if ahead {
                let mut f = if file > 0 { file - 1 } else { 0 };
                let last = if file < 7 { file + 1 } else { 7 };
                while f <= last {
                    mask |= 1u64 << (r * 8 + f);
                    f += 1;
                }
            }
            r += 1;
        }
        table[sq] = mask;
        sq += 1;
    }
    table
}

// ============================================================================
// SQUARE HELPERS
// ============================================================================

/// Check that a padded index lies on the playable 8x8 area
#[inline]
pub fn sq_on_board(sq: usize) -> bool {
    sq < BOARD_SQ_NUM && FILES_BRD[sq] != OFFBOARD_FR
}

/// Padded square reached from `sq` by a direction offset
#[inline]
pub fn step(sq: usize, dir: i32) -> usize {
    (sq as i32 + dir) as usize
}

/// Algebraic name of a padded square ("e4"), "-" off the board
pub fn square_name(sq: usize) -> String {
    if !sq_on_board(sq) {
        return "-".to_string();
    }
    let file = (b'a' + FILES_BRD[sq] as u8) as char;
    let rank = (b'1' + RANKS_BRD[sq] as u8) as char;
    format!("{}{}", file, rank)
}

/// Parse an algebraic square ("e4") into a padded index
pub fn parse_square(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file >= 8 || rank >= 8 {
        return None;
    }
    Some(fr_to_sq(file as usize, rank as usize))
}

// ============================================================================
// BITBOARD UTILITIES
// ============================================================================

/// Set the bit of a 64-square index
#[inline]
pub fn set_bit(bb: &mut u64, sq64: usize) {
    *bb |= 1u64 << sq64;
}

/// Clear the bit of a 64-square index
#[inline]
pub fn clear_bit(bb: &mut u64, sq64: usize) {
    *bb &= !(1u64 << sq64);
}
