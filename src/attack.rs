//! Alpaca - Attack Detection
//!
//! `is_square_attacked` answers whether any piece of a side attacks a
//! square, probing outward from the square through the padded board. The
//! border sentinel ends every ray, so there are no bounds checks.

use crate::bitboard::{sq_on_board, step};
use crate::board::Board;
use crate::types::*;

/// Does `piece` belong to `side` and satisfy a classification table?
#[inline]
fn is_attacker(piece: u8, class: &[bool; PIECE_NB], side: usize) -> bool {
    piece_valid(piece) && class[piece as usize] && PIECE_COL[piece as usize] == side
}

/// First non-empty square content along a ray (a piece or `OFFBOARD`)
#[inline]
fn first_blocker(board: &Board, sq: usize, dir: i32) -> u8 {
    let mut t_sq = step(sq, dir);
    let mut piece = board.pieces[t_sq];
    while piece == EMPTY {
        t_sq = step(t_sq, dir);
        piece = board.pieces[t_sq];
    }
    piece
}

/// Check if `sq` is attacked by any piece of `side`
pub fn is_square_attacked(board: &Board, sq: usize, side: usize) -> bool {
    debug_assert!(sq_on_board(sq), "is_square_attacked: square {} off board", sq);
    debug_assert!(side_valid(side), "is_square_attacked: invalid side {}", side);

    let pieces = &board.pieces;

    // Pawns
    if side == WHITE {
        if pieces[sq - 11] == WP || pieces[sq - 9] == WP {
            return true;
        }
    } else if pieces[sq + 11] == BP || pieces[sq + 9] == BP {
        return true;
    }

    // Knights
    for dir in KNIGHT_DIR {
        if is_attacker(pieces[step(sq, dir)], &PIECE_KNIGHT, side) {
            return true;
        }
    }

    // Rooks, queens
    for dir in ROOK_DIR {
        if is_attacker(first_blocker(board, sq, dir), &PIECE_ROOK_QUEEN, side) {
            return true;
        }
    }

    // Bishops, queens
    for dir in BISHOP_DIR {
        if is_attacker(first_blocker(board, sq, dir), &PIECE_BISHOP_QUEEN, side) {
            return true;
        }
    }

    // Kings
    for dir in KING_DIR {
        if is_attacker(pieces[step(sq, dir)], &PIECE_KING, side) {
            return true;
        }
    }

    false
}
