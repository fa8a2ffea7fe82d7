//! Alpaca - Move Encoding
//!
//! `Move` is a small tagged record: from/to squares (padded index), the
//! captured and promoted piece values (`EMPTY` when absent) and a flag set
//! for en passant, double pawn push and castling. `MoveList` is a
//! fixed-capacity list of (move, ordering score) pairs built per call.

use crate::bitboard::square_name;
use crate::types::*;
use std::fmt;

pub const FLAG_EP: u8 = 1;
pub const FLAG_PAWN_START: u8 = 2;
pub const FLAG_CASTLE: u8 = 4;

/// Represents a chess move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub from_sq: usize,
    pub to_sq: usize,
    pub captured: u8,
    pub promoted: u8,
    pub flags: u8,
}

impl Move {
    /// The "no move" value; also recorded in history for null moves
    pub const NONE: Move = Move { from_sq: 0, to_sq: 0, captured: EMPTY, promoted: EMPTY, flags: 0 };

    pub fn new(from_sq: usize, to_sq: usize, captured: u8, promoted: u8, flags: u8) -> Self {
        Move { from_sq, to_sq, captured, promoted, flags }
    }

    /// Create a quiet (non-capturing, non-special) move
    pub fn quiet(from_sq: usize, to_sq: usize) -> Self {
        Move::new(from_sq, to_sq, EMPTY, EMPTY, 0)
    }

    /// Create a capture move
    pub fn capture(from_sq: usize, to_sq: usize, captured: u8) -> Self {
        Move::new(from_sq, to_sq, captured, EMPTY, 0)
    }

    /// Create an en passant capture; the captured pawn is not on `to_sq`
    pub fn en_passant(from_sq: usize, to_sq: usize) -> Self {
        Move::new(from_sq, to_sq, EMPTY, EMPTY, FLAG_EP)
    }

    /// Create a double pawn push
    pub fn pawn_start(from_sq: usize, to_sq: usize) -> Self {
        Move::new(from_sq, to_sq, EMPTY, EMPTY, FLAG_PAWN_START)
    }

    /// Create a castling move (king from/to squares)
    pub fn castling(from_sq: usize, to_sq: usize) -> Self {
        Move::new(from_sq, to_sq, EMPTY, EMPTY, FLAG_CASTLE)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.from_sq == 0 && self.to_sq == 0
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EP != 0
    }

    #[inline]
    pub fn is_pawn_start(&self) -> bool {
        self.flags & FLAG_PAWN_START != 0
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.flags & FLAG_CASTLE != 0
    }

    /// Captures include en passant
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured != EMPTY || self.is_en_passant()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promoted != EMPTY
    }

    /// Convert move to coordinate notation (e.g., "e2e4", "e7e8q")
    pub fn to_uci(&self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        let mut s = format!("{}{}", square_name(self.from_sq), square_name(self.to_sq));
        if let Some(c) = promotion_char(self.promoted) {
            s.push(c);
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

// ============================================================================
// MOVE LIST
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-capacity move list; generation never allocates
#[derive(Clone)]
pub struct MoveList {
    moves: [ScoredMove; MAX_POSITION_MOVES],
    count: usize,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList { moves: [ScoredMove::default(); MAX_POSITION_MOVES], count: 0 }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        assert!(self.count < MAX_POSITION_MOVES, "move list overflow");
        self.moves[self.count] = ScoredMove { mv, score };
        self.count += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Raise the score of `mv` if present; returns whether it was found
    pub fn boost(&mut self, mv: Move, score: i32) -> bool {
        match self.as_slice().iter().position(|m| m.mv == mv) {
            Some(index) => {
                self.moves[index].score = score;
                true
            }
            None => false,
        }
    }

    /// Swap the best-scored move among `index..` into `index` and return it
    pub fn pick_next(&mut self, index: usize) -> Move {
        let mut best_score = i32::MIN;
        let mut best_index = index;
        for i in index..self.count {
            if self.moves[i].score > best_score {
                best_score = self.moves[i].score;
                best_index = i;
            }
        }
        self.moves.swap(index, best_index);
        self.moves[index].mv
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().iter().any(|m| m.mv == mv)
    }

    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.count]
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().map(|m| m.mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}
