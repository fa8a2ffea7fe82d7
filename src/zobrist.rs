//! Alpaca - Zobrist Keys
//!
//! Random keys per (piece, padded square), side to move and castling-rights
//! combination. Built once from a fixed seed on first use and read-only
//! afterwards, so fingerprints are reproducible across runs.

use crate::types::*;
use once_cell::sync::Lazy;
use rand::prelude::*;

const ZOBRIST_SEED: u64 = 12345;

pub struct ZobristKeys {
    /// `piece_keys[EMPTY][sq]` keys the en passant square.
    pub piece_keys: [[u64; BOARD_SQ_NUM]; PIECE_NB],
    pub side_key: u64,
    pub castle_keys: [u64; 16],
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

        let mut piece_keys = [[0u64; BOARD_SQ_NUM]; PIECE_NB];
        for keys in piece_keys.iter_mut() {
            for key in keys.iter_mut() {
                *key = rng.gen();
            }
        }

        let side_key = rng.gen();

        let mut castle_keys = [0u64; 16];
        for key in castle_keys.iter_mut() {
            *key = rng.gen();
        }

        ZobristKeys { piece_keys, side_key, castle_keys }
    }

    #[inline]
    pub fn piece(&self, piece: u8, sq: usize) -> u64 {
        self.piece_keys[piece as usize][sq]
    }

    #[inline]
    pub fn en_passant(&self, sq: usize) -> u64 {
        self.piece_keys[EMPTY as usize][sq]
    }

    #[inline]
    pub fn castle(&self, rights: u8) -> u64 {
        self.castle_keys[rights as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        ZobristKeys::new()
    }
}

/// Process-wide key set
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_deterministic() {
        let a = ZobristKeys::new();
        let b = ZobristKeys::new();
        assert_eq!(a.side_key, b.side_key);
        assert_eq!(a.piece(WK, E1), b.piece(WK, E1));
        assert_eq!(ZOBRIST.castle(15), a.castle(15));
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys = &*ZOBRIST;
        assert_ne!(keys.piece(WP, A1), keys.piece(BP, A1));
        assert_ne!(keys.piece(WP, A1), keys.piece(WP, B1));
        assert_ne!(keys.en_passant(A1), keys.piece(WP, A1));
        assert_ne!(keys.castle(0), keys.castle(1));
    }
}
