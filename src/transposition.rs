//! Alpaca - Transposition Table
//!
//! Fixed-capacity array of entries indexed by `key % capacity`. A store
//! always overwrites its slot; a lookup only trusts an entry whose full key
//! matches. Mate scores are stored relative to the node, not the root.

use crate::moves::Move;
use crate::types::*;
use log::info;

// Transposition table entry types
pub const TT_EXACT: u8 = 0;
/// Upper bound: the search failed low
pub const TT_ALPHA: u8 = 1;
/// Lower bound: the search failed high
pub const TT_BETA: u8 = 2;

pub const HASH_MIN_MB: usize = 4;
pub const HASH_MAX_MB: usize = 2048;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TTEntry {
    pub pos_key: u64,
    pub best_move: Move,
    pub score: i32,
    pub depth: i32,
    pub flag: u8,
}

/// Outcome of a lookup with a matching key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTHit {
    /// Stored move, usable for ordering even without a cutoff
    pub best_move: Move,
    /// Score to return when the entry licenses a cutoff at this window
    pub cutoff: Option<i32>,
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    pub hits: u64,
    pub cuts: u64,
    pub new_writes: u64,
    pub overwrites: u64,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        let size_mb = size_mb.clamp(HASH_MIN_MB, HASH_MAX_MB);
        let capacity = (size_mb * 1024 * 1024) / std::mem::size_of::<TTEntry>();
        info!("transposition table: {} MB, {} entries", size_mb, capacity);

        TranspositionTable {
            entries: vec![TTEntry::default(); capacity],
            hits: 0,
            cuts: 0,
            new_writes: 0,
            overwrites: 0,
        }
    }

    /// Table with an exact number of entries
    pub fn with_capacity(capacity: usize) -> Self {
        TranspositionTable {
            entries: vec![TTEntry::default(); capacity.max(1)],
            hits: 0,
            cuts: 0,
            new_writes: 0,
            overwrites: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, pos_key: u64) -> usize {
        (pos_key % self.entries.len() as u64) as usize
    }

    /// Store a search result; the slot is overwritten unconditionally
    pub fn store(&mut self, pos_key: u64, best_move: Move, score: i32, flag: u8, depth: i32, ply: usize) {
        let index = self.index(pos_key);
        let score = if score > IS_MATE {
            score + ply as i32
        } else if score < -IS_MATE {
            score - ply as i32
        } else {
            score
        };

        if self.entries[index].pos_key == 0 {
            self.new_writes += 1;
        } else {
            self.overwrites += 1;
        }

        self.entries[index] = TTEntry { pos_key, best_move, score, depth, flag };
    }

    /// Look up a position; `None` when the slot holds a different key
    pub fn lookup(&mut self, pos_key: u64, depth: i32, alpha: i32, beta: i32, ply: usize) -> Option<TTHit> {
        let entry = self.entries[self.index(pos_key)];
        if entry.pos_key != pos_key {
            return None;
        }
        self.hits += 1;

        let mut cutoff = None;
        if entry.depth >= depth {
            let score = if entry.score > IS_MATE {
                entry.score - ply as i32
            } else if entry.score < -IS_MATE {
                entry.score + ply as i32
            } else {
                entry.score
            };

            cutoff = match entry.flag {
                TT_ALPHA if score <= alpha => Some(alpha),
                TT_BETA if score >= beta => Some(beta),
                TT_EXACT => Some(score),
                _ => None,
            };
            if cutoff.is_some() {
                self.cuts += 1;
            }
        }

        Some(TTHit { best_move: entry.best_move, cutoff })
    }

    /// Stored move for a position, ignoring depth and bounds
    pub fn lookup_move(&self, pos_key: u64) -> Option<Move> {
        let entry = &self.entries[self.index(pos_key)];
        if entry.pos_key == pos_key && !entry.best_move.is_null() {
            Some(entry.best_move)
        } else {
            None
        }
    }

    /// Empty every slot without reallocating
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::default());
        self.hits = 0;
        self.cuts = 0;
        self.new_writes = 0;
        self.overwrites = 0;
    }

    /// Reset the statistics kept per search
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.cuts = 0;
    }

    /// Occupied slots in permille
    pub fn hashfull(&self) -> usize {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample].iter().filter(|e| e.pos_key != 0).count();
        used * 1000 / sample
    }
}
