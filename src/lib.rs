//! Alpaca - UCI Chess Engine
//!
//! A mailbox chess engine written in Rust with support for:
//! - Full FIDE move rules on a padded 10x12 board with make/take
//! - UCI protocol and an interactive console
//! - Iterative-deepening alpha-beta with quiescence search
//! - Transposition table with Zobrist hashing
//! - Null move pruning, killer and history move ordering
//! - Perft for move generator verification

pub mod types;
pub mod bitboard;
pub mod zobrist;
pub mod error;
pub mod moves;
pub mod board;
pub mod fen;
pub mod attack;
pub mod move_generator;
pub mod evaluation;
pub mod transposition;
pub mod search;
pub mod perft;
pub mod config;
pub mod uci;
pub mod console;
