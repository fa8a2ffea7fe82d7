//! Error types for the engine
//!
//! Two channels only: `FenError` for rejected position strings, and
//! `BoardError` describing a broken board invariant found by
//! `Board::check_board`. Chess illegality is never an error.

use thiserror::Error;

/// Errors produced while parsing a FEN string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN is empty")]
    Empty,

    #[error("Invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("Rank {rank} does not describe exactly 8 files")]
    BadRankLength { rank: usize },

    #[error("Expected 8 ranks, found {0}")]
    BadRankCount(usize),

    #[error("Invalid side to move '{0}'")]
    InvalidSide(String),

    #[error("Invalid castling field '{0}'")]
    InvalidCastling(String),

    #[error("Invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("Invalid move counter '{0}'")]
    InvalidCounter(String),

    #[error("Side {side} must have exactly one king, found {count}")]
    KingCount { side: &'static str, count: usize },

    #[error("Too many pieces '{piece}' on the board: {count}")]
    TooManyPieces { piece: char, count: usize },

    #[error("Side not to move is in check")]
    OpponentInCheck,
}

/// Board invariant violations detected by the consistency check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Piece list for piece {piece} lists square {square} holding {found}")]
    PieceListMismatch { piece: u8, square: usize, found: u8 },

    #[error("Piece {piece} count is {listed} in list but {counted} on board")]
    PieceCountMismatch { piece: u8, listed: usize, counted: usize },

    #[error("Pawn bitboard for side {side} does not match the board")]
    PawnBitboardMismatch { side: usize },

    #[error("Material for side {side} is {stored}, board holds {counted}")]
    MaterialMismatch { side: usize, stored: i32, counted: i32 },

    #[error("Piece class counters for side {side} do not match the board")]
    PieceClassMismatch { side: usize },

    #[error("King square for side {side} is {square} but no king is there")]
    KingSquareMismatch { side: usize, square: usize },

    #[error("Position key {stored:#018x} differs from recomputed {computed:#018x}")]
    KeyMismatch { stored: u64, computed: u64 },

    #[error("Invalid side to move {0}")]
    InvalidSide(usize),

    #[error("Invalid en passant square {0} for side to move")]
    InvalidEnPassant(usize),

    #[error("Invalid castling rights {0:#x}")]
    InvalidCastling(u8),
}

pub type FenResult<T> = Result<T, FenError>;
pub type BoardResult<T> = Result<T, BoardError>;
