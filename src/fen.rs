//! Alpaca - FEN parsing and serialization
//!
//! Parsing builds a fresh board and only commits it on success, so a
//! rejected string never leaves a half-loaded position behind.

use crate::attack::is_square_attacked;
use crate::bitboard::{parse_square, square_name, RANKS_BRD};
use crate::board::{Board, MAX_PIECE_LIST};
use crate::error::{FenError, FenResult};
use crate::types::*;

impl Board {
    /// Create a board from a FEN string
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(FenError::Empty);
        }

        let mut board = Board::empty();

        // Piece placement
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount(ranks.len()));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = RANK_8 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenError::InvalidPiece(c));
                    }
                    file += skip as usize;
                } else {
                    let piece = fen_to_piece(c).ok_or(FenError::InvalidPiece(c))?;
                    if file > FILE_H {
                        return Err(FenError::BadRankLength { rank: rank + 1 });
                    }
                    board.pieces[fr_to_sq(file, rank)] = piece;
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadRankLength { rank: rank + 1 });
                }
            }
            if file != 8 {
                return Err(FenError::BadRankLength { rank: rank + 1 });
            }
        }

        // Side to move
        board.side = match parts.get(1).copied().unwrap_or("w") {
            "w" => WHITE,
            "b" => BLACK,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        // Castling rights
        let castling = parts.get(2).copied().unwrap_or("-");
        if castling != "-" {
            for c in castling.chars() {
                board.castling_rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(FenError::InvalidCastling(castling.to_string())),
                };
            }
        }

        // En passant square, on the rank behind the pawn that just moved
        let ep = parts.get(3).copied().unwrap_or("-");
        if ep != "-" {
            let sq = parse_square(ep).ok_or_else(|| FenError::InvalidEnPassant(ep.to_string()))?;
            let expected_rank = if board.side == WHITE { RANK_6 } else { RANK_3 };
            if RANKS_BRD[sq] != expected_rank {
                return Err(FenError::InvalidEnPassant(ep.to_string()));
            }
            board.en_passant = sq;
        }

        // Move counters
        if let Some(fifty) = parts.get(4) {
            board.fifty_move = fifty.parse().map_err(|_| FenError::InvalidCounter(fifty.to_string()))?;
        }
        if let Some(full) = parts.get(5) {
            board.full_move = full.parse().map_err(|_| FenError::InvalidCounter(full.to_string()))?;
        }

        for (king, side) in [(WK, "white"), (BK, "black")] {
            let count = board.pieces.iter().filter(|&&p| p == king).count();
            if count != 1 {
                return Err(FenError::KingCount { side, count });
            }
        }

        for piece in WP..=BK {
            let count = board.pieces.iter().filter(|&&p| p == piece).count();
            if count > MAX_PIECE_LIST {
                let piece = piece_to_fen(piece).unwrap_or('?');
                return Err(FenError::TooManyPieces { piece, count });
            }
        }

        board.update_lists_material();

        if !board.castling_matches_placement() {
            return Err(FenError::InvalidCastling(castling.to_string()));
        }
        if !board.en_passant_matches_placement() {
            return Err(FenError::InvalidEnPassant(ep.to_string()));
        }
        if is_square_attacked(&board, board.king_sq[board.side ^ 1], board.side) {
            return Err(FenError::OpponentInCheck);
        }

        board.pos_key = board.generate_pos_key();
        Ok(board)
    }

    /// Load a FEN into this board; on error the board is unchanged
    pub fn parse_fen(&mut self, fen: &str) -> FenResult<()> {
        *self = Board::from_fen(fen)?;
        Ok(())
    }

    /// Convert board to FEN string
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (RANK_1..=RANK_8).rev() {
            let mut empty = 0;
            for file in FILE_A..=FILE_H {
                match piece_to_fen(self.pieces[fr_to_sq(file, rank)]) {
                    Some(c) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > RANK_1 {
                fen.push('/');
            }
        }

        format!(
            "{} {} {} {} {} {}",
            fen,
            SIDE_CHARS[self.side] as char,
            self.castling_string(),
            square_name(self.en_passant),
            self.fifty_move,
            self.full_move
        )
    }
}
