//! Alpaca - Board Representation Module
//!
//! This module provides the mutable position: a 120-square padded piece
//! array, per-piece square lists, pawn bitboards, material counters and an
//! undo history. Every placement goes through `clear_piece`, `add_piece`
//! or `move_piece`, which keep all of those and the Zobrist key in step.

use crate::attack::is_square_attacked;
use crate::bitboard::*;
use crate::error::{BoardError, BoardResult};
use crate::moves::Move;
use crate::types::*;
use crate::zobrist::ZOBRIST;
use std::fmt;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Most pieces of one kind a legal position can hold (2 originals + 8 promotions)
pub const MAX_PIECE_LIST: usize = 10;

const BACK_RANK: [u8; 8] = [WR, WN, WB, WQ, WK, WB, WN, WR];

/// Each castling right with the king and rook it needs on their home squares
const CASTLE_HOMES: [(u8, usize, u8, usize, u8); 4] = [
    (CASTLE_WK, E1, WK, H1, WR),
    (CASTLE_WQ, E1, WK, A1, WR),
    (CASTLE_BK, E8, BK, H8, BR),
    (CASTLE_BQ, E8, BK, A8, BR),
];

/// Information needed to undo a move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UndoInfo {
    pub mv: Move,
    pub castling_rights: u8,
    pub en_passant: usize,
    pub fifty_move: u32,
    pub pos_key: u64,
}

/// Chess board representation
#[derive(Clone, Debug)]
pub struct Board {
    /// Padded 10x12 array; border squares hold `OFFBOARD`
    pub pieces: [u8; BOARD_SQ_NUM],
    /// Pawn occupancy per side, indexed by 64-square index
    pub pawns: [u64; 3],
    pub king_sq: [usize; 2],
    pub side: usize,
    pub en_passant: usize,
    pub fifty_move: u32,
    pub full_move: u32,
    /// Search ply, reset at the start of each search
    pub ply: usize,
    pub castling_rights: u8,
    pub pos_key: u64,
    pub piece_num: [usize; PIECE_NB],
    pub piece_list: [[usize; MAX_PIECE_LIST]; PIECE_NB],
    pub big_pieces: [usize; 2],
    pub major_pieces: [usize; 2],
    pub minor_pieces: [usize; 2],
    /// Non-king material per side
    pub material: [i32; 2],
    history: Vec<UndoInfo>,
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            board.pieces[fr_to_sq(file, RANK_1)] = piece;
            board.pieces[fr_to_sq(file, RANK_2)] = WP;
            board.pieces[fr_to_sq(file, RANK_7)] = BP;
            board.pieces[fr_to_sq(file, RANK_8)] = SWAP_PIECE[piece as usize];
        }
        board.castling_rights = CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ;
        board.update_lists_material();
        board.pos_key = board.generate_pos_key();
        board
    }

    /// A board with no pieces, white to move and no history
    pub fn empty() -> Self {
        let mut pieces = [OFFBOARD; BOARD_SQ_NUM];
        for &sq in SQ120.iter() {
            pieces[sq] = EMPTY;
        }
        Board {
            pieces,
            pawns: [0; 3],
            king_sq: [NO_SQ; 2],
            side: WHITE,
            en_passant: NO_SQ,
            fifty_move: 0,
            full_move: 1,
            ply: 0,
            castling_rights: 0,
            pos_key: 0,
            piece_num: [0; PIECE_NB],
            piece_list: [[0; MAX_PIECE_LIST]; PIECE_NB],
            big_pieces: [0; 2],
            major_pieces: [0; 2],
            minor_pieces: [0; 2],
            material: [0; 2],
            history: Vec::with_capacity(MAX_GAME_MOVES),
        }
    }

    // ========================================================================
    // DERIVED STATE
    // ========================================================================

    /// Rebuild piece lists, counters and pawn bitboards from `pieces`
    pub(crate) fn update_lists_material(&mut self) {
        self.pawns = [0; 3];
        self.king_sq = [NO_SQ; 2];
        self.piece_num = [0; PIECE_NB];
        self.big_pieces = [0; 2];
        self.major_pieces = [0; 2];
        self.minor_pieces = [0; 2];
        self.material = [0; 2];

        for &sq in SQ120.iter() {
            let piece = self.pieces[sq];
            if !piece_valid(piece) {
                continue;
            }
            let p = piece as usize;
            let col = PIECE_COL[p];
            self.count_piece(piece, 1);

            assert!(self.piece_num[p] < MAX_PIECE_LIST, "too many pieces of kind {}", piece);
            self.piece_list[p][self.piece_num[p]] = sq;
            self.piece_num[p] += 1;

            if PIECE_KING[p] {
                self.king_sq[col] = sq;
            }
            if PIECE_PAWN[p] {
                set_bit(&mut self.pawns[col], SQ64[sq]);
                set_bit(&mut self.pawns[BOTH], SQ64[sq]);
            }
        }
    }

    /// Adjust class counters and material for one piece entering (+1) or leaving (-1)
    #[inline]
    fn count_piece(&mut self, piece: u8, delta: i32) {
        let p = piece as usize;
        let col = PIECE_COL[p];
        if PIECE_KING[p] {
            return;
        }
        self.material[col] += delta * PIECE_VAL[p];
        if PIECE_BIG[p] {
            self.big_pieces[col] = (self.big_pieces[col] as i32 + delta) as usize;
            if PIECE_MAJ[p] {
                self.major_pieces[col] = (self.major_pieces[col] as i32 + delta) as usize;
            } else {
                self.minor_pieces[col] = (self.minor_pieces[col] as i32 + delta) as usize;
            }
        }
    }

    /// Compute the Zobrist key of the current position from scratch
    pub fn generate_pos_key(&self) -> u64 {
        let mut key = 0u64;
        for &sq in SQ120.iter() {
            let piece = self.pieces[sq];
            if piece != EMPTY {
                key ^= ZOBRIST.piece(piece, sq);
            }
        }
        if self.side == WHITE {
            key ^= ZOBRIST.side_key;
        }
        if self.en_passant != NO_SQ {
            key ^= ZOBRIST.en_passant(self.en_passant);
        }
        key ^ ZOBRIST.castle(self.castling_rights)
    }

    // ========================================================================
    // HASH HELPERS
    // ========================================================================

    #[inline]
    fn hash_piece(&mut self, piece: u8, sq: usize) {
        self.pos_key ^= ZOBRIST.piece(piece, sq);
    }

    #[inline]
    fn hash_castle(&mut self) {
        self.pos_key ^= ZOBRIST.castle(self.castling_rights);
    }

    #[inline]
    fn hash_side(&mut self) {
        self.pos_key ^= ZOBRIST.side_key;
    }

    #[inline]
    fn hash_en_passant(&mut self) {
        self.pos_key ^= ZOBRIST.en_passant(self.en_passant);
    }

    // ========================================================================
    // PLACEMENT PRIMITIVES
    // ========================================================================

    /// Remove the piece on `sq`
    pub(crate) fn clear_piece(&mut self, sq: usize) {
        assert!(sq_on_board(sq), "clear_piece: square {} is off the board", sq);
        let piece = self.pieces[sq];
        assert!(piece_valid(piece), "clear_piece: no piece on {}", square_name(sq));

        let p = piece as usize;
        let col = PIECE_COL[p];
        self.hash_piece(piece, sq);
        self.pieces[sq] = EMPTY;
        self.count_piece(piece, -1);

        if PIECE_PAWN[p] {
            clear_bit(&mut self.pawns[col], SQ64[sq]);
            clear_bit(&mut self.pawns[BOTH], SQ64[sq]);
        }

        let count = self.piece_num[p];
        let Some(index) = self.piece_list[p][..count].iter().position(|&s| s == sq) else {
            panic!("clear_piece: {} missing from piece list", square_name(sq));
        };
        self.piece_num[p] -= 1;
        self.piece_list[p][index] = self.piece_list[p][count - 1];
    }

    /// Place `piece` on the empty square `sq`
    pub(crate) fn add_piece(&mut self, sq: usize, piece: u8) {
        assert!(sq_on_board(sq), "add_piece: square {} is off the board", sq);
        assert!(piece_valid(piece), "add_piece: invalid piece {}", piece);

        let p = piece as usize;
        let col = PIECE_COL[p];
        self.hash_piece(piece, sq);
        self.pieces[sq] = piece;
        self.count_piece(piece, 1);

        if PIECE_PAWN[p] {
            set_bit(&mut self.pawns[col], SQ64[sq]);
            set_bit(&mut self.pawns[BOTH], SQ64[sq]);
        }

        assert!(self.piece_num[p] < MAX_PIECE_LIST, "add_piece: too many pieces of kind {}", piece);
        self.piece_list[p][self.piece_num[p]] = sq;
        self.piece_num[p] += 1;
    }

    /// Move the piece on `from` to the empty square `to`
    pub(crate) fn move_piece(&mut self, from: usize, to: usize) {
        assert!(sq_on_board(from) && sq_on_board(to), "move_piece: off-board {} -> {}", from, to);
        let piece = self.pieces[from];
        assert!(piece_valid(piece), "move_piece: no piece on {}", square_name(from));

        let p = piece as usize;
        let col = PIECE_COL[p];
        self.hash_piece(piece, from);
        self.pieces[from] = EMPTY;
        self.hash_piece(piece, to);
        self.pieces[to] = piece;

        if PIECE_PAWN[p] {
            clear_bit(&mut self.pawns[col], SQ64[from]);
            clear_bit(&mut self.pawns[BOTH], SQ64[from]);
            set_bit(&mut self.pawns[col], SQ64[to]);
            set_bit(&mut self.pawns[BOTH], SQ64[to]);
        }

        let count = self.piece_num[p];
        match self.piece_list[p][..count].iter().position(|&s| s == from) {
            Some(index) => self.piece_list[p][index] = to,
            None => panic!("move_piece: {} missing from piece list", square_name(from)),
        }
    }

    // ========================================================================
    // MAKE / TAKE
    // ========================================================================

    /// Play a pseudo-legal move. Returns `false` (with the board restored)
    /// if it leaves the mover's king attacked.
    pub fn make_move(&mut self, mv: Move) -> bool {
        let from = mv.from_sq;
        let to = mv.to_sq;
        let side = self.side;

        assert!(sq_on_board(from) && sq_on_board(to), "make_move: off-board move {:?}", mv);
        assert!(
            piece_valid_empty(mv.captured) && piece_valid_empty(mv.promoted),
            "make_move: invalid piece in {:?}",
            mv
        );
        assert!(piece_valid(self.pieces[from]), "make_move: no piece on {}", square_name(from));
        assert!(self.history.len() < MAX_GAME_MOVES, "make_move: game history full");

        self.history.push(UndoInfo {
            mv,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            fifty_move: self.fifty_move,
            pos_key: self.pos_key,
        });

        if mv.is_en_passant() {
            if side == WHITE {
                self.clear_piece(to - 10);
            } else {
                self.clear_piece(to + 10);
            }
        } else if mv.is_castle() {
            match to {
                C1 => self.move_piece(A1, D1),
                C8 => self.move_piece(A8, D8),
                G1 => self.move_piece(H1, F1),
                G8 => self.move_piece(H8, F8),
                _ => panic!("make_move: bad castle destination {}", square_name(to)),
            }
        }

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.hash_castle();
        self.castling_rights &= CASTLE_PERM[from] & CASTLE_PERM[to];
        self.en_passant = NO_SQ;
        self.hash_castle();

        self.fifty_move += 1;
        if mv.captured != EMPTY {
            self.clear_piece(to);
            self.fifty_move = 0;
        }
        self.ply += 1;

        if PIECE_PAWN[self.pieces[from] as usize] {
            self.fifty_move = 0;
            if mv.is_pawn_start() {
                self.en_passant = if side == WHITE { from + 10 } else { from - 10 };
                self.hash_en_passant();
            }
        }

        self.move_piece(from, to);

        if mv.promoted != EMPTY {
            self.clear_piece(to);
            self.add_piece(to, mv.promoted);
        }

        if PIECE_KING[self.pieces[to] as usize] {
            self.king_sq[side] = to;
        }
        if side == BLACK {
            self.full_move += 1;
        }

        self.side ^= 1;
        self.hash_side();
        self.debug_check();

        if is_square_attacked(self, self.king_sq[side], self.side) {
            self.take_move();
            return false;
        }
        true
    }

    /// Undo the most recent `make_move`
    pub fn take_move(&mut self) {
        let Some(undo) = self.history.pop() else {
            panic!("take_move: no move to take back");
        };
        let mv = undo.mv;
        let from = mv.from_sq;
        let to = mv.to_sq;
        assert!(sq_on_board(from) && sq_on_board(to), "take_move: off-board move {:?}", mv);

        self.ply = self.ply.saturating_sub(1);

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.hash_castle();
        self.castling_rights = undo.castling_rights;
        self.fifty_move = undo.fifty_move;
        self.en_passant = undo.en_passant;
        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.hash_castle();

        self.side ^= 1;
        self.hash_side();
        let side = self.side;

        if mv.is_en_passant() {
            if side == WHITE {
                self.add_piece(to - 10, BP);
            } else {
                self.add_piece(to + 10, WP);
            }
        } else if mv.is_castle() {
            match to {
                C1 => self.move_piece(D1, A1),
                C8 => self.move_piece(D8, A8),
                G1 => self.move_piece(F1, H1),
                G8 => self.move_piece(F8, H8),
                _ => panic!("take_move: bad castle destination {}", square_name(to)),
            }
        }

        self.move_piece(to, from);

        if PIECE_KING[self.pieces[from] as usize] {
            self.king_sq[side] = from;
        }
        if mv.captured != EMPTY {
            self.add_piece(to, mv.captured);
        }
        if mv.promoted != EMPTY {
            self.clear_piece(from);
            self.add_piece(from, pawn_of(side));
        }
        if side == BLACK {
            self.full_move -= 1;
        }

        debug_assert_eq!(self.pos_key, undo.pos_key, "take_move: key drifted undoing {}", mv);
        self.pos_key = undo.pos_key;
        self.debug_check();
    }

    /// Pass the turn without moving a piece
    pub fn make_null_move(&mut self) {
        assert!(!self.in_check(), "make_null_move: side to move is in check");
        assert!(self.history.len() < MAX_GAME_MOVES, "make_null_move: game history full");

        self.history.push(UndoInfo {
            mv: Move::NONE,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            fifty_move: self.fifty_move,
            pos_key: self.pos_key,
        });

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.en_passant = NO_SQ;
        self.side ^= 1;
        self.hash_side();
        self.ply += 1;
        self.debug_check();
    }

    /// Undo the most recent `make_null_move`
    pub fn take_null_move(&mut self) {
        let Some(undo) = self.history.pop() else {
            panic!("take_null_move: no move to take back");
        };
        assert!(undo.mv.is_null(), "take_null_move: last move was {}", undo.mv);

        self.ply = self.ply.saturating_sub(1);
        self.castling_rights = undo.castling_rights;
        self.fifty_move = undo.fifty_move;
        self.en_passant = undo.en_passant;
        self.side ^= 1;
        self.pos_key = undo.pos_key;
        self.debug_check();
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Number of plies recorded in the game history
    #[inline]
    pub fn his_ply(&self) -> usize {
        self.history.len()
    }

    /// Do the castling rights only name kings and rooks still on their home squares?
    pub fn castling_matches_placement(&self) -> bool {
        CASTLE_HOMES.iter().all(|&(bit, king_sq, king, rook_sq, rook)| {
            self.castling_rights & bit == 0 || (self.pieces[king_sq] == king && self.pieces[rook_sq] == rook)
        })
    }

    /// Does the en passant square sit behind an enemy pawn that just made a double push?
    pub fn en_passant_matches_placement(&self) -> bool {
        if self.en_passant == NO_SQ {
            return true;
        }
        let (pawn_sq, pawn) = if self.side == WHITE {
            (self.en_passant - 10, BP)
        } else {
            (self.en_passant + 10, WP)
        };
        self.pieces[self.en_passant] == EMPTY && self.pieces[pawn_sq] == pawn
    }

    /// Is the side to move in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        is_square_attacked(self, self.king_sq[self.side], self.side ^ 1)
    }

    /// Earlier positions since the last irreversible move that match this one
    fn reversible_window(&self) -> &[UndoInfo] {
        let his_ply = self.history.len();
        let start = his_ply.saturating_sub(self.fifty_move as usize);
        let end = his_ply.saturating_sub(1);
        if start >= end {
            return &[];
        }
        &self.history[start..end]
    }

    /// Has the current position occurred before since the last capture or pawn move?
    pub fn is_repetition(&self) -> bool {
        self.reversible_window().iter().any(|undo| undo.pos_key == self.pos_key)
    }

    /// How many earlier occurrences of the current position are in the history
    pub fn repetition_count(&self) -> usize {
        self.reversible_window().iter().filter(|undo| undo.pos_key == self.pos_key).count()
    }

    /// Check if 50-move rule applies (draw)
    pub fn is_fifty_moves(&self) -> bool {
        self.fifty_move >= 100
    }

    /// Number of pieces of this kind on the board
    #[inline]
    pub fn count(&self, piece: u8) -> usize {
        self.piece_num[piece as usize]
    }

    /// Squares holding `piece`
    #[inline]
    pub fn squares_of(&self, piece: u8) -> &[usize] {
        let p = piece as usize;
        &self.piece_list[p][..self.piece_num[p]]
    }

    // ========================================================================
    // MIRROR
    // ========================================================================

    /// The same position with ranks reflected, colours swapped and the
    /// other side to move. History is not carried over.
    pub fn mirror(&self) -> Board {
        let mut mirrored = Board::empty();
        for sq64 in 0..64 {
            let piece = self.pieces[SQ120[MIRROR64[sq64]]];
            mirrored.pieces[SQ120[sq64]] = SWAP_PIECE[piece as usize];
        }

        let mut rights = 0;
        if self.castling_rights & CASTLE_WK != 0 {
            rights |= CASTLE_BK;
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            rights |= CASTLE_BQ;
        }
        if self.castling_rights & CASTLE_BK != 0 {
            rights |= CASTLE_WK;
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            rights |= CASTLE_WQ;
        }

        mirrored.castling_rights = rights;
        mirrored.side = self.side ^ 1;
        mirrored.en_passant = if self.en_passant == NO_SQ {
            NO_SQ
        } else {
            SQ120[MIRROR64[SQ64[self.en_passant]]]
        };
        mirrored.fifty_move = self.fifty_move;
        mirrored.full_move = self.full_move;
        mirrored.update_lists_material();
        mirrored.pos_key = mirrored.generate_pos_key();
        mirrored
    }

    // ========================================================================
    // CONSISTENCY CHECK
    // ========================================================================

    /// Verify every incrementally maintained field against the piece array
    pub fn check_board(&self) -> BoardResult<()> {
        let mut piece_num = [0usize; PIECE_NB];
        let mut big = [0usize; 2];
        let mut major = [0usize; 2];
        let mut minor = [0usize; 2];
        let mut material = [0i32; 2];
        let mut pawns = [0u64; 3];

        for piece in WP..=BK {
            for &sq in self.squares_of(piece) {
                let found = self.pieces[sq];
                if found != piece {
                    return Err(BoardError::PieceListMismatch { piece, square: sq, found });
                }
            }
        }

        for &sq in SQ120.iter() {
            let piece = self.pieces[sq];
            if !piece_valid(piece) {
                continue;
            }
            let p = piece as usize;
            let col = PIECE_COL[p];
            piece_num[p] += 1;
            if PIECE_PAWN[p] {
                set_bit(&mut pawns[col], SQ64[sq]);
                set_bit(&mut pawns[BOTH], SQ64[sq]);
            }
            if PIECE_KING[p] {
                continue;
            }
            material[col] += PIECE_VAL[p];
            if PIECE_BIG[p] {
                big[col] += 1;
            }
            if PIECE_MAJ[p] {
                major[col] += 1;
            }
            if PIECE_MIN[p] {
                minor[col] += 1;
            }
        }

        for piece in WP..=BK {
            let p = piece as usize;
            if piece_num[p] != self.piece_num[p] {
                return Err(BoardError::PieceCountMismatch {
                    piece,
                    listed: self.piece_num[p],
                    counted: piece_num[p],
                });
            }
        }

        for side in [WHITE, BLACK, BOTH] {
            if pawns[side] != self.pawns[side] {
                return Err(BoardError::PawnBitboardMismatch { side });
            }
        }

        for side in [WHITE, BLACK] {
            if material[side] != self.material[side] {
                return Err(BoardError::MaterialMismatch {
                    side,
                    stored: self.material[side],
                    counted: material[side],
                });
            }
            if big[side] != self.big_pieces[side]
                || major[side] != self.major_pieces[side]
                || minor[side] != self.minor_pieces[side]
            {
                return Err(BoardError::PieceClassMismatch { side });
            }
            let king_sq = self.king_sq[side];
            if !sq_on_board(king_sq) || self.pieces[king_sq] != king_of(side) {
                return Err(BoardError::KingSquareMismatch { side, square: king_sq });
            }
        }

        if !side_valid(self.side) {
            return Err(BoardError::InvalidSide(self.side));
        }

        if self.en_passant != NO_SQ {
            let expected_rank = if self.side == WHITE { RANK_6 } else { RANK_3 };
            if !sq_on_board(self.en_passant)
                || RANKS_BRD[self.en_passant] != expected_rank
                || !self.en_passant_matches_placement()
            {
                return Err(BoardError::InvalidEnPassant(self.en_passant));
            }
        }

        if self.castling_rights > 15 || !self.castling_matches_placement() {
            return Err(BoardError::InvalidCastling(self.castling_rights));
        }

        let computed = self.generate_pos_key();
        if computed != self.pos_key {
            return Err(BoardError::KeyMismatch { stored: self.pos_key, computed });
        }

        Ok(())
    }

    /// Panic on a broken invariant in debug builds
    #[inline]
    pub fn debug_check(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_board() {
            panic!("board invariant violated: {}\n{}", err, self.display());
        }
    }

    // ========================================================================
    // DISPLAY
    // ========================================================================

    /// Castling rights in FEN form ("KQkq" or "-")
    pub fn castling_string(&self) -> String {
        let mut s = String::new();
        for (bit, c) in [(CASTLE_WK, 'K'), (CASTLE_WQ, 'Q'), (CASTLE_BK, 'k'), (CASTLE_BQ, 'q')] {
            if self.castling_rights & bit != 0 {
                s.push(c);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for rank in (RANK_1..=RANK_8).rev() {
            let mut row = format!("{} |", rank + 1);
            for file in FILE_A..=FILE_H {
                let piece = self.pieces[fr_to_sq(file, rank)];
                match piece_to_fen(piece) {
                    Some(c) => row.push_str(&format!(" {} |", c)),
                    None => row.push_str("   |"),
                }
            }
            lines.push(row);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());
        lines.push(String::new());
        lines.push(format!("side: {}", SIDE_CHARS[self.side] as char));
        lines.push(format!("enPas: {}", square_name(self.en_passant)));
        lines.push(format!("castle: {}", self.castling_string()));
        lines.push(format!("PosKey: {:016X}", self.pos_key));

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
