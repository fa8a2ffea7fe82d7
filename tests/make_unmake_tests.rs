use alpaca_chess::attack::is_square_attacked;
use alpaca_chess::bitboard::{parse_square, sq_on_board, step, SQ120};
use alpaca_chess::board::Board;
use alpaca_chess::move_generator::MoveGenerator;
use alpaca_chess::types::*;
use proptest::prelude::*;

const START_FENS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

/// Everything make/take must restore; piece lists compared as sets
#[derive(Debug, PartialEq)]
struct Snapshot {
    pieces: Vec<u8>,
    pawns: [u64; 3],
    king_sq: [usize; 2],
    side: usize,
    en_passant: usize,
    fifty_move: u32,
    castling_rights: u8,
    pos_key: u64,
    material: [i32; 2],
    counts: [[usize; 2]; 3],
    lists: Vec<Vec<usize>>,
}

fn snapshot(board: &Board) -> Snapshot {
    let lists = (0..PIECE_NB as u8)
        .map(|piece| {
            let mut squares = board.squares_of(piece).to_vec();
            squares.sort_unstable();
            squares
        })
        .collect();
    Snapshot {
        pieces: board.pieces.to_vec(),
        pawns: board.pawns,
        king_sq: board.king_sq,
        side: board.side,
        en_passant: board.en_passant,
        fifty_move: board.fifty_move,
        castling_rights: board.castling_rights,
        pos_key: board.pos_key,
        material: board.material,
        counts: [board.big_pieces, board.major_pieces, board.minor_pieces],
        lists,
    }
}

/// Straightforward attack test: walk every piece of `side` and collect what it hits
fn brute_force_attacked(board: &Board, target: usize, side: usize) -> bool {
    for &sq in SQ120.iter() {
        let piece = board.pieces[sq];
        if piece == EMPTY || PIECE_COL[piece as usize] != side {
            continue;
        }
        if PIECE_PAWN[piece as usize] {
            let dirs: [i32; 2] = if side == WHITE { [9, 11] } else { [-9, -11] };
            if dirs.iter().any(|&d| step(sq, d) == target) {
                return true;
            }
            continue;
        }
        let p = piece as usize;
        for &dir in &PIECE_DIR[p][..NUM_DIR[p]] {
            let mut to = step(sq, dir);
            while sq_on_board(to) {
                if to == target {
                    return true;
                }
                if !PIECE_SLIDES[p] || board.pieces[to] != EMPTY {
                    break;
                }
                to = step(to, dir);
            }
        }
    }
    false
}

fn random_walk(fen_index: usize, choices: &[usize]) -> Board {
    let generator = MoveGenerator::new();
    let mut board = Board::from_fen(START_FENS[fen_index]).unwrap();
    for &choice in choices {
        let legal = generator.generate_legal_moves(&mut board);
        if legal.is_empty() {
            break;
        }
        assert!(board.make_move(legal[choice % legal.len()]));
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn make_take_restores_everything(fen_index in 0..START_FENS.len(), choices in prop::collection::vec(0usize..256, 1..40)) {
        let generator = MoveGenerator::new();
        let original = Board::from_fen(START_FENS[fen_index]).unwrap();
        let mut board = original.clone();
        let mut before = Vec::new();

        for &choice in &choices {
            let legal = generator.generate_legal_moves(&mut board);
            if legal.is_empty() {
                break;
            }
            before.push(snapshot(&board));
            prop_assert!(board.make_move(legal[choice % legal.len()]));
            prop_assert!(board.check_board().is_ok(), "{:?}", board.check_board());
            prop_assert_eq!(board.pos_key, board.generate_pos_key());
        }

        while let Some(expected) = before.pop() {
            board.take_move();
            prop_assert_eq!(snapshot(&board), expected);
        }
        prop_assert_eq!(snapshot(&board), snapshot(&original));
        prop_assert_eq!(board.his_ply(), 0);
    }

    #[test]
    fn fen_round_trip_after_walk(fen_index in 0..START_FENS.len(), choices in prop::collection::vec(0usize..256, 0..30)) {
        let board = random_walk(fen_index, &choices);
        let reparsed = Board::from_fen(&board.to_fen()).unwrap();
        prop_assert_eq!(reparsed.pos_key, board.pos_key);
        prop_assert_eq!(reparsed.to_fen(), board.to_fen());
    }

    #[test]
    fn attack_detector_matches_brute_force(fen_index in 0..START_FENS.len(), choices in prop::collection::vec(0usize..256, 0..30)) {
        let board = random_walk(fen_index, &choices);
        for &sq in SQ120.iter() {
            for side in [WHITE, BLACK] {
                prop_assert_eq!(
                    is_square_attacked(&board, sq, side),
                    brute_force_attacked(&board, sq, side),
                    "square {} side {} in {}", sq, side, board.to_fen()
                );
            }
        }
    }

    #[test]
    fn null_move_is_undone_exactly(fen_index in 0..START_FENS.len(), choices in prop::collection::vec(0usize..256, 0..20)) {
        let mut board = random_walk(fen_index, &choices);
        prop_assume!(!board.in_check());
        let before = snapshot(&board);
        board.make_null_move();
        prop_assert_eq!(board.side, before.side ^ 1);
        prop_assert_eq!(board.en_passant, NO_SQ);
        prop_assert_eq!(board.pos_key, board.generate_pos_key());
        board.take_null_move();
        prop_assert_eq!(snapshot(&board), before);
    }
}

#[test]
fn castling_rights_decay_and_restore() {
    let mut board = Board::from_fen(START_FENS[1]).unwrap();
    let generator = MoveGenerator::new();
    let rook_move = generator.parse_move(&board, "h1g1").unwrap();
    assert!(board.make_move(rook_move));
    assert_eq!(board.castling_rights, CASTLE_WQ | CASTLE_BK | CASTLE_BQ);
    board.take_move();
    assert_eq!(board.castling_rights, CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ);

    let castle = generator.parse_move(&board, "e1c1").unwrap();
    assert!(castle.is_castle());
    assert!(board.make_move(castle));
    assert_eq!(board.pieces[D1], WR);
    assert_eq!(board.pieces[A1], EMPTY);
    assert_eq!(board.castling_rights, CASTLE_BK | CASTLE_BQ);
}

#[test]
fn en_passant_capture_round_trip() {
    let mut board = Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
    let before = snapshot(&board);
    let generator = MoveGenerator::new();
    let ep = generator.parse_move(&board, "e5d6").unwrap();
    assert!(ep.is_en_passant());
    assert!(board.make_move(ep));
    assert_eq!(board.count(BP), 7);
    assert_eq!(board.pos_key, board.generate_pos_key());
    board.take_move();
    assert_eq!(snapshot(&board), before);
}

#[test]
fn en_passant_capture_that_exposes_king_is_illegal() {
    let mut board = Board::from_fen("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1").unwrap();
    let generator = MoveGenerator::new();
    let push = generator.parse_move(&board, "d7d5").unwrap();
    assert!(board.make_move(push));
    assert_eq!(Some(board.en_passant), parse_square("d6"));

    // Pseudo-legal, but both pawns leave the fifth rank and the rook sees the king
    let ep = generator.parse_move(&board, "c5d6").unwrap();
    assert!(ep.is_en_passant());
    let legal = generator.generate_legal_moves(&mut board);
    assert!(!legal.iter().any(|mv| mv.is_en_passant()));
    let before = snapshot(&board);
    assert!(!board.make_move(ep));
    assert_eq!(snapshot(&board), before);
}

#[test]
fn en_passant_capture_discovers_check() {
    let mut board = Board::from_fen("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1").unwrap();
    let generator = MoveGenerator::new();
    let ep = generator.parse_move(&board, "c4d3").unwrap();
    assert!(ep.is_en_passant());
    assert!(board.make_move(ep));
    assert_eq!(board.pieces[parse_square("d4").unwrap()], EMPTY);
    assert_eq!(board.pieces[parse_square("d3").unwrap()], BP);
    assert!(board.in_check());
    assert!(board.check_board().is_ok());
}
