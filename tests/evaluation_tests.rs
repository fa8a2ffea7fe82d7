use alpaca_chess::board::Board;
use alpaca_chess::evaluation::{evaluate, material_draw, mirror_eval_holds};
use alpaca_chess::move_generator::MoveGenerator;

const CORPUS: [&str; 8] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    "4k3/8/8/8/3K4/8/8/r7 w - - 0 1",
    "6k1/5ppp/8/8/8/8/3B4/R5K1 b - - 0 1",
];

#[test]
fn evaluation_is_mirror_symmetric() {
    for fen in CORPUS {
        let board = Board::from_fen(fen).unwrap();
        assert!(mirror_eval_holds(&board), "mirror mismatch for {}", fen);
    }
}

#[test]
fn symmetry_holds_along_games() {
    let generator = MoveGenerator::new();
    for fen in CORPUS {
        let mut board = Board::from_fen(fen).unwrap();
        for ply in 0..12 {
            let legal = generator.generate_legal_moves(&mut board);
            if legal.is_empty() {
                break;
            }
            assert!(board.make_move(legal[(ply * 7) % legal.len()]));
            assert!(mirror_eval_holds(&board), "mirror mismatch for {}", board.to_fen());
        }
    }
}

#[test]
fn mirror_keeps_mover_evaluation() {
    // Mirroring swaps colours and side together, so the mover's view is unchanged
    let board = Board::from_fen(CORPUS[1]).unwrap();
    let mirrored = board.mirror();
    assert_eq!(mirrored.side, board.side ^ 1);
    assert_eq!(evaluate(&board), evaluate(&mirrored));
    assert_eq!(mirrored.mirror().to_fen(), board.to_fen());
}

#[test]
fn recognised_material_draws() {
    for fen in [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/1NN1K3 w - - 0 1",
        "2b1k3/8/8/8/8/8/8/2B1K3 b - - 0 1",
        "3rk3/8/8/8/8/8/8/3RK3 w - - 0 1",
        "3rk3/8/8/8/8/8/8/2NRK3 w - - 0 1",
    ] {
        let board = Board::from_fen(fen).unwrap();
        assert!(material_draw(&board), "{}", fen);
        assert_eq!(evaluate(&board), 0, "{}", fen);
    }
}

#[test]
fn pawns_and_queens_are_not_draws() {
    for fen in [
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/3QK3 w - - 0 1",
        "4k3/8/8/8/8/8/8/2BBK3 w - - 0 1",
    ] {
        let board = Board::from_fen(fen).unwrap();
        assert_ne!(evaluate(&board), 0, "{}", fen);
    }
}
