use alpaca_chess::board::Board;
use alpaca_chess::move_generator::MoveGenerator;
use alpaca_chess::search::{format_score, SearchEngine, SearchInfo, SearchResult};
use alpaca_chess::types::*;

fn search(fen: &str, depth: i32) -> SearchResult {
    let mut board = Board::from_fen(fen).unwrap();
    let mut engine = SearchEngine::new(16);
    let mut info = SearchInfo::new(depth);
    info.post_thinking = false;
    engine.search(&mut board, &mut info, |_| {})
}

#[test]
fn finds_mate_in_two() {
    let fen = "7k/8/8/8/8/8/R7/1R4K1 w - - 0 1";
    let result = search(fen, 4);
    assert_eq!(result.score, INFINITE - 3);
    assert_eq!(format_score(result.score), "mate 2");

    // Playing out the principal variation delivers mate
    let mut board = Board::from_fen(fen).unwrap();
    assert!(result.pv.len() >= 3);
    for &mv in &result.pv[..3] {
        assert!(board.make_move(mv));
    }
    let generator = MoveGenerator::new();
    assert!(board.in_check());
    assert!(generator.generate_legal_moves(&mut board).is_empty());
}

#[test]
fn mated_side_scores_by_distance() {
    let result = search("7k/R7/8/8/8/8/8/1R4K1 b - - 0 1", 3);
    assert_eq!(result.score, -(INFINITE - 2));
    assert_eq!(format_score(result.score), "mate -1");
    assert_eq!(result.best_move.map(|m| m.to_uci()), Some("h8g8".to_string()));
}

#[test]
fn search_is_deterministic() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    let first = search(fen, 4);
    let second = search(fen, 4);
    assert_eq!(first, second);
}

#[test]
fn no_move_without_legal_moves() {
    let result = search("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 3);
    assert_eq!(result.best_move, None);
    assert!(result.pv.is_empty());
}

#[test]
fn prefers_mate_over_stalemate() {
    // Qf7 stalemates; Qf8 mates
    let fen = "7k/8/6K1/8/8/8/8/5Q2 w - - 0 1";
    let result = search(fen, 4);
    assert_eq!(result.score, INFINITE - 1);

    let mut board = Board::from_fen(fen).unwrap();
    assert!(board.make_move(result.best_move.unwrap()));
    let generator = MoveGenerator::new();
    assert!(board.in_check());
    assert!(generator.generate_legal_moves(&mut board).is_empty());
}

#[test]
fn repeated_searches_share_the_table() {
    let mut board = Board::new();
    let mut engine = SearchEngine::new(16);
    let mut info = SearchInfo::new(4);
    info.post_thinking = false;
    let cold = engine.search(&mut board, &mut info, |_| {});
    let mut info = SearchInfo::new(4);
    info.post_thinking = false;
    let warm = engine.search(&mut board, &mut info, |_| {});
    assert!(warm.nodes <= cold.nodes);
    assert!(engine.tt.hashfull() > 0);

    engine.clear();
    assert_eq!(engine.tt.hashfull(), 0);
}
