//! Alpaca - Perft
//!
//! Leaf-node counting over pseudo-legal generation filtered by make/take.
//! The board comes back exactly as it was passed in.

use crate::board::Board;
use crate::move_generator::MoveGenerator;
use crate::moves::Move;
use log::debug;

/// Count leaf nodes `depth` plies below the current position
pub fn perft(board: &mut Board, depth: usize) -> u64 {
    let generator = MoveGenerator::new();
    perft_with(&generator, board, depth)
}

fn perft_with(generator: &MoveGenerator, board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let list = generator.generate_all_moves(board);
    let mut nodes = 0u64;
    for mv in list.iter() {
        if !board.make_move(mv) {
            continue;
        }
        nodes += if depth == 1 { 1 } else { perft_with(generator, board, depth - 1) };
        board.take_move();
    }
    nodes
}

/// Per-root-move leaf counts, in generation order
pub fn perft_divide(board: &mut Board, depth: usize) -> Vec<(Move, u64)> {
    let generator = MoveGenerator::new();
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    let list = generator.generate_all_moves(board);
    for mv in list.iter() {
        if !board.make_move(mv) {
            continue;
        }
        let nodes = perft_with(&generator, board, depth - 1);
        board.take_move();
        debug!("perft divide {} {}", mv, nodes);
        results.push((mv, nodes));
    }
    results
}
