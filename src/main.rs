//! Alpaca - UCI Chess Engine
//!
//! Usage:
//!     alpaca [--hash MB] [--depth N] [uci|console|perft|bench]
//!
//! With no subcommand the engine speaks UCI on stdin/stdout and works
//! with any UCI chess GUI (Arena, CuteChess, etc.). Diagnostics go to
//! stderr through `RUST_LOG` (default `warn`).

use alpaca_chess::board::{Board, STARTING_FEN};
use alpaca_chess::config::EngineConfig;
use alpaca_chess::perft::{perft, perft_divide};
use alpaca_chess::search::SearchEngine;
use alpaca_chess::{console, uci};
use clap::{Parser, Subcommand};
use log::error;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "alpaca", version, about = "Alpaca chess engine")]
struct Cli {
    /// Transposition table size in megabytes
    #[arg(long, global = true)]
    hash: Option<usize>,

    /// Default search depth when no clock is given
    #[arg(long, global = true)]
    depth: Option<i32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the UCI protocol loop (default)
    Uci,
    /// Play from the terminal
    Console,
    /// Count leaf nodes of the move tree
    Perft {
        /// Plies to expand
        #[arg(long = "plies", short = 'n')]
        plies: usize,
        /// Position to count from
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        /// Print counts per root move
        #[arg(long)]
        divide: bool,
    },
    /// Search fixed positions and report nodes per second
    Bench {
        #[arg(long = "plies", short = 'n', default_value_t = 5)]
        plies: i32,
    },
}

fn run_perft(fen: &str, depth: usize, divide: bool) -> io::Result<()> {
    let mut board = Board::from_fen(fen).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let start = Instant::now();
    let nodes = if divide {
        let results = perft_divide(&mut board, depth);
        for (mv, count) in &results {
            println!("{}: {}", mv, count);
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft(&mut board, depth)
    };
    println!("Nodes searched: {} ({} ms)", nodes, start.elapsed().as_millis());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = EngineConfig::default();
    if let Some(hash) = cli.hash {
        config = config.with_hash(hash);
    }
    if let Some(depth) = cli.depth {
        config = config.with_depth(depth);
    }

    let outcome = match cli.command.unwrap_or(Command::Uci) {
        Command::Uci => uci::run(config),
        Command::Console => console::run(config),
        Command::Perft { plies, fen, divide } => run_perft(&fen, plies, divide),
        Command::Bench { plies } => {
            let mut engine = SearchEngine::new(config.hash_mb);
            uci::bench(&mut engine, plies, &mut io::stdout()).map(|_| ())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
