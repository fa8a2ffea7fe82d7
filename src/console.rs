//! Alpaca - Console Mode
//!
//! Play against the engine from a terminal. Moves are entered in
//! coordinate notation (`e2e4`, `b7b8q`); the engine replies whenever it
//! is the side it has been told to play.

use crate::board::{Board, STARTING_FEN};
use crate::config::EngineConfig;
use crate::evaluation::{evaluate, mirror_eval_holds};
use crate::move_generator::MoveGenerator;
use crate::search::{game_result, GameMode, SearchEngine, SearchInfo};
use crate::types::*;
use crate::uci::{spawn_input_reader, ENGINE_NAME};
use log::warn;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MOVETIME_MS: u64 = 3000;

const HELP: &str = "\
Commands:
quit - quit game
force - computer will not think
print - show board
post - show thinking
nopost - do not show thinking
new - start a new game
go - set computer thinking
depth x - set depth to x
time x - set thinking time to x seconds (depth still applies if set)
view - show current depth and movetime settings
setboard x - set position to fen x
eval - show evaluation of the position and its mirror
mirror - check evaluation symmetry
** note ** - to reset time and depth, set to 0
enter moves using b7b8q notation";

pub struct ConsoleSession<W: Write> {
    board: Board,
    move_generator: MoveGenerator,
    engine: SearchEngine,
    depth: i32,
    movetime_ms: u64,
    /// Side the engine plays; `BOTH` means it only moves on `go`
    engine_side: usize,
    post_thinking: bool,
    stop_signal: Arc<AtomicBool>,
    out: W,
}

/// Run the console on stdin/stdout until `quit` or end of input
pub fn run(config: EngineConfig) -> io::Result<()> {
    let stop_signal = Arc::new(AtomicBool::new(false));
    let input = spawn_input_reader(Arc::clone(&stop_signal));
    let mut session = ConsoleSession::new(&config, io::stdout(), stop_signal);
    session.run(input)
}

impl<W: Write> ConsoleSession<W> {
    pub fn new(config: &EngineConfig, out: W, stop_signal: Arc<AtomicBool>) -> Self {
        ConsoleSession {
            board: Board::new(),
            move_generator: MoveGenerator::new(),
            engine: SearchEngine::new(config.hash_mb),
            depth: config.default_depth,
            movetime_ms: DEFAULT_MOVETIME_MS,
            engine_side: BOTH,
            post_thinking: config.post_thinking,
            stop_signal,
            out,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn run(&mut self, input: Receiver<String>) -> io::Result<()> {
        writeln!(self.out, "{} - Console Mode", ENGINE_NAME)?;
        writeln!(self.out, "Type help for commands")?;

        loop {
            self.think_if_engine_turn()?;
            write!(self.out, "\n{} > ", ENGINE_NAME)?;
            self.out.flush()?;

            let Ok(line) = input.recv() else {
                return Ok(());
            };
            if !self.process_command(&line)? {
                return Ok(());
            }
        }
    }

    /// Search and play a move when the engine is on move and the game is not over
    pub fn think_if_engine_turn(&mut self) -> io::Result<()> {
        if self.board.side != self.engine_side {
            return Ok(());
        }
        if let Some(result) = game_result(&mut self.board) {
            writeln!(self.out, "{}", result)?;
            self.engine_side = BOTH;
            return Ok(());
        }

        let mut info = SearchInfo::new(self.depth);
        info.mode = GameMode::Console;
        info.post_thinking = self.post_thinking;
        self.stop_signal.store(false, Ordering::Relaxed);
        info.stop_signal = Arc::clone(&self.stop_signal);
        if self.movetime_ms > 0 {
            info.set_time_budget(Duration::from_millis(self.movetime_ms));
        }

        let out = &mut self.out;
        self.board.ply = 0;
        let result = self.engine.search(&mut self.board, &mut info, |report| {
            writeln!(out, "{}", report.render()).ok();
        });

        let Some(mv) = result.best_move else {
            return Ok(());
        };
        writeln!(self.out, "\n\n***{} makes move {}***\n", ENGINE_NAME, mv)?;
        self.board.make_move(mv);
        self.board.ply = 0;
        writeln!(self.out, "{}", self.board)
    }

    /// Handle one line; `Ok(false)` ends the session
    pub fn process_command(&mut self, line: &str) -> io::Result<bool> {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(true);
        };
        let argument = parts.next();

        match command {
            "help" => writeln!(self.out, "{}", HELP)?,
            "quit" => return Ok(false),
            "force" => self.engine_side = BOTH,
            "post" => self.post_thinking = true,
            "nopost" => self.post_thinking = false,
            "print" => writeln!(self.out, "{}", self.board)?,
            "new" => {
                self.engine.clear();
                self.engine_side = BLACK;
                self.board = Board::new();
            }
            "go" => self.engine_side = self.board.side,
            "depth" => match argument.and_then(|d| d.parse::<i32>().ok()) {
                Some(0) => self.depth = MAX_DEPTH as i32,
                Some(d) => self.depth = d.clamp(1, MAX_DEPTH as i32),
                None => warn!("depth needs a number"),
            },
            "time" => match argument.and_then(|t| t.parse::<u64>().ok()) {
                Some(seconds) => self.movetime_ms = seconds * 1000,
                None => warn!("time needs a number of seconds"),
            },
            "view" => {
                let depth = if self.depth == MAX_DEPTH as i32 {
                    "depth not set".to_string()
                } else {
                    format!("depth {}", self.depth)
                };
                let time = if self.movetime_ms > 0 {
                    format!("movetime {}s", self.movetime_ms / 1000)
                } else {
                    "movetime not set".to_string()
                };
                writeln!(self.out, "{} {}", depth, time)?;
            }
            "setboard" => {
                self.engine_side = BOTH;
                let fen = line["setboard".len()..].trim();
                let fen = if fen.is_empty() { STARTING_FEN } else { fen };
                if let Err(err) = self.board.parse_fen(fen) {
                    warn!("rejected fen '{}': {}", fen, err);
                    writeln!(self.out, "Invalid FEN: {}", err)?;
                }
            }
            "eval" => {
                let mirrored = self.board.mirror();
                writeln!(self.out, "{}\nEval:{}", self.board, evaluate(&self.board))?;
                writeln!(self.out, "{}\nEval:{}", mirrored, evaluate(&mirrored))?;
            }
            "mirror" => {
                self.engine_side = BOTH;
                let verdict = if mirror_eval_holds(&self.board) { "mirror eval ok" } else { "mirror eval mismatch" };
                writeln!(self.out, "{}", verdict)?;
            }
            _ => match self.move_generator.parse_move(&self.board, line) {
                Some(mv) if self.board.make_move(mv) => self.board.ply = 0,
                _ => writeln!(self.out, "Command unknown: {}", line)?,
            },
        }
        Ok(true)
    }
}
