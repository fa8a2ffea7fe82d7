//! Alpaca - UCI Protocol Module
//!
//! A minimal Universal Chess Interface session:
//! - `uci`, `isready`, `ucinewgame`, `position`, `go`, `stop`, `quit`
//! - `setoption` for Hash, Depth and Clear Hash
//! - `d` (display) and `perft N` for debugging
//!
//! Stdin is read on a helper thread. It forwards lines over a channel and
//! raises the shared stop signal on `stop`/`quit`, so a running search can
//! be interrupted while the session itself stays single-threaded.

use crate::board::Board;
use crate::config::{EngineConfig, TimeControl};
use crate::move_generator::MoveGenerator;
use crate::perft::perft_divide;
use crate::search::{GameMode, SearchEngine, SearchInfo};
use crate::transposition::{HASH_MAX_MB, HASH_MIN_MB};
use crate::types::*;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

// Engine identification
pub const ENGINE_NAME: &str = "Alpaca";
const ENGINE_AUTHOR: &str = "the Alpaca authors";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Positions searched by `bench`
pub const BENCH_POSITIONS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
];

// ============================================================================
// INPUT
// ============================================================================

/// Read stdin lines on a background thread
pub fn spawn_input_reader(stop_signal: Arc<AtomicBool>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let command = line.trim();
            if command == "stop" || command == "quit" {
                stop_signal.store(true, Ordering::Relaxed);
            }
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Spin { default: i32, min: i32, max: i32 },
    Button,
}

/// UCI option representation
#[derive(Clone, Debug)]
pub struct UCIOption {
    pub name: &'static str,
    pub kind: OptionKind,
}

impl UCIOption {
    pub fn spin(name: &'static str, default: i32, min: i32, max: i32) -> Self {
        UCIOption { name, kind: OptionKind::Spin { default, min, max } }
    }

    pub fn button(name: &'static str) -> Self {
        UCIOption { name, kind: OptionKind::Button }
    }

    pub fn to_uci_string(&self) -> String {
        match self.kind {
            OptionKind::Spin { default, min, max } => {
                format!("option name {} type spin default {} min {} max {}", self.name, default, min, max)
            }
            OptionKind::Button => format!("option name {} type button", self.name),
        }
    }

    /// Parse a spin value, rejecting anything outside its range
    pub fn parse_value(&self, value: &str) -> Option<i32> {
        match self.kind {
            OptionKind::Spin { min, max, .. } => value.parse::<i32>().ok().filter(|v| (min..=max).contains(v)),
            OptionKind::Button => None,
        }
    }
}

fn engine_options(config: &EngineConfig) -> Vec<UCIOption> {
    vec![
        UCIOption::spin("Hash", config.hash_mb as i32, HASH_MIN_MB as i32, HASH_MAX_MB as i32),
        UCIOption::spin("Depth", config.default_depth, 1, MAX_DEPTH as i32),
        UCIOption::button("Clear Hash"),
    ]
}

// ============================================================================
// SESSION
// ============================================================================

/// UCI protocol handler writing responses to `out`
pub struct UciSession<W: Write> {
    board: Board,
    move_generator: MoveGenerator,
    engine: SearchEngine,
    config: EngineConfig,
    options: Vec<UCIOption>,
    stop_signal: Arc<AtomicBool>,
    out: W,
}

/// Run a UCI session on stdin/stdout until `quit` or end of input
pub fn run(config: EngineConfig) -> io::Result<()> {
    let stop_signal = Arc::new(AtomicBool::new(false));
    let input = spawn_input_reader(Arc::clone(&stop_signal));
    let mut session = UciSession::new(config, io::stdout(), stop_signal);
    session.run(input)
}

impl<W: Write> UciSession<W> {
    pub fn new(config: EngineConfig, out: W, stop_signal: Arc<AtomicBool>) -> Self {
        UciSession {
            board: Board::new(),
            move_generator: MoveGenerator::new(),
            engine: SearchEngine::new(config.hash_mb),
            options: engine_options(&config),
            config,
            stop_signal,
            out,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn run(&mut self, input: Receiver<String>) -> io::Result<()> {
        while let Ok(line) = input.recv() {
            if !self.process_command(&line)? {
                break;
            }
        }
        info!("uci session finished");
        Ok(())
    }

    /// Handle one line; `Ok(false)` ends the session
    pub fn process_command(&mut self, line: &str) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(true);
        };

        match command {
            "uci" => self.cmd_uci()?,
            "isready" => self.send("readyok")?,
            "setoption" => self.cmd_setoption(args),
            "ucinewgame" => self.cmd_ucinewgame(),
            "position" => self.cmd_position(args),
            "go" => self.cmd_go(args)?,
            // Consumed after the search it interrupted
            "stop" => self.stop_signal.store(false, Ordering::Relaxed),
            "quit" => return Ok(false),
            "d" => self.cmd_display()?,
            "perft" => self.cmd_perft(args)?,
            _ => warn!("unknown command: {}", line.trim()),
        }
        Ok(true)
    }

    fn send(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }

    fn cmd_uci(&mut self) -> io::Result<()> {
        self.send(&format!("id name {} {}", ENGINE_NAME, ENGINE_VERSION))?;
        self.send(&format!("id author {}", ENGINE_AUTHOR))?;
        let lines: Vec<String> = self.options.iter().map(UCIOption::to_uci_string).collect();
        for line in lines {
            self.send(&line)?;
        }
        self.send("uciok")
    }

    fn cmd_setoption(&mut self, args: &[&str]) {
        if args.len() < 2 || args[0] != "name" {
            return;
        }

        // Option names may contain spaces
        let value_index = args.iter().position(|&a| a == "value");
        let name = args[1..value_index.unwrap_or(args.len())].join(" ");
        let value = value_index.map(|i| args[i + 1..].join(" "));

        let Some(option) = self.options.iter().find(|o| o.name.eq_ignore_ascii_case(&name)) else {
            warn!("unknown option: {}", name);
            return;
        };

        if option.kind == OptionKind::Button {
            if option.name == "Clear Hash" {
                self.engine.tt.clear();
                info!("hash cleared");
            }
            return;
        }

        let Some(parsed) = value.as_deref().and_then(|v| option.parse_value(v)) else {
            warn!("invalid value for option {}: {:?}", name, value);
            return;
        };

        match option.name {
            "Hash" => {
                self.config.hash_mb = parsed as usize;
                self.engine.resize(self.config.hash_mb);
            }
            "Depth" => self.config.default_depth = parsed,
            _ => {}
        }
    }

    fn cmd_ucinewgame(&mut self) {
        self.board = Board::new();
        self.engine.clear();
    }

    fn cmd_position(&mut self, args: &[&str]) {
        let Some((&kind, rest)) = args.split_first() else {
            return;
        };
        let moves_at = rest.iter().position(|&a| a == "moves");
        let (setup, moves) = match moves_at {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, &[][..]),
        };

        match kind {
            "startpos" => self.board = Board::new(),
            "fen" => {
                let fen = setup.join(" ");
                if let Err(err) = self.board.parse_fen(&fen) {
                    warn!("rejected fen '{}': {}", fen, err);
                    return;
                }
            }
            _ => {
                warn!("unknown position type: {}", kind);
                return;
            }
        }

        for text in moves {
            match self.move_generator.parse_move(&self.board, text) {
                Some(mv) if self.board.make_move(mv) => {}
                _ => {
                    warn!("illegal move in position command: {}", text);
                    break;
                }
            }
        }
        // Search ply counts from the root of the next search
        self.board.ply = 0;
    }

    fn parse_go(&self, args: &[&str]) -> TimeControl {
        let mut limits = TimeControl::default();
        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1).copied().unwrap_or("");
            let mut consumed = 2;
            match args[i] {
                "depth" => limits.depth = value.parse().ok(),
                "movetime" => limits.movetime = value.parse().ok(),
                "nodes" => limits.nodes = value.parse().ok(),
                "movestogo" => limits.moves_to_go = value.parse().ok(),
                "wtime" if self.board.side == WHITE => limits.time = value.parse().ok(),
                "btime" if self.board.side == BLACK => limits.time = value.parse().ok(),
                "winc" if self.board.side == WHITE => limits.inc = value.parse().unwrap_or(0),
                "binc" if self.board.side == BLACK => limits.inc = value.parse().unwrap_or(0),
                "wtime" | "btime" | "winc" | "binc" => {}
                "infinite" => {
                    limits.infinite = true;
                    consumed = 1;
                }
                _ => consumed = 1,
            }
            i += consumed;
        }
        limits
    }

    fn cmd_go(&mut self, args: &[&str]) -> io::Result<()> {
        let limits = self.parse_go(args);
        let mut info = self.config.search_info(&limits);
        info.mode = GameMode::Uci;
        info.stop_signal = Arc::clone(&self.stop_signal);

        let out = &mut self.out;
        let result = self.engine.search(&mut self.board, &mut info, |report| {
            writeln!(out, "{}", report.render()).ok();
            out.flush().ok();
        });

        let mut reply = match result.best_move {
            Some(mv) => format!("bestmove {}", mv),
            None => "bestmove 0000".to_string(),
        };
        if let Some(ponder) = result.pv.get(1) {
            reply.push_str(&format!(" ponder {}", ponder));
        }
        self.send(&reply)
    }

    fn cmd_display(&mut self) -> io::Result<()> {
        let text = format!("{}\nFen: {}", self.board, self.board.to_fen());
        self.send(&text)
    }

    fn cmd_perft(&mut self, args: &[&str]) -> io::Result<()> {
        let depth = args.first().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
        let start = Instant::now();
        let divide = perft_divide(&mut self.board, depth);
        let mut total = 0u64;
        for (mv, nodes) in &divide {
            self.send(&format!("{}: {}", mv, nodes))?;
            total += nodes;
        }
        self.send(&format!("\nNodes searched: {} ({} ms)", total, start.elapsed().as_millis()))
    }
}

// ============================================================================
// BENCH
// ============================================================================

/// Depth-limited search over the bench positions; returns total nodes
pub fn bench<W: Write>(engine: &mut SearchEngine, depth: i32, out: &mut W) -> io::Result<u64> {
    let start = Instant::now();
    let mut total_nodes = 0u64;

    for fen in BENCH_POSITIONS {
        let mut board = match Board::from_fen(fen) {
            Ok(board) => board,
            Err(err) => {
                warn!("bench position rejected: {}", err);
                continue;
            }
        };
        engine.clear();
        let mut info = SearchInfo::new(depth);
        info.post_thinking = false;
        let result = engine.search(&mut board, &mut info, |_| {});
        writeln!(
            out,
            "{:<72} bestmove {} nodes {}",
            fen,
            result.best_move.map(|m| m.to_uci()).unwrap_or_else(|| "0000".to_string()),
            result.nodes
        )?;
        total_nodes += result.nodes;
    }

    let elapsed = start.elapsed().as_secs_f64();
    let nps = if elapsed > 0.0 { (total_nodes as f64 / elapsed) as u64 } else { 0 };
    writeln!(out, "Benchmark: {} nodes in {:.2}s ({} nps)", total_nodes, elapsed, nps)?;
    Ok(total_nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_FEN;

    fn session() -> UciSession<Vec<u8>> {
        let config = EngineConfig::default().with_hash(HASH_MIN_MB);
        UciSession::new(config, Vec::new(), Arc::new(AtomicBool::new(false)))
    }

    fn output(session: &UciSession<Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.out).into_owned()
    }

    #[test]
    fn test_uci_handshake() {
        let mut s = session();
        assert!(s.process_command("uci").unwrap());
        assert!(s.process_command("isready").unwrap());
        let text = output(&s);
        assert!(text.starts_with("id name Alpaca"));
        assert!(text.contains("option name Hash type spin default 4 min 4 max 2048"));
        assert!(text.contains("option name Clear Hash type button"));
        assert!(text.contains("uciok\nreadyok\n"));
        assert!(!s.process_command("quit").unwrap());
    }

    #[test]
    fn test_position_with_moves() {
        let mut s = session();
        s.process_command("position startpos moves e2e4 e7e5 g1f3").unwrap();
        assert_eq!(s.board().to_fen(), "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
        assert_eq!(s.board().ply, 0);

        s.process_command("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1 moves e2e4").unwrap();
        assert_eq!(s.board().to_fen(), "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");
    }

    #[test]
    fn test_bad_input_leaves_position() {
        let mut s = session();
        s.process_command("position startpos moves e2e4").unwrap();
        let before = s.board().to_fen();
        s.process_command("position fen not/a/fen w - - 0 1").unwrap();
        assert_eq!(s.board().to_fen(), before);

        // Applies moves up to the first illegal one
        s.process_command("position startpos moves d2d4 e2e5 g8f6").unwrap();
        assert_eq!(s.board().to_fen(), "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1");
    }

    #[test]
    fn test_inconsistent_fens_are_rejected_before_search() {
        let mut s = session();
        for fen in [
            "r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
            "QQQQQQQQ/QQQ5/8/8/8/8/8/k1K5 w - - 0 1",
        ] {
            s.process_command("position startpos").unwrap();
            s.process_command(&format!("position fen {}", fen)).unwrap();
            assert_eq!(s.board().to_fen(), STARTING_FEN, "{}", fen);
            s.process_command("go depth 2").unwrap();
        }
        assert_eq!(output(&s).matches("bestmove").count(), 4);
    }

    #[test]
    fn test_go_depth_reports_bestmove() {
        let mut s = session();
        s.process_command("position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        s.process_command("go depth 3").unwrap();
        let text = output(&s);
        assert!(text.contains("info score mate 1 depth 2"));
        assert!(text.lines().last().unwrap().starts_with("bestmove a1a8"));
    }

    #[test]
    fn test_go_in_mated_position() {
        let mut s = session();
        s.process_command("position fen R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        s.process_command("go depth 2").unwrap();
        assert!(output(&s).ends_with("bestmove 0000\n"));
    }

    #[test]
    fn test_parse_go_uses_side_clock() {
        let mut s = session();
        let args = ["wtime", "1000", "btime", "2000", "winc", "10", "binc", "20", "movestogo", "5"];
        let limits = s.parse_go(&args);
        assert_eq!(limits.time, Some(1000));
        assert_eq!(limits.inc, 10);
        assert_eq!(limits.moves_to_go, Some(5));

        s.process_command("position startpos moves e2e4").unwrap();
        let limits = s.parse_go(&args);
        assert_eq!(limits.time, Some(2000));
        assert_eq!(limits.inc, 20);

        let limits = s.parse_go(&["infinite", "nodes", "500"]);
        assert!(limits.infinite);
        assert_eq!(limits.nodes, Some(500));
    }

    #[test]
    fn test_setoption() {
        let mut s = session();
        s.process_command("setoption name Depth value 5").unwrap();
        assert_eq!(s.config.default_depth, 5);
        s.process_command("setoption name Depth value 500").unwrap();
        assert_eq!(s.config.default_depth, 5);
        s.process_command("setoption name Hash value 8").unwrap();
        assert_eq!(s.config.hash_mb, 8);
        assert_eq!(s.engine.tt.capacity(), SearchEngine::new(8).tt.capacity());
        s.process_command("setoption name Clear Hash").unwrap();
        assert_eq!(s.engine.tt.hashfull(), 0);
    }

    #[test]
    fn test_stop_line_clears_signal() {
        let mut s = session();
        s.stop_signal.store(true, Ordering::Relaxed);
        s.process_command("stop").unwrap();
        assert!(!s.stop_signal.load(Ordering::Relaxed));
    }

    #[test]
    fn test_perft_command() {
        let mut s = session();
        s.process_command("perft 2").unwrap();
        assert!(output(&s).contains("Nodes searched: 400"));
    }
}
