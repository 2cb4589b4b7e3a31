//! tiny-go: play small-board Go against an MCTS engine.
//!
//! ## Usage
//!
//! - `tiny-go` / `tiny-go play` - Play a game in the terminal
//! - `tiny-go gtp` - Start GTP server for GUI integration
//!
//! Set `RUST_LOG=debug` to see search statistics on stderr.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;
use log::info;

use tiny_go::ai::Ai;
use tiny_go::board::{Color, format_move, parse_vertex};
use tiny_go::config::Config;
use tiny_go::constants::{DEFAULT_SIZE, KOMI, MAX_SIZE, N_SIMS};
use tiny_go::game::{GameState, Outcome};
use tiny_go::gtp::GtpEngine;

/// tiny-go: small-board Go against a Monte Carlo tree search
#[derive(Parser)]
#[command(name = "tiny-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the terminal
    Play {
        /// Color of the human player
        #[arg(long, value_enum, default_value_t = Side::Black)]
        color: Side,
    },
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
}

#[derive(Args)]
struct EngineArgs {
    /// Board size
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Search iterations per engine move
    #[arg(long, global = true, default_value_t = N_SIMS)]
    sims: usize,
    /// Compensation points for White
    #[arg(long, global = true, default_value_t = KOMI, allow_negative_numbers = true)]
    komi: f64,
    /// Seed for the engine's random source
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

impl EngineArgs {
    fn config(&self) -> Result<Config> {
        if !(2..=MAX_SIZE).contains(&self.size) {
            bail!("board size must be between 2 and {MAX_SIZE}, got {}", self.size);
        }
        Ok(Config {
            size: self.size,
            simulations: self.sims,
            komi: self.komi,
            seed: self.seed,
            ..Config::default()
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str("warn")
        .context("invalid log specification")?
        .start()
        .context("failed to start logger")?;

    let config = cli.engine.config()?;
    match cli.command {
        Some(Commands::Gtp) => GtpEngine::new(config).run(),
        Some(Commands::Play { color }) => run_play(config, color.into()),
        None => run_play(config, Color::Black),
    }
}

fn run_play(config: Config, human: Color) -> Result<()> {
    let mut game = GameState::new(config.size, config.komi);
    let mut ai = Ai::new(config);
    let size = game.board().size();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("You play {human}. Enter a vertex like D4, 'pass' or 'quit'.\n");

    while !game.is_over() {
        let (black, white) = game.score();
        println!("{}Black {black}  White {white}  ({} to move)", game.board(), game.to_move());

        let player = game.to_move();
        if player == human {
            print!("> ");
            stdout.flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line.context("failed to read move")?;
            let input = line.trim();
            if input.eq_ignore_ascii_case("quit") {
                return Ok(());
            }
            let Some(mv) = parse_vertex(input, size) else {
                println!("Cannot parse '{input}'.");
                continue;
            };
            match game.play(mv) {
                Ok(captured) => {
                    info!("{player} {} captured {}", format_move(mv, size), captured.len())
                }
                Err(e) => println!("{e}"),
            }
        } else {
            let mv = ai.get_move_with_ko(game.board(), player, game.previous());
            let captured = game
                .play(mv)
                .with_context(|| format!("engine move {} rejected", format_move(mv, size)))?;
            info!("{player} {} captured {}", format_move(mv, size), captured.len());
            println!("Engine plays {}", format_move(mv, size));
        }
    }

    let (black, white) = game.score();
    println!("{}Final score: Black {black}, White {white}", game.board());
    let verdict = match (game.outcome(), human) {
        (Outcome::Draw, _) => "It's a draw!".to_string(),
        (Outcome::BlackWins, Color::Black) | (Outcome::WhiteWins, Color::White) => {
            format!("{} (you) win!", human)
        }
        (outcome, _) => format!("{outcome} (engine)."),
    };
    println!("{verdict}");
    Ok(())
}
