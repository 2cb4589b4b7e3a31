//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 needed to play a game
//! from a graphical client such as Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Resize and clear the board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Generate and play a move for the given color
//! - `showboard` - Print the board
//! - `final_score` - Score the current board (e.g. `W+6.5`)

use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::info;

use crate::ai::Ai;
use crate::board::{Color, Move, format_move, parse_vertex};
use crate::config::Config;
use crate::constants::MAX_SIZE;
use crate::game::GameState;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    game: GameState,
    ai: Ai,
}

impl GtpEngine {
    pub fn new(config: Config) -> Self {
        let game = GameState::new(config.size, config.komi);
        Self {
            game,
            ai: Ai::new(config),
        }
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(stdout, "{prefix}{id_str} {message}\n\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_color(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    fn reset(&mut self, size: usize) {
        self.game = GameState::new(size, self.game.komi());
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (2..=MAX_SIZE).contains(&size) => {
                        self.reset(size);
                        (true, String::new())
                    }
                    Ok(size) => (false, format!("unacceptable size {size}")),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.reset(self.game.board().size());
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f64>() {
                    Ok(komi) => {
                        self.game.set_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Self::parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                let size = self.game.board().size();
                let Some(mv) = parse_vertex(args[1], size) else {
                    return (false, "invalid vertex".to_string());
                };

                let turn = self.game.to_move();
                self.game.set_to_move(color);
                match self.game.play(mv) {
                    Ok(_) => (true, String::new()),
                    Err(e) => {
                        self.game.set_to_move(turn);
                        (false, e.to_string())
                    }
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| Self::parse_color(c)) else {
                    return (false, "invalid color".to_string());
                };
                let turn = self.game.to_move();
                self.game.set_to_move(color);
                let size = self.game.board().size();
                let mv = self
                    .ai
                    .get_move_with_ko(self.game.board(), color, self.game.previous());

                match self.game.play(mv) {
                    Ok(captured) => {
                        let vertex = format_move(mv, size);
                        info!("genmove {color} {vertex} captured {}", captured.len());
                        (true, vertex)
                    }
                    Err(e) => {
                        self.game.set_to_move(turn);
                        (false, format!("{} {e}", format_move(mv, size)))
                    }
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "final_score" => {
                let (black, white) = self.game.score();
                let result = if black > white {
                    format!("B+{}", black - white)
                } else if white > black {
                    format!("W+{}", white - black)
                } else {
                    "0".to_string()
                };
                (true, result)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
