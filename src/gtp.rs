//! Go Text Protocol (GTP) front end.
//!
//! GTP is the text protocol graphical Go interfaces (Sabaki, GoGui, ...)
//! speak to engines. This implements the GTP v2 commands needed to play a
//! game, driving the rule engine and the MCTS agent underneath.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - engine identification
//! - `list_commands`, `known_command <cmd>` - capability discovery
//! - `boardsize <size>` - set board size (2..=19)
//! - `clear_board` - start a fresh game
//! - `komi <value>` - set komi
//! - `play <color> <vertex>` - apply a move
//! - `genmove <color>` - search and play a move
//! - `showboard` - render the current position
//! - `quit`

use std::io::{self, BufRead, Write};

use crate::agent::Agent;
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_EXPLORATION, DEFAULT_KOMI, DEFAULT_NUM_ROUNDS, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE, RESIGN_THRESHOLD,
};
use crate::game::GameState;
use crate::mcts::MctsAgent;
use crate::types::{Move, parse_coordinate};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
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
    board_size: usize,
    komi: f32,
    bot: MctsAgent,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// An engine with the default search budget.
    pub fn new() -> Self {
        Self::with_search(DEFAULT_NUM_ROUNDS)
    }

    /// An engine running `num_rounds` search rounds per generated move.
    pub fn with_search(num_rounds: usize) -> Self {
        GtpEngine {
            game: GameState::new_game_with_komi(DEFAULT_BOARD_SIZE, DEFAULT_KOMI),
            board_size: DEFAULT_BOARD_SIZE,
            komi: DEFAULT_KOMI,
            bot: MctsAgent::new(num_rounds, DEFAULT_EXPLORATION).resign_below(RESIGN_THRESHOLD),
        }
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some(&command) = parts.first() else {
                continue;
            };
            let command = command.to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "\n{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let digits = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..digits].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[digits..].trim_start()),
            Err(_) => (None, trimmed),
        }
    }

    fn start_new_game(&mut self) {
        self.game = GameState::new_game_with_komi(self.board_size, self.komi);
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "tengen".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<usize>() {
                    Ok(size) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) => {
                        self.board_size = size;
                        self.start_new_game();
                        (true, String::new())
                    }
                    Ok(size) => (false, format!("unacceptable size: {size}")),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.start_new_game();
                (true, String::new())
            }

            "komi" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<f32>() {
                    Ok(komi) => {
                        self.komi = komi;
                        // Mid-game komi changes take effect from the next
                        // clear_board.
                        if self.game.last_move().is_none() {
                            self.start_new_game();
                        }
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                // Color argument is ignored - play strictly alternates.
                let vertex = args[1].to_lowercase();
                let mv = match vertex.as_str() {
                    "pass" => Move::Pass,
                    "resign" => Move::Resign,
                    _ => match parse_coordinate(&vertex) {
                        Some(point) => Move::Play(point),
                        None => return (false, format!("invalid vertex: {}", args[1])),
                    },
                };
                match self.game.apply_move(mv) {
                    Ok(next) => {
                        self.game = next;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                if self.game.is_over() {
                    return (true, "pass".to_string());
                }
                let mv = self.bot.select_move(&self.game);
                match self.game.apply_move(mv) {
                    Ok(next) => {
                        self.game = next;
                        (true, mv.to_string())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
