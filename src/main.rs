//! Tengen: a Go engine with a Monte Carlo Tree Search brain.
//!
//! ## Usage
//!
//! - `tengen gtp` - Start the GTP server for GUI integration
//! - `tengen demo` - Watch the engine play itself
//! - `tengen play` - Play against the engine (you take Black)

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};

use tengen::agent::Agent;
use tengen::constants::{DEFAULT_BOARD_SIZE, DEFAULT_EXPLORATION, DEFAULT_NUM_ROUNDS};
use tengen::game::GameState;
use tengen::gtp::GtpEngine;
use tengen::mcts::MctsAgent;
use tengen::scoring::compute_game_result;
use tengen::types::{Move, Player, parse_coordinate};

/// Tengen: a Go MCTS engine
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Let the engine play both sides of a game
    Demo {
        /// Board size (NxN)
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Search rounds per move
        #[arg(long, default_value_t = 200)]
        rounds: usize,
    },
    /// Play against the engine (human takes Black)
    Play {
        /// Board size (NxN)
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Search rounds per move
        #[arg(long, default_value_t = DEFAULT_NUM_ROUNDS)]
        rounds: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp) => GtpEngine::new().run(),
        Some(Commands::Demo { size, rounds }) => run_demo(size, rounds),
        Some(Commands::Play { size, rounds }) => run_human_game(size, rounds),
        None => run_demo(DEFAULT_BOARD_SIZE, 200),
    }
}

/// Bot-vs-bot session: the engine plays both sides.
fn run_demo(size: usize, rounds: usize) -> anyhow::Result<()> {
    let mut game = GameState::new_game(size);
    let mut black = MctsAgent::new(rounds, DEFAULT_EXPLORATION);
    let mut white = MctsAgent::new(rounds, DEFAULT_EXPLORATION);

    while !game.is_over() {
        let mover = game.next_player();
        let mv = match mover {
            Player::Black => black.select_move(&game),
            Player::White => white.select_move(&game),
        };
        game = game.apply_move(mv).context("engine picked an illegal move")?;
        println!("{mover} {mv}");
        println!("{}", game.board());
    }

    print_outcome(&game);
    Ok(())
}

/// Human (Black) against the engine (White).
fn run_human_game(size: usize, rounds: usize) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut game = GameState::new_game(size);
    let mut bot = MctsAgent::new(rounds, DEFAULT_EXPLORATION);

    println!("{}", game.board());

    while !game.is_over() {
        let mover = game.next_player();
        let mv = match mover {
            Player::Black => {
                print!("-- ");
                io::stdout().flush()?;
                match lines.next() {
                    None => {
                        println!("input closed, resigning for Black");
                        Move::Resign
                    }
                    Some(line) => match read_human_move(&line?) {
                        Some(mv) => mv,
                        None => {
                            println!("enter a coordinate like D4, or pass / resign");
                            continue;
                        }
                    },
                }
            }
            Player::White => bot.select_move(&game),
        };

        match game.apply_move(mv) {
            Ok(next) => {
                game = next;
                println!("{mover} {mv}");
                println!("{}", game.board());
            }
            Err(err) => println!("{err}"),
        }
    }

    print_outcome(&game);
    Ok(())
}

fn read_human_move(line: &str) -> Option<Move> {
    let text = line.trim();
    if text.eq_ignore_ascii_case("pass") {
        return Some(Move::Pass);
    }
    if text.eq_ignore_ascii_case("resign") {
        return Some(Move::Resign);
    }
    parse_coordinate(text).map(Move::Play)
}

fn print_outcome(game: &GameState) {
    match game.last_move() {
        Some(Move::Resign) => match game.winner() {
            Some(winner) => println!("{winner} wins by resignation"),
            None => {}
        },
        _ => {
            let result = compute_game_result(game);
            println!("{} wins by {:.1}", result.winner, result.winning_margin);
        }
    }
}
