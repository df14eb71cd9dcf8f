//! Tengen: a Go rule engine with a Monte Carlo Tree Search agent.
//!
//! The crate enforces the full rules of Go (chains and liberties, capture,
//! suicide, positional superko) on an immutable game-state model, and picks
//! moves by UCT-guided random playouts.
//!
//! ## Modules
//!
//! - [`types`] - Points, players, and moves
//! - [`zobrist`] - Incremental position-identity hashing
//! - [`board`] - Chains, placement, capture resolution
//! - [`game`] - Turn order, legality, superko, termination
//! - [`scoring`] - Area scoring of finished games
//! - [`agent`] - The agent trait and the random rollout policy
//! - [`mcts`] - The tree search agent
//! - [`gtp`] - GTP v2 server front end
//! - [`constants`] - Engine defaults
//!
//! ## Example
//!
//! ```
//! use tengen::agent::Agent;
//! use tengen::game::GameState;
//! use tengen::mcts::MctsAgent;
//!
//! // Create a new game and find a move for Black.
//! let game = GameState::new_game(5);
//! let mut bot = MctsAgent::new(10, 1.4);
//! let mv = bot.select_move(&game);
//!
//! assert!(game.is_valid_move(mv));
//! let game = game.apply_move(mv).expect("search returned a legal move");
//! assert_eq!(game.last_move(), Some(mv));
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod game;
pub mod gtp;
pub mod mcts;
pub mod scoring;
pub mod types;
pub mod zobrist;
