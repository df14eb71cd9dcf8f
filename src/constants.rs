//! Engine defaults and tuning parameters.
//!
//! Board geometry is dynamic (`GameState::new_game` takes a size), so unlike
//! a padded-array engine there are no compile-time dimensions here, only the
//! defaults the drivers and the search agent start from.

/// Default board size (NxN) for the CLI drivers and the GTP server.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Smallest board size the GTP `boardsize` command accepts.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board size supported (bounded by the coordinate letters A-T).
pub const MAX_BOARD_SIZE: usize = 19;

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f32 = 7.5;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of search rounds per move.
pub const DEFAULT_NUM_ROUNDS: usize = 500;

/// Default UCT exploration constant.
pub const DEFAULT_EXPLORATION: f64 = 1.4;

/// Win rate threshold below which the GTP engine resigns.
pub const RESIGN_THRESHOLD: f64 = 0.1;
