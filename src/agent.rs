//! Move-selecting agents and the eye heuristic they share.
//!
//! An [`Agent`] is anything that can pick a move for the player to move in a
//! given state. The uniform-random agent here is both a playable (very weak)
//! opponent and the rollout policy the tree search simulates games with.

use crate::board::Board;
use crate::game::GameState;
use crate::types::{Move, Player, Point};

/// Capability interface: given a state, produce a move for the player to
/// move. Implementations keep their own randomness; no shared base state.
pub trait Agent {
    fn select_move(&mut self, game: &GameState) -> Move;
}

/// Is `point` a true eye for `color`?
///
/// A geometric heuristic, not a rules concept: the point must be empty, all
/// on-grid neighbors must be `color`, and `color` must control three of the
/// four diagonals in the center or every on-grid diagonal at the edge. False
/// eyes can still slip through in rare shapes; the rollout policy only needs
/// this to stop agents from filling their own eyes.
pub fn is_point_an_eye(board: &Board, point: Point, color: Player) -> bool {
    if board.get(point).is_some() {
        return false;
    }
    for neighbor in point.neighbors() {
        if board.is_on_grid(neighbor) && board.get(neighbor) != Some(color) {
            return false;
        }
    }

    let mut friendly_corners = 0;
    let mut off_board_corners = 0;
    for corner in point.diagonals() {
        if board.is_on_grid(corner) {
            if board.get(corner) == Some(color) {
                friendly_corners += 1;
            }
        } else {
            off_board_corners += 1;
        }
    }

    if off_board_corners > 0 {
        // Edge or corner point: every on-grid diagonal must be friendly.
        off_board_corners + friendly_corners == 4
    } else {
        friendly_corners >= 3
    }
}

/// Uniform-random play over legal non-eye points; passes when none remain.
/// Never resigns, so self-play between two of these always ends by double
/// pass.
pub struct RandomAgent {
    rng: fastrand::Rng,
}

impl RandomAgent {
    pub fn new() -> RandomAgent {
        RandomAgent {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> RandomAgent {
        RandomAgent {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, game: &GameState) -> Move {
        let mut candidates = Vec::new();
        for row in 1..=game.board().num_rows() {
            for col in 1..=game.board().num_cols() {
                let point = Point::new(row, col);
                if game.is_valid_move(Move::Play(point))
                    && !is_point_an_eye(game.board(), point, game.next_player())
                {
                    candidates.push(point);
                }
            }
        }
        if candidates.is_empty() {
            return Move::Pass;
        }
        Move::Play(candidates[self.rng.usize(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_after(size: usize, moves: &[Move]) -> GameState {
        let mut game = GameState::new_game(size);
        for &mv in moves {
            game = game.apply_move(mv).unwrap();
        }
        game
    }

    #[test]
    fn test_corner_eye() {
        // Black stones at A2, B1, B2 make A1 a true eye for Black.
        let game = state_after(
            5,
            &[
                Move::Play(Point::new(2, 1)),
                Move::Pass,
                Move::Play(Point::new(1, 2)),
                Move::Pass,
                Move::Play(Point::new(2, 2)),
            ],
        );
        assert!(is_point_an_eye(
            game.board(),
            Point::new(1, 1),
            Player::Black
        ));
        assert!(!is_point_an_eye(
            game.board(),
            Point::new(1, 1),
            Player::White
        ));
    }

    #[test]
    fn test_corner_eye_needs_the_diagonal() {
        // Without B2, the diagonal is open and A1 is not an eye.
        let game = state_after(
            5,
            &[
                Move::Play(Point::new(2, 1)),
                Move::Pass,
                Move::Play(Point::new(1, 2)),
            ],
        );
        assert!(!is_point_an_eye(
            game.board(),
            Point::new(1, 1),
            Player::Black
        ));
    }

    #[test]
    fn test_occupied_point_is_not_an_eye() {
        let game = state_after(5, &[Move::Play(Point::new(3, 3))]);
        assert!(!is_point_an_eye(
            game.board(),
            Point::new(3, 3),
            Player::Black
        ));
    }

    #[test]
    fn test_random_agent_returns_valid_moves() {
        let mut agent = RandomAgent::with_seed(1);
        let game = GameState::new_game(5);
        for _ in 0..20 {
            let mv = agent.select_move(&game);
            assert!(game.is_valid_move(mv));
            assert!(mv.is_play(), "plenty of open points on a fresh board");
        }
    }

    #[test]
    fn test_random_self_play_terminates() {
        let mut black = RandomAgent::with_seed(2);
        let mut white = RandomAgent::with_seed(3);
        let mut game = GameState::new_game(5);
        while !game.is_over() {
            let mv = match game.next_player() {
                Player::Black => black.select_move(&game),
                Player::White => white.select_move(&game),
            };
            assert!(!mv.is_resign(), "random agent never resigns");
            game = game.apply_move(mv).unwrap();
        }
        assert!(game.winner().is_some());
    }
}
