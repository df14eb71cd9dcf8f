//! Game state: turn order, move history, legality, and termination.
//!
//! A [`GameState`] is a snapshot: applying a move never mutates the current
//! state, it builds an independent successor. Prior states stay valid and can
//! be branched from repeatedly, which is what lets a search tree fan out from
//! any position.
//!
//! Every rule check that needs to look at the board "after" a candidate move
//! runs the placement on a disposable clone and discards it; there is no
//! speculative mutation with rollback, because capture is not cleanly
//! invertible without extra bookkeeping.

use std::collections::HashSet;
use std::rc::Rc;

use crate::board::Board;
use crate::constants::DEFAULT_KOMI;
use crate::scoring::compute_game_result;
use crate::types::{Move, Player, Point};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveError {
    #[error("illegal move: {0} is off the board")]
    OffGrid(Point),

    #[error("illegal move: {0} is occupied")]
    Occupied(Point),

    #[error("illegal move: playing {0} is self-capture")]
    SelfCapture(Point),

    #[error("illegal move: playing {0} retakes a previous position (ko)")]
    KoViolation(Point),

    #[error("illegal move: the game is over")]
    GameOver,
}

/// A position in a game: board, player to move, and history.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    next_player: Player,
    previous: Option<Rc<GameState>>,
    last_move: Option<Move>,
    komi: f32,
    /// Every (player-to-move, board hash) situation seen earlier in this
    /// game, for positional superko.
    previous_hashes: HashSet<(Player, u64)>,
}

impl GameState {
    /// Start a new game on a square board with the default komi.
    pub fn new_game(board_size: usize) -> GameState {
        GameState::new_game_with_komi(board_size, DEFAULT_KOMI)
    }

    pub fn new_game_with_komi(board_size: usize, komi: f32) -> GameState {
        GameState::with_board(Board::new(board_size, board_size), komi)
    }

    /// Start a game from an existing (empty) board, e.g. one built with a
    /// seeded Zobrist table.
    pub fn with_board(board: Board, komi: f32) -> GameState {
        GameState {
            board,
            next_player: Player::Black,
            previous: None,
            last_move: None,
            komi,
            previous_hashes: HashSet::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn previous(&self) -> Option<&GameState> {
        self.previous.as_deref()
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    /// Apply a move, producing the successor state.
    ///
    /// The same predicate that backs [`is_valid_move`](GameState::is_valid_move)
    /// runs first, so an illegal move is rejected before any board is built.
    pub fn apply_move(&self, mv: Move) -> Result<GameState, IllegalMoveError> {
        self.validate(mv)?;

        let next_board = match mv {
            Move::Play(point) => {
                let mut board = self.board.clone();
                board.place_stone(self.next_player, point);
                board
            }
            Move::Pass | Move::Resign => self.board.clone(),
        };

        let mut previous_hashes = self.previous_hashes.clone();
        previous_hashes.insert((self.next_player, self.board.zobrist_hash()));

        Ok(GameState {
            board: next_board,
            next_player: self.next_player.other(),
            previous: Some(Rc::new(self.clone())),
            last_move: Some(mv),
            komi: self.komi,
            previous_hashes,
        })
    }

    /// Single legality predicate backing both enumeration and application.
    fn validate(&self, mv: Move) -> Result<(), IllegalMoveError> {
        if self.is_over() {
            return Err(IllegalMoveError::GameOver);
        }
        let Move::Play(point) = mv else {
            // Pass and resign are always legal on a live game.
            return Ok(());
        };
        if !self.board.is_on_grid(point) {
            return Err(IllegalMoveError::OffGrid(point));
        }
        if self.board.get(point).is_some() {
            return Err(IllegalMoveError::Occupied(point));
        }
        if self.is_move_self_capture(self.next_player, mv) {
            return Err(IllegalMoveError::SelfCapture(point));
        }
        if self.does_move_violate_ko(self.next_player, mv) {
            return Err(IllegalMoveError::KoViolation(point));
        }
        Ok(())
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        self.validate(mv).is_ok()
    }

    /// Would `player` playing `mv` leave their own chain without liberties?
    ///
    /// Runs the placement on a disposable board copy; captures resolve during
    /// placement, so a move that frees itself by capturing is not
    /// self-capture.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let mut next_board = self.board.clone();
        next_board.place_stone(player, point);
        match next_board.chain_at(point) {
            Some(chain) => chain.num_liberties() == 0,
            None => false,
        }
    }

    /// Would `player` playing `mv` recreate a (player-to-move, position) pair
    /// seen earlier in this game? Full positional superko, not just the
    /// immediately preceding position.
    pub fn does_move_violate_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let mut next_board = self.board.clone();
        next_board.place_stone(player, point);
        let next_situation = (player.other(), next_board.zobrist_hash());
        self.previous_hashes.contains(&next_situation)
    }

    /// Every legal play on the grid, then Pass and Resign, in that order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 1..=self.board.num_rows() {
            for col in 1..=self.board.num_cols() {
                let mv = Move::Play(Point::new(row, col));
                if self.is_valid_move(mv) {
                    moves.push(mv);
                }
            }
        }
        moves.push(Move::Pass);
        moves.push(Move::Resign);
        moves
    }

    /// The game ends on a resignation or on two consecutive passes.
    pub fn is_over(&self) -> bool {
        let Some(last_move) = self.last_move else {
            return false;
        };
        if last_move.is_resign() {
            return true;
        }
        match self.previous.as_ref().and_then(|prev| prev.last_move) {
            Some(second_last) => last_move.is_pass() && second_last.is_pass(),
            None => false,
        }
    }

    /// The winner of a finished game; `None` while the game is live.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        if self.last_move.is_some_and(Move::is_resign) {
            // The resigner moved last, so the player now to move won.
            return Some(self.next_player);
        }
        Some(compute_game_result(self).winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = GameState::new_game(9);
        assert_eq!(game.next_player(), Player::Black);
        assert_eq!(game.last_move(), None);
        assert!(!game.is_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_apply_move_alternates_players() {
        let game = GameState::new_game(5);
        let game = game.apply_move(Move::Play(Point::new(3, 3))).unwrap();
        assert_eq!(game.next_player(), Player::White);
        assert_eq!(game.board().get(Point::new(3, 3)), Some(Player::Black));

        let game = game.apply_move(Move::Play(Point::new(2, 2))).unwrap();
        assert_eq!(game.next_player(), Player::Black);
        assert_eq!(game.board().get(Point::new(2, 2)), Some(Player::White));
    }

    #[test]
    fn test_prior_state_stays_valid_after_apply() {
        let game = GameState::new_game(5);
        let after = game.apply_move(Move::Play(Point::new(3, 3))).unwrap();
        // Branch a second time from the same parent.
        let sibling = game.apply_move(Move::Play(Point::new(1, 1))).unwrap();

        assert_eq!(game.board().get(Point::new(3, 3)), None);
        assert_eq!(after.board().get(Point::new(3, 3)), Some(Player::Black));
        assert_eq!(sibling.board().get(Point::new(3, 3)), None);
        assert_eq!(sibling.board().get(Point::new(1, 1)), Some(Player::Black));
    }

    #[test]
    fn test_occupied_point_rejected() {
        let game = GameState::new_game(5);
        let game = game.apply_move(Move::Play(Point::new(3, 3))).unwrap();
        let err = game.apply_move(Move::Play(Point::new(3, 3))).unwrap_err();
        assert_eq!(err, IllegalMoveError::Occupied(Point::new(3, 3)));
    }

    #[test]
    fn test_off_grid_rejected() {
        let game = GameState::new_game(5);
        let err = game.apply_move(Move::Play(Point::new(6, 1))).unwrap_err();
        assert_eq!(err, IllegalMoveError::OffGrid(Point::new(6, 1)));
    }

    #[test]
    fn test_double_pass_ends_game() {
        let game = GameState::new_game(5);
        let game = game.apply_move(Move::Pass).unwrap();
        assert!(!game.is_over(), "one pass does not end the game");
        let game = game.apply_move(Move::Pass).unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn test_pass_play_pass_does_not_end_game() {
        let game = GameState::new_game(5);
        let game = game.apply_move(Move::Pass).unwrap();
        let game = game.apply_move(Move::Play(Point::new(3, 3))).unwrap();
        let game = game.apply_move(Move::Pass).unwrap();
        assert!(!game.is_over(), "passes must be consecutive");
    }

    #[test]
    fn test_resign_ends_game_and_names_winner() {
        let game = GameState::new_game(5);
        let game = game.apply_move(Move::Play(Point::new(3, 3))).unwrap();
        // White resigns.
        let game = game.apply_move(Move::Resign).unwrap();
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let game = GameState::new_game(5);
        let game = game.apply_move(Move::Pass).unwrap();
        let game = game.apply_move(Move::Pass).unwrap();
        let err = game.apply_move(Move::Play(Point::new(3, 3))).unwrap_err();
        assert_eq!(err, IllegalMoveError::GameOver);
        assert!(!game.is_valid_move(Move::Pass));
    }

    #[test]
    fn test_legal_moves_tail_is_pass_then_resign() {
        let game = GameState::new_game(3);
        let moves = game.legal_moves();
        assert_eq!(moves[moves.len() - 2], Move::Pass);
        assert_eq!(moves[moves.len() - 1], Move::Resign);
        assert_eq!(moves.len(), 3 * 3 + 2);
    }
}
