//! Monte Carlo Tree Search with UCT selection.
//!
//! The search runs a fixed number of rounds, each in four steps:
//!
//! 1. Selection: descend from the root while the node's untried moves are
//!    exhausted and the game is not over, taking the child with the best UCT
//!    score.
//! 2. Expansion: draw one untried move uniformly at random (without
//!    replacement) and add the resulting child.
//! 3. Simulation: play the position out with the uniform-random policy on
//!    both sides until double pass, and note the winner.
//! 4. Backpropagation: bump the rollout and winner counters on every node
//!    from the expanded child up to the root.
//!
//! Children are owned in a `Vec` and the descent is recorded as a path of
//! indices, so statistics are updated by re-walking the path instead of
//! through parent pointers. The round budget is the only termination control;
//! callers wanting wall-clock bounds must check between calls.

use crate::agent::{Agent, RandomAgent};
use crate::constants::{DEFAULT_EXPLORATION, DEFAULT_NUM_ROUNDS};
use crate::game::GameState;
use crate::types::{Move, Player};

/// A node in the search tree: one game state plus rollout statistics.
pub struct MctsNode {
    state: GameState,
    mv: Option<Move>,
    win_counts: [u64; 2],
    num_rollouts: u64,
    children: Vec<MctsNode>,
    unvisited_moves: Vec<Move>,
}

impl MctsNode {
    fn new(state: GameState, mv: Option<Move>) -> MctsNode {
        // A finished game has nothing to try; such a node only relays the
        // final result during simulation.
        let unvisited_moves = if state.is_over() {
            Vec::new()
        } else {
            state.legal_moves()
        };
        MctsNode {
            state,
            mv,
            win_counts: [0; 2],
            num_rollouts: 0,
            children: Vec::new(),
            unvisited_moves,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The move that produced this node; `None` at the root.
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    pub fn children(&self) -> &[MctsNode] {
        &self.children
    }

    pub fn num_rollouts(&self) -> u64 {
        self.num_rollouts
    }

    pub fn can_add_child(&self) -> bool {
        !self.unvisited_moves.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    /// Fraction of rollouts through this node won by `player`.
    ///
    /// Reading a win rate before any rollout has passed through the node is a
    /// caller bug; there is no meaningful default to return.
    pub fn winning_frac(&self, player: Player) -> f64 {
        assert!(
            self.num_rollouts > 0,
            "win rate read before any rollout passed through this node"
        );
        self.win_counts[player.index()] as f64 / self.num_rollouts as f64
    }

    fn record_win(&mut self, winner: Player) {
        self.win_counts[winner.index()] += 1;
        self.num_rollouts += 1;
    }

    /// Draw an untried move at random, apply it, and append the child.
    /// Returns the new child's index.
    fn add_random_child(&mut self, rng: &mut fastrand::Rng) -> usize {
        let index = rng.usize(0..self.unvisited_moves.len());
        let mv = self.unvisited_moves.swap_remove(index);
        let state = self
            .state
            .apply_move(mv)
            .expect("untried moves come from legal_moves of a live state");
        self.children.push(MctsNode::new(state, Some(mv)));
        self.children.len() - 1
    }
}

/// UCT score over a node's children; ties keep the first child in insertion
/// order.
fn select_child(node: &MctsNode, exploration: f64) -> usize {
    let player = node.state.next_player();
    let total_rollouts: u64 = node.children.iter().map(MctsNode::num_rollouts).sum();
    let log_rollouts = (total_rollouts as f64).ln();

    let mut best_index = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (index, child) in node.children.iter().enumerate() {
        let win_percentage = child.winning_frac(player);
        let exploration_factor = (log_rollouts / child.num_rollouts as f64).sqrt();
        let uct_score = win_percentage + exploration * exploration_factor;
        if uct_score > best_score {
            best_score = uct_score;
            best_index = index;
        }
    }
    best_index
}

/// Play a position out with the uniform-random policy on both sides.
/// The policy never resigns, so every rollout ends by double pass.
fn simulate_random_game(mut game: GameState, rng: &mut fastrand::Rng) -> Player {
    let mut black = RandomAgent::with_seed(rng.u64(..));
    let mut white = RandomAgent::with_seed(rng.u64(..));
    while !game.is_over() {
        let mv = match game.next_player() {
            Player::Black => black.select_move(&game),
            Player::White => white.select_move(&game),
        };
        game = game
            .apply_move(mv)
            .expect("rollout policy only picks legal moves");
    }
    game.winner().expect("a finished game has a winner")
}

/// Move selection by repeated random playouts over a UCT-guided tree.
pub struct MctsAgent {
    num_rounds: usize,
    exploration: f64,
    resign_below: Option<f64>,
    rng: fastrand::Rng,
}

impl MctsAgent {
    /// `num_rounds` playout rounds per move; `exploration` is the UCT
    /// constant C. At least one round is required.
    pub fn new(num_rounds: usize, exploration: f64) -> MctsAgent {
        assert!(num_rounds > 0, "the search needs at least one round");
        MctsAgent {
            num_rounds,
            exploration,
            resign_below: None,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(num_rounds: usize, exploration: f64, seed: u64) -> MctsAgent {
        let mut agent = MctsAgent::new(num_rounds, exploration);
        agent.rng = fastrand::Rng::with_seed(seed);
        agent
    }

    /// Resign instead of playing on when the best child's win rate drops
    /// below `threshold`.
    pub fn resign_below(mut self, threshold: f64) -> MctsAgent {
        self.resign_below = Some(threshold);
        self
    }

    /// Run the full round budget from `game` and return the root of the
    /// resulting tree.
    ///
    /// Calling this on a finished game is a precondition violation.
    pub fn search_tree(&mut self, game: &GameState) -> MctsNode {
        assert!(!game.is_over(), "search invoked on a finished game");
        let mut root = MctsNode::new(game.clone(), None);

        for _ in 0..self.num_rounds {
            let mut path: Vec<usize> = Vec::new();

            // Selection.
            {
                let mut node = &root;
                while !node.can_add_child() && !node.is_terminal() {
                    let index = select_child(node, self.exploration);
                    path.push(index);
                    node = &node.children[index];
                }
            }

            // Expansion, re-walking the path mutably.
            let leaf_state = {
                let mut node = &mut root;
                for &index in &path {
                    node = &mut node.children[index];
                }
                if node.can_add_child() {
                    let index = node.add_random_child(&mut self.rng);
                    path.push(index);
                    node = &mut node.children[index];
                }
                node.state.clone()
            };

            // Simulation.
            let winner = simulate_random_game(leaf_state, &mut self.rng);

            // Backpropagation: every node on the path, root included.
            let mut node = &mut root;
            node.record_win(winner);
            for &index in &path {
                node = &mut node.children[index];
                node.record_win(winner);
            }
        }

        root
    }
}

impl Default for MctsAgent {
    fn default() -> Self {
        MctsAgent::new(DEFAULT_NUM_ROUNDS, DEFAULT_EXPLORATION)
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, game: &GameState) -> Move {
        let root = self.search_tree(game);
        let player = game.next_player();

        let mut best_move = None;
        let mut best_frac = -1.0;
        for child in root.children() {
            let frac = child.winning_frac(player);
            if frac > best_frac {
                best_frac = frac;
                best_move = child.mv();
            }
        }

        if self.resign_below.is_some_and(|threshold| best_frac < threshold) {
            return Move::Resign;
        }
        best_move.expect("at least one round expands the root")
    }
}
