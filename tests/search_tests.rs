//! Search and policy integration tests, plus property tests for the hash
//! and legality invariants.

use proptest::prelude::*;

use tengen::agent::{Agent, RandomAgent, is_point_an_eye};
use tengen::game::GameState;
use tengen::mcts::MctsAgent;
use tengen::types::{Move, Player, Point, parse_coordinate};

fn play(text: &str) -> Move {
    match text {
        "pass" => Move::Pass,
        "resign" => Move::Resign,
        _ => Move::Play(parse_coordinate(text).expect("bad test coordinate")),
    }
}

fn state_after(size: usize, moves: &[&str]) -> GameState {
    let mut game = GameState::new_game(size);
    for &text in moves {
        game = game
            .apply_move(play(text))
            .unwrap_or_else(|err| panic!("scripted move {text} rejected: {err}"));
    }
    game
}

// =============================================================================
// MCTS
// =============================================================================

#[test]
fn test_each_round_expands_one_root_child_while_moves_remain() {
    let game = GameState::new_game(3);
    let mut agent = MctsAgent::with_seed(5, 1.4, 9);
    let root = agent.search_tree(&game);

    // 3x3 has 11 untried moves at the root, so all 5 rounds expand there.
    assert_eq!(root.children().len(), 5);
    assert_eq!(root.num_rollouts(), 5);
    let child_rollouts: u64 = root.children().iter().map(|c| c.num_rollouts()).sum();
    assert_eq!(child_rollouts, 5);
}

#[test]
fn test_root_counters_split_by_winner() {
    let game = GameState::new_game(3);
    let mut agent = MctsAgent::with_seed(8, 1.4, 3);
    let root = agent.search_tree(&game);

    // Every rollout increments exactly one of the two win counters.
    let black = root.winning_frac(Player::Black);
    let white = root.winning_frac(Player::White);
    assert!((black + white - 1.0).abs() < 1e-9);
}

#[test]
fn test_select_move_answers_from_root_children() {
    let game = state_after(5, &["C3", "D3"]);
    let mut agent = MctsAgent::with_seed(15, 1.4, 21);
    let mv = agent.select_move(&game);
    assert!(game.is_valid_move(mv));
}

#[test]
fn test_search_is_deterministic_for_a_fixed_seed() {
    let game = GameState::new_game(3);
    let a = MctsAgent::with_seed(10, 1.4, 77).select_move(&game);
    let b = MctsAgent::with_seed(10, 1.4, 77).select_move(&game);
    assert_eq!(a, b);
}

// =============================================================================
// Random rollout policy
// =============================================================================

#[test]
fn test_random_agent_leaves_its_own_eye_alone() {
    // Black owns a corner eye at A1 (A2, B1, B2); Black to move.
    let game = state_after(5, &["A2", "E5", "B1", "E4", "B2", "E3"]);
    assert_eq!(game.next_player(), Player::Black);
    let eye = parse_coordinate("A1").unwrap();
    assert!(is_point_an_eye(game.board(), eye, Player::Black));

    let mut agent = RandomAgent::with_seed(5);
    for _ in 0..30 {
        let mv = agent.select_move(&game);
        assert_ne!(mv, Move::Play(eye), "policy filled its own eye");
        assert!(game.is_valid_move(mv));
    }
}

#[test]
fn test_random_self_play_reaches_a_scored_result() {
    let mut black = RandomAgent::with_seed(11);
    let mut white = RandomAgent::with_seed(12);
    let mut game = GameState::new_game(5);
    let mut half_moves = 0;
    while !game.is_over() {
        let mv = match game.next_player() {
            Player::Black => black.select_move(&game),
            Player::White => white.select_move(&game),
        };
        game = game.apply_move(mv).unwrap();
        half_moves += 1;
    }
    assert!(game.winner().is_some());
    assert!(half_moves >= 2, "at least the two final passes happen");
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// For any sequence of attempted placements, the maintained hash always
    /// equals a from-scratch recomputation, and rejected attempts leave the
    /// state untouched.
    #[test]
    fn prop_incremental_hash_matches_recomputation(
        seq in prop::collection::vec((1usize..=5, 1usize..=5), 0..40)
    ) {
        let mut game = GameState::new_game(5);
        for (row, col) in seq {
            let mv = Move::Play(Point::new(row, col));
            let hash_before = game.board().zobrist_hash();
            match game.apply_move(mv) {
                Ok(next) => game = next,
                Err(_) => {
                    prop_assert_eq!(game.board().zobrist_hash(), hash_before);
                }
            }
            prop_assert_eq!(game.board().zobrist_hash(), game.board().recomputed_hash());
        }
    }

    /// Legal-move enumeration never lists an occupied point and always ends
    /// with Pass then Resign.
    #[test]
    fn prop_legal_moves_shape(
        seq in prop::collection::vec((1usize..=5, 1usize..=5), 0..25)
    ) {
        let mut game = GameState::new_game(5);
        for (row, col) in seq {
            if let Ok(next) = game.apply_move(Move::Play(Point::new(row, col))) {
                game = next;
            }
        }
        let moves = game.legal_moves();
        prop_assert_eq!(moves[moves.len() - 2], Move::Pass);
        prop_assert_eq!(moves[moves.len() - 1], Move::Resign);
        for mv in &moves {
            if let Move::Play(point) = mv {
                prop_assert!(game.board().get(*point).is_none());
            }
        }
    }
}
