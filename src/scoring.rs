//! Area scoring of a finished game.
//!
//! Stones count for their color; an empty region bordered by stones of only
//! one color counts as that color's territory; regions touching both colors
//! are neutral. White receives komi on top.

use std::collections::HashSet;

use crate::board::Board;
use crate::game::GameState;
use crate::types::{Player, Point};

/// Outcome of scoring: the winner and the point margin after komi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    pub winner: Player,
    pub winning_margin: f32,
}

/// Score a final position. Ties go to White, who holds the komi.
pub fn compute_game_result(state: &GameState) -> GameResult {
    let board = state.board();
    let mut black = 0.0_f32;
    let mut white = 0.0_f32;
    let mut visited: HashSet<Point> = HashSet::new();

    for row in 1..=board.num_rows() {
        for col in 1..=board.num_cols() {
            let point = Point::new(row, col);
            match board.get(point) {
                Some(Player::Black) => black += 1.0,
                Some(Player::White) => white += 1.0,
                None => {
                    if visited.contains(&point) {
                        continue;
                    }
                    let (region, borders) = collect_region(board, point);
                    let size = region.len() as f32;
                    visited.extend(region);
                    match (borders.contains(&Player::Black), borders.contains(&Player::White)) {
                        (true, false) => black += size,
                        (false, true) => white += size,
                        // Touching both colors (or an empty board): neutral.
                        _ => {}
                    }
                }
            }
        }
    }

    let white_total = white + state.komi();
    if black > white_total {
        GameResult {
            winner: Player::Black,
            winning_margin: black - white_total,
        }
    } else {
        GameResult {
            winner: Player::White,
            winning_margin: white_total - black,
        }
    }
}

/// Flood-fill the empty region containing `start`, returning its points and
/// the set of stone colors found on its border.
fn collect_region(board: &Board, start: Point) -> (Vec<Point>, HashSet<Player>) {
    let mut region = Vec::new();
    let mut borders = HashSet::new();
    let mut seen = HashSet::new();
    let mut stack = vec![start];

    while let Some(point) = stack.pop() {
        if !seen.insert(point) {
            continue;
        }
        region.push(point);
        for neighbor in point.neighbors() {
            if !board.is_on_grid(neighbor) {
                continue;
            }
            match board.get(neighbor) {
                Some(color) => {
                    borders.insert(color);
                }
                None => {
                    if !seen.contains(&neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }
    }

    (region, borders)
}
