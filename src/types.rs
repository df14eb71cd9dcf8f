//! Core value types: players, board points, and moves.
//!
//! Points are 1-based (row 1 is the bottom of the rendered board, column 1 is
//! the letter A). Coordinate strings follow the Go convention of skipping the
//! letter I to avoid confusion with J.

use std::fmt;

/// Column letters for coordinate strings. The letter I is skipped.
pub const COLS: &str = "ABCDEFGHJKLMNOPQRST";

/// One of the two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Stable index for per-color counter arrays.
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// An intersection on the board, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    /// The 4 orthogonally adjacent points, without bounds filtering.
    /// Callers must filter against the grid extent (`Board::is_on_grid`).
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col),
            Point::new(self.row + 1, self.col),
            Point::new(self.row, self.col - 1),
            Point::new(self.row, self.col + 1),
        ]
    }

    /// The 4 diagonally adjacent points, without bounds filtering.
    pub fn diagonals(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col - 1),
            Point::new(self.row - 1, self.col + 1),
            Point::new(self.row + 1, self.col - 1),
            Point::new(self.row + 1, self.col + 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_char = COLS.as_bytes()[self.col - 1] as char;
        write!(f, "{col_char}{}", self.row)
    }
}

/// An action a player can take on their turn.
///
/// Exactly one variant is ever active; the "zero or multiple tags" states a
/// dynamically-typed port would have to guard against are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    pub fn is_play(self) -> bool {
        matches!(self, Move::Play(_))
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn is_resign(self) -> bool {
        matches!(self, Move::Resign)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(point) => write!(f, "{point}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}

/// Parse a coordinate string (e.g. "C3", "j10") into a Point.
///
/// Returns `None` for anything that is not a column letter followed by a row
/// number. "pass" and "resign" are not coordinates; callers handle them
/// before parsing.
pub fn parse_coordinate(text: &str) -> Option<Point> {
    let text = text.trim();
    let mut chars = text.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    let col = COLS.find(col_char)? + 1;
    let rest = chars.as_str();
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = rest.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(Point::new(row, col))
}
