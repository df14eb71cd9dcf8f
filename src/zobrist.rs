//! Zobrist hashing for whole-board position identity.
//!
//! Every (point, color) pair gets a fixed random 64-bit code; a board's hash
//! is the XOR of the codes of its occupied points. XOR is self-inverse and
//! order-independent, so placing a stone XORs its code in and capturing XORs
//! it back out, and the incrementally maintained hash always equals a
//! from-scratch recomputation.
//!
//! The table is plain data built from a seed rather than ambient global
//! state; boards share one via `Rc` and tests can pin the seed.

use crate::types::{Player, Point};

/// Hash of an empty board.
pub const EMPTY_BOARD: u64 = 0;

/// Seed used when no explicit seed is given.
pub const DEFAULT_SEED: u64 = 0x51CA_FE77_D1CE_0301;

/// Fixed (point, color) -> code mapping for one board geometry.
/// Read-only after construction; combined only via XOR.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    num_rows: usize,
    num_cols: usize,
    codes: Vec<u64>,
}

impl ZobristTable {
    /// Build a table for a `num_rows` x `num_cols` board from a seed.
    /// The same seed and geometry always produce the same codes.
    pub fn new(num_rows: usize, num_cols: usize, seed: u64) -> ZobristTable {
        let mut rng = fastrand::Rng::with_seed(seed);
        let codes = (0..num_rows * num_cols * 2).map(|_| rng.u64(..)).collect();
        ZobristTable {
            num_rows,
            num_cols,
            codes,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// The code for a stone of `player` at `point`.
    pub fn code(&self, point: Point, player: Player) -> u64 {
        debug_assert!(
            (1..=self.num_rows).contains(&point.row) && (1..=self.num_cols).contains(&point.col),
            "point {point:?} outside the {}x{} table",
            self.num_rows,
            self.num_cols,
        );
        let cell = (point.row - 1) * self.num_cols + (point.col - 1);
        self.codes[cell * 2 + player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_codes() {
        let a = ZobristTable::new(5, 5, 7);
        let b = ZobristTable::new(5, 5, 7);
        let p = Point::new(3, 4);
        assert_eq!(a.code(p, Player::Black), b.code(p, Player::Black));
        assert_eq!(a.code(p, Player::White), b.code(p, Player::White));
    }

    #[test]
    fn test_colors_get_distinct_codes() {
        let table = ZobristTable::new(9, 9, DEFAULT_SEED);
        let p = Point::new(1, 1);
        assert_ne!(table.code(p, Player::Black), table.code(p, Player::White));
    }

    #[test]
    fn test_all_codes_distinct() {
        let table = ZobristTable::new(5, 5, DEFAULT_SEED);
        let mut seen = std::collections::HashSet::new();
        for row in 1..=5 {
            for col in 1..=5 {
                for player in [Player::Black, Player::White] {
                    assert!(seen.insert(table.code(Point::new(row, col), player)));
                }
            }
        }
    }

    #[test]
    fn test_xor_is_self_inverse() {
        let table = ZobristTable::new(5, 5, DEFAULT_SEED);
        let code = table.code(Point::new(2, 2), Player::White);
        let hash = EMPTY_BOARD ^ code;
        assert_eq!(hash ^ code, EMPTY_BOARD);
    }
}
