//! Board state: chains of stones, liberty bookkeeping, and captures.
//!
//! Occupied points map to [`Chain`]s: maximal groups of same-colored stones
//! connected by orthogonal adjacency, carrying their shared liberty set.
//! Chains are immutable once built: updates produce a fresh chain
//! (`without_liberty`, `with_liberty`, `merged_with`) that replaces the old
//! one in the grid. The grid itself stores `Rc<Chain>`, so cloning a board for
//! a trial placement copies pointers, not stone sets, and a discarded trial
//! never touches the original.
//!
//! The board also maintains its Zobrist hash incrementally: placement XORs a
//! code in, capture XORs codes out.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::types::{COLS, Player, Point};
use crate::zobrist::{DEFAULT_SEED, EMPTY_BOARD, ZobristTable};

/// A connected group of same-colored stones and its liberties.
///
/// Invariants: the stone set is non-empty and connected, and no liberty is
/// also a stone of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    color: Player,
    stones: HashSet<Point>,
    liberties: HashSet<Point>,
}

impl Chain {
    pub fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Chain {
        let chain = Chain {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        };
        debug_assert!(!chain.stones.is_empty(), "chain with zero stones");
        debug_assert!(
            chain.liberties.is_disjoint(&chain.stones),
            "liberty listed among the chain's own stones"
        );
        chain
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &HashSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &HashSet<Point> {
        &self.liberties
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    /// A copy of this chain with `point` removed from its liberties.
    pub fn without_liberty(&self, point: Point) -> Chain {
        let mut liberties = self.liberties.clone();
        liberties.remove(&point);
        Chain::new(self.color, self.stones.clone(), liberties)
    }

    /// A copy of this chain with `point` added to its liberties.
    pub fn with_liberty(&self, point: Point) -> Chain {
        let mut liberties = self.liberties.clone();
        liberties.insert(point);
        Chain::new(self.color, self.stones.clone(), liberties)
    }

    /// Merge two chains joined by a placement: union the stones, union the
    /// liberties, then drop liberties that became internal points.
    pub fn merged_with(&self, other: &Chain) -> Chain {
        debug_assert_eq!(self.color, other.color, "merging chains of different colors");
        let stones: HashSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties: HashSet<Point> = self
            .liberties
            .union(&other.liberties)
            .filter(|point| !stones.contains(point))
            .copied()
            .collect();
        Chain::new(self.color, stones, liberties)
    }
}

/// A Go board: a grid of chains plus the running position hash.
#[derive(Debug, Clone)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    grid: HashMap<Point, Rc<Chain>>,
    hash: u64,
    table: Rc<ZobristTable>,
}

impl Board {
    /// An empty board with a Zobrist table built from the default seed.
    pub fn new(num_rows: usize, num_cols: usize) -> Board {
        let table = Rc::new(ZobristTable::new(num_rows, num_cols, DEFAULT_SEED));
        Board::with_table(table)
    }

    /// An empty board sharing an existing table. The table fixes the
    /// geometry.
    pub fn with_table(table: Rc<ZobristTable>) -> Board {
        Board {
            num_rows: table.num_rows(),
            num_cols: table.num_cols(),
            grid: HashMap::new(),
            hash: EMPTY_BOARD,
            table,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_on_grid(&self, point: Point) -> bool {
        (1..=self.num_rows).contains(&point.row) && (1..=self.num_cols).contains(&point.col)
    }

    /// The color occupying `point`, or `None` if it is empty.
    pub fn get(&self, point: Point) -> Option<Player> {
        self.grid.get(&point).map(|chain| chain.color())
    }

    /// The chain occupying `point`, or `None` if it is empty.
    pub fn chain_at(&self, point: Point) -> Option<&Chain> {
        self.grid.get(&point).map(|chain| chain.as_ref())
    }

    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    pub fn zobrist_table(&self) -> &ZobristTable {
        &self.table
    }

    /// The hash recomputed from scratch over current occupancy. Must always
    /// equal [`zobrist_hash`](Board::zobrist_hash); divergence is an
    /// implementation defect.
    pub fn recomputed_hash(&self) -> u64 {
        self.grid
            .iter()
            .fold(EMPTY_BOARD, |hash, (&point, chain)| {
                hash ^ self.table.code(point, chain.color())
            })
    }

    /// Place a stone of `player` on the empty point `point`, merging friendly
    /// neighbor chains and resolving captures of enemy chains left without
    /// liberties.
    ///
    /// Capture resolution completes before the caller can observe the placed
    /// chain, so a placement that frees its own liberties by capturing is
    /// never seen with a stale zero-liberty count.
    pub fn place_stone(&mut self, player: Player, point: Point) {
        debug_assert!(self.is_on_grid(point), "placement off the grid: {point:?}");
        debug_assert!(self.get(point).is_none(), "placement on occupied {point:?}");

        let mut adjacent_same: Vec<Rc<Chain>> = Vec::new();
        let mut adjacent_other: Vec<Rc<Chain>> = Vec::new();
        let mut liberties: Vec<Point> = Vec::new();
        for neighbor in point.neighbors() {
            if !self.is_on_grid(neighbor) {
                continue;
            }
            match self.grid.get(&neighbor) {
                None => liberties.push(neighbor),
                Some(chain) if chain.color() == player => {
                    if !adjacent_same.iter().any(|c| Rc::ptr_eq(c, chain)) {
                        adjacent_same.push(Rc::clone(chain));
                    }
                }
                Some(chain) => {
                    if !adjacent_other.iter().any(|c| Rc::ptr_eq(c, chain)) {
                        adjacent_other.push(Rc::clone(chain));
                    }
                }
            }
        }

        let mut new_chain = Chain::new(player, [point], liberties);
        for same in &adjacent_same {
            new_chain = new_chain.merged_with(same);
        }
        self.insert_chain(new_chain);

        self.hash ^= self.table.code(point, player);

        for other in &adjacent_other {
            let shrunk = other.without_liberty(point);
            if shrunk.num_liberties() > 0 {
                self.insert_chain(shrunk);
            } else {
                self.remove_chain(other);
            }
        }

        debug_assert_eq!(
            self.hash,
            self.recomputed_hash(),
            "incremental hash diverged from recomputation"
        );
    }

    /// Point every stone of `chain` at a shared copy of it.
    fn insert_chain(&mut self, chain: Chain) {
        let chain = Rc::new(chain);
        for &stone in chain.stones() {
            self.grid.insert(stone, Rc::clone(&chain));
        }
    }

    /// Capture: clear every stone of `chain`, XOR its codes out of the hash,
    /// and give each cleared point back as a liberty to every other adjacent
    /// chain.
    fn remove_chain(&mut self, chain: &Rc<Chain>) {
        let color = chain.color();
        for &stone in chain.stones() {
            for neighbor in stone.neighbors() {
                let neighbor_chain = match self.grid.get(&neighbor) {
                    Some(c) if !Rc::ptr_eq(c, chain) => Rc::clone(c),
                    _ => continue,
                };
                self.insert_chain(neighbor_chain.with_liberty(stone));
            }
            self.grid.remove(&stone);
            self.hash ^= self.table.code(stone, color);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.num_rows).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.num_cols {
                let ch = match self.get(Point::new(row, col)) {
                    Some(Player::Black) => 'X',
                    Some(Player::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 1..=self.num_cols {
            write!(f, "{} ", COLS.as_bytes()[col - 1] as char)?;
        }
        writeln!(f)
    }
}
