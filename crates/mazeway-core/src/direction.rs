//! Cardinal directions and compact direction sets.
//!
//! `Direction` is the closed set of four unit moves on the grid.
//! `DirectionSet` packs a subset of them into one byte; wall layouts store
//! one set per cell (blocked directions), and agents use sets for
//! tried-action bookkeeping.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// One of the four cardinal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed iteration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row/column delta of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The opposite direction. Involutive: `d.reverse().reverse() == d`.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse a `(dr, dc)` delta back into a direction.
    ///
    /// Only the four unit cardinal deltas are valid; anything else is an
    /// error rather than a silent default.
    pub fn from_delta(dr: i32, dc: i32) -> Result<Direction, GenerationError> {
        match (dr, dc) {
            (-1, 0) => Ok(Direction::Up),
            (1, 0) => Ok(Direction::Down),
            (0, -1) => Ok(Direction::Left),
            (0, 1) => Ok(Direction::Right),
            _ => Err(GenerationError::InvalidDelta { dr, dc }),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }
}

/// A subset of the four directions, packed into one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    const FULL: u8 = 0b1111;

    /// The empty set.
    pub fn empty() -> Self {
        DirectionSet(0)
    }

    /// The set of all four directions.
    pub fn all() -> Self {
        DirectionSet(Self::FULL)
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The four-direction complement of this set.
    pub fn complement(self) -> Self {
        DirectionSet(!self.0 & Self::FULL)
    }

    /// Iterate members in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::empty();
        for d in iter {
            set.insert(d);
        }
        set
    }
}
