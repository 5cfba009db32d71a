//! Grid coordinates and flat row-major storage.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A 0-indexed `(row, col)` grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

/// A rectangular grid stored as a flat row-major `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A `rows x cols` grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, cell: Cell) -> &T {
        &self.cells[self.index(cell)]
    }

    pub fn get_mut(&mut self, cell: Cell) -> &mut T {
        let i = self.index(cell);
        &mut self.cells[i]
    }

    pub fn set(&mut self, cell: Cell, value: T) {
        let i = self.index(cell);
        self.cells[i] = value;
    }

    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && row < self.rows as i64 && col < self.cols as i64
    }

    /// The neighboring cell one step in `direction`, if it stays in bounds.
    pub fn step(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = cell.row as i64 + dr as i64;
        let col = cell.col as i64 + dc as i64;
        if self.in_bounds(row, col) {
            Some(Cell::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Iterate all coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Cell::new(r, c)))
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.row < self.rows && cell.col < self.cols);
        cell.row * self.cols + cell.col
    }
}
