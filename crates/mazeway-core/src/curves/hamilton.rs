//! Randomized Hamiltonian-path cell numbering.
//!
//! Numbers an arbitrary region `1..=rows*cols` by depth-first search with a
//! shuffled direction order, un-numbering on dead ends. Worst-case cost is
//! exponential in the cell count, so callers keep regions small and route
//! anything larger through recursive decomposition.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::direction::Direction;
use crate::error::GenerationError;
use crate::grid::{Cell, Grid};

/// Region size past which backtracking search becomes impractical.
const BACKTRACK_WARN_CELLS: usize = 50;

/// Number a `rows x cols` region along a random Hamiltonian path.
///
/// Starts the search from a random cell; if that start fails, retries from
/// every cell in row-major order before giving up.
pub fn hamiltonian_numbering(
    rows: usize,
    cols: usize,
    rng: &mut impl Rng,
) -> Result<Grid<u32>, GenerationError> {
    if rows == 0 || cols == 0 {
        return Err(GenerationError::EmptyGrid { rows, cols });
    }
    if rows * cols >= BACKTRACK_WARN_CELLS {
        log::warn!(
            "hamiltonian numbering over {}x{} cells may backtrack heavily (threshold {})",
            rows,
            cols,
            BACKTRACK_WARN_CELLS
        );
    }

    let mut numbering = Grid::filled(rows, cols, 0u32);
    let start = Cell::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
    if extend_path(&mut numbering, start, 1, rng) {
        return Ok(numbering);
    }
    for row in 0..rows {
        for col in 0..cols {
            if extend_path(&mut numbering, Cell::new(row, col), 1, rng) {
                return Ok(numbering);
            }
        }
    }
    Err(GenerationError::NoHamiltonianPath { rows, cols })
}

/// Number `cell` as `number` and extend toward a full path. Un-numbers the
/// cell and reports failure when no continuation works, leaving the grid as
/// it was on entry.
fn extend_path(numbering: &mut Grid<u32>, cell: Cell, number: u32, rng: &mut impl Rng) -> bool {
    numbering.set(cell, number);
    if number as usize == numbering.len() {
        return true;
    }
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    for direction in directions {
        if let Some(next) = numbering.step(cell, direction) {
            if *numbering.get(next) == 0 && extend_path(numbering, next, number + 1, rng) {
                return true;
            }
        }
    }
    numbering.set(cell, 0);
    false
}
