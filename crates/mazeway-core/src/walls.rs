//! Wall-layout generation.
//!
//! A maze is built in three stages. A space-filling-curve numbering is
//! sampled into a per-cell "ascending" direction, forming an implicit
//! spanning tree pointed at the maximum-numbered cell. The sampled matrix is
//! turned into per-cell blocked-direction sets. Large or irregular regions
//! are split recursively into curve-sized sub-regions whose wall grids are
//! assembled side by side and joined by a single doorway, which keeps the
//! whole layout a single spanning tree. Braiding then knocks out walls at
//! random to introduce cycles, and the outer boundary is sealed last.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::curves::{hamiltonian_numbering, hilbert_numbering};
use crate::direction::{Direction, DirectionSet};
use crate::error::GenerationError;
use crate::grid::{Cell, Grid};

/// For each cell, pick one neighbor direction with a strictly greater
/// number, uniformly at random among the candidates. Only the globally
/// maximum cell ends up with `None`.
pub fn sample_ascending(numbering: &Grid<u32>, rng: &mut impl Rng) -> Grid<Option<Direction>> {
    let mut samples = Grid::filled(numbering.rows(), numbering.cols(), None);
    for cell in numbering.cells() {
        let own = *numbering.get(cell);
        let mut ascending = Vec::new();
        for direction in Direction::ALL {
            if let Some(neighbor) = numbering.step(cell, direction) {
                if *numbering.get(neighbor) > own {
                    ascending.push(direction);
                }
            }
        }
        if let Some(&choice) = ascending.choose(rng) {
            samples.set(cell, Some(choice));
        }
    }
    samples
}

/// Derive blocked-direction sets from a sampled matrix.
///
/// An edge is open only when one of its two endpoints sampled toward the
/// other; out-of-bounds directions are always walled.
pub fn walls_from_samples(samples: &Grid<Option<Direction>>) -> Grid<DirectionSet> {
    let mut walls = Grid::filled(samples.rows(), samples.cols(), DirectionSet::empty());
    for cell in samples.cells() {
        for direction in Direction::ALL {
            let blocked = match samples.step(cell, direction) {
                None => true,
                Some(neighbor) => {
                    *samples.get(cell) != Some(direction)
                        && *samples.get(neighbor) != Some(direction.reverse())
                }
            };
            if blocked {
                walls.get_mut(cell).insert(direction);
            }
        }
    }
    walls
}

/// Generate the full wall layout for a `rows x cols` maze.
///
/// `break_rate` is the per-wall removal probability applied after the
/// spanning tree is assembled; `max_region` is the cell-count ceiling below
/// which a region is numbered directly by Hamiltonian-path search instead
/// of being split further.
pub fn generate_walls(
    rows: usize,
    cols: usize,
    break_rate: f64,
    max_region: usize,
    rng: &mut impl Rng,
) -> Result<Grid<DirectionSet>, GenerationError> {
    if rows == 0 || cols == 0 {
        return Err(GenerationError::EmptyGrid { rows, cols });
    }
    let mut walls = build_walls(rows, cols, max_region, rng)?;

    // Braiding: each blocked direction has an independent chance to be
    // removed together with its twin in the neighboring cell.
    for row in 0..rows {
        for col in 0..cols {
            let cell = Cell::new(row, col);
            let blocked: Vec<Direction> = walls.get(cell).iter().collect();
            for direction in blocked {
                if rng.gen::<f64>() < break_rate {
                    walls.get_mut(cell).remove(direction);
                    if let Some(neighbor) = walls.step(cell, direction) {
                        walls.get_mut(neighbor).remove(direction.reverse());
                    }
                }
            }
        }
    }

    // Seal the outer boundary last; sealing overrides braiding.
    for col in 0..cols {
        walls.get_mut(Cell::new(0, col)).insert(Direction::Up);
        walls.get_mut(Cell::new(rows - 1, col)).insert(Direction::Down);
    }
    for row in 0..rows {
        walls.get_mut(Cell::new(row, 0)).insert(Direction::Left);
        walls.get_mut(Cell::new(row, cols - 1)).insert(Direction::Right);
    }

    log::debug!(
        "generated {}x{} maze walls (break_rate {}, max_region {})",
        rows,
        cols,
        break_rate,
        max_region
    );
    Ok(walls)
}

/// Recursive spanning-tree construction. Every call returns a freshly owned
/// grid; the parent copies sub-grids into place, so sibling calls never
/// alias.
fn build_walls(
    rows: usize,
    cols: usize,
    max_region: usize,
    rng: &mut impl Rng,
) -> Result<Grid<DirectionSet>, GenerationError> {
    if rows == 1 {
        let mut numbering = Grid::filled(1, cols, 0u32);
        for col in 0..cols {
            numbering.set(Cell::new(0, col), col as u32);
        }
        return Ok(walls_from_samples(&sample_ascending(&numbering, rng)));
    }
    if cols == 1 {
        let mut numbering = Grid::filled(rows, 1, 0u32);
        for row in 0..rows {
            numbering.set(Cell::new(row, 0), row as u32);
        }
        return Ok(walls_from_samples(&sample_ascending(&numbering, rng)));
    }

    let length = largest_power_of_two(rows).min(largest_power_of_two(cols));

    if rows == cols && rows == length {
        let numbering = hilbert_numbering(length)?;
        return Ok(walls_from_samples(&sample_ascending(&numbering, rng)));
    }
    if rows * cols < max_region {
        let numbering = hamiltonian_numbering(rows, cols, rng)?;
        return Ok(walls_from_samples(&sample_ascending(&numbering, rng)));
    }

    if cols >= rows {
        let left = build_walls(rows, length, max_region, rng)?;
        let right = build_walls(rows, cols - length, max_region, rng)?;
        let mut assembled = Grid::filled(rows, cols, DirectionSet::empty());
        for cell in left.cells() {
            assembled.set(cell, *left.get(cell));
        }
        for cell in right.cells() {
            assembled.set(Cell::new(cell.row, cell.col + length), *right.get(cell));
        }
        // One doorway across the cut keeps the join a tree.
        let doorway = Cell::new(rng.gen_range(0..length), length - 1);
        assembled.get_mut(doorway).remove(Direction::Right);
        assembled
            .get_mut(Cell::new(doorway.row, length))
            .remove(Direction::Left);
        Ok(assembled)
    } else {
        let top = build_walls(length, cols, max_region, rng)?;
        let bottom = build_walls(rows - length, cols, max_region, rng)?;
        let mut assembled = Grid::filled(rows, cols, DirectionSet::empty());
        for cell in top.cells() {
            assembled.set(cell, *top.get(cell));
        }
        for cell in bottom.cells() {
            assembled.set(Cell::new(cell.row + length, cell.col), *bottom.get(cell));
        }
        let doorway = Cell::new(length - 1, rng.gen_range(0..length));
        assembled.get_mut(doorway).remove(Direction::Down);
        assembled
            .get_mut(Cell::new(length, doorway.col))
            .remove(Direction::Up);
        Ok(assembled)
    }
}

/// Largest power of two that is `<= n`. Requires `n >= 1`.
fn largest_power_of_two(n: usize) -> usize {
    1 << n.ilog2()
}

/// Count open interior edges, each adjacent pair counted once.
pub fn open_edge_count(walls: &Grid<DirectionSet>) -> usize {
    let mut count = 0;
    for cell in walls.cells() {
        for direction in [Direction::Down, Direction::Right] {
            if walls.step(cell, direction).is_some() && !walls.get(cell).contains(direction) {
                count += 1;
            }
        }
    }
    count
}

/// Number of cells reachable from `from` through open edges.
pub fn reachable_cells(walls: &Grid<DirectionSet>, from: Cell) -> usize {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);
    while let Some(cell) = queue.pop_front() {
        for direction in Direction::ALL {
            if walls.get(cell).contains(direction) {
                continue;
            }
            if let Some(next) = walls.step(cell, direction) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    visited.len()
}

/// Count `(cell, direction)` entries whose twin in the adjacent cell
/// disagrees. Zero for any well-formed layout.
pub fn wall_symmetry_violations(walls: &Grid<DirectionSet>) -> usize {
    let mut violations = 0;
    for cell in walls.cells() {
        for direction in Direction::ALL {
            if let Some(neighbor) = walls.step(cell, direction) {
                let here = walls.get(cell).contains(direction);
                let there = walls.get(neighbor).contains(direction.reverse());
                if here != there {
                    violations += 1;
                }
            }
        }
    }
    violations
}
