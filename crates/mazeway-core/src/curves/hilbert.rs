//! Hilbert-curve cell numbering.
//!
//! Decodes linear Hilbert indices into coordinates and numbers a
//! power-of-two square so that consecutive numbers always occupy adjacent
//! cells. The decode accumulates coordinates scale by scale: at each step
//! size, two bits of the index pick a quadrant transform (mirror both axes
//! and/or swap) plus an offset.

use crate::error::GenerationError;
use crate::grid::{Cell, Grid};

/// True for 2, 4, 8, ... (a side the Hilbert construction can cover).
pub fn is_power_of_two(value: usize) -> bool {
    value >= 2 && value & (value - 1) == 0
}

/// Rotate or mirror coordinates within a quadrant of the given order.
fn rotate_quad(order: usize, x: usize, y: usize, flip_x: usize, flip_y: usize) -> (usize, usize) {
    let (mut x, mut y) = (x, y);
    if flip_y == 0 {
        if flip_x == 1 {
            x = order - 1 - x;
            y = order - 1 - y;
        }
        std::mem::swap(&mut x, &mut y);
    }
    (x, y)
}

/// Decode a linear index along the Hilbert curve of side `order` into
/// `(x, y)` coordinates.
pub fn index_to_coords(order: usize, index: usize) -> (usize, usize) {
    let mut t = index;
    let (mut x, mut y) = (0usize, 0usize);
    let mut step = 1usize;
    while step < order {
        let flip_x = (t / 2) & 1;
        let flip_y = (t ^ flip_x) & 1;
        let rotated = rotate_quad(step, x, y, flip_x, flip_y);
        x = rotated.0 + step * flip_x;
        y = rotated.1 + step * flip_y;
        t /= 4;
        step *= 2;
    }
    (x, y)
}

/// Number a `side x side` square in Hilbert order, `1..=side*side`.
pub fn hilbert_numbering(side: usize) -> Result<Grid<u32>, GenerationError> {
    if !is_power_of_two(side) {
        return Err(GenerationError::SideNotPowerOfTwo { side });
    }
    let mut numbering = Grid::filled(side, side, 0u32);
    for index in 0..side * side {
        let (x, y) = index_to_coords(side, index);
        numbering.set(Cell::new(x, y), (index + 1) as u32);
    }
    Ok(numbering)
}
