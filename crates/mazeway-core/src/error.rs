//! Error types for maze generation.

/// Errors that can occur while building a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Requested grid has a zero dimension.
    EmptyGrid { rows: usize, cols: usize },
    /// Hilbert numbering requires a power-of-two side of at least 2.
    SideNotPowerOfTwo { side: usize },
    /// No Hamiltonian path exists over the region from any start cell.
    NoHamiltonianPath { rows: usize, cols: usize },
    /// A `(dr, dc)` pair that is not one of the four unit cardinal deltas.
    InvalidDelta { dr: i32, dc: i32 },
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::EmptyGrid { rows, cols } => {
                write!(f, "Cannot generate a {}x{} maze: both dimensions must be at least 1", rows, cols)
            }
            GenerationError::SideNotPowerOfTwo { side } => {
                write!(f, "Hilbert numbering needs a power-of-two side >= 2, got {}", side)
            }
            GenerationError::NoHamiltonianPath { rows, cols } => {
                write!(f, "No Hamiltonian path found over {}x{} cells from any start", rows, cols)
            }
            GenerationError::InvalidDelta { dr, dc } => {
                write!(f, "({}, {}) is not a cardinal unit delta", dr, dc)
            }
        }
    }
}

impl std::error::Error for GenerationError {}
