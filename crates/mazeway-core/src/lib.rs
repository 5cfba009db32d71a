//! Pure maze logic for Mazeway.
//!
//! This crate contains maze generation and the search agents that solve
//! them, independent of any renderer, window, or game loop. Functions take
//! plain data and return results, making them unit-testable and portable
//! across a desktop client, headless harnesses, and any future frontend.
//! The only ambient effect is logging.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`agents`] | Search-agent family: random, idealized, constrained, compressed |
//! | [`curves`] | Hilbert and randomized Hamiltonian-path numberings |
//! | [`direction`] | Cardinal directions and packed direction sets |
//! | [`error`] | Generation failure type |
//! | [`grid`] | Cell coordinates and flat row-major grids |
//! | [`problem`] | Navigable maze: config, state machine, render snapshots |
//! | [`walls`] | Curve sampling, recursive decomposition, braiding, sealing |

pub mod agents;
pub mod curves;
pub mod direction;
pub mod error;
pub mod grid;
pub mod problem;
pub mod walls;
