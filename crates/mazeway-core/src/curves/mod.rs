//! Space-filling-curve numberings used as spanning-tree skeletons.
//!
//! Both providers produce a `Grid<u32>` bijection over the region where
//! consecutive numbers occupy adjacent cells. Wall generation only consumes
//! the relative order.

pub mod hamilton;
pub mod hilbert;

pub use hamilton::hamiltonian_numbering;
pub use hilbert::{hilbert_numbering, is_power_of_two};
