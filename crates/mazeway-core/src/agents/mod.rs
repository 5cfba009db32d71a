//! The search-agent family.
//!
//! All agents implement [`SearchAgent`]: polled once per tick, they return
//! the next action to apply or `None` once exploration is exhausted. The
//! family spans an idealized depth-first planner that may teleport between
//! known cells ([`IdealizedDfsAgent`]), physically constrained walkers that
//! move one cell per decision ([`ConstrainedDfsAgent`] and the
//! path-compressing [`CompressedDfsAgent`]), and a [`RandomAgent`]
//! baseline. [`AgentRegistry`] maps stable names to constructors.

pub mod compressed;
pub mod constrained;
pub mod idealized;
pub mod random;
pub mod registry;

pub use compressed::CompressedDfsAgent;
pub use constrained::ConstrainedDfsAgent;
pub use idealized::IdealizedDfsAgent;
pub use random::RandomAgent;
pub use registry::{AgentFactory, AgentRegistry};

use crate::direction::Direction;
use crate::grid::Cell;
use crate::problem::GridProblem;

/// A maze-solving agent driven one decision per tick.
///
/// The caller owns the loop: it polls `decide`, applies the returned action
/// to the problem, and stops on the goal or on `None`. `None` is terminal;
/// the agent has exhausted its search and will not recover.
pub trait SearchAgent {
    /// Choose the next action for `problem`, or `None` when exploration is
    /// exhausted. Reads the problem state once at entry; the idealized
    /// planner may also reposition it.
    fn decide(&mut self, problem: &mut GridProblem) -> Option<Direction>;
}

/// Evaluator output, compared lexicographically: Manhattan distance first,
/// Euclidean as the tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score {
    pub manhattan: usize,
    pub euclidean: f64,
}

/// Scoring function supplied to the heuristic agents. Evaluates taking
/// `Direction` from `Cell` against the problem's goal.
pub type Evaluator = fn(&GridProblem, Cell, Direction) -> Score;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_orders_by_manhattan_first() {
        let near = Score {
            manhattan: 1,
            euclidean: 9.0,
        };
        let far = Score {
            manhattan: 2,
            euclidean: 0.5,
        };
        assert!(near < far);
    }

    #[test]
    fn test_score_breaks_ties_on_euclidean() {
        let diagonal = Score {
            manhattan: 4,
            euclidean: 8f64.sqrt(),
        };
        let straight = Score {
            manhattan: 4,
            euclidean: 4.0,
        };
        assert!(diagonal < straight);
    }
}
