//! Physically constrained depth-first search.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::direction::{Direction, DirectionSet};
use crate::grid::Cell;
use crate::problem::GridProblem;

use super::SearchAgent;

/// Depth-first agent that moves one physical cell per decision.
///
/// Tracks the actions already tried at every cell and the stack of steps
/// taken so far. Forward moves pick uniformly at random among the untried
/// legal actions, never the immediate reverse of the last step while
/// alternatives remain. With nothing left to try it retreats one cell by
/// returning the reverse of its last step and marking that reverse tried at
/// the cell being left. Cycles in a braided maze can make the path stack
/// revisit cells arbitrarily often; [`super::CompressedDfsAgent`] exists to
/// keep that in check.
pub struct ConstrainedDfsAgent {
    tried: HashMap<Cell, DirectionSet>,
    path: Vec<(Cell, Direction)>,
    rng: StdRng,
}

impl ConstrainedDfsAgent {
    pub fn new() -> Self {
        ConstrainedDfsAgent {
            tried: HashMap::new(),
            path: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        ConstrainedDfsAgent {
            tried: HashMap::new(),
            path: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current depth of the path stack.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }
}

impl Default for ConstrainedDfsAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAgent for ConstrainedDfsAgent {
    fn decide(&mut self, problem: &mut GridProblem) -> Option<Direction> {
        let current = problem.state();
        let tried = self.tried.entry(current).or_default();
        let mut candidates: Vec<Direction> = problem
            .legal_actions(current)
            .iter()
            .filter(|direction| !tried.contains(*direction))
            .collect();
        if let Some(&(_, last_action)) = self.path.last() {
            candidates.retain(|direction| *direction != last_action.reverse());
        }

        if let Some(&choice) = candidates.choose(&mut self.rng) {
            tried.insert(choice);
            self.path.push((current, choice));
            return Some(choice);
        }

        // Dead end: unwind one step. The retreat direction counts as tried
        // at the cell being left, so a later visit will not descend the
        // same way again.
        if let Some((_, last_action)) = self.path.pop() {
            let retreat = last_action.reverse();
            tried.insert(retreat);
            return Some(retreat);
        }
        None
    }
}
