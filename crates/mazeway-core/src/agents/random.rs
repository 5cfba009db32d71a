//! Baseline agent that moves at random.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::direction::Direction;
use crate::problem::GridProblem;

use super::SearchAgent;

/// Picks a uniformly random legal action every decision.
///
/// Keeps no memory of where it has been, so it serves as the behavioral
/// floor the search agents are measured against. On any connected maze it
/// reaches the goal eventually, just not soon.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAgent for RandomAgent {
    fn decide(&mut self, problem: &mut GridProblem) -> Option<Direction> {
        let actions: Vec<Direction> = problem.legal_actions(problem.state()).iter().collect();
        actions.choose(&mut self.rng).copied()
    }
}
