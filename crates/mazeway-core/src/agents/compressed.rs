//! Constrained depth-first search with path compression.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::direction::{Direction, DirectionSet};
use crate::grid::Cell;
use crate::problem::GridProblem;

use super::{Evaluator, Score, SearchAgent};

/// Depth-first walker whose path stack is compacted at every retreat.
///
/// Moves and books exactly like [`super::ConstrainedDfsAgent`], but keeps a
/// per-cell cache of untried actions and, before unwinding, rewinds the
/// stack to the nearest cached branch point (or the path bottom), keeps
/// only the last pass through each cell, and replays the shortened route.
/// On a perfect tree this changes nothing; on a braided maze it stops
/// cycles from inflating the stack. Forward moves are uniform random, or
/// follow an evaluator when one is supplied: candidates are sorted
/// descending and consumed from the end, lowest score first.
pub struct CompressedDfsAgent {
    tried: HashMap<Cell, DirectionSet>,
    untried: HashMap<Cell, DirectionSet>,
    path: Vec<(Cell, Direction)>,
    evaluator: Option<Evaluator>,
    rng: StdRng,
}

impl CompressedDfsAgent {
    pub fn new() -> Self {
        CompressedDfsAgent {
            tried: HashMap::new(),
            untried: HashMap::new(),
            path: Vec::new(),
            evaluator: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        CompressedDfsAgent {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Orders candidate moves by `evaluator` instead of at random.
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        CompressedDfsAgent {
            evaluator: Some(evaluator),
            ..Self::new()
        }
    }

    /// Current depth of the path stack.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Rewind the stack to the most recent cell whose cached untried set is
    /// nonempty (or to the bottom), keep only the last pass through each
    /// rewound cell, and replay the shortened route back onto the stack.
    fn compress(&mut self, problem: &GridProblem, current: Cell) {
        let mut rewound: Vec<(Cell, Direction)> = Vec::new();
        while let Some(step) = self.path.pop() {
            let at_branch = self
                .untried
                .get(&step.0)
                .map_or(false, |remaining| !remaining.is_empty());
            rewound.push(step);
            if at_branch {
                break;
            }
        }
        // Oldest first, so later passes through a cell overwrite earlier
        // ones.
        rewound.reverse();
        let mut last_action: HashMap<Cell, Direction> = HashMap::new();
        for &(cell, action) in &rewound {
            last_action.insert(cell, action);
        }

        let rebuild_from = match rewound.first() {
            Some(&(cell, _)) => cell,
            None => return,
        };
        let mut cell = rebuild_from;
        while cell != current {
            let action = match last_action.get(&cell) {
                Some(&action) => action,
                None => break,
            };
            self.path.push((cell, action));
            cell = problem.apply_to(cell, action);
        }
    }
}

impl Default for CompressedDfsAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAgent for CompressedDfsAgent {
    fn decide(&mut self, problem: &mut GridProblem) -> Option<Direction> {
        let current = problem.state();
        let tried = self.tried.get(&current).copied().unwrap_or_default();
        let untried: DirectionSet = problem
            .legal_actions(current)
            .iter()
            .filter(|direction| !tried.contains(*direction))
            .collect();
        self.untried.insert(current, untried);

        let mut candidates: Vec<Direction> = untried.iter().collect();
        if let Some(&(_, last_action)) = self.path.last() {
            candidates.retain(|direction| *direction != last_action.reverse());
        }

        let chosen = match self.evaluator {
            Some(evaluator) => {
                let mut scored: Vec<(Score, Direction)> = candidates
                    .into_iter()
                    .map(|direction| (evaluator(problem, current, direction), direction))
                    .collect();
                scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
                scored.pop().map(|(_, direction)| direction)
            }
            None => candidates.choose(&mut self.rng).copied(),
        };

        if let Some(choice) = chosen {
            self.tried.entry(current).or_default().insert(choice);
            self.path.push((current, choice));
            return Some(choice);
        }

        if self.path.is_empty() {
            return None;
        }
        self.compress(problem, current);

        if let Some((_, last_action)) = self.path.pop() {
            let retreat = last_action.reverse();
            self.tried.entry(current).or_default().insert(retreat);
            return Some(retreat);
        }
        None
    }
}
