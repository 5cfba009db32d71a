//! Idealized depth-first planner.

use std::collections::HashSet;

use crate::direction::Direction;
use crate::grid::Cell;
use crate::problem::GridProblem;

use super::{Evaluator, Score, SearchAgent};

/// Depth-first planner that may teleport between known cells.
///
/// Keeps a global visited set and a stack of `(source, action)` frontier
/// entries. Each decision pops the top entry, repositions the problem to
/// the entry's source, and returns its action; the planner never walks back
/// physically, so it models a solver with free access to its own map. With
/// an evaluator, a cell's candidates are pushed in ascending score order so
/// the highest-scored one is popped first.
pub struct IdealizedDfsAgent {
    visited: HashSet<Cell>,
    stack: Vec<(Cell, Direction)>,
    evaluator: Option<Evaluator>,
}

impl IdealizedDfsAgent {
    pub fn new() -> Self {
        IdealizedDfsAgent {
            visited: HashSet::new(),
            stack: Vec::new(),
            evaluator: None,
        }
    }

    /// Planner whose expansion order follows `evaluator`.
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        IdealizedDfsAgent {
            evaluator: Some(evaluator),
            ..Self::new()
        }
    }

    /// Frontier entries still waiting to be tried.
    pub fn frontier_len(&self) -> usize {
        self.stack.len()
    }

    fn expand(&mut self, problem: &GridProblem, cell: Cell) {
        let mut candidates: Vec<Direction> = problem.legal_actions(cell).iter().collect();
        if let Some(evaluator) = self.evaluator {
            let mut scored: Vec<(Score, Direction)> = candidates
                .into_iter()
                .map(|direction| (evaluator(problem, cell, direction), direction))
                .collect();
            scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            candidates = scored.into_iter().map(|(_, direction)| direction).collect();
        }
        for direction in candidates {
            let destination = problem.apply_to(cell, direction);
            if !self.visited.contains(&destination) {
                self.stack.push((cell, direction));
            }
        }
    }
}

impl Default for IdealizedDfsAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAgent for IdealizedDfsAgent {
    fn decide(&mut self, problem: &mut GridProblem) -> Option<Direction> {
        let current = problem.state();
        if !self.visited.contains(&current) {
            self.expand(problem, current);
            self.visited.insert(current);
        }
        let (source, action) = self.stack.pop()?;
        problem.reposition(source);
        Some(action)
    }
}
