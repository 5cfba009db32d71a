//! The navigable maze problem.
//!
//! [`GridProblem`] pairs a generated wall layout with the mutable traversal
//! state: current location, step counter, history path, and the fog-of-war
//! visible set. Agents query legal moves and drive the single [`GridProblem::apply`]
//! transition; a renderer consumes the static and dynamic snapshot structs
//! and never touches the problem directly.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::agents::Score;
use crate::direction::{Direction, DirectionSet};
use crate::error::GenerationError;
use crate::grid::{Cell, Grid};
use crate::walls::generate_walls;

/// Parameters for building a [`GridProblem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Per-wall removal probability applied after the spanning tree is
    /// assembled. Zero keeps the maze a perfect tree.
    pub break_rate: f64,
    /// Cell-count ceiling below which a region is numbered by
    /// Hamiltonian-path search instead of being split further.
    pub max_region: usize,
    /// Reveal radius around every cell the agent has occupied.
    pub radius_history: usize,
    /// Reveal radius around the current cell.
    pub radius_current: usize,
    /// Start cell; the top-left corner when `None`.
    pub begin: Option<Cell>,
    /// Goal cell; the bottom-right corner when `None`.
    pub end: Option<Cell>,
    /// Generation seed; unseeded thread randomness when `None`.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            rows: 36,
            cols: 36,
            break_rate: 0.05,
            max_region: 40,
            radius_history: 1,
            radius_current: 2,
            begin: None,
            end: None,
            seed: None,
        }
    }
}

/// A generated maze plus the state an agent traverses it with.
#[derive(Debug, Clone)]
pub struct GridProblem {
    walls: Grid<DirectionSet>,
    begin: Cell,
    end: Cell,
    radius_history: usize,
    radius_current: usize,
    location: Cell,
    count: u64,
    history: Vec<Cell>,
    visible: HashSet<Cell>,
}

impl GridProblem {
    /// Generate a maze from `config` and place the agent at the start.
    pub fn new(config: &MazeConfig) -> Result<Self, GenerationError> {
        let walls = match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                generate_walls(
                    config.rows,
                    config.cols,
                    config.break_rate,
                    config.max_region,
                    &mut rng,
                )?
            }
            None => generate_walls(
                config.rows,
                config.cols,
                config.break_rate,
                config.max_region,
                &mut rand::thread_rng(),
            )?,
        };
        let begin = config.begin.unwrap_or(Cell::new(0, 0));
        let end = config
            .end
            .unwrap_or(Cell::new(config.rows - 1, config.cols - 1));
        log::info!(
            "maze ready: {}x{}, begin ({}, {}), end ({}, {})",
            config.rows,
            config.cols,
            begin.row,
            begin.col,
            end.row,
            end.col
        );
        let mut problem = GridProblem {
            walls,
            begin,
            end,
            radius_history: config.radius_history,
            radius_current: config.radius_current,
            location: begin,
            count: 0,
            history: Vec::new(),
            visible: HashSet::new(),
        };
        problem.reset();
        Ok(problem)
    }

    /// Reinitialize the traversal state without regenerating walls.
    pub fn reset(&mut self) {
        self.location = self.begin;
        self.count = 0;
        self.history = vec![self.begin];
        self.visible = HashSet::from([self.begin, self.end]);
    }

    pub fn rows(&self) -> usize {
        self.walls.rows()
    }

    pub fn cols(&self) -> usize {
        self.walls.cols()
    }

    /// The cell the agent currently occupies.
    pub fn state(&self) -> Cell {
        self.location
    }

    pub fn start(&self) -> Cell {
        self.begin
    }

    pub fn goal(&self) -> Cell {
        self.end
    }

    /// True when `cell` is the goal.
    pub fn is_end(&self, cell: Cell) -> bool {
        cell == self.end
    }

    /// Steps taken so far, the figure reported on reaching the goal.
    pub fn end_info(&self) -> u64 {
        self.count
    }

    /// Every cell the agent has occupied, in order, starting at the start
    /// cell. Revisits appear once per visit.
    pub fn history(&self) -> &[Cell] {
        &self.history
    }

    /// The wall layout, for inspection.
    pub fn walls(&self) -> &Grid<DirectionSet> {
        &self.walls
    }

    /// Directions not blocked by a wall at `cell`. The boundary is sealed,
    /// so a legal action never leaves the grid.
    pub fn legal_actions(&self, cell: Cell) -> DirectionSet {
        self.walls.get(cell).complement()
    }

    /// Take one step in `direction` from the current location.
    ///
    /// A blocked direction leaves the state untouched, a no-op rather than
    /// an error. A legal one moves the location, increments the step
    /// counter, and records the new cell in the history and visible set.
    /// Returns the location after the move.
    pub fn apply(&mut self, direction: Direction) -> Cell {
        if !self.legal_actions(self.location).contains(direction) {
            return self.location;
        }
        if let Some(next) = self.walls.step(self.location, direction) {
            self.location = next;
            self.count += 1;
            self.history.push(next);
            self.visible.insert(next);
        }
        self.location
    }

    /// The cell reached by taking `direction` from an arbitrary `cell`,
    /// without mutating anything. Blocked moves return `cell` unchanged.
    pub fn apply_to(&self, cell: Cell, direction: Direction) -> Cell {
        if !self.legal_actions(cell).contains(direction) {
            return cell;
        }
        self.walls.step(cell, direction).unwrap_or(cell)
    }

    /// Teleport to `cell` without stepping or counting. Reserved for the
    /// idealized planner; physically constrained agents move through
    /// [`GridProblem::apply`].
    pub fn reposition(&mut self, cell: Cell) {
        self.location = cell;
    }

    /// Cells revealed to a renderer: the occupied set expanded once by
    /// `radius_history` around each member, plus `radius_current` around
    /// the current location. Recomputed per call; revealed neighbors do not
    /// themselves reveal further.
    pub fn visible_cells(&self) -> HashSet<Cell> {
        let mut revealed = self.visible.clone();
        for &cell in &self.visible {
            self.reveal_around(&mut revealed, cell, self.radius_history);
        }
        self.reveal_around(&mut revealed, self.location, self.radius_current);
        revealed
    }

    fn reveal_around(&self, revealed: &mut HashSet<Cell>, center: Cell, radius: usize) {
        let radius = radius as i64;
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let row = center.row as i64 + dr;
                let col = center.col as i64 + dc;
                if self.walls.in_bounds(row, col) {
                    revealed.insert(Cell::new(row as usize, col as usize));
                }
            }
        }
    }

    /// Snapshot of everything a renderer needs exactly once.
    pub fn static_render_data(&self) -> StaticRenderData {
        StaticRenderData {
            walls: self.walls.clone(),
            begin: self.begin,
            end: self.end,
            rows: self.walls.rows(),
            cols: self.walls.cols(),
        }
    }

    /// Snapshot of everything a renderer needs every frame.
    pub fn dynamic_render_data(&self) -> DynamicRenderData {
        DynamicRenderData {
            history_path: self.history.clone(),
            visible: self.visible_cells(),
            count: self.count,
            state: self.location,
        }
    }
}

/// Render data fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRenderData {
    pub walls: Grid<DirectionSet>,
    pub begin: Cell,
    pub end: Cell,
    pub rows: usize,
    pub cols: usize,
}

/// Render data that changes as the agent moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicRenderData {
    pub history_path: Vec<Cell>,
    pub visible: HashSet<Cell>,
    pub count: u64,
    pub state: Cell,
}

/// Distance-to-goal evaluator for the heuristic agents.
///
/// Scores the cell reached by taking `direction` from `cell` against the
/// goal: Manhattan distance first, Euclidean as the tie-breaker. Blocked
/// moves score the unchanged cell.
pub fn distance_to_goal(problem: &GridProblem, cell: Cell, direction: Direction) -> Score {
    let reached = problem.apply_to(cell, direction);
    let goal = problem.goal();
    let dr = reached.row.abs_diff(goal.row);
    let dc = reached.col.abs_diff(goal.col);
    Score {
        manhattan: dr + dc,
        euclidean: ((dr * dr + dc * dc) as f64).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1 x `cols` maze. Every interior edge is open regardless of seed,
    /// which keeps corridor tests deterministic.
    fn corridor(cols: usize) -> GridProblem {
        GridProblem::new(&MazeConfig {
            rows: 1,
            cols,
            break_rate: 0.0,
            seed: Some(7),
            ..MazeConfig::default()
        })
        .expect("corridor generates")
    }

    #[test]
    fn test_config_defaults() {
        let config = MazeConfig::default();
        assert_eq!(config.rows, 36);
        assert_eq!(config.cols, 36);
        assert!((config.break_rate - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.max_region, 40);
        assert_eq!(config.radius_history, 1);
        assert_eq!(config.radius_current, 2);
        assert!(config.begin.is_none());
        assert!(config.end.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_corner_defaults_and_initial_state() {
        let problem = corridor(5);
        assert_eq!(problem.start(), Cell::new(0, 0));
        assert_eq!(problem.goal(), Cell::new(0, 4));
        assert_eq!(problem.state(), Cell::new(0, 0));
        assert_eq!(problem.end_info(), 0);
        assert_eq!(problem.history(), &[Cell::new(0, 0)]);
        assert!(!problem.is_end(problem.state()));
        assert!(problem.is_end(Cell::new(0, 4)));
    }

    #[test]
    fn test_apply_moves_and_counts() {
        let mut problem = corridor(5);
        let reached = problem.apply(Direction::Right);
        assert_eq!(reached, Cell::new(0, 1));
        assert_eq!(problem.state(), Cell::new(0, 1));
        assert_eq!(problem.end_info(), 1);
        assert_eq!(problem.history(), &[Cell::new(0, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn test_blocked_apply_is_a_noop() {
        let mut problem = corridor(5);
        let stayed = problem.apply(Direction::Up);
        assert_eq!(stayed, Cell::new(0, 0));
        assert_eq!(problem.state(), Cell::new(0, 0));
        assert_eq!(problem.end_info(), 0, "blocked move must not count a step");
        assert_eq!(problem.history().len(), 1);
    }

    #[test]
    fn test_apply_to_is_pure() {
        let problem = corridor(5);
        assert_eq!(
            problem.apply_to(Cell::new(0, 1), Direction::Right),
            Cell::new(0, 2)
        );
        assert_eq!(
            problem.apply_to(Cell::new(0, 1), Direction::Up),
            Cell::new(0, 1)
        );
        assert_eq!(problem.state(), Cell::new(0, 0));
        assert_eq!(problem.end_info(), 0);
    }

    #[test]
    fn test_legal_actions_complement_walls() {
        let problem = corridor(5);
        let at_start: Vec<Direction> = problem.legal_actions(Cell::new(0, 0)).iter().collect();
        assert_eq!(at_start, vec![Direction::Right]);
        let mid = problem.legal_actions(Cell::new(0, 2));
        assert!(mid.contains(Direction::Left));
        assert!(mid.contains(Direction::Right));
        assert_eq!(mid.len(), 2);
    }

    #[test]
    fn test_reposition_bypasses_movement() {
        let mut problem = corridor(5);
        problem.reposition(Cell::new(0, 3));
        assert_eq!(problem.state(), Cell::new(0, 3));
        assert_eq!(problem.end_info(), 0, "reposition must not count a step");
        assert_eq!(problem.history().len(), 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut problem = corridor(5);
        problem.apply(Direction::Right);
        problem.apply(Direction::Right);
        problem.reset();
        assert_eq!(problem.state(), Cell::new(0, 0));
        assert_eq!(problem.end_info(), 0);
        assert_eq!(problem.history(), &[Cell::new(0, 0)]);
        let visible = problem.visible_cells();
        assert!(visible.contains(&Cell::new(0, 0)));
        assert!(visible.contains(&Cell::new(0, 4)), "goal stays revealed");
    }

    #[test]
    fn test_visibility_expands_once_not_transitively() {
        // 1x7 corridor: current radius 2 covers cols 0..=2, history radius 1
        // around the start covers 0..=1 and around the goal covers 5..=6.
        // Cols 3 and 4 stay hidden until walked near.
        let problem = corridor(7);
        let visible = problem.visible_cells();
        for col in [0, 1, 2, 5, 6] {
            assert!(visible.contains(&Cell::new(0, col)), "col {} hidden", col);
        }
        for col in [3, 4] {
            assert!(!visible.contains(&Cell::new(0, col)), "col {} leaked", col);
        }
    }

    #[test]
    fn test_visibility_follows_the_agent() {
        let mut problem = corridor(7);
        problem.apply(Direction::Right);
        problem.apply(Direction::Right);
        let visible = problem.visible_cells();
        for col in 0..7 {
            assert!(visible.contains(&Cell::new(0, col)), "col {} hidden", col);
        }
    }

    #[test]
    fn test_custom_begin_and_end() {
        let problem = GridProblem::new(&MazeConfig {
            rows: 3,
            cols: 3,
            begin: Some(Cell::new(2, 0)),
            end: Some(Cell::new(0, 2)),
            seed: Some(1),
            ..MazeConfig::default()
        })
        .expect("maze generates");
        assert_eq!(problem.start(), Cell::new(2, 0));
        assert_eq!(problem.goal(), Cell::new(0, 2));
        assert_eq!(problem.state(), Cell::new(2, 0));
    }

    #[test]
    fn test_render_snapshots() {
        let mut problem = corridor(5);
        let fixed = problem.static_render_data();
        assert_eq!((fixed.rows, fixed.cols), (1, 5));
        assert_eq!(fixed.begin, Cell::new(0, 0));
        assert_eq!(fixed.end, Cell::new(0, 4));
        assert!(fixed.walls.get(Cell::new(0, 0)).contains(Direction::Up));

        problem.apply(Direction::Right);
        let frame = problem.dynamic_render_data();
        assert_eq!(frame.state, Cell::new(0, 1));
        assert_eq!(frame.count, 1);
        assert_eq!(frame.history_path, vec![Cell::new(0, 0), Cell::new(0, 1)]);
        assert!(frame.visible.contains(&Cell::new(0, 1)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = MazeConfig {
            rows: 9,
            cols: 7,
            seed: Some(13),
            ..MazeConfig::default()
        };
        let first = GridProblem::new(&config).expect("maze generates");
        let second = GridProblem::new(&config).expect("maze generates");
        assert_eq!(first.static_render_data(), second.static_render_data());
    }

    #[test]
    fn test_distance_to_goal_geometry() {
        let problem = corridor(5);
        // Right from (0, 2) reaches (0, 3), one column short of the goal.
        let score = distance_to_goal(&problem, Cell::new(0, 2), Direction::Right);
        assert_eq!(score.manhattan, 1);
        assert!((score.euclidean - 1.0).abs() < 1e-9);
        // Up is blocked, so the evaluated cell stays (0, 2).
        let blocked = distance_to_goal(&problem, Cell::new(0, 2), Direction::Up);
        assert_eq!(blocked.manhattan, 2);
        assert!((blocked.euclidean - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_goal_uses_both_axes() {
        let problem = GridProblem::new(&MazeConfig {
            rows: 4,
            cols: 4,
            seed: Some(3),
            ..MazeConfig::default()
        })
        .expect("maze generates");
        // Whatever (1, 1) offers, a blocked probe scores the cell itself.
        let blocked = Direction::ALL
            .into_iter()
            .find(|d| !problem.legal_actions(Cell::new(0, 0)).contains(*d));
        if let Some(direction) = blocked {
            let score = distance_to_goal(&problem, Cell::new(0, 0), direction);
            assert_eq!(score.manhattan, 6);
            assert!((score.euclidean - 18f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_grid_rejected() {
        let config = MazeConfig {
            rows: 0,
            cols: 5,
            ..MazeConfig::default()
        };
        assert!(matches!(
            GridProblem::new(&config),
            Err(GenerationError::EmptyGrid { .. })
        ));
    }
}
