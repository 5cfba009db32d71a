//! Integration tests for the full maze generation pipeline.
//!
//! Exercises: curve numbering → ascending sampling → recursive assembly
//! → braiding → boundary sealing → GridProblem construction.
//!
//! All tests are pure logic: no rendering, no game loop.

use mazeway_core::curves::{hamiltonian_numbering, hilbert_numbering};
use mazeway_core::direction::{Direction, DirectionSet};
use mazeway_core::error::GenerationError;
use mazeway_core::grid::{Cell, Grid};
use mazeway_core::problem::{GridProblem, MazeConfig};
use mazeway_core::walls::{
    generate_walls, open_edge_count, reachable_cells, wall_symmetry_violations,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn walls_for(rows: usize, cols: usize, break_rate: f64, seed: u64) -> Grid<DirectionSet> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_walls(rows, cols, break_rate, 40, &mut rng).expect("generation succeeds")
}

fn assert_sealed(walls: &Grid<DirectionSet>) {
    let rows = walls.rows();
    let cols = walls.cols();
    for cell in walls.cells() {
        if cell.row == 0 {
            assert!(walls.get(cell).contains(Direction::Up), "open top at {:?}", cell);
        }
        if cell.row == rows - 1 {
            assert!(walls.get(cell).contains(Direction::Down), "open bottom at {:?}", cell);
        }
        if cell.col == 0 {
            assert!(walls.get(cell).contains(Direction::Left), "open left at {:?}", cell);
        }
        if cell.col == cols - 1 {
            assert!(walls.get(cell).contains(Direction::Right), "open right at {:?}", cell);
        }
    }
}

/// Bijective onto `1..=len` with consecutive numbers on adjacent cells.
fn assert_curve_valid(numbering: &Grid<u32>) {
    let len = numbering.len();
    let mut position = vec![None; len];
    for cell in numbering.cells() {
        let value = *numbering.get(cell) as usize;
        assert!(
            (1..=len).contains(&value),
            "number {} out of range at {:?}",
            value,
            cell
        );
        assert!(position[value - 1].is_none(), "number {} repeated", value);
        position[value - 1] = Some(cell);
    }
    for pair in position.windows(2) {
        if let (Some(a), Some(b)) = (pair[0], pair[1]) {
            assert_eq!(
                a.row.abs_diff(b.row) + a.col.abs_diff(b.col),
                1,
                "consecutive numbers at {:?} and {:?} are not adjacent",
                a,
                b
            );
        }
    }
}

// ── Spanning tree tests ────────────────────────────────────────────────

#[test]
fn unbraided_mazes_are_spanning_trees() {
    let sizes = [
        (1usize, 1usize),
        (1, 5),
        (5, 1),
        (2, 2),
        (4, 4),
        (3, 7),
        (6, 10),
        (9, 12),
        (16, 16),
        (36, 36),
    ];
    for &(rows, cols) in &sizes {
        for seed in 0..3 {
            let walls = walls_for(rows, cols, 0.0, seed);
            let cells = rows * cols;
            assert_eq!(
                open_edge_count(&walls),
                cells - 1,
                "{}x{} seed {}: wrong edge count for a tree",
                rows,
                cols,
                seed
            );
            assert_eq!(
                reachable_cells(&walls, Cell::new(0, 0)),
                cells,
                "{}x{} seed {}: not connected",
                rows,
                cols,
                seed
            );
            assert_eq!(
                wall_symmetry_violations(&walls),
                0,
                "{}x{} seed {}: asymmetric walls",
                rows,
                cols,
                seed
            );
        }
    }
}

#[test]
fn boundary_sealed_at_every_break_rate() {
    for &break_rate in &[0.0, 0.3, 1.0] {
        for &(rows, cols) in &[(1usize, 6usize), (4, 4), (9, 7), (12, 12)] {
            let walls = walls_for(rows, cols, break_rate, 3);
            assert_sealed(&walls);
        }
    }
}

#[test]
fn braiding_preserves_connectivity_and_symmetry() {
    for seed in 0..5 {
        let walls = walls_for(12, 12, 0.5, seed);
        assert_eq!(reachable_cells(&walls, Cell::new(0, 0)), 144, "seed {}", seed);
        assert_eq!(wall_symmetry_violations(&walls), 0, "seed {}", seed);
    }
}

#[test]
fn braiding_only_opens_edges() {
    for seed in 0..5 {
        let tree = walls_for(10, 10, 0.0, seed);
        let braided = walls_for(10, 10, 0.4, seed);
        assert!(
            open_edge_count(&braided) >= open_edge_count(&tree),
            "seed {}: braiding closed an edge",
            seed
        );
    }
}

#[test]
fn full_braiding_opens_every_interior_edge() {
    let walls = walls_for(6, 6, 1.0, 2);
    // 2 * 6 * 5 interior edge slots, all open at break_rate 1.0.
    assert_eq!(open_edge_count(&walls), 60);
    assert_sealed(&walls);
}

// ── Curve tests ────────────────────────────────────────────────────────

#[test]
fn hilbert_numberings_valid_up_to_32() {
    for side in [2usize, 4, 8, 16, 32] {
        let numbering = hilbert_numbering(side).expect("power-of-two side");
        assert_eq!(numbering.rows(), side);
        assert_eq!(numbering.cols(), side);
        assert_curve_valid(&numbering);
    }
}

#[test]
fn hilbert_rejects_other_sides() {
    for side in [0usize, 1, 3, 6, 12, 33] {
        assert!(
            matches!(
                hilbert_numbering(side),
                Err(GenerationError::SideNotPowerOfTwo { .. })
            ),
            "side {} accepted",
            side
        );
    }
}

#[test]
fn hamiltonian_numberings_valid_on_odd_shapes() {
    for &(rows, cols) in &[(1usize, 9usize), (3, 3), (2, 5), (5, 2), (4, 7), (7, 4), (6, 6)] {
        for seed in 0..3 {
            let mut rng = StdRng::seed_from_u64(seed);
            let numbering =
                hamiltonian_numbering(rows, cols, &mut rng).expect("path exists on grid regions");
            assert_curve_valid(&numbering);
        }
    }
}

// ── GridProblem pipeline tests ─────────────────────────────────────────

#[test]
fn default_config_builds_a_walkable_maze() {
    let problem = GridProblem::new(&MazeConfig {
        seed: Some(42),
        ..MazeConfig::default()
    })
    .expect("default maze generates");
    assert_eq!(problem.rows(), 36);
    assert_eq!(problem.cols(), 36);
    assert_eq!(problem.start(), Cell::new(0, 0));
    assert_eq!(problem.goal(), Cell::new(35, 35));
    assert!(!problem.legal_actions(problem.start()).is_empty());
    assert_eq!(reachable_cells(problem.walls(), problem.start()), 36 * 36);
    assert_sealed(problem.walls());
}

#[test]
fn same_seed_same_maze() {
    let config = MazeConfig {
        rows: 10,
        cols: 14,
        seed: Some(99),
        ..MazeConfig::default()
    };
    let first = GridProblem::new(&config).expect("generates");
    let second = GridProblem::new(&config).expect("generates");
    assert_eq!(first.walls(), second.walls());
}

#[test]
fn different_seeds_produce_variation() {
    let mut layouts = Vec::new();
    for seed in 0..10 {
        let problem = GridProblem::new(&MazeConfig {
            rows: 8,
            cols: 8,
            seed: Some(seed),
            ..MazeConfig::default()
        })
        .expect("generates");
        layouts.push(problem.walls().clone());
    }
    let mut distinct = 0;
    for (i, a) in layouts.iter().enumerate() {
        if layouts.iter().take(i).all(|b| b != a) {
            distinct += 1;
        }
    }
    assert!(
        distinct >= 2,
        "10 seeds produced only {} distinct layouts",
        distinct
    );
}

#[test]
fn empty_grids_are_rejected() {
    for &(rows, cols) in &[(0usize, 5usize), (5, 0), (0, 0)] {
        assert!(matches!(
            GridProblem::new(&MazeConfig {
                rows,
                cols,
                ..MazeConfig::default()
            }),
            Err(GenerationError::EmptyGrid { .. })
        ));
    }
}

// ── Multi-seed stress test ─────────────────────────────────────────────

#[test]
fn multi_seed_generation_stable() {
    for seed in 0..20 {
        let walls = walls_for(10, 14, 0.05, seed);
        assert!(
            open_edge_count(&walls) >= 10 * 14 - 1,
            "seed {}: lost tree edges",
            seed
        );
        assert_eq!(
            reachable_cells(&walls, Cell::new(0, 0)),
            140,
            "seed {}: disconnected",
            seed
        );
        assert_eq!(wall_symmetry_violations(&walls), 0, "seed {}: asymmetry", seed);
        assert_sealed(&walls);
    }
}
