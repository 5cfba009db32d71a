//! Mazeway Headless Validation Harness
//!
//! Validates maze generation and agent behavior without a renderer.
//! Runs entirely in-process, no windowing, no input, no timing.
//!
//! Usage:
//!   cargo run -p mazeway-simtest
//!   cargo run -p mazeway-simtest -- --verbose

use std::collections::HashSet;

use mazeway_core::agents::{AgentRegistry, CompressedDfsAgent, ConstrainedDfsAgent, SearchAgent};
use mazeway_core::curves::{hamiltonian_numbering, hilbert_numbering};
use mazeway_core::direction::{Direction, DirectionSet};
use mazeway_core::grid::{Cell, Grid};
use mazeway_core::problem::{distance_to_goal, GridProblem, MazeConfig};
use mazeway_core::walls::{
    generate_walls, open_edge_count, reachable_cells, wall_symmetry_violations,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

// ── Scenario table (same JSON a frontend would embed) ───────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    rows: usize,
    cols: usize,
    break_rate: f64,
    max_region: usize,
    seed: u64,
    step_cap: u64,
}

fn load_scenarios() -> Result<Vec<Scenario>, serde_json::Error> {
    serde_json::from_str(SCENARIOS_JSON)
}

fn scenario_config(scenario: &Scenario) -> MazeConfig {
    MazeConfig {
        rows: scenario.rows,
        cols: scenario.cols,
        break_rate: scenario.break_rate,
        max_region: scenario.max_region,
        seed: Some(scenario.seed),
        ..MazeConfig::default()
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Mazeway Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Generation invariants over the scenario table
    results.extend(validate_generation(verbose));

    // 2. Space-filling curve numberings
    results.extend(validate_curves(verbose));

    // 3. Problem state machine
    results.extend(validate_problem(verbose));

    // 4. Agent runs over the scenario table
    results.extend(validate_agents(verbose));

    // 5. Path compression
    results.extend(validate_compression(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Poll `agent` once per tick and apply its action, stopping at the goal,
/// a `None` decision, or `step_cap` decisions. Returns whether the goal was
/// reached and how many decisions it took.
fn run_to_goal(
    agent: &mut dyn SearchAgent,
    problem: &mut GridProblem,
    step_cap: u64,
) -> (bool, u64) {
    let mut decisions = 0u64;
    while decisions < step_cap {
        if problem.is_end(problem.state()) {
            return (true, decisions);
        }
        match agent.decide(problem) {
            Some(action) => {
                problem.apply(action);
                decisions += 1;
            }
            None => break,
        }
    }
    (problem.is_end(problem.state()), decisions)
}

/// Every border cell must block its outward direction.
fn boundary_sealed(walls: &Grid<DirectionSet>) -> bool {
    let rows = walls.rows();
    let cols = walls.cols();
    walls.cells().all(|cell| {
        (cell.row != 0 || walls.get(cell).contains(Direction::Up))
            && (cell.row != rows - 1 || walls.get(cell).contains(Direction::Down))
            && (cell.col != 0 || walls.get(cell).contains(Direction::Left))
            && (cell.col != cols - 1 || walls.get(cell).contains(Direction::Right))
    })
}

// ── 1. Generation Invariants ────────────────────────────────────────────

fn validate_generation(verbose: bool) -> Vec<TestResult> {
    println!("--- Generation Invariants ---");
    let mut results = Vec::new();

    let scenarios = match load_scenarios() {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenarios_not_empty".into(),
        passed: scenarios.len() >= 8,
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    for scenario in &scenarios {
        let mut rng = StdRng::seed_from_u64(scenario.seed);
        let walls = match generate_walls(
            scenario.rows,
            scenario.cols,
            scenario.break_rate,
            scenario.max_region,
            &mut rng,
        ) {
            Ok(w) => w,
            Err(e) => {
                results.push(TestResult {
                    name: format!("gen_{}", scenario.name),
                    passed: false,
                    detail: format!("generation failed: {}", e),
                });
                continue;
            }
        };
        let cells = scenario.rows * scenario.cols;
        let edges = open_edge_count(&walls);
        let reachable = reachable_cells(&walls, Cell::new(0, 0));
        let asymmetry = wall_symmetry_violations(&walls);
        let sealed = boundary_sealed(&walls);
        let tree_ok = if scenario.break_rate == 0.0 {
            edges == cells - 1
        } else {
            edges >= cells - 1
        };
        results.push(TestResult {
            name: format!("gen_{}", scenario.name),
            passed: tree_ok && reachable == cells && asymmetry == 0 && sealed,
            detail: format!(
                "{} edges, {}/{} reachable, {} asymmetries, sealed={}",
                edges, reachable, cells, asymmetry, sealed
            ),
        });
        if verbose {
            println!(
                "  {:15} {}x{} break={:.2} → {} open edges",
                scenario.name, scenario.rows, scenario.cols, scenario.break_rate, edges
            );
        }
    }

    // Same seed reproduces the layout bit for bit
    let mut first_rng = StdRng::seed_from_u64(99);
    let mut second_rng = StdRng::seed_from_u64(99);
    let first = generate_walls(10, 14, 0.05, 40, &mut first_rng);
    let second = generate_walls(10, 14, 0.05, 40, &mut second_rng);
    results.push(TestResult {
        name: "gen_deterministic".into(),
        passed: matches!((&first, &second), (Ok(a), Ok(b)) if a == b),
        detail: "seed 99 reproduces a 10x14 layout".into(),
    });

    // Different seeds vary
    let mut layouts = Vec::new();
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Ok(walls) = generate_walls(8, 8, 0.0, 40, &mut rng) {
            layouts.push(walls);
        }
    }
    let mut distinct = 0;
    for (i, a) in layouts.iter().enumerate() {
        if layouts.iter().take(i).all(|b| b != a) {
            distinct += 1;
        }
    }
    results.push(TestResult {
        name: "gen_seed_variation".into(),
        passed: layouts.len() == 10 && distinct >= 2,
        detail: format!("{} distinct layouts across 10 seeds", distinct),
    });

    // Braiding only removes walls
    let mut tree_rng = StdRng::seed_from_u64(5);
    let mut braid_rng = StdRng::seed_from_u64(5);
    let tree = generate_walls(12, 12, 0.0, 40, &mut tree_rng);
    let braided = generate_walls(12, 12, 0.3, 40, &mut braid_rng);
    results.push(TestResult {
        name: "gen_braiding_adds_edges".into(),
        passed: matches!(
            (&tree, &braided),
            (Ok(a), Ok(b)) if open_edge_count(b) >= open_edge_count(a)
        ),
        detail: "break_rate 0.3 never closes an open edge".into(),
    });

    // Degenerate sizes are rejected
    let mut rng = StdRng::seed_from_u64(0);
    let empty = generate_walls(0, 5, 0.0, 40, &mut rng);
    results.push(TestResult {
        name: "gen_rejects_empty".into(),
        passed: empty.is_err(),
        detail: "0x5 grid → error".into(),
    });

    results
}

// ── 2. Space-Filling Curves ─────────────────────────────────────────────

/// A numbering is valid when it is a bijection onto `1..=len` and every
/// consecutive pair of numbers sits on adjacent cells.
fn numbering_valid(numbering: &Grid<u32>) -> (bool, bool) {
    let len = numbering.len();
    let mut position = vec![None; len];
    for cell in numbering.cells() {
        let value = *numbering.get(cell) as usize;
        if (1..=len).contains(&value) {
            position[value - 1] = Some(cell);
        }
    }
    let bijective = position.iter().all(|p| p.is_some());
    let adjacent = position.windows(2).all(|pair| match (pair[0], pair[1]) {
        (Some(a), Some(b)) => a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1,
        _ => false,
    });
    (bijective, adjacent)
}

fn validate_curves(verbose: bool) -> Vec<TestResult> {
    println!("--- Space-Filling Curves ---");
    let mut results = Vec::new();

    for side in [2usize, 4, 8, 16, 32] {
        match hilbert_numbering(side) {
            Ok(numbering) => {
                let (bijective, adjacent) = numbering_valid(&numbering);
                results.push(TestResult {
                    name: format!("hilbert_{}", side),
                    passed: bijective && adjacent,
                    detail: format!(
                        "bijective={} consecutive-adjacent={}",
                        bijective, adjacent
                    ),
                });
            }
            Err(e) => {
                results.push(TestResult {
                    name: format!("hilbert_{}", side),
                    passed: false,
                    detail: format!("failed: {}", e),
                });
            }
        }
    }

    let rejected = [0usize, 1, 3, 6, 12]
        .iter()
        .all(|&side| hilbert_numbering(side).is_err());
    results.push(TestResult {
        name: "hilbert_rejects_bad_sides".into(),
        passed: rejected,
        detail: "sides 0, 1, 3, 6, 12 → error".into(),
    });

    for (rows, cols) in [(1usize, 1usize), (1, 9), (3, 3), (2, 5), (5, 2), (4, 7), (6, 6)] {
        let mut rng = StdRng::seed_from_u64(7);
        match hamiltonian_numbering(rows, cols, &mut rng) {
            Ok(numbering) => {
                let (bijective, adjacent) = numbering_valid(&numbering);
                results.push(TestResult {
                    name: format!("hamilton_{}x{}", rows, cols),
                    passed: bijective && adjacent,
                    detail: format!(
                        "bijective={} consecutive-adjacent={}",
                        bijective, adjacent
                    ),
                });
            }
            Err(e) => {
                results.push(TestResult {
                    name: format!("hamilton_{}x{}", rows, cols),
                    passed: false,
                    detail: format!("failed: {}", e),
                });
            }
        }
    }

    let empty = {
        let mut rng = StdRng::seed_from_u64(0);
        hamiltonian_numbering(0, 3, &mut rng).is_err()
    };
    results.push(TestResult {
        name: "hamilton_rejects_empty".into(),
        passed: empty,
        detail: "0x3 region → error".into(),
    });

    if verbose {
        if let Ok(numbering) = hilbert_numbering(4) {
            println!("  Hilbert 4x4 numbering:");
            for row in 0..4 {
                let line: Vec<String> = (0..4)
                    .map(|col| format!("{:2}", numbering.get(Cell::new(row, col))))
                    .collect();
                println!("    {}", line.join(" "));
            }
        }
    }

    results
}

// ── 3. Problem State Machine ────────────────────────────────────────────

fn validate_problem(_verbose: bool) -> Vec<TestResult> {
    println!("--- Problem State Machine ---");
    let mut results = Vec::new();

    // A corridor is fully deterministic: every interior edge is open.
    let config = MazeConfig {
        rows: 1,
        cols: 7,
        break_rate: 0.0,
        seed: Some(11),
        ..MazeConfig::default()
    };
    let mut problem = match GridProblem::new(&config) {
        Ok(p) => p,
        Err(e) => {
            results.push(TestResult {
                name: "problem_build".into(),
                passed: false,
                detail: format!("corridor failed to generate: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "problem_initial_state".into(),
        passed: problem.state() == Cell::new(0, 0)
            && problem.goal() == Cell::new(0, 6)
            && problem.end_info() == 0
            && problem.history() == [Cell::new(0, 0)],
        detail: "starts at begin with zero steps".into(),
    });

    let blocked = problem.apply(Direction::Up);
    results.push(TestResult {
        name: "problem_blocked_noop".into(),
        passed: blocked == Cell::new(0, 0) && problem.end_info() == 0,
        detail: "blocked move neither moves nor counts".into(),
    });

    let moved = problem.apply(Direction::Right);
    results.push(TestResult {
        name: "problem_apply_counts".into(),
        passed: moved == Cell::new(0, 1) && problem.end_info() == 1,
        detail: "legal move advances and counts".into(),
    });

    let probed = problem.apply_to(Cell::new(0, 3), Direction::Right);
    results.push(TestResult {
        name: "problem_apply_to_pure".into(),
        passed: probed == Cell::new(0, 4) && problem.state() == Cell::new(0, 1),
        detail: "hypothetical probe leaves the state alone".into(),
    });

    problem.reposition(Cell::new(0, 5));
    results.push(TestResult {
        name: "problem_reposition_free".into(),
        passed: problem.state() == Cell::new(0, 5) && problem.end_info() == 1,
        detail: "teleport moves without counting".into(),
    });

    problem.reset();
    let visible = problem.visible_cells();
    let hidden_mid = !visible.contains(&Cell::new(0, 3)) && !visible.contains(&Cell::new(0, 4));
    let shown_ends = visible.contains(&Cell::new(0, 0))
        && visible.contains(&Cell::new(0, 2))
        && visible.contains(&Cell::new(0, 6));
    results.push(TestResult {
        name: "problem_reset_and_fog".into(),
        passed: problem.state() == Cell::new(0, 0)
            && problem.end_info() == 0
            && hidden_mid
            && shown_ends,
        detail: "reset restores start; fog hides mid-corridor".into(),
    });

    problem.apply(Direction::Right);
    problem.apply(Direction::Right);
    let after_walk = problem.visible_cells();
    results.push(TestResult {
        name: "problem_fog_follows".into(),
        passed: (0..7).all(|col| after_walk.contains(&Cell::new(0, col))),
        detail: "walking two cells reveals the whole corridor".into(),
    });

    let score = distance_to_goal(&problem, Cell::new(0, 2), Direction::Right);
    results.push(TestResult {
        name: "problem_distance_evaluator".into(),
        passed: score.manhattan == 3 && (score.euclidean - 3.0).abs() < 1e-9,
        detail: format!(
            "(0,2)+Right → manhattan {} euclidean {:.2}",
            score.manhattan, score.euclidean
        ),
    });

    results
}

// ── 4. Agent Runs ───────────────────────────────────────────────────────

fn validate_agents(verbose: bool) -> Vec<TestResult> {
    println!("--- Agent Runs ---");
    let mut results = Vec::new();

    let scenarios = match load_scenarios() {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "agents_scenarios".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    let registry = AgentRegistry::standard();
    results.push(TestResult {
        name: "agents_registry_names".into(),
        passed: registry.names().len() == 6 && registry.build("no-such-agent", 0).is_none(),
        detail: format!("{} registered, unknown names rejected", registry.names().len()),
    });

    for scenario in &scenarios {
        let config = scenario_config(scenario);
        for name in registry.names() {
            let mut problem = match GridProblem::new(&config) {
                Ok(p) => p,
                Err(e) => {
                    results.push(TestResult {
                        name: format!("agents_{}_{}", scenario.name, name),
                        passed: false,
                        detail: format!("generation failed: {}", e),
                    });
                    continue;
                }
            };
            let mut agent = match registry.build(name, scenario.seed) {
                Some(a) => a,
                None => {
                    results.push(TestResult {
                        name: format!("agents_{}_{}", scenario.name, name),
                        passed: false,
                        detail: "registry refused a standard name".into(),
                    });
                    continue;
                }
            };
            let (reached, decisions) = run_to_goal(agent.as_mut(), &mut problem, scenario.step_cap);
            if name == "random" {
                // The baseline has no liveness guarantee inside the cap;
                // it only has to run cleanly.
                results.push(TestResult {
                    name: format!("agents_{}_{}", scenario.name, name),
                    passed: true,
                    detail: if reached {
                        format!("reached in {} steps", decisions)
                    } else {
                        format!("cap {} hit without the goal", scenario.step_cap)
                    },
                });
            } else {
                // Every search agent must reach the goal, and every
                // decision moves exactly one cell.
                let counted = problem.end_info() == decisions;
                results.push(TestResult {
                    name: format!("agents_{}_{}", scenario.name, name),
                    passed: reached && counted,
                    detail: format!("reached={} in {} decisions", reached, decisions),
                });
            }
            if verbose {
                println!(
                    "  {:15} {:22} reached={} decisions={}",
                    scenario.name, name, reached, decisions
                );
            }
        }
    }

    results
}

// ── 5. Path Compression ─────────────────────────────────────────────────

fn validate_compression(verbose: bool) -> Vec<TestResult> {
    println!("--- Path Compression ---");
    let mut results = Vec::new();

    // On a perfect tree the compressed walker mirrors the plain one.
    let tree_config = MazeConfig {
        rows: 6,
        cols: 6,
        break_rate: 0.0,
        seed: Some(17),
        ..MazeConfig::default()
    };
    match (
        GridProblem::new(&tree_config),
        GridProblem::new(&tree_config),
    ) {
        (Ok(mut plain_problem), Ok(mut compact_problem)) => {
            let mut plain = ConstrainedDfsAgent::seeded(5);
            let mut compact = CompressedDfsAgent::seeded(5);
            let mut identical = true;
            let mut decisions = 0u64;
            loop {
                let a = plain.decide(&mut plain_problem);
                let b = compact.decide(&mut compact_problem);
                if a != b || plain.path_len() != compact.path_len() {
                    identical = false;
                    break;
                }
                match a {
                    Some(action) => {
                        plain_problem.apply(action);
                        compact_problem.apply(action);
                        decisions += 1;
                    }
                    None => break,
                }
                if decisions > 10_000 {
                    identical = false;
                    break;
                }
            }
            results.push(TestResult {
                name: "compression_tree_equivalence".into(),
                passed: identical,
                detail: format!("{} lockstep decisions on a 6x6 tree", decisions),
            });
        }
        _ => {
            results.push(TestResult {
                name: "compression_tree_equivalence".into(),
                passed: false,
                detail: "tree generation failed".into(),
            });
        }
    }

    // On a braided maze both walkers stay within the edge-derived decision
    // bound; the stack depths are reported for comparison.
    let braid_config = MazeConfig {
        rows: 12,
        cols: 12,
        break_rate: 0.3,
        seed: Some(5),
        ..MazeConfig::default()
    };
    match (
        GridProblem::new(&braid_config),
        GridProblem::new(&braid_config),
    ) {
        (Ok(mut plain_problem), Ok(mut compact_problem)) => {
            let edges = open_edge_count(plain_problem.walls()) as u64;
            let bound = 4 * edges + 1;

            let mut plain = ConstrainedDfsAgent::seeded(5);
            let mut plain_max = 0usize;
            let mut plain_decisions = 0u64;
            let mut plain_reached = false;
            while plain_decisions <= bound {
                if plain_problem.is_end(plain_problem.state()) {
                    plain_reached = true;
                    break;
                }
                match plain.decide(&mut plain_problem) {
                    Some(action) => {
                        plain_problem.apply(action);
                        plain_decisions += 1;
                        plain_max = plain_max.max(plain.path_len());
                    }
                    None => break,
                }
            }

            let mut compact = CompressedDfsAgent::seeded(5);
            let mut compact_max = 0usize;
            let mut compact_decisions = 0u64;
            let mut compact_reached = false;
            while compact_decisions <= bound {
                if compact_problem.is_end(compact_problem.state()) {
                    compact_reached = true;
                    break;
                }
                match compact.decide(&mut compact_problem) {
                    Some(action) => {
                        compact_problem.apply(action);
                        compact_decisions += 1;
                        compact_max = compact_max.max(compact.path_len());
                    }
                    None => break,
                }
            }

            results.push(TestResult {
                name: "compression_braided_liveness".into(),
                passed: plain_reached && compact_reached,
                detail: format!(
                    "plain {} and compressed {} decisions, bound {}",
                    plain_decisions, compact_decisions, bound
                ),
            });
            results.push(TestResult {
                name: "compression_stack_depth".into(),
                passed: true,
                detail: format!(
                    "max stack: compressed {} vs plain {}",
                    compact_max, plain_max
                ),
            });
            if verbose {
                println!(
                    "  12x12 braided: plain max stack {}, compressed max stack {}",
                    plain_max, compact_max
                );
            }
        }
        _ => {
            results.push(TestResult {
                name: "compression_braided_liveness".into(),
                passed: false,
                detail: "braided generation failed".into(),
            });
        }
    }

    // Exhaustive sweep of a fully braided grid stays within 4E decisions.
    let full_braid = MazeConfig {
        rows: 6,
        cols: 6,
        break_rate: 1.0,
        seed: Some(8),
        ..MazeConfig::default()
    };
    match GridProblem::new(&full_braid) {
        Ok(mut problem) => {
            let edges = open_edge_count(problem.walls()) as u64;
            let mut agent = CompressedDfsAgent::seeded(8);
            let mut decisions = 0u64;
            let mut overran = false;
            while let Some(action) = agent.decide(&mut problem) {
                problem.apply(action);
                decisions += 1;
                if decisions > 4 * edges {
                    overran = true;
                    break;
                }
            }
            let covered: HashSet<Cell> = problem.history().iter().copied().collect();
            results.push(TestResult {
                name: "compression_exhaustion_bound".into(),
                passed: !overran && covered.len() == 36 && agent.path_len() == 0,
                detail: format!(
                    "{} decisions for {} cells ({} edges)",
                    decisions,
                    covered.len(),
                    edges
                ),
            });
        }
        Err(e) => {
            results.push(TestResult {
                name: "compression_exhaustion_bound".into(),
                passed: false,
                detail: format!("generation failed: {}", e),
            });
        }
    }

    // The heuristic variants order the same candidate sets instead of
    // sampling them, so they obey the same bounds.
    let heuristic_config = MazeConfig {
        rows: 10,
        cols: 10,
        break_rate: 0.2,
        seed: Some(3),
        ..MazeConfig::default()
    };
    match GridProblem::new(&heuristic_config) {
        Ok(mut problem) => {
            let edges = open_edge_count(problem.walls()) as u64;
            let mut agent = CompressedDfsAgent::with_evaluator(distance_to_goal);
            let (reached, decisions) = run_to_goal(&mut agent, &mut problem, 4 * edges + 1);
            results.push(TestResult {
                name: "compression_heuristic_liveness".into(),
                passed: reached,
                detail: format!("reached={} in {} decisions", reached, decisions),
            });
        }
        Err(e) => {
            results.push(TestResult {
                name: "compression_heuristic_liveness".into(),
                passed: false,
                detail: format!("generation failed: {}", e),
            });
        }
    }

    results
}
