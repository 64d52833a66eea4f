//! End-to-end runs of the preset scenes and whole solver steps
//!
//! Run with: `cargo test --test scene_runs`

mod common;

use smoke_sim_core::{
    FieldStats, FluidGrid, Scene, SceneParams, Side, Solver, SolverConfig, SOLID,
};

fn max_interior_speed(grid: &FluidGrid) -> f32 {
    grid.interior_rows()
        .flat_map(|row| grid.interior_cols().map(move |col| (row, col)))
        .map(|(row, col)| grid.get_u(row, col).abs().max(grid.get_v(row, col).abs()))
        .fold(0.0, f32::max)
}

fn assert_fields_sane(grid: &FluidGrid) {
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            assert!(grid.get_u(row, col).is_finite(), "u({row},{col})");
            assert!(grid.get_v(row, col).is_finite(), "v({row},{col})");
            assert!(grid.get_p(row, col).is_finite(), "p({row},{col})");
            let m = grid.get_m(row, col);
            assert!((-1e-4..=1.0 + 1e-4).contains(&m), "m({row},{col}) = {m}");
        }
    }
}

#[test]
fn test_tank_scene_runs() {
    let (grid, config) = Scene::Tank.build(24, 24);
    let walls_before: Vec<u8> = (0..24).map(|row| grid.get_s(row, 0)).collect();

    let mut solver = Solver::try_new(grid, config).expect("valid tank config");
    for _ in 0..30 {
        solver.advance();
    }

    let grid = solver.grid();
    assert_fields_sane(grid);
    let walls_after: Vec<u8> = (0..24).map(|row| grid.get_s(row, 0)).collect();
    assert_eq!(walls_before, walls_after);
    assert!(walls_after.iter().all(|&s| s == SOLID));
    assert_eq!(solver.steps_taken(), 30);

    // The water stays put: smoke keeps its layer and nothing leaks through the floor
    assert!(grid.get_m(20, 12) < 0.5, "m(20,12) = {}", grid.get_m(20, 12));
    let clear: f32 = grid
        .interior_rows()
        .flat_map(|row| grid.interior_cols().map(move |col| grid.get_m(row, col)))
        .sum();
    assert!((clear - 330.0).abs() < 15.0, "clear water total {clear}");
    let speed = max_interior_speed(grid);
    assert!(speed < 0.1, "max interior speed {speed}");
}

#[test]
fn test_closed_box_stays_at_rest() {
    let mut grid = FluidGrid::new(8, 8);
    grid.enclose(&Side::ALL);
    let mut solver = Solver::try_new(grid, SolverConfig::default()).expect("valid config");
    for _ in 0..10 {
        solver.advance();
    }

    let grid = solver.grid();
    assert_fields_sane(grid);
    assert!(grid.get_v(4, 4).abs() < 0.05, "v(4,4) = {}", grid.get_v(4, 4));
    let speed = max_interior_speed(grid);
    assert!(speed < 0.05, "max interior speed {speed}");

    // Floor and ceiling faces carry no flow
    assert_eq!(grid.get_v(1, 4), 0.0);
    assert_eq!(grid.get_v(7, 4), 0.0);

    // Gravity is held by a hydrostatic pressure gradient
    assert!(grid.get_p(1, 4) > grid.get_p(6, 4));
}

#[test]
fn test_wind_tunnel_carries_smoke_downstream() {
    let (grid, config) = Scene::WindTunnel.build(40, 20);
    let obstacle_cells = grid
        .interior_rows()
        .flat_map(|row| grid.interior_cols().map(move |col| (row, col)))
        .filter(|&(row, col)| grid.get_s(row, col) == SOLID)
        .count();
    assert!(obstacle_cells > 0);

    let mut solver = Solver::try_new(grid, config).expect("valid tunnel config");
    for _ in 0..10 {
        solver.advance();
    }

    let grid = solver.grid();
    assert_fields_sane(grid);

    // The inflow face is never touched by projection or advection
    assert_eq!(grid.get_u(10, 1), 2.0);

    // Smoke released at the left wall has entered the channel
    let darkened = (1..12).filter(|&col| grid.get_m(10, col) < 0.5).count();
    assert!(darkened >= 5, "only {darkened} dark cells");

    // Rows far from the streak stay clear
    assert!((grid.get_m(2, 5) - 1.0).abs() < 1e-4);

    let config = solver.config();
    let stats = FieldStats::collect(grid, config.grid_spacing, config.dt);
    assert!(stats.mean_smoke < 1.0);
    assert!(stats.max_speed > 1.0);
}

#[test]
fn test_still_uniform_smoke_is_unchanged() {
    let config = SolverConfig {
        gravity: 0.0,
        ..Default::default()
    };
    let mut solver =
        Solver::try_new(FluidGrid::with_interior(16, 12), config).expect("valid config");
    solver.advance();

    let grid = solver.grid();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            assert!((grid.get_m(row, col) - 1.0).abs() < 1e-6);
            assert_eq!(grid.get_u(row, col), 0.0);
            assert_eq!(grid.get_v(row, col), 0.0);
        }
    }
}

#[test]
fn test_custom_scene_params() {
    let params = SceneParams {
        inflow_velocity: 1.0,
        obstacle_radius: 0.25,
        ..Default::default()
    };
    let (grid, config) = Scene::WindTunnel.build_with(30, 16, &params);
    assert_eq!(grid.get_u(8, 1), 1.0);
    assert!(config.validate().is_ok());

    let (small, _) = Scene::WindTunnel.build(30, 16);
    assert!(grid.fluid_cell_count() < small.fluid_cell_count());
}

#[test]
fn test_config_from_partial_json() {
    let config: SolverConfig =
        serde_json::from_str(r#"{ "dt": 0.02, "num_iters": 10 }"#).expect("valid json");
    assert_eq!(config.dt, 0.02);
    assert_eq!(config.num_iters, 10);
    assert_eq!(config.overrelaxation, SolverConfig::default().overrelaxation);
    assert_eq!(config.density, SolverConfig::default().density);
}

#[test]
fn test_grid_serializes_roundtrip_through_json() {
    let (grid, _) = Scene::WindTunnel.build(12, 8);
    let json = serde_json::to_string(&grid).expect("serialize grid");
    let restored: FluidGrid = serde_json::from_str(&json).expect("deserialize grid");
    assert_eq!(restored, grid);
}
