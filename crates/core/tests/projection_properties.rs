//! Pressure projection behaviour on small hand-built grids
//!
//! Run with: `cargo test --test projection_properties`

mod common;

use smoke_sim_core::diagnostics::{max_divergence, total_divergence};
use smoke_sim_core::{FluidGrid, Side, Solver, SolverConfig, SOLID};

/// Closed box with a deterministic, non-uniform velocity on the faces
/// between fluid cells. Wall faces stay at rest so the net flux is zero.
fn disturbed_box(size: usize) -> FluidGrid {
    let mut grid = FluidGrid::new(size, size);
    grid.enclose(&Side::ALL);
    for row in 1..size - 1 {
        for col in 2..size - 1 {
            grid.set_u(row, col, ((row * 7 + col * 3) % 5) as f32 * 0.1 - 0.2);
        }
    }
    for row in 2..size - 1 {
        for col in 1..size - 1 {
            grid.set_v(row, col, ((row * 3 + col * 5) % 7) as f32 * 0.1 - 0.3);
        }
    }
    grid
}

fn solver_with(grid: FluidGrid, overrelaxation: f32) -> Solver {
    let config = SolverConfig {
        overrelaxation,
        gravity: 0.0,
        ..Default::default()
    };
    Solver::new(grid, config)
}

#[test]
fn test_divergence_decreases_with_sweeps() {
    for omega in [1.1, 1.5, 1.9] {
        let initial = total_divergence(&disturbed_box(12));
        assert!(initial > 1.0);

        let mut short = solver_with(disturbed_box(12), omega);
        short.project(1.0 / 60.0, 10);
        let after_short = total_divergence(short.grid());

        let mut long = solver_with(disturbed_box(12), omega);
        long.project(1.0 / 60.0, 40);
        let after_long = total_divergence(long.grid());

        assert!(
            after_short < initial,
            "omega={omega}: {after_short} !< {initial}"
        );
        assert!(
            after_long < after_short,
            "omega={omega}: {after_long} !< {after_short}"
        );
        assert!(after_long < 0.05 * initial, "omega={omega}: {after_long}");
    }
}

#[test]
fn test_single_sweep_reduces_point_source() {
    // One disturbed face between (2,1) and (2,2) in a 3x3 interior
    let mut grid = FluidGrid::new(5, 5);
    grid.enclose(&Side::ALL);
    grid.set_u(2, 2, 1.0);
    assert_eq!(total_divergence(&grid), 2.0);

    let mut solver = solver_with(grid, 1.5);
    let residual = solver.project(1.0 / 60.0, 1);
    assert_eq!(residual, 1.0);

    let after = total_divergence(solver.grid());
    assert!((after - 1.6875).abs() < 1e-5, "got {after}");
}

#[test]
fn test_walls_are_untouched_by_projection() {
    let mut grid = disturbed_box(10);
    grid.mark_solid(4, 4);
    grid.mark_solid(4, 5);
    let before = grid.clone();

    let mut solver = solver_with(grid, 1.9);
    solver.project(1.0 / 60.0, 40);
    let grid = solver.grid();

    for row in 0..10 {
        for col in 0..10 {
            assert_eq!(grid.get_s(row, col), before.get_s(row, col));
            if grid.get_s(row, col) == SOLID {
                assert_eq!(grid.get_p(row, col), 0.0, "p at wall ({row},{col})");
            }
        }
    }

    // Faces of the obstacle never move
    assert_eq!(grid.get_u(4, 4), 0.0);
    assert_eq!(grid.get_u(4, 5), 0.0);
    assert_eq!(grid.get_u(4, 6), 0.0);
    assert_eq!(grid.get_v(4, 4), 0.0);
    assert_eq!(grid.get_v(5, 5), 0.0);
}

#[test]
fn test_gravity_then_projection_on_small_grid() {
    // 4x4 all-fluid grid at rest
    let mut solver = solver_with(FluidGrid::new(4, 4), 1.9);
    let dt = 1.0 / 60.0;

    solver.update_velocities(dt, -9.8);
    for row in 0..4 {
        for col in 0..4 {
            let v = solver.grid().get_v(row, col);
            assert!((v - (-0.1633)).abs() < 1e-4, "v({row},{col}) = {v}");
        }
    }

    solver.project(dt, 20);
    let grid = solver.grid();
    for row in grid.interior_rows() {
        for col in grid.interior_cols() {
            assert!(solver.calc_divergence(row, col).abs() < 1e-3);
        }
    }
}

#[test]
fn test_gravity_then_projection_in_closed_box() {
    // 2x2 fluid interior inside a 4x4 box
    let mut grid = FluidGrid::new(4, 4);
    grid.enclose(&Side::ALL);
    let mut solver = solver_with(grid, 1.5);
    let dt = 1.0 / 60.0;

    solver.update_velocities(dt, -9.8);
    for col in 1..3 {
        let v = solver.grid().get_v(2, col);
        assert!((v - (-0.1633)).abs() < 1e-4, "v(2,{col}) = {v}");
        // Floor and ceiling faces stay closed
        assert_eq!(solver.grid().get_v(1, col), 0.0);
        assert_eq!(solver.grid().get_v(3, col), 0.0);
    }
    assert!(solver.calc_divergence(1, 1).abs() > 0.1);

    solver.project(dt, 20);
    let grid = solver.grid();
    for row in grid.interior_rows() {
        for col in grid.interior_cols() {
            let div = solver.calc_divergence(row, col);
            assert!(div.abs() < 1e-3, "div({row},{col}) = {div}");
        }
    }
    // The fluid cannot fall through the floor
    assert!(grid.get_v(2, 1).abs() < 1e-3);
    assert!(grid.get_p(1, 1) > grid.get_p(2, 1));
}

#[test]
fn test_obstacle_deflects_oncoming_flow() {
    // Uniform rightward flow hitting a wall cell painted into a 5x5 grid
    let mut grid = FluidGrid::new(5, 5);
    for row in 0..5 {
        for col in 0..5 {
            grid.set_u(row, col, 1.0);
        }
    }
    grid.set_s(2, 2, SOLID);
    assert_eq!(grid.get_u(2, 2), 1.0);

    let mut solver = solver_with(grid, 1.9);
    solver.project(1.0 / 60.0, 40);
    let grid = solver.grid();

    assert_eq!(grid.get_s(2, 2), SOLID);
    assert_eq!(grid.get_p(2, 2), 0.0);

    // Faces of the wall stay closed
    assert_eq!(grid.get_u(2, 2), 0.0);
    assert_eq!(grid.get_u(2, 3), 0.0);

    // Upstream flow slows down in front of the wall and builds pressure
    assert!(grid.get_u(2, 1) < 0.9, "u(2,1) = {}", grid.get_u(2, 1));
    assert!(grid.get_p(2, 1) > 0.0);
    assert!(grid.get_p(2, 3) < 0.0);

    // Flow is diverted around the obstacle
    assert!(grid.get_v(2, 1) < 0.0);
    assert!(grid.get_v(3, 1) > 0.0);
    assert!(max_divergence(grid) < 0.05);
}
