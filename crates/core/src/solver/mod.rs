//! Incompressible flow solver on the MAC grid
//!
//! One simulation step is five full sweeps over the grid, always in this order:
//!
//! 1. integrate forces (gravity on `v` faces not touching a wall)
//! 2. pressure projection (solid faces closed, then Gauss-Seidel, `num_iters` sweeps)
//! 3. boundary extrapolation
//! 4. velocity advection
//! 5. smoke advection
//!
//! Each pass completes before the next one starts. Advection writes into the
//! scratch buffers and commits with a swap, so it can process rows in
//! parallel; projection is a sequential sweep.
//!
//! # Example
//!
//! ```rust
//! use smoke_sim_core::{FluidGrid, Solver, SolverConfig};
//!
//! let grid = FluidGrid::with_interior(32, 32);
//! let mut solver = Solver::try_new(grid, SolverConfig::default()).unwrap();
//! solver.advance();
//! assert_eq!(solver.steps_taken(), 1);
//! ```

pub mod advection;
pub mod boundary;
#[allow(clippy::module_name_repetitions)]
mod config;
#[allow(clippy::module_name_repetitions)]
mod error;
pub mod forces;
pub mod profiler;
pub mod projection;
pub mod sampling;

// Re-exports
pub use config::{constants, SolverConfig};
pub use error::SolverError;
pub use profiler::{Pass, ProfilerScope, StepTimings};
pub use projection::ProjectionParams;
pub use sampling::{sample_field, velocity_at};

use crate::grid::FluidGrid;
use tracing::{debug, info, warn};

/// Owns a grid and advances it one fixed timestep at a time
#[derive(Debug, Clone)]
pub struct Solver {
    grid: FluidGrid,
    config: SolverConfig,

    /// Statistics
    steps_taken: u64,
    elapsed_time: f64,
    timings: StepTimings,
}

impl Solver {
    /// Create a solver without validating the configuration
    ///
    /// Out-of-range parameters never panic, but may produce non-finite
    /// fields. Use [`Solver::try_new`] at an outer boundary.
    #[must_use]
    pub fn new(grid: FluidGrid, config: SolverConfig) -> Self {
        if !(1.0..2.0).contains(&config.overrelaxation) {
            warn!(
                "Over-relaxation {} is outside [1, 2); projection may diverge",
                config.overrelaxation
            );
        }

        info!(
            "Solver initialized: {}x{} grid, h={:.4}m, dt={:.4}s, omega={:.2}, iters={}",
            grid.width(),
            grid.height(),
            config.grid_spacing,
            config.dt,
            config.overrelaxation,
            config.num_iters
        );

        Self {
            grid,
            config,
            steps_taken: 0,
            elapsed_time: 0.0,
            timings: StepTimings::new(),
        }
    }

    /// Create a solver after validating the configuration and grid size
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] if a parameter is out of range or the grid
    /// has no interior cell.
    pub fn try_new(grid: FluidGrid, config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        if grid.width() < 3 || grid.height() < 3 {
            return Err(SolverError::GridTooSmall {
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(Self::new(grid, config))
    }

    /// Advance one step using the timestep, gravity and sweep count from the config
    pub fn advance(&mut self) {
        let SolverConfig {
            dt,
            gravity,
            num_iters,
            ..
        } = self.config;
        self.step(dt, gravity, num_iters);
    }

    /// Advance one step
    ///
    /// Density, grid spacing and over-relaxation come from the config.
    ///
    /// # Arguments
    ///
    /// * `dt` - Timestep in seconds
    /// * `gravity` - Vertical acceleration in m/s² (negative = toward row 0)
    /// * `num_iters` - Projection sweeps
    pub fn step(&mut self, dt: f32, gravity: f32, num_iters: usize) {
        let frame = ProfilerScope::new("step");

        self.update_velocities(dt, gravity);
        let residual = self.project(dt, num_iters);
        self.extrapolate();
        self.advect_velocity(dt);
        self.advect_smoke(dt);

        self.steps_taken += 1;
        self.elapsed_time += f64::from(dt);
        self.timings.record_step(frame.elapsed_ms());

        debug!(
            "Step {}: t={:.3}s, dt={:.4}s, residual={:.3e}, {:.2}ms",
            self.steps_taken,
            self.elapsed_time,
            dt,
            residual,
            self.timings.step_ms()
        );
    }

    /// Apply gravity to every vertical velocity face that does not border a wall
    pub fn update_velocities(&mut self, dt: f32, gravity: f32) {
        let scope = ProfilerScope::for_pass(Pass::Forces);
        let (v, s) = self.grid.force_buffers();
        forces::apply_gravity(v, s, dt, gravity);
        self.timings.record(Pass::Forces, scope.elapsed_ms());
    }

    /// Run `num_iters` projection sweeps; recomputes the pressure field
    ///
    /// Faces of solid cells inside the border are zeroed first, so walls
    /// added with [`FluidGrid::set_s`] block flow from the next projection on.
    /// Returns the largest absolute divergence seen in the final sweep.
    pub fn project(&mut self, dt: f32, num_iters: usize) -> f32 {
        let scope = ProfilerScope::for_pass(Pass::Project);
        let params = ProjectionParams {
            num_iters,
            overrelaxation: self.config.overrelaxation,
            pressure_scale: self.config.pressure_scale(dt),
        };
        let (u, v, s, p) = self.grid.projection_buffers();
        boundary::close_solid_faces(u, v, s);
        let residual = projection::project(u, v, s, p, params);
        self.timings.record(Pass::Project, scope.elapsed_ms());
        residual
    }

    /// Mirror tangential velocity onto the border samples
    pub fn extrapolate(&mut self) {
        let scope = ProfilerScope::for_pass(Pass::Extrapolate);
        let (u, v) = self.grid.velocity_mut();
        boundary::extrapolate(u, v);
        self.timings.record(Pass::Extrapolate, scope.elapsed_ms());
    }

    /// Semi-Lagrangian advection of `u` and `v`
    pub fn advect_velocity(&mut self, dt: f32) {
        let scope = ProfilerScope::for_pass(Pass::AdvectVelocity);
        advection::advect_velocity(&mut self.grid, dt, self.config.grid_spacing);
        self.timings.record(Pass::AdvectVelocity, scope.elapsed_ms());
    }

    /// Semi-Lagrangian advection of the smoke field
    pub fn advect_smoke(&mut self, dt: f32) {
        let scope = ProfilerScope::for_pass(Pass::AdvectSmoke);
        advection::advect_smoke(&mut self.grid, dt, self.config.grid_spacing);
        self.timings.record(Pass::AdvectSmoke, scope.elapsed_ms());
    }

    /// Divergence of cell `(row, col)` in the current velocity field
    #[must_use]
    pub fn calc_divergence(&self, row: usize, col: usize) -> f32 {
        crate::diagnostics::divergence_at(&self.grid, row, col)
    }

    /// The simulated grid
    #[must_use]
    pub fn grid(&self) -> &FluidGrid {
        &self.grid
    }

    /// Mutable grid access for editing walls and smoke between steps
    pub fn grid_mut(&mut self) -> &mut FluidGrid {
        &mut self.grid
    }

    /// Give the grid back
    #[must_use]
    pub fn into_grid(self) -> FluidGrid {
        self.grid
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of completed steps
    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Simulated time in seconds
    #[must_use]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Wall-clock duration of the last step in milliseconds
    #[must_use]
    pub fn last_step_ms(&self) -> f64 {
        self.timings.step_ms()
    }

    /// Duration of the latest run of each pass, plus the last full step
    #[must_use]
    pub fn step_timings(&self) -> &StepTimings {
        &self.timings
    }
}
