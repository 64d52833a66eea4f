//! Field statistics for monitoring a running simulation
//!
//! These are read-only reductions over the grid. The divergence figures are
//! taken over interior fluid cells, the region projection acts on.

use crate::grid::FluidGrid;
use serde::{Deserialize, Serialize};

/// Net outflow of cell `(row, col)`
#[must_use]
pub fn divergence_at(grid: &FluidGrid, row: usize, col: usize) -> f32 {
    grid.get_u(row, col + 1) - grid.get_u(row, col) + grid.get_v(row + 1, col) - grid.get_v(row, col)
}

/// Iterate `(row, col)` over interior fluid cells
fn interior_fluid_cells(grid: &FluidGrid) -> impl Iterator<Item = (usize, usize)> + '_ {
    grid.interior_rows().flat_map(move |row| {
        grid.interior_cols()
            .filter(move |&col| grid.is_fluid(row, col))
            .map(move |col| (row, col))
    })
}

/// Sum of absolute divergence over interior fluid cells
#[must_use]
pub fn total_divergence(grid: &FluidGrid) -> f32 {
    interior_fluid_cells(grid)
        .map(|(row, col)| divergence_at(grid, row, col).abs())
        .sum()
}

/// Largest absolute divergence over interior fluid cells
#[must_use]
pub fn max_divergence(grid: &FluidGrid) -> f32 {
    interior_fluid_cells(grid)
        .map(|(row, col)| divergence_at(grid, row, col).abs())
        .fold(0.0, f32::max)
}

/// Snapshot of grid-wide quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Sum of |divergence| over interior fluid cells
    pub total_divergence: f32,
    /// Max |divergence| over interior fluid cells
    pub max_divergence: f32,
    /// Sum of smoke density over interior fluid cells
    pub total_smoke: f32,
    /// Mean smoke density over interior fluid cells
    pub mean_smoke: f32,
    /// Largest cell-centred speed (m/s)
    pub max_speed: f32,
    /// Courant number `max_speed * dt / h`; above 1 the backtrace skips cells
    pub cfl: f32,
    /// Interior fluid cells
    pub fluid_cells: usize,
    /// Largest absolute pressure from the last projection
    pub max_pressure: f32,
}

impl FieldStats {
    /// Reduce the grid to summary statistics
    ///
    /// # Arguments
    ///
    /// * `grid` - Grid to inspect
    /// * `grid_spacing` - Cell size in meters
    /// * `dt` - Timestep in seconds, for the Courant number
    #[must_use]
    pub fn collect(grid: &FluidGrid, grid_spacing: f32, dt: f32) -> Self {
        let mut stats = Self {
            total_divergence: 0.0,
            max_divergence: 0.0,
            total_smoke: 0.0,
            mean_smoke: 0.0,
            max_speed: 0.0,
            cfl: 0.0,
            fluid_cells: 0,
            max_pressure: 0.0,
        };

        for (row, col) in interior_fluid_cells(grid) {
            let div = divergence_at(grid, row, col).abs();
            stats.total_divergence += div;
            stats.max_divergence = stats.max_divergence.max(div);
            stats.total_smoke += grid.get_m(row, col);
            stats.max_pressure = stats.max_pressure.max(grid.get_p(row, col).abs());

            let u = 0.5 * (grid.get_u(row, col) + grid.get_u(row, col + 1));
            let v = 0.5 * (grid.get_v(row, col) + grid.get_v(row + 1, col));
            stats.max_speed = stats.max_speed.max(u.hypot(v));

            stats.fluid_cells += 1;
        }

        if stats.fluid_cells > 0 {
            stats.mean_smoke = stats.total_smoke / stats.fluid_cells as f32;
        }
        if grid_spacing > 0.0 {
            stats.cfl = stats.max_speed * dt / grid_spacing;
        }
        stats
    }
}
