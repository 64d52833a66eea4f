//! Pressure projection (incompressibility)
//!
//! Solves the discrete pressure Poisson equation with successive
//! over-relaxation (Gauss-Seidel). For each fluid cell the divergence
//!
//! ```text
//! div = u[r, c+1] - u[r, c] + v[r+1, c] - v[r, c]
//! ```
//!
//! is removed by pushing a correction through the faces shared with fluid
//! neighbors:
//!
//! ```text
//! p = -div / (sx0 + sx1 + sy0 + sy1) * ω
//! u[r, c]   -= sx0 * p      u[r, c+1] += sx1 * p
//! v[r, c]   -= sy0 * p      v[r+1, c] += sy1 * p
//! ```
//!
//! Cells are visited in row-major order and each update is visible to the
//! cells after it in the same sweep. A red-black or Jacobi ordering converges
//! differently and is not a drop-in replacement.

use crate::grid::{FieldData, SOLID};

/// Parameters for one projection call
#[derive(Debug, Clone, Copy)]
pub struct ProjectionParams {
    /// Number of full sweeps
    pub num_iters: usize,
    /// Over-relaxation factor ω
    pub overrelaxation: f32,
    /// `density * h / dt`, converts corrections to pressure
    pub pressure_scale: f32,
}

/// Net outflow of cell `(row, col)`
///
/// Positive means too much outflow, negative too much inflow, zero means
/// the cell is incompressible.
#[inline]
#[must_use]
pub fn divergence(u: &FieldData<f32>, v: &FieldData<f32>, row: usize, col: usize) -> f32 {
    u.get(row, col + 1) - u.get(row, col) + v.get(row + 1, col) - v.get(row, col)
}

/// Make the velocity field approximately divergence-free
///
/// Resets `p` and then runs `num_iters` Gauss-Seidel sweeps over the
/// interior cells, accumulating the applied corrections into `p`. Solid
/// cells and cells with no fluid neighbor are skipped.
///
/// Returns the largest absolute divergence met during the final sweep
/// (0 when no sweep ran).
pub fn project(
    u: &mut FieldData<f32>,
    v: &mut FieldData<f32>,
    s: &FieldData<u8>,
    p: &mut FieldData<f32>,
    params: ProjectionParams,
) -> f32 {
    p.fill(0.0);

    let width = s.width();
    let height = s.height();
    let mut max_div = 0.0_f32;

    for _iter in 0..params.num_iters {
        max_div = 0.0;

        for row in 1..height.saturating_sub(1) {
            for col in 1..width.saturating_sub(1) {
                if s.get(row, col) == SOLID {
                    continue;
                }

                let sx0 = f32::from(s.get(row, col - 1));
                let sx1 = f32::from(s.get(row, col + 1));
                let sy0 = f32::from(s.get(row - 1, col));
                let sy1 = f32::from(s.get(row + 1, col));
                let s_sum = sx0 + sx1 + sy0 + sy1;

                // Walled in on all sides: nothing can flow, leave it alone
                if s_sum == 0.0 {
                    continue;
                }

                let div = divergence(u, v, row, col);
                max_div = max_div.max(div.abs());

                let correction = -(div / s_sum) * params.overrelaxation;
                p.set(
                    row,
                    col,
                    p.get(row, col) + correction * params.pressure_scale,
                );

                u.set(row, col, u.get(row, col) - sx0 * correction);
                u.set(row, col + 1, u.get(row, col + 1) + sx1 * correction);
                v.set(row, col, v.get(row, col) - sy0 * correction);
                v.set(row + 1, col, v.get(row + 1, col) + sy1 * correction);
            }
        }
    }

    max_div
}
