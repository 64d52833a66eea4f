//! Semi-Lagrangian advection of velocity and smoke
//!
//! Every sample point is traced backward by `dt` through the current
//! velocity field and the previous field is resampled there. All reads go
//! through an immutable [`GridView`] of the current buffers while results
//! land in the scratch buffers, so rows are computed in parallel and
//! committed with a buffer swap once the pass is complete.

use super::sampling::{avg_u, avg_v, sample_field};
use crate::core_types::Vec2;
use crate::grid::{FieldKind, FluidGrid, GridView, SOLID};
use rayon::prelude::*;

/// Whether the `u` sample of `(row, col)` is advected
///
/// The face must separate two fluid cells and must not sit on the top
/// border row.
#[inline]
#[must_use]
pub fn advects_u(view: &GridView<'_>, row: usize, col: usize) -> bool {
    row >= 1
        && col >= 1
        && row + 1 < view.height()
        && view.s(row, col) != SOLID
        && view.s(row, col - 1) != SOLID
}

/// Whether the `v` sample of `(row, col)` is advected
///
/// The face must separate two fluid cells and must not sit on the right
/// border column.
#[inline]
#[must_use]
pub fn advects_v(view: &GridView<'_>, row: usize, col: usize) -> bool {
    row >= 1
        && col >= 1
        && col + 1 < view.width()
        && view.s(row, col) != SOLID
        && view.s(row - 1, col) != SOLID
}

/// Whether the smoke at `(row, col)` is advected (interior fluid cells)
#[inline]
#[must_use]
pub fn advects_m(view: &GridView<'_>, row: usize, col: usize) -> bool {
    row >= 1
        && col >= 1
        && row + 1 < view.height()
        && col + 1 < view.width()
        && view.s(row, col) != SOLID
}

/// Trace one `u` sample back and resample
fn backtrace_u(view: &GridView<'_>, row: usize, col: usize, dt: f32, h: f32) -> f32 {
    let pos = Vec2::new(col as f32 * h, row as f32 * h + 0.5 * h);
    let vel = Vec2::new(view.u(row, col), avg_v(view, row, col));
    sample_field(view, pos - vel * dt, FieldKind::U, h)
}

/// Trace one `v` sample back and resample
fn backtrace_v(view: &GridView<'_>, row: usize, col: usize, dt: f32, h: f32) -> f32 {
    let pos = Vec2::new(col as f32 * h + 0.5 * h, row as f32 * h);
    let vel = Vec2::new(avg_u(view, row, col), view.v(row, col));
    sample_field(view, pos - vel * dt, FieldKind::V, h)
}

/// Trace one cell centre back and resample the smoke
fn backtrace_m(view: &GridView<'_>, row: usize, col: usize, dt: f32, h: f32) -> f32 {
    let pos = Vec2::new(col as f32 * h + 0.5 * h, row as f32 * h + 0.5 * h);
    let vel = Vec2::new(
        0.5 * (view.u(row, col) + view.u(row, col + 1)),
        0.5 * (view.v(row, col) + view.v(row + 1, col)),
    );
    sample_field(view, pos - vel * dt, FieldKind::M, h)
}

/// Advect both velocity components through themselves
///
/// Skipped samples (next to a solid cell or on the outer edge) keep their
/// current value. Both fields are committed together after the pass.
pub fn advect_velocity(grid: &mut FluidGrid, dt: f32, h: f32) {
    if grid.is_empty() {
        return;
    }

    {
        let (view, next_u, next_v) = grid.velocity_advection_buffers();
        let width = view.width();

        next_u
            .as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, value) in out.iter_mut().enumerate() {
                    *value = if advects_u(&view, row, col) {
                        backtrace_u(&view, row, col, dt, h)
                    } else {
                        view.u(row, col)
                    };
                }
            });

        next_v
            .as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, value) in out.iter_mut().enumerate() {
                    *value = if advects_v(&view, row, col) {
                        backtrace_v(&view, row, col, dt, h)
                    } else {
                        view.v(row, col)
                    };
                }
            });
    }

    grid.swap_u(false);
    grid.swap_v(false);
}

/// Advect the smoke field through the current velocity
///
/// Solid and border cells keep their current value.
pub fn advect_smoke(grid: &mut FluidGrid, dt: f32, h: f32) {
    if grid.is_empty() {
        return;
    }

    {
        let (view, next_m) = grid.smoke_advection_buffers();
        let width = view.width();

        next_m
            .as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, value) in out.iter_mut().enumerate() {
                    *value = if advects_m(&view, row, col) {
                        backtrace_m(&view, row, col, dt, h)
                    } else {
                        view.m(row, col)
                    };
                }
            });
    }

    grid.swap_m(false);
}
