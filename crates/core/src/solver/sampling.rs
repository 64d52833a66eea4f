//! Bilinear sampling on the staggered grid
//!
//! Each field lives at a different offset inside the cell, so a physical
//! point is first shifted by the field's offset, then located between four
//! stored samples and blended:
//!
//! ```text
//! f = sx*sy*f00 + tx*sy*f10 + tx*ty*f11 + sx*ty*f01,   sx = 1 - tx, sy = 1 - ty
//! ```
//!
//! | Field | offset (dx, dy) |
//! |-------|-----------------|
//! | `U`   | (0, h/2)        |
//! | `V`   | (h/2, 0)        |
//! | `M`   | (h/2, h/2)      |

use crate::core_types::Vec2;
use crate::grid::{FieldKind, GridView};

/// Offset of a field's sample points from the cell corner
#[inline]
fn staggering(field: FieldKind, h: f32) -> (f32, f32) {
    let half = 0.5 * h;
    match field {
        FieldKind::U => (0.0, half),
        FieldKind::V => (half, 0.0),
        FieldKind::M => (half, half),
    }
}

/// Lower index, upper index and blend fraction along one axis
///
/// Indices are clamped to `[0, n-1]`.
#[inline]
fn bracket(coord: f32, h: f32, n: usize) -> (usize, usize, f32) {
    let last = n - 1;
    let i0 = ((coord / h).floor().max(0.0) as usize).min(last);
    let t = (coord - i0 as f32 * h) / h;
    let i1 = (i0 + 1).min(last);
    (i0, i1, t)
}

/// Bilinearly interpolate `field` at physical position `pos`
///
/// The point is clamped into `[h, width*h] x [h, height*h]` first, so any
/// input (including points far outside the domain) reads valid samples.
/// Pure: the grid is not modified.
#[must_use]
pub fn sample_field(view: &GridView<'_>, pos: Vec2, field: FieldKind, h: f32) -> f32 {
    let width = view.width();
    let height = view.height();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let x = pos.x.min(width as f32 * h).max(h);
    let y = pos.y.min(height as f32 * h).max(h);

    let (dx, dy) = staggering(field, h);
    let (x0, x1, tx) = bracket(x - dx, h, width);
    let (y0, y1, ty) = bracket(y - dy, h, height);

    let sx = 1.0 - tx;
    let sy = 1.0 - ty;

    let f = view.field(field);
    sx * sy * f.get(y0, x0)
        + tx * sy * f.get(y0, x1)
        + tx * ty * f.get(y1, x1)
        + sx * ty * f.get(y1, x0)
}

/// Both velocity components at a physical position
#[must_use]
pub fn velocity_at(view: &GridView<'_>, pos: Vec2, h: f32) -> Vec2 {
    Vec2::new(
        sample_field(view, pos, FieldKind::U, h),
        sample_field(view, pos, FieldKind::V, h),
    )
}

/// Average of the four `u` samples around the `v` sample of `(row, col)`
#[inline]
#[must_use]
pub fn avg_u(view: &GridView<'_>, row: usize, col: usize) -> f32 {
    let below = row.wrapping_sub(1);
    (view.u(below, col) + view.u(row, col) + view.u(below, col + 1) + view.u(row, col + 1)) * 0.25
}

/// Average of the four `v` samples around the `u` sample of `(row, col)`
#[inline]
#[must_use]
pub fn avg_v(view: &GridView<'_>, row: usize, col: usize) -> f32 {
    let left = col.wrapping_sub(1);
    (view.v(row, left) + view.v(row, col) + view.v(row + 1, left) + view.v(row + 1, col)) * 0.25
}
