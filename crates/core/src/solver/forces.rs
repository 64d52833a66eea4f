//! External force integration
//!
//! Gravity is the only body force. A `v` face touching a solid cell is a
//! closed wall face and carries no flow, so it is left out; every other face
//! gets the same `dt * gravity` increment.

use crate::grid::{FieldData, SOLID};
use rayon::prelude::*;

/// Whether the `v` face at the bottom of `(row, col)` borders a solid cell
///
/// The cell below row 0 lies outside the grid and does not close the face.
#[inline]
#[must_use]
pub fn is_wall_face_v(s: &FieldData<u8>, row: usize, col: usize) -> bool {
    s.get(row, col) == SOLID || (row >= 1 && s.get(row - 1, col) == SOLID)
}

/// Explicit Euler update `v += dt * gravity` over every open face
pub fn apply_gravity(v: &mut FieldData<f32>, s: &FieldData<u8>, dt: f32, gravity: f32) {
    let width = v.width();
    if width == 0 {
        return;
    }

    let dv = dt * gravity;
    v.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, value) in out.iter_mut().enumerate() {
                if !is_wall_face_v(s, row, col) {
                    *value += dv;
                }
            }
        });
}
