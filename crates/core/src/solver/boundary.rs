//! Wall handling for the velocity field
//!
//! [`close_solid_faces`] zeroes the faces of solid cells inside the border
//! before projection, so walls painted with `set_s` between steps block flow.
//! [`extrapolate`] copies tangential velocity one cell in from each edge onto
//! the border samples, so advection sampling near the walls reads the
//! neighboring flow instead of the zero wall value.

use crate::grid::{FieldData, SOLID};

/// Zero the four faces of every solid cell inside the border ring
///
/// Border cells keep their face values; a prescribed inflow on the left
/// wall lives there.
pub fn close_solid_faces(u: &mut FieldData<f32>, v: &mut FieldData<f32>, s: &FieldData<u8>) {
    let width = s.width();
    let height = s.height();

    for row in 1..height.saturating_sub(1) {
        for col in 1..width.saturating_sub(1) {
            if s.get(row, col) != SOLID {
                continue;
            }
            u.set(row, col, 0.0);
            u.set(row, col + 1, 0.0);
            v.set(row, col, 0.0);
            v.set(row + 1, col, 0.0);
        }
    }
}

/// Mirror tangential velocity onto the border
///
/// - `u` (tangential at bottom/top): row 0 ← row 1, row `h-1` ← row `h-2`
/// - `v` (tangential at left/right): col 0 ← col 1, col `w-1` ← col `w-2`
///
/// Grids thinner than two cells in a direction are left unchanged in that
/// direction.
pub fn extrapolate(u: &mut FieldData<f32>, v: &mut FieldData<f32>) {
    let width = u.width();
    let height = u.height();

    if height >= 2 {
        for col in 0..width {
            u.set(0, col, u.get(1, col));
            u.set(height - 1, col, u.get(height - 2, col));
        }
    }

    if width >= 2 {
        for row in 0..height {
            v.set(row, 0, v.get(row, 1));
            v.set(row, width - 1, v.get(row, width - 2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FLUID;

    fn ramp(width: usize, height: usize) -> FieldData<f32> {
        let mut field = FieldData::new(width, height);
        for row in 0..height {
            for col in 0..width {
                field.set(row, col, (row * 10 + col) as f32);
            }
        }
        field
    }

    #[test]
    fn test_u_copied_to_bottom_and_top_rows() {
        let mut u = ramp(4, 5);
        let mut v = ramp(4, 5);
        extrapolate(&mut u, &mut v);
        for col in 0..4 {
            assert_eq!(u.get(0, col), u.get(1, col));
            assert_eq!(u.get(4, col), u.get(3, col));
            // Interior rows untouched
            assert_eq!(u.get(2, col), (20 + col) as f32);
        }
    }

    #[test]
    fn test_v_copied_to_left_and_right_cols() {
        let mut u = ramp(4, 5);
        let mut v = ramp(4, 5);
        extrapolate(&mut u, &mut v);
        for row in 0..5 {
            assert_eq!(v.get(row, 0), v.get(row, 1));
            assert_eq!(v.get(row, 3), v.get(row, 2));
            assert_eq!(v.get(row, 1), (row * 10 + 1) as f32);
        }
    }

    #[test]
    fn test_interior_solid_faces_are_closed() {
        let mut u = FieldData::with_value(5, 5, 1.0_f32);
        let mut v = FieldData::with_value(5, 5, -1.0_f32);
        let mut s = FieldData::with_value(5, 5, FLUID);
        s.set(2, 2, SOLID);
        close_solid_faces(&mut u, &mut v, &s);

        assert_eq!(u.get(2, 2), 0.0);
        assert_eq!(u.get(2, 3), 0.0);
        assert_eq!(v.get(2, 2), 0.0);
        assert_eq!(v.get(3, 2), 0.0);
        // Neighboring open faces keep their flow
        assert_eq!(u.get(2, 1), 1.0);
        assert_eq!(u.get(2, 4), 1.0);
        assert_eq!(v.get(1, 2), -1.0);
        assert_eq!(v.get(4, 2), -1.0);
    }

    #[test]
    fn test_border_wall_faces_are_kept() {
        // Left wall with an inflow face at u(2, 1)
        let mut u = FieldData::new(5, 5);
        let mut v = FieldData::new(5, 5);
        let mut s = FieldData::with_value(5, 5, FLUID);
        for row in 0..5 {
            s.set(row, 0, SOLID);
        }
        u.set(2, 1, 2.0);
        close_solid_faces(&mut u, &mut v, &s);
        assert_eq!(u.get(2, 1), 2.0);
    }

    #[test]
    fn test_degenerate_grid_does_not_panic() {
        let mut u = ramp(1, 1);
        let mut v = ramp(1, 1);
        extrapolate(&mut u, &mut v);
        close_solid_faces(&mut u, &mut v, &FieldData::new(1, 1));
        assert_eq!(u.get(0, 0), 0.0);
    }
}
