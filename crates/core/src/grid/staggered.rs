//! Staggered (MAC) grid storage
//!
//! Cell `(row, col)` covers the square `[col*h, (col+1)*h] x [row*h, (row+1)*h]`
//! with row 0 at the bottom of the domain. Quantities are sampled at different
//! points of the cell:
//!
//! ```text
//!            +-----------+
//!            |           |
//!   u(r,c) → |  m, p, s  |
//!            |           |
//!            +-----------+
//!                  ↑
//!               v(r,c)
//! ```
//!
//! - `u` on the left face, at `(col*h, row*h + h/2)`
//! - `v` on the bottom face, at `(col*h + h/2, row*h)`
//! - `m`, `p`, `s` at the cell centre
//!
//! The outermost ring of cells is reserved for walls; the interior fluid region
//! is `[1, height-2] x [1, width-2]`.

use super::buffers::{BufferedField, FieldData};
use crate::core_types::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Fluid flag value for a cell that holds fluid
pub const FLUID: u8 = 1;

/// Fluid flag value for a solid (wall/obstacle) cell
pub const SOLID: u8 = 0;

/// A side of the domain border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Column 0
    Left,
    /// Column `width - 1`
    Right,
    /// Row 0
    Bottom,
    /// Row `height - 1`
    Top,
}

impl Side {
    /// All four sides, for a fully closed box
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];
}

/// Eulerian MAC grid holding velocity, smoke, solidity and pressure
///
/// Fields are stored as independent flat buffers so a pass can read one field
/// while writing another. Advected fields (`u`, `v`, `m`) are double-buffered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidGrid {
    width: usize,
    height: usize,

    /// Horizontal velocity on left faces
    u: BufferedField,
    /// Vertical velocity on bottom faces
    v: BufferedField,
    /// Smoke density at cell centres
    m: BufferedField,
    /// 1 = fluid, 0 = solid
    s: FieldData<u8>,
    /// Pressure from the last projection (diagnostic)
    p: FieldData<f32>,
}

impl FluidGrid {
    /// Create a grid of `width x height` cells, border ring included
    ///
    /// Every cell starts at rest: zero velocity, unit smoke, fluid, zero pressure.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        debug!("Allocating {}x{} fluid grid", width, height);
        Self {
            width,
            height,
            u: BufferedField::with_value(width, height, 0.0),
            v: BufferedField::with_value(width, height, 0.0),
            m: BufferedField::with_value(width, height, 1.0),
            s: FieldData::with_value(width, height, FLUID),
            p: FieldData::new(width, height),
        }
    }

    /// Create a grid with `nx x ny` interior cells plus a one-cell border
    #[must_use]
    pub fn with_interior(nx: usize, ny: usize) -> Self {
        Self::new(nx + 2, ny + 2)
    }

    /// Grid width in cells (border included)
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells (border included)
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True for a zero-sized grid
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major offset of `(row, col)`
    #[inline]
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether `(row, col)` lies inside the grid
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Rows of the interior region
    #[must_use]
    pub fn interior_rows(&self) -> Range<usize> {
        1..self.height.saturating_sub(1)
    }

    /// Columns of the interior region
    #[must_use]
    pub fn interior_cols(&self) -> Range<usize> {
        1..self.width.saturating_sub(1)
    }

    // ------------------------------------------------------------------
    // Current-state accessors
    // ------------------------------------------------------------------

    /// Horizontal velocity on the left face of `(row, col)`; 0 outside
    #[inline]
    #[must_use]
    pub fn get_u(&self, row: usize, col: usize) -> f32 {
        self.u.current().get(row, col)
    }

    /// Set horizontal velocity; dropped outside the grid
    #[inline]
    pub fn set_u(&mut self, row: usize, col: usize, value: f32) {
        self.u.current_mut().set(row, col, value);
    }

    /// Vertical velocity on the bottom face of `(row, col)`; 0 outside
    #[inline]
    #[must_use]
    pub fn get_v(&self, row: usize, col: usize) -> f32 {
        self.v.current().get(row, col)
    }

    /// Set vertical velocity; dropped outside the grid
    #[inline]
    pub fn set_v(&mut self, row: usize, col: usize, value: f32) {
        self.v.current_mut().set(row, col, value);
    }

    /// Smoke density at the centre of `(row, col)`; 0 outside
    #[inline]
    #[must_use]
    pub fn get_m(&self, row: usize, col: usize) -> f32 {
        self.m.current().get(row, col)
    }

    /// Set smoke density; dropped outside the grid
    #[inline]
    pub fn set_m(&mut self, row: usize, col: usize, value: f32) {
        self.m.current_mut().set(row, col, value);
    }

    /// Fluid flag of `(row, col)`; [`SOLID`] outside
    #[inline]
    #[must_use]
    pub fn get_s(&self, row: usize, col: usize) -> u8 {
        self.s.get(row, col)
    }

    /// Set fluid flag; any non-zero value is stored as [`FLUID`]
    #[inline]
    pub fn set_s(&mut self, row: usize, col: usize, value: u8) {
        self.s.set(row, col, u8::from(value != SOLID));
    }

    /// Pressure at `(row, col)`; 0 outside
    #[inline]
    #[must_use]
    pub fn get_p(&self, row: usize, col: usize) -> f32 {
        self.p.get(row, col)
    }

    /// Set pressure; dropped outside the grid
    #[inline]
    pub fn set_p(&mut self, row: usize, col: usize, value: f32) {
        self.p.set(row, col, value);
    }

    /// Whether `(row, col)` is a fluid cell (false outside the grid)
    #[inline]
    #[must_use]
    pub fn is_fluid(&self, row: usize, col: usize) -> bool {
        self.get_s(row, col) != SOLID
    }

    /// Number of fluid cells, border included
    #[must_use]
    pub fn fluid_cell_count(&self) -> usize {
        self.s.as_slice().iter().filter(|&&s| s != SOLID).count()
    }

    // ------------------------------------------------------------------
    // Scratch ("next") buffers
    // ------------------------------------------------------------------

    /// Pending horizontal velocity
    #[inline]
    #[must_use]
    pub fn get_next_u(&self, row: usize, col: usize) -> f32 {
        self.u.next().get(row, col)
    }

    /// Write pending horizontal velocity
    #[inline]
    pub fn set_next_u(&mut self, row: usize, col: usize, value: f32) {
        self.u.next_mut().set(row, col, value);
    }

    /// Pending vertical velocity
    #[inline]
    #[must_use]
    pub fn get_next_v(&self, row: usize, col: usize) -> f32 {
        self.v.next().get(row, col)
    }

    /// Write pending vertical velocity
    #[inline]
    pub fn set_next_v(&mut self, row: usize, col: usize, value: f32) {
        self.v.next_mut().set(row, col, value);
    }

    /// Pending smoke density
    #[inline]
    #[must_use]
    pub fn get_next_m(&self, row: usize, col: usize) -> f32 {
        self.m.next().get(row, col)
    }

    /// Write pending smoke density
    #[inline]
    pub fn set_next_m(&mut self, row: usize, col: usize, value: f32) {
        self.m.next_mut().set(row, col, value);
    }

    /// Promote pending `u`; with `mirror`, copy the result back into the scratch buffer
    pub fn swap_u(&mut self, mirror: bool) {
        self.u.swap(mirror);
    }

    /// Promote pending `v`; with `mirror`, copy the result back into the scratch buffer
    pub fn swap_v(&mut self, mirror: bool) {
        self.v.swap(mirror);
    }

    /// Promote pending `m`; with `mirror`, copy the result back into the scratch buffer
    pub fn swap_m(&mut self, mirror: bool) {
        self.m.swap(mirror);
    }

    /// Seed the `u` scratch buffer with the current values
    pub fn sync_next_u(&mut self) {
        self.u.sync_next();
    }

    /// Seed the `v` scratch buffer with the current values
    pub fn sync_next_v(&mut self) {
        self.v.sync_next();
    }

    /// Seed the `m` scratch buffer with the current values
    pub fn sync_next_m(&mut self) {
        self.m.sync_next();
    }

    // ------------------------------------------------------------------
    // Raw buffers for the solver passes
    // ------------------------------------------------------------------

    /// Read-only view of every current field
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView {
            u: self.u.current(),
            v: self.v.current(),
            m: self.m.current(),
            s: &self.s,
        }
    }

    /// Current `u`/`v`, the flags and pressure, for in-place projection
    pub(crate) fn projection_buffers(
        &mut self,
    ) -> (
        &mut FieldData<f32>,
        &mut FieldData<f32>,
        &FieldData<u8>,
        &mut FieldData<f32>,
    ) {
        (
            self.u.current_mut(),
            self.v.current_mut(),
            &self.s,
            &mut self.p,
        )
    }

    /// Current `v` and the solid flags for force integration
    pub(crate) fn force_buffers(&mut self) -> (&mut FieldData<f32>, &FieldData<u8>) {
        (self.v.current_mut(), &self.s)
    }

    /// Current `u`/`v` for boundary extrapolation
    pub(crate) fn velocity_mut(&mut self) -> (&mut FieldData<f32>, &mut FieldData<f32>) {
        (self.u.current_mut(), self.v.current_mut())
    }

    /// A snapshot view plus the `u` and `v` scratch buffers
    pub(crate) fn velocity_advection_buffers(
        &mut self,
    ) -> (GridView<'_>, &mut FieldData<f32>, &mut FieldData<f32>) {
        let (u, next_u) = self.u.split();
        let (v, next_v) = self.v.split();
        let view = GridView {
            u,
            v,
            m: self.m.current(),
            s: &self.s,
        };
        (view, next_u, next_v)
    }

    /// A snapshot view plus the `m` scratch buffer
    pub(crate) fn smoke_advection_buffers(&mut self) -> (GridView<'_>, &mut FieldData<f32>) {
        let (m, next_m) = self.m.split();
        let view = GridView {
            u: self.u.current(),
            v: self.v.current(),
            m,
            s: &self.s,
        };
        (view, next_m)
    }

    // ------------------------------------------------------------------
    // Scene editing (between steps)
    // ------------------------------------------------------------------

    /// Mark the border cells on the given sides as solid
    pub fn enclose(&mut self, sides: &[Side]) {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return;
        }
        for side in sides {
            match side {
                Side::Left => (0..height).for_each(|row| self.set_s(row, 0, SOLID)),
                Side::Right => (0..height).for_each(|row| self.set_s(row, width - 1, SOLID)),
                Side::Bottom => (0..width).for_each(|col| self.set_s(0, col, SOLID)),
                Side::Top => (0..width).for_each(|col| self.set_s(height - 1, col, SOLID)),
            }
        }
    }

    /// Make `(row, col)` solid and stop the flow through its four faces
    pub fn mark_solid(&mut self, row: usize, col: usize) {
        if !self.in_bounds(row, col) {
            return;
        }
        self.set_s(row, col, SOLID);
        self.set_u(row, col, 0.0);
        self.set_u(row, col + 1, 0.0);
        self.set_v(row, col, 0.0);
        self.set_v(row + 1, col, 0.0);
    }

    /// Make `(row, col)` fluid again; velocities are left to the solver
    pub fn mark_fluid(&mut self, row: usize, col: usize) {
        self.set_s(row, col, FLUID);
    }

    /// Place a static circular obstacle
    ///
    /// `center` and `radius` are in cell units (`x` = column, `y` = row).
    /// Interior cells whose centre lies within the circle become solid with
    /// zero face velocities and their smoke is reset to 1. Returns the number
    /// of cells marked.
    pub fn add_circular_obstacle(&mut self, center: Vec2, radius: f32) -> usize {
        let r2 = radius * radius;
        let mut marked = 0;
        for row in self.interior_rows() {
            for col in self.interior_cols() {
                let cell_center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5);
                if (cell_center - center).norm_squared() < r2 {
                    self.mark_solid(row, col);
                    self.set_m(row, col, 1.0);
                    marked += 1;
                }
            }
        }
        debug!(
            "Circular obstacle at ({:.1}, {:.1}) r={:.1}: {} cells",
            center.x, center.y, radius, marked
        );
        marked
    }

    /// Set smoke density over a block of cells (clipped to the grid)
    pub fn fill_smoke(&mut self, rows: Range<usize>, cols: Range<usize>, value: f32) {
        for row in rows {
            for col in cols.clone() {
                self.set_m(row, col, value);
            }
        }
    }
}

/// Read-only borrow of the current fields of a [`FluidGrid`]
///
/// Getters follow the same wall convention as the grid itself.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    u: &'a FieldData<f32>,
    v: &'a FieldData<f32>,
    m: &'a FieldData<f32>,
    s: &'a FieldData<u8>,
}

impl GridView<'_> {
    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.s.width()
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.s.height()
    }

    /// Horizontal velocity; 0 outside
    #[inline]
    #[must_use]
    pub fn u(&self, row: usize, col: usize) -> f32 {
        self.u.get(row, col)
    }

    /// Vertical velocity; 0 outside
    #[inline]
    #[must_use]
    pub fn v(&self, row: usize, col: usize) -> f32 {
        self.v.get(row, col)
    }

    /// Smoke density; 0 outside
    #[inline]
    #[must_use]
    pub fn m(&self, row: usize, col: usize) -> f32 {
        self.m.get(row, col)
    }

    /// Fluid flag; solid outside
    #[inline]
    #[must_use]
    pub fn s(&self, row: usize, col: usize) -> u8 {
        self.s.get(row, col)
    }

    /// Raw row-major buffers of `u`, `v`, `m`
    #[must_use]
    pub fn field(&self, field: FieldKind) -> &FieldData<f32> {
        match field {
            FieldKind::U => self.u,
            FieldKind::V => self.v,
            FieldKind::M => self.m,
        }
    }
}

/// Selector for one of the sampled fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Horizontal velocity (left faces)
    U,
    /// Vertical velocity (bottom faces)
    V,
    /// Smoke density (cell centres)
    M,
}
