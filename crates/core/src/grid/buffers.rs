//! Flat field storage and current/next double buffering
//!
//! Every per-cell quantity on the grid is stored as a contiguous row-major
//! buffer. Reads outside the buffer return the wall value (`T::default()`)
//! and writes outside it are dropped, which is how stencils at the grid edge
//! see the surrounding wall without special-casing.

use serde::{Deserialize, Serialize};

/// Field data container for one per-cell quantity
///
/// Stores 2D field data as a flat `Vec<T>` in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData<T> {
    /// Field values in row-major order (row * width + col)
    data: Vec<T>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
}

impl<T: Copy + Default> FieldData<T> {
    /// Create a new field with given dimensions, initialized to `T::default()`
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, T::default())
    }

    /// Create a new field with given dimensions, initialized to a value
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `value` - Initial value for all cells
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of stored values
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the field holds no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major offset of `(row, col)`
    #[inline]
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether `(row, col)` addresses a stored cell
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Get value at grid position
    ///
    /// Out-of-range positions read as the wall value `T::default()`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        if self.in_bounds(row, col) {
            self.data[self.index(row, col)]
        } else {
            T::default()
        }
    }

    /// Set value at grid position
    ///
    /// Out-of-range writes are dropped; the wall does not change.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if self.in_bounds(row, col) {
            let idx = self.index(row, col);
            self.data[idx] = value;
        }
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Overwrite this field with the contents of `other`
    ///
    /// Both fields must have the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        self.data.copy_from_slice(&other.data);
    }
}

/// A field with a scratch buffer for values computed during a pass
///
/// Passes read `current` and write `next`; `commit` then promotes `next`
/// by swapping the two buffers, so no read in a pass ever observes a value
/// written by the same pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferedField {
    current: FieldData<f32>,
    next: FieldData<f32>,
}

impl BufferedField {
    /// Create a buffered field with both buffers set to `value`
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            current: FieldData::with_value(width, height, value),
            next: FieldData::with_value(width, height, value),
        }
    }

    /// The buffer passes read from
    #[must_use]
    pub fn current(&self) -> &FieldData<f32> {
        &self.current
    }

    /// Mutable access to the current buffer
    pub fn current_mut(&mut self) -> &mut FieldData<f32> {
        &mut self.current
    }

    /// The scratch buffer passes write into
    #[must_use]
    pub fn next(&self) -> &FieldData<f32> {
        &self.next
    }

    /// Mutable access to the scratch buffer
    pub fn next_mut(&mut self) -> &mut FieldData<f32> {
        &mut self.next
    }

    /// Borrow current for reading and next for writing at the same time
    pub fn split(&mut self) -> (&FieldData<f32>, &mut FieldData<f32>) {
        (&self.current, &mut self.next)
    }

    /// Promote next to current (O(1) buffer exchange)
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Copy current into next so untouched scratch cells hold current values
    pub fn sync_next(&mut self) {
        self.next.copy_from(&self.current);
    }

    /// Commit, then optionally mirror the new current back into next
    pub fn swap(&mut self, mirror: bool) {
        self.commit();
        if mirror {
            self.sync_next();
        }
    }
}
