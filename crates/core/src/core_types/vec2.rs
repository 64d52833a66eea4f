//! Vector type alias for 2D positions and velocities.

use nalgebra::Vector2;

/// 2D vector type for positions and velocities.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used for physical
/// sample positions, backtraced points and interpolated velocities.
pub type Vec2 = Vector2<f32>;
