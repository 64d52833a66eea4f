//! Parameter validation errors
//!
//! The solver passes themselves are total: out-of-range cells and walled-in
//! cells have defined behavior. Errors only arise when a caller validates a
//! configuration before building a [`Solver`](super::Solver).

/// Rejected solver or grid parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Timestep must be finite and positive
    InvalidTimestep(f32),
    /// Cell size must be finite and positive
    InvalidGridSpacing(f32),
    /// Fluid density must be finite and positive
    InvalidDensity(f32),
    /// Gravity must be finite
    InvalidGravity(f32),
    /// Over-relaxation must lie in `[1, 2)`
    InvalidOverrelaxation(f32),
    /// Grid needs at least one interior cell inside the border ring
    GridTooSmall {
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::InvalidTimestep(dt) => {
                write!(f, "Timestep must be positive and finite (dt={dt})")
            }
            SolverError::InvalidGridSpacing(h) => {
                write!(f, "Grid spacing must be positive and finite (h={h})")
            }
            SolverError::InvalidDensity(rho) => {
                write!(f, "Density must be positive and finite (density={rho})")
            }
            SolverError::InvalidGravity(g) => write!(f, "Gravity must be finite (gravity={g})"),
            SolverError::InvalidOverrelaxation(omega) => {
                write!(f, "Over-relaxation must be in [1, 2) (overrelaxation={omega})")
            }
            SolverError::GridTooSmall { width, height } => write!(
                f,
                "Grid must be at least 3x3 to hold an interior cell (got {width}x{height})"
            ),
        }
    }
}

impl std::error::Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_value() {
        let msg = SolverError::InvalidOverrelaxation(2.5).to_string();
        assert!(msg.contains("2.5"), "{msg}");

        let msg = SolverError::GridTooSmall {
            width: 2,
            height: 7,
        }
        .to_string();
        assert!(msg.contains("2x7"), "{msg}");
    }
}
