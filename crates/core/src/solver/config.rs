//! Step configuration

use super::error::SolverError;
use serde::{Deserialize, Serialize};

/// Physical constants used by the default configuration
pub mod constants {
    /// Standard gravity, pointing toward row 0 (m/s²)
    pub const GRAVITY: f32 = -9.81;

    /// Density of water (kg/m³)
    pub const WATER_DENSITY: f32 = 1000.0;

    /// Over-relaxation factor; SOR diverges at 2.0
    pub const OVERRELAXATION: f32 = 1.9;
}

/// Configuration for the grid solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Timestep in seconds
    pub dt: f32,

    /// Vertical acceleration in m/s² (negative = downward)
    pub gravity: f32,

    /// Fluid density in kg/m³; only scales the diagnostic pressure field
    pub density: f32,

    /// Physical size of one cell in meters
    pub grid_spacing: f32,

    /// Gauss-Seidel over-relaxation factor, in `[1, 2)`
    pub overrelaxation: f32,

    /// Number of projection sweeps per step
    pub num_iters: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            gravity: constants::GRAVITY,
            density: constants::WATER_DENSITY,
            grid_spacing: 0.01,
            overrelaxation: constants::OVERRELAXATION,
            num_iters: 40,
        }
    }
}

impl SolverConfig {
    /// Check every parameter the passes divide by or scale with
    ///
    /// The passes never fail, but a zero timestep or cell size produces
    /// infinities in the pressure field and backtrace, so callers at the
    /// outer boundary should validate first.
    ///
    /// # Errors
    ///
    /// Returns the first parameter that is out of range.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SolverError::InvalidTimestep(self.dt));
        }
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(SolverError::InvalidGridSpacing(self.grid_spacing));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(SolverError::InvalidDensity(self.density));
        }
        if !self.gravity.is_finite() {
            return Err(SolverError::InvalidGravity(self.gravity));
        }
        if !(1.0..2.0).contains(&self.overrelaxation) {
            return Err(SolverError::InvalidOverrelaxation(self.overrelaxation));
        }
        Ok(())
    }

    /// Scale from a projection correction to pressure: `density * h / dt`
    #[must_use]
    pub fn pressure_scale(&self, dt: f32) -> f32 {
        self.density * self.grid_spacing / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_iters, 40);
        assert!((config.dt - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_dt = SolverConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_dt.validate(), Err(SolverError::InvalidTimestep(0.0)));

        let bad_h = SolverConfig {
            grid_spacing: -1.0,
            ..Default::default()
        };
        assert_eq!(bad_h.validate(), Err(SolverError::InvalidGridSpacing(-1.0)));

        let bad_rho = SolverConfig {
            density: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            bad_rho.validate(),
            Err(SolverError::InvalidDensity(_))
        ));

        let bad_g = SolverConfig {
            gravity: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(bad_g.validate(), Err(SolverError::InvalidGravity(_))));

        for omega in [0.5, 2.0, 2.5] {
            let bad_omega = SolverConfig {
                overrelaxation: omega,
                ..Default::default()
            };
            assert_eq!(
                bad_omega.validate(),
                Err(SolverError::InvalidOverrelaxation(omega))
            );
        }
    }

    #[test]
    fn test_positive_gravity_and_zero_iters_are_valid() {
        let config = SolverConfig {
            gravity: 3.0,
            num_iters: 0,
            overrelaxation: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pressure_scale() {
        let config = SolverConfig {
            density: 1000.0,
            grid_spacing: 0.01,
            ..Default::default()
        };
        assert!((config.pressure_scale(0.5) - 20.0).abs() < 1e-4);
    }
}
