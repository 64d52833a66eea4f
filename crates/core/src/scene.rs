//! Preset scenes
//!
//! A scene builds a grid (walls, obstacles, initial smoke and velocity) and a
//! matching solver configuration. Smoke density 1 is clear fluid; 0 marks the
//! smoke released by the scene.

use crate::core_types::Vec2;
use crate::grid::{FluidGrid, Side};
use crate::solver::{constants, SolverConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Available preset scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Closed-bottom tank under gravity with a layer of smoke near the top
    Tank,
    /// Horizontal inflow past a circular obstacle, no gravity
    WindTunnel,
}

/// Tunable parameters for the preset scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Physical size of one cell (m)
    pub grid_spacing: f32,
    /// Wind tunnel inflow speed (m/s)
    pub inflow_velocity: f32,
    /// Obstacle radius as a fraction of the grid height
    pub obstacle_radius: f32,
    /// Obstacle centre as fractions of width and height
    pub obstacle_center: Vec2,
    /// Height of the smoke streak as a fraction of the grid height
    pub streak_height: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            grid_spacing: 0.01,
            inflow_velocity: 2.0,
            obstacle_radius: 0.15,
            obstacle_center: Vec2::new(0.4, 0.5),
            streak_height: 0.1,
        }
    }
}

impl Scene {
    /// Build the scene with default parameters
    ///
    /// `width` and `height` are total cell counts, border included.
    #[must_use]
    pub fn build(self, width: usize, height: usize) -> (FluidGrid, SolverConfig) {
        self.build_with(width, height, &SceneParams::default())
    }

    /// Build the scene with explicit parameters
    #[must_use]
    pub fn build_with(
        self,
        width: usize,
        height: usize,
        params: &SceneParams,
    ) -> (FluidGrid, SolverConfig) {
        let mut grid = FluidGrid::new(width, height);
        let config = match self {
            Scene::Tank => {
                grid.enclose(&[Side::Left, Side::Right, Side::Bottom]);
                let top_third = height - height / 3..height.saturating_sub(1);
                grid.fill_smoke(top_third, grid.interior_cols(), 0.0);
                SolverConfig {
                    grid_spacing: params.grid_spacing,
                    gravity: constants::GRAVITY,
                    ..Default::default()
                }
            }
            Scene::WindTunnel => {
                grid.enclose(&[Side::Left, Side::Bottom, Side::Top]);

                // Inflow face between the solid left wall and the first fluid column
                for row in 0..height {
                    grid.set_u(row, 1, params.inflow_velocity);
                }

                // Smoke is fed from the wall column; the solver never overwrites it
                let half_band = (params.streak_height * height as f32 * 0.5).max(0.5);
                let mid = height as f32 * 0.5;
                let min_row = (mid - half_band).floor().max(0.0) as usize;
                let max_row = ((mid + half_band).ceil() as usize).min(height);
                grid.fill_smoke(min_row..max_row, 0..1, 0.0);

                let center = Vec2::new(
                    params.obstacle_center.x * width as f32,
                    params.obstacle_center.y * height as f32,
                );
                grid.add_circular_obstacle(center, params.obstacle_radius * height as f32);

                SolverConfig {
                    grid_spacing: params.grid_spacing,
                    gravity: 0.0,
                    ..Default::default()
                }
            }
        };

        info!(
            "Built {} scene: {}x{} grid, {} fluid cells",
            self,
            width,
            height,
            grid.fluid_cell_count()
        );
        (grid, config)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Tank => write!(f, "tank"),
            Scene::WindTunnel => write!(f, "wind-tunnel"),
        }
    }
}

impl FromStr for Scene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tank" => Ok(Scene::Tank),
            "wind-tunnel" | "windtunnel" | "tunnel" => Ok(Scene::WindTunnel),
            other => Err(format!("Unknown scene '{other}' (expected tank or wind-tunnel)")),
        }
    }
}
