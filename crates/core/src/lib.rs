//! Smoke Simulation Core Library
//!
//! Incompressible 2D flow on a staggered (Marker-And-Cell) grid with a passive
//! smoke density carried by the flow.
//!
//! ## Solver
//!
//! Each step runs, in order:
//! - Gravity integration on the vertical velocity
//! - Pressure projection by over-relaxed Gauss-Seidel
//! - Boundary extrapolation of tangential velocity
//! - Semi-Lagrangian advection of velocity, then of smoke
//!
//! Rendering and the outer run loop live outside this crate. A driver builds
//! a [`FluidGrid`] (or a [`Scene`]), steps a [`Solver`] and reads the fields
//! back through the grid accessors.

// Core types and utilities
pub mod core_types;

// Grid storage and the solver passes
pub mod diagnostics;
pub mod grid;
pub mod scene;
pub mod solver;

// Re-export core types
pub use core_types::Vec2;

// Re-export grid and solver types
pub use diagnostics::FieldStats;
pub use grid::{FieldData, FieldKind, FluidGrid, GridView, Side, FLUID, SOLID};
pub use scene::{Scene, SceneParams};
pub use solver::{Solver, SolverConfig, SolverError};
