//! # bds-rs
//!
//! Bell–Dawson–Shubin edge-state reconstruction for scalar advection on a
//! uniform 2D Cartesian patch.
//!
//! Given cell averages `s`, face-normal velocities and a cell forcing term,
//! the kernel returns second-order states on every face at `t + dt/2`, ready
//! for a finite-volume flux update of `∂s/∂t + ∇·(u s) = f`.
//!
//! This crate provides:
//! - Patch index boxes and staggered arrays ([`types`], [`grid`])
//! - Ghost-cell filling for the usual boundary kinds ([`boundary`])
//! - Corner interpolation, limited slopes and upwind edge states ([`bds`])
//! - Advective CFL diagnostics ([`diagnostics`])
//!
//! Enable the `parallel` feature to evaluate each stage on the rayon pool.

pub mod bds;
pub mod boundary;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod types;

// Re-export main types for convenience
pub use bds::{
    BdsConfig, ConstrainedLimiter, CornerLimiter, NoLimiter, REQUIRED_STATE_GHOST_CELLS,
    StandardLimiter, compute_edge_state, compute_edge_state_with_config, compute_edge_states,
};
pub use boundary::{BcType, FieldBoundaries, fill_ghost_cells};
pub use diagnostics::{advective_cfl, compute_dt_advection};
pub use error::BdsError;
pub use grid::{Field2D, FieldView, Geometry2D};
pub use types::{Bounds2D, Centering, Direction, IndexBox, SideBoundaries, TileSize};
