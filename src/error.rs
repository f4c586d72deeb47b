//! Error types for edge-state reconstruction.

use thiserror::Error;

use crate::types::{Centering, Direction};

/// Errors reported by the BDS driver and the ghost-cell filler.
///
/// Numerical degeneracies (NaN, Inf, an inactive limiter sweep) are not
/// errors; they propagate as values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BdsError {
    /// Non-conservative reconstruction was requested.
    #[error("For 2D, BDS algorithm currently only supports conservative computations")]
    NonConservative,

    /// An array has the wrong staggering for its role.
    #[error("{field}: expected {expected}-centred data, got {actual}-centred")]
    CenteringMismatch {
        field: &'static str,
        expected: Centering,
        actual: Centering,
    },

    /// A component index is past the end of an array.
    #[error("{field}: component {comp} out of range (array has {n_comp})")]
    ComponentOutOfRange {
        field: &'static str,
        comp: usize,
        n_comp: usize,
    },

    /// An array does not cover the stencil reach around the valid region.
    #[error("{field}: needs {required} ghost cells around the valid region, has {available}")]
    InsufficientGhostCells {
        field: &'static str,
        required: usize,
        available: isize,
    },

    /// Time step not finite or not positive.
    #[error("Invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// The per-component conservative flags do not match the component count.
    #[error("iconserv has {actual} entries, expected {expected}")]
    IconservLength { expected: usize, actual: usize },

    /// Only one side of a direction was marked periodic.
    #[error("Periodic boundary on only one side in {0}")]
    InconsistentPeriodicity(Direction),
}

impl BdsError {
    /// Create an insufficient-ghost-cells error.
    pub fn insufficient_ghosts(field: &'static str, required: usize, available: isize) -> Self {
        Self::InsufficientGhostCells {
            field,
            required,
            available,
        }
    }
}
