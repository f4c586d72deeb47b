//! Corner limiting for the bilinear-plus-cross-term reconstruction.
//!
//! A cell's reconstruction is fully determined by its four corner values.
//! Limiting works on those corners: each one is pulled into the range of the
//! four cell averages that share it, then the surplus (or deficit) this
//! creates in the cell mean is pushed back onto the corners that still have
//! room. The result obeys a discrete maximum principle at the corners.
//!
//! ## Example
//!
//! ```
//! use bds_rs::bds::limiter::{ConstrainedLimiter, CornerEnvelope, CornerLimiter};
//!
//! // One corner overshoots its neighbourhood.
//! let envelope = CornerEnvelope::new([-1.0; 4], [1.0, 1.0, 1.0, 0.2]);
//! let limited = ConstrainedLimiter.limit(0.0, [-0.1, -0.1, -0.1, 0.3], &envelope);
//!
//! assert!((limited[3] - 0.2).abs() < 1e-12);
//! let mean: f64 = limited.iter().sum::<f64>() / 4.0;
//! assert!(mean.abs() < 1e-12);
//! ```

use crate::grid::FieldView;

/// Differences below this are treated as "no room to redistribute".
pub const LIMITER_EPS: f64 = 1.0e-8;

/// Number of redistribution sweeps after the initial clamp.
pub const LIMITER_SWEEPS: usize = 3;

/// Corner values of one cell, indexed in [`Corner`] order.
pub type CornerValues = [f64; 4];

/// The four corners of a cell.
///
/// The discriminant is the index into [`CornerValues`]; the order is
/// `−−, −+, +−, ++` in `(x, y)` and is the order sweeps visit the corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    SouthWest = 0,
    NorthWest = 1,
    SouthEast = 2,
    NorthEast = 3,
}

impl Corner {
    /// All corners in sweep order.
    pub const ALL: [Corner; 4] = [
        Corner::SouthWest,
        Corner::NorthWest,
        Corner::SouthEast,
        Corner::NorthEast,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Cell offset toward this corner: `(-1 | 1, -1 | 1)`.
    #[inline]
    pub const fn signs(self) -> (isize, isize) {
        match self {
            Corner::SouthWest => (-1, -1),
            Corner::NorthWest => (-1, 1),
            Corner::SouthEast => (1, -1),
            Corner::NorthEast => (1, 1),
        }
    }
}

/// Per-corner bounds: the extrema of the four cell averages sharing a corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerEnvelope {
    pub min: CornerValues,
    pub max: CornerValues,
}

impl CornerEnvelope {
    pub fn new(min: CornerValues, max: CornerValues) -> Self {
        Self { min, max }
    }

    /// Envelope of cell `(i, j)` read from the cell averages in `s`.
    ///
    /// Reads the 3×3 block of cells around `(i, j)`.
    pub fn from_stencil(s: FieldView<'_>, i: isize, j: isize) -> Self {
        let center = s.at(i, j);
        let mut min = [0.0; 4];
        let mut max = [0.0; 4];
        for corner in Corner::ALL {
            let (di, dj) = corner.signs();
            let shared = [s.at(i + di, j), s.at(i, j + dj), s.at(i + di, j + dj)];
            let k = corner.index();
            min[k] = shared.iter().copied().fold(center, f64::min);
            max[k] = shared.iter().copied().fold(center, f64::max);
        }
        Self { min, max }
    }

    /// True if every corner lies within its bounds (inclusive, with tolerance).
    pub fn contains(&self, corners: &CornerValues, tol: f64) -> bool {
        corners
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .all(|(&c, (&lo, &hi))| c >= lo - tol && c <= hi + tol)
    }
}

/// Trait for limiters acting on the corner values of a single cell.
///
/// Implementations are pure: the result depends only on the arguments.
pub trait CornerLimiter: Send + Sync {
    /// Limit the corner values of a cell with average `center`.
    fn limit(&self, center: f64, corners: CornerValues, envelope: &CornerEnvelope) -> CornerValues;

    /// Name of this limiter (for logging).
    fn name(&self) -> &'static str;

    /// Whether the mean of the returned corners equals `center`
    /// when the input corners have that mean.
    fn preserves_cell_average(&self) -> bool {
        true
    }

    /// Whether `limit` returns its input unchanged.
    ///
    /// Callers use this to skip computing the envelope.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Clamp-and-redistribute limiter.
///
/// 1. Clamp every corner into `[min, max]` of its envelope.
/// 2. Run [`LIMITER_SWEEPS`] sweeps of [`ConstrainedLimiter::sweep`].
///
/// When a sweep finds no corner with room (all differences within
/// [`LIMITER_EPS`]) it changes nothing and the mean may stay off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstrainedLimiter;

impl ConstrainedLimiter {
    /// Pull every corner into its envelope.
    ///
    /// NaN corners stay NaN.
    #[inline]
    pub fn clamp(corners: CornerValues, envelope: &CornerEnvelope) -> CornerValues {
        let mut sc = corners;
        for k in 0..4 {
            if sc[k] > envelope.max[k] {
                sc[k] = envelope.max[k];
            }
            if sc[k] < envelope.min[k] {
                sc[k] = envelope.min[k];
            }
        }
        sc
    }

    /// One redistribution sweep.
    ///
    /// The mean excess over `center` is taken off the corners that lie on the
    /// excess side of `center` by more than [`LIMITER_EPS`], in [`Corner`]
    /// order. Each such corner gets an equal share of what is left, never
    /// more than its distance to the envelope bound on the far side.
    pub fn sweep(center: f64, corners: CornerValues, envelope: &CornerEnvelope) -> CornerValues {
        let mut sc = corners;
        let sumloc = 0.25 * (sc[3] + sc[2] + sc[1] + sc[0]);
        let mut sumdif = (sumloc - center) * 4.0;
        let sgndif = if sumdif < 0.0 { -1.0 } else { 1.0 };

        let diff = sc.map(|c| (c - center) * sgndif);
        let mut kdp = diff.iter().filter(|&&d| d > LIMITER_EPS).count();

        for k in 0..4 {
            let div = kdp.max(1) as f64;
            let mut redfac = if diff[k] > LIMITER_EPS {
                kdp -= 1;
                sumdif * sgndif / div
            } else {
                0.0
            };
            let redmax = if sgndif > 0.0 {
                sc[k] - envelope.min[k]
            } else {
                envelope.max[k] - sc[k]
            };
            redfac = redfac.min(redmax);
            sumdif -= redfac * sgndif;
            sc[k] -= redfac * sgndif;
        }
        sc
    }
}

impl CornerLimiter for ConstrainedLimiter {
    fn limit(&self, center: f64, corners: CornerValues, envelope: &CornerEnvelope) -> CornerValues {
        let mut sc = Self::clamp(corners, envelope);
        for _ in 0..LIMITER_SWEEPS {
            sc = Self::sweep(center, sc, envelope);
        }
        sc
    }

    fn name(&self) -> &'static str {
        "constrained"
    }
}

/// No-op limiter (for smooth problems and testing).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoLimiter;

impl CornerLimiter for NoLimiter {
    #[inline]
    fn limit(&self, _center: f64, corners: CornerValues, _envelope: &CornerEnvelope) -> CornerValues {
        corners
    }

    fn name(&self) -> &'static str {
        "none"
    }

    fn is_identity(&self) -> bool {
        true
    }
}

/// Enum wrapper for the built-in corner limiters.
///
/// Static dispatch in the per-cell kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StandardLimiter {
    /// Clamp plus mean-preserving redistribution
    #[default]
    Constrained,
    /// Unlimited slopes
    Unlimited,
}

impl CornerLimiter for StandardLimiter {
    #[inline]
    fn limit(&self, center: f64, corners: CornerValues, envelope: &CornerEnvelope) -> CornerValues {
        match self {
            StandardLimiter::Constrained => ConstrainedLimiter.limit(center, corners, envelope),
            StandardLimiter::Unlimited => NoLimiter.limit(center, corners, envelope),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StandardLimiter::Constrained => ConstrainedLimiter.name(),
            StandardLimiter::Unlimited => NoLimiter.name(),
        }
    }

    fn is_identity(&self) -> bool {
        matches!(self, StandardLimiter::Unlimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Field2D;
    use crate::types::{Centering, IndexBox};
    use approx::assert_relative_eq;

    fn mean(sc: &CornerValues) -> f64 {
        0.25 * sc.iter().sum::<f64>()
    }

    fn wide() -> CornerEnvelope {
        CornerEnvelope::new([-10.0; 4], [10.0; 4])
    }

    #[test]
    fn test_limiter_names() {
        assert_eq!(ConstrainedLimiter.name(), "constrained");
        assert_eq!(NoLimiter.name(), "none");
        assert_eq!(StandardLimiter::default().name(), "constrained");
        assert_eq!(StandardLimiter::Unlimited.name(), "none");
        assert!(StandardLimiter::Unlimited.is_identity());
        assert!(!StandardLimiter::Constrained.is_identity());
        assert!(ConstrainedLimiter.preserves_cell_average());
    }

    #[test]
    fn test_corner_order_and_signs() {
        assert_eq!(Corner::ALL.map(Corner::index), [0, 1, 2, 3]);
        assert_eq!(Corner::SouthWest.signs(), (-1, -1));
        assert_eq!(Corner::NorthWest.signs(), (-1, 1));
        assert_eq!(Corner::SouthEast.signs(), (1, -1));
        assert_eq!(Corner::NorthEast.signs(), (1, 1));
    }

    #[test]
    fn test_envelope_from_stencil() {
        // s(i, j) = 3i + j on a 3x3 block around (1, 1)
        let s = Field2D::from_fn(IndexBox::from_size(3, 3), Centering::Cell, |i, j| {
            (3 * i + j) as f64
        });
        let env = CornerEnvelope::from_stencil(s.view(0), 1, 1);
        assert_eq!(env.min, [0.0, 1.0, 3.0, 4.0]);
        assert_eq!(env.max, [4.0, 5.0, 7.0, 8.0]);
    }

    #[test]
    fn test_single_overshoot_is_redistributed() {
        let env = CornerEnvelope::new([-1.0; 4], [1.0, 1.0, 1.0, 0.2]);
        let sc = ConstrainedLimiter.limit(0.0, [-0.1, -0.1, -0.1, 0.3], &env);

        assert_relative_eq!(sc[3], 0.2, epsilon = 1e-12);
        for &c in &sc[..3] {
            assert_relative_eq!(c, -0.2 / 3.0, epsilon = 1e-12);
        }
        assert_relative_eq!(mean(&sc), 0.0, epsilon = 1e-12);
        assert!(env.contains(&sc, 1e-12));
    }

    #[test]
    fn test_single_sweep_respects_room() {
        let env = CornerEnvelope::new([0.0; 4], [1.0; 4]);
        let sc = ConstrainedLimiter::sweep(0.0, [0.5, 0.01, 0.0, 0.0], &env);
        // Equal shares of 0.255; the second corner only has 0.01 of room.
        assert_relative_eq!(sc[0], 0.245, epsilon = 1e-12);
        assert_relative_eq!(sc[1], 0.0, epsilon = 1e-15);
        assert_eq!(sc[2], 0.0);
        assert_eq!(sc[3], 0.0);

        // The remaining sweeps finish the job.
        let sc = ConstrainedLimiter.limit(0.0, [0.5, 0.01, 0.0, 0.0], &env);
        assert_relative_eq!(mean(&sc), 0.0, epsilon = 1e-12);
        assert!(env.contains(&sc, 1e-12));
    }

    #[test]
    fn test_zero_excess_leaves_corners_unchanged() {
        let corners = [0.5, 0.75, 1.25, 1.5];
        assert_eq!(ConstrainedLimiter::sweep(1.0, corners, &wide()), corners);
        assert_eq!(ConstrainedLimiter.limit(1.0, corners, &wide()), corners);
    }

    #[test]
    fn test_no_room_leaves_mean_off() {
        // Every corner pinned at the envelope bound: nothing can move.
        let env = CornerEnvelope::new([1.0; 4], [1.0; 4]);
        let sc = ConstrainedLimiter.limit(0.0, [3.0, 2.0, 2.0, 2.0], &env);
        assert_eq!(sc, [1.0; 4]);
    }

    #[test]
    fn test_clamp() {
        let env = CornerEnvelope::new([0.0, 0.0, -1.0, -1.0], [1.0, 1.0, 0.0, 0.0]);
        let sc = ConstrainedLimiter::clamp([2.0, -3.0, 0.5, -0.5], &env);
        assert_eq!(sc, [1.0, 0.0, 0.0, -0.5]);
    }

    #[test]
    fn test_clamp_propagates_nan() {
        let sc = ConstrainedLimiter::clamp([f64::NAN, 0.0, 0.0, 0.0], &wide());
        assert!(sc[0].is_nan());
    }

    #[test]
    fn test_no_limiter_is_noop() {
        let corners = [5.0, -5.0, 3.0, 1.0];
        let env = CornerEnvelope::new([0.0; 4], [0.0; 4]);
        assert_eq!(NoLimiter.limit(0.0, corners, &env), corners);
        assert_eq!(StandardLimiter::Unlimited.limit(0.0, corners, &env), corners);
    }
}
