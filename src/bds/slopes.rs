//! Bilinear-plus-cross-term slopes per cell.
//!
//! Inside cell `(i, j)` the scalar is reconstructed as
//!
//! ```text
//! s(x, y) = s_ij + sx·(x - x_i) + sy·(y - y_j) + sxy·(x - x_i)·(y - y_j)
//! ```
//!
//! so the reconstruction is fixed by its four corner values. The unlimited
//! slopes come from the interpolated node values; limiting then adjusts the
//! corners (see [`limiter`](crate::bds::limiter)) and the slopes are
//! re-derived from the adjusted corners.

use crate::bds::config::BdsConfig;
use crate::bds::limiter::{CornerEnvelope, CornerLimiter, CornerValues};
use crate::bds::tiling::evaluate_tiled;
use crate::grid::{Field2D, FieldView, Geometry2D};
use crate::types::{Centering, IndexBox};

/// Component of the slope array holding `∂s/∂x`.
pub const SLOPE_X: usize = 0;
/// Component of the slope array holding `∂s/∂y`.
pub const SLOPE_Y: usize = 1;
/// Component of the slope array holding `∂²s/∂x∂y`.
pub const SLOPE_XY: usize = 2;

/// Slope coefficients of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Slopes {
    pub sx: f64,
    pub sy: f64,
    pub sxy: f64,
}

impl Slopes {
    pub fn new(sx: f64, sy: f64, sxy: f64) -> Self {
        Self { sx, sy, sxy }
    }

    /// Unlimited slopes from the interpolated values at the cell's nodes,
    /// given in [`Corner`](crate::bds::limiter::Corner) order.
    #[inline]
    pub fn from_nodes(nodes: &CornerValues, hx: f64, hy: f64) -> Self {
        let [sw, nw, se, ne] = *nodes;
        Self {
            sx: 0.5 * (ne + se - nw - sw) / hx,
            sy: 0.5 * (ne - se + nw - sw) / hy,
            sxy: (ne - se - nw + sw) / (hx * hy),
        }
    }

    /// Reconstructed values at the four corners of a cell with average `center`.
    #[inline]
    pub fn corners(&self, center: f64, hx: f64, hy: f64) -> CornerValues {
        let Self { sx, sy, sxy } = *self;
        [
            center - 0.5 * (hx * sx + hy * sy) + 0.25 * hx * hy * sxy,
            center - 0.5 * (hx * sx - hy * sy) - 0.25 * hx * hy * sxy,
            center + 0.5 * (hx * sx - hy * sy) - 0.25 * hx * hy * sxy,
            center + 0.5 * (hx * sx + hy * sy) + 0.25 * hx * hy * sxy,
        ]
    }

    /// Slopes whose reconstruction passes through the given corner values.
    #[inline]
    pub fn from_corners(sc: &CornerValues, hx: f64, hy: f64) -> Self {
        Self {
            sx: 0.5 * (sc[3] + sc[2] - sc[0] - sc[1]) / hx,
            sy: 0.5 * (sc[3] + sc[1] - sc[0] - sc[2]) / hy,
            sxy: (sc[0] + sc[3] - sc[1] - sc[2]) / (hx * hy),
        }
    }
}

/// Read-only view of a three-component slope array.
#[derive(Clone, Copy, Debug)]
pub struct SlopeView<'a> {
    sx: FieldView<'a>,
    sy: FieldView<'a>,
    sxy: FieldView<'a>,
}

impl<'a> SlopeView<'a> {
    /// # Panics
    ///
    /// Panics if `slopes` has fewer than three components.
    pub fn new(slopes: &'a Field2D) -> Self {
        Self {
            sx: slopes.view(SLOPE_X),
            sy: slopes.view(SLOPE_Y),
            sxy: slopes.view(SLOPE_XY),
        }
    }

    #[inline]
    pub fn at(&self, i: isize, j: isize) -> Slopes {
        Slopes {
            sx: self.sx.at(i, j),
            sy: self.sy.at(i, j),
            sxy: self.sxy.at(i, j),
        }
    }

    #[inline]
    pub fn index_box(&self) -> IndexBox {
        self.sx.index_box()
    }
}

/// Slopes of cell `(i, j)`.
///
/// Reads `sint` at the cell's four nodes and, unless the limiter is the
/// identity, `s` over the 3×3 cells around `(i, j)`.
#[inline]
pub fn fit_cell<L: CornerLimiter + ?Sized>(
    s: FieldView<'_>,
    sint: FieldView<'_>,
    i: isize,
    j: isize,
    hx: f64,
    hy: f64,
    limiter: &L,
) -> Slopes {
    let nodes = [
        sint.at(i, j),
        sint.at(i, j + 1),
        sint.at(i + 1, j),
        sint.at(i + 1, j + 1),
    ];
    let slopes = Slopes::from_nodes(&nodes, hx, hy);
    if limiter.is_identity() {
        return slopes;
    }

    let center = s.at(i, j);
    let envelope = CornerEnvelope::from_stencil(s, i, j);
    let limited = limiter.limit(center, slopes.corners(center, hx, hy), &envelope);
    Slopes::from_corners(&limited, hx, hy)
}

/// Fit slopes on every cell of `region`.
///
/// Returns a cell-centred array over exactly `region` with components
/// [`SLOPE_X`], [`SLOPE_Y`], [`SLOPE_XY`].
///
/// # Panics
///
/// Panics if `sint` does not cover the nodes of `region`, or if limiting
/// is enabled and `s` does not cover `region` grown by one cell.
pub fn compute_slopes(
    s: &Field2D,
    comp: usize,
    sint: &Field2D,
    geom: &Geometry2D,
    region: &IndexBox,
    config: &BdsConfig,
) -> Field2D {
    let nodes = region.convert(Centering::Node);
    assert!(
        sint.index_box().contains_box(&nodes),
        "corner array {} does not cover nodes {}",
        sint.index_box(),
        nodes
    );
    if config.limits_slopes() {
        let needed = region.grow(1);
        assert!(
            s.index_box().contains_box(&needed),
            "state array {} does not cover limiter stencil {}",
            s.index_box(),
            needed
        );
    }

    let (hx, hy) = (geom.hx(), geom.hy());
    let s_view = s.view(comp);
    let sint_view = sint.view(0);
    let limiter = config.limiter;

    let mut slopes = Field2D::new(*region, Centering::Cell, 3);
    evaluate_tiled(
        region,
        config.tile_size,
        |i, j| fit_cell(s_view, sint_view, i, j, hx, hy, &limiter),
        |i, j, fitted: Slopes| {
            slopes.set(i, j, SLOPE_X, fitted.sx);
            slopes.set(i, j, SLOPE_Y, fitted.sy);
            slopes.set(i, j, SLOPE_XY, fitted.sxy);
        },
    );
    slopes
}
