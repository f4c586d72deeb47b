//! Bicubic interpolation of cell averages to cell corners.
//!
//! Node `(i, j)` is the lower-left corner of cell `(i, j)`. Its value comes
//! from the 4×4 block of cells `i-2..=i+1 × j-2..=j+1` with weights
//! `1` (block corners), `-7` (block edges) and `49` (the four cells touching
//! the node), normalised by `144`. The stencil is exact for bilinear data.

use crate::bds::config::BdsConfig;
use crate::bds::tiling::evaluate_tiled;
use crate::grid::{Field2D, FieldView};
use crate::types::{Centering, IndexBox};

/// Cells the interpolator reads on each side of a node.
pub const CORNER_STENCIL_REACH: isize = 2;

/// Interpolated value at node `(i, j)`.
///
/// NaN in any stencil cell propagates.
#[inline]
pub fn corner_value(s: FieldView<'_>, i: isize, j: isize) -> f64 {
    let corners = s.at(i - 2, j - 2) + s.at(i - 2, j + 1) + s.at(i + 1, j - 2) + s.at(i + 1, j + 1);
    let edges = s.at(i - 2, j - 1)
        + s.at(i - 2, j)
        + s.at(i - 1, j - 2)
        + s.at(i, j - 2)
        + s.at(i - 1, j + 1)
        + s.at(i, j + 1)
        + s.at(i + 1, j - 1)
        + s.at(i + 1, j);
    let nears = s.at(i - 1, j - 1) + s.at(i, j - 1) + s.at(i - 1, j) + s.at(i, j);
    (corners - 7.0 * edges + 49.0 * nears) / 144.0
}

/// Cell box the interpolator reads to fill the nodes of `nodes`.
pub fn corner_stencil_box(nodes: &IndexBox) -> IndexBox {
    let (ilo, jlo) = nodes.lo();
    let (ihi, jhi) = nodes.hi();
    IndexBox::new(
        (ilo - CORNER_STENCIL_REACH, jlo - CORNER_STENCIL_REACH),
        (ihi + CORNER_STENCIL_REACH - 1, jhi + CORNER_STENCIL_REACH - 1),
    )
}

/// Interpolate component `comp` of `s` to every node of `nodes`.
///
/// Returns a node-centred array over exactly `nodes`.
///
/// # Panics
///
/// Panics if `comp` is out of range or `s` does not cover
/// [`corner_stencil_box`]`(nodes)`.
pub fn interpolate_corners(
    s: &Field2D,
    comp: usize,
    nodes: &IndexBox,
    config: &BdsConfig,
) -> Field2D {
    let needed = corner_stencil_box(nodes);
    assert!(
        s.index_box().contains_box(&needed),
        "state array {} does not cover corner stencil {}",
        s.index_box(),
        needed
    );

    let view = s.view(comp);
    let mut sint = Field2D::new(*nodes, Centering::Node, 1);
    evaluate_tiled(
        nodes,
        config.tile_size,
        |i, j| corner_value(view, i, j),
        |i, j, value| sint.set(i, j, 0, value),
    );
    sint
}
