//! Upwind edge states at the half time step.
//!
//! The state on a face is the donor cell's reconstruction traced back along
//! the normal velocity (the *stem*), corrected for transport across the
//! transverse faces of the donor cell. Those corrections integrate the
//! reconstruction over the region swept through each transverse face in
//! half a step (the Gamma integrals `gamp`, `gamm`), then add the
//! divergence correction and half a step of forcing.
//!
//! Upwinding is strict: a velocity of exactly zero takes the donor on the
//! high side of the face.

use crate::bds::config::BdsConfig;
use crate::bds::slopes::SlopeView;
use crate::bds::tiling::evaluate_tiled;
use crate::grid::{Field2D, FieldView, Geometry2D};
use crate::types::Centering;

/// Upwind donor and direction sign from a face velocity.
///
/// `vel > 0` selects the cell below the face (`face - 1`, sign `+1`),
/// anything else the cell above (`face`, sign `-1`).
#[inline]
fn upwind(vel: f64, face: isize) -> (isize, f64) {
    if vel > 0.0 { (face - 1, 1.0) } else { (face, -1.0) }
}

/// Arguments of one Gamma integral, in face-normal / face-transverse terms.
///
/// For an x-face the normal direction is x; for a y-face it is y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GammaTrace {
    /// Average of the donor cell
    pub value: f64,
    /// Donor slope along the face normal
    pub normal_slope: f64,
    /// Donor slope along the face
    pub transverse_slope: f64,
    /// Donor cross slope
    pub cross_slope: f64,
    /// Signed cell size along the normal
    pub h_normal: f64,
    /// Signed cell size along the face
    pub h_transverse: f64,
    /// Normal velocities `(w1, w2)` bounding the swept region
    pub normal_velocity: (f64, f64),
    /// Transverse velocity through the swept face
    pub transverse_velocity: f64,
}

/// Integral of the donor reconstruction over the swept region.
pub fn gamma_integral(t: &GammaTrace, dt: f64) -> f64 {
    let (w1, w2) = t.normal_velocity;
    let (hn, ht) = (t.h_normal, t.h_transverse);
    let vt = t.transverse_velocity;
    t.value
        + (hn * 0.5 - (w1 + w2) * dt / 3.0) * t.normal_slope
        + (ht * 0.5 - vt * dt / 3.0) * t.transverse_slope
        + (3.0 * hn * ht - 2.0 * (w1 + w2) * dt * ht - 2.0 * vt * hn * dt
            + vt * (2.0 * w2 + w1) * dt * dt)
            * t.cross_slope
            / 12.0
}

/// Borrowed inputs of the face kernels.
#[derive(Clone, Copy, Debug)]
pub struct EdgeStencil<'a> {
    pub s: FieldView<'a>,
    pub slopes: SlopeView<'a>,
    pub u: FieldView<'a>,
    pub v: FieldView<'a>,
    pub force: FieldView<'a>,
    pub hx: f64,
    pub hy: f64,
    pub dt: f64,
}

impl EdgeStencil<'_> {
    /// Gamma integral for an x-face with donor `(iup, jup)`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn x_gamma(&self, iup: isize, jup: isize, hxs: f64, hys: f64, u1: f64, u2: f64, vv: f64) -> f64 {
        let sl = self.slopes.at(iup, jup);
        gamma_integral(
            &GammaTrace {
                value: self.s.at(iup, jup),
                normal_slope: sl.sx,
                transverse_slope: sl.sy,
                cross_slope: sl.sxy,
                h_normal: hxs,
                h_transverse: hys,
                normal_velocity: (u1, u2),
                transverse_velocity: vv,
            },
            self.dt,
        )
    }

    /// Gamma integral for a y-face with donor `(iup, jup)`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn y_gamma(&self, iup: isize, jup: isize, hxs: f64, hys: f64, v1: f64, v2: f64, uu: f64) -> f64 {
        let sl = self.slopes.at(iup, jup);
        gamma_integral(
            &GammaTrace {
                value: self.s.at(iup, jup),
                normal_slope: sl.sy,
                transverse_slope: sl.sx,
                cross_slope: sl.sxy,
                h_normal: hys,
                h_transverse: hxs,
                normal_velocity: (v1, v2),
                transverse_velocity: uu,
            },
            self.dt,
        )
    }
}

/// State on x-face `(i, j)`, the face between cells `(i-1, j)` and `(i, j)`.
pub fn x_edge_state(st: &EdgeStencil<'_>, i: isize, j: isize) -> f64 {
    let (u, v, dt) = (st.u, st.v, st.dt);
    let u1 = u.at(i, j);
    let (iup, isign) = upwind(u1, i);
    let hxs = st.hx * isign;

    // through the upper face of the donor
    let (jup, jsign, u2) = if v.at(iup, j + 1) > 0.0 {
        (j, 1.0, u1)
    } else {
        let u2 = if u1 * u.at(i, j + 1) > 0.0 { u.at(i, j + 1) } else { 0.0 };
        (j + 1, -1.0, u2)
    };
    let gamp = st.x_gamma(iup, jup, hxs, st.hy * jsign, u1, u2, v.at(iup, j + 1));

    // through the lower face of the donor
    let (jup, jsign, u2) = if v.at(iup, j) > 0.0 {
        let u2 = if u1 * u.at(i, j - 1) > 0.0 { u.at(i, j - 1) } else { 0.0 };
        (j - 1, 1.0, u2)
    } else {
        (j, -1.0, u1)
    };
    let gamm = st.x_gamma(iup, jup, hxs, st.hy * jsign, u1, u2, v.at(iup, j));

    let vdif = 0.5 * dt * (v.at(iup, j + 1) * gamp - v.at(iup, j) * gamm) / st.hy;
    let stem = st.s.at(iup, j) + (isign * st.hx - u1 * dt) * 0.5 * st.slopes.at(iup, j).sx;
    let vaddif = stem * 0.5 * dt * (u.at(iup + 1, j) - u.at(iup, j)) / st.hx;
    let divu = (u.at(iup + 1, j) - u.at(iup, j)) / st.hx + (v.at(iup, j + 1) - v.at(iup, j)) / st.hy;
    stem - vdif - vaddif + 0.5 * dt * stem * divu + (dt / 2.0) * st.force.at(iup, j)
}

/// State on y-face `(i, j)`, the face between cells `(i, j-1)` and `(i, j)`.
pub fn y_edge_state(st: &EdgeStencil<'_>, i: isize, j: isize) -> f64 {
    let (u, v, dt) = (st.u, st.v, st.dt);
    let v1 = v.at(i, j);
    let (jup, jsign) = upwind(v1, j);
    let hys = st.hy * jsign;

    // through the right face of the donor
    let (iup, isign, v2) = if u.at(i + 1, jup) > 0.0 {
        (i, 1.0, v1)
    } else {
        let v2 = if v1 * v.at(i + 1, j) > 0.0 { v.at(i + 1, j) } else { 0.0 };
        (i + 1, -1.0, v2)
    };
    let gamp = st.y_gamma(iup, jup, st.hx * isign, hys, v1, v2, u.at(i + 1, jup));

    // through the left face of the donor
    let (iup, isign, v2) = if u.at(i, jup) > 0.0 {
        let v2 = if v1 * v.at(i - 1, j) > 0.0 { v.at(i - 1, j) } else { 0.0 };
        (i - 1, 1.0, v2)
    } else {
        (i, -1.0, v1)
    };
    let gamm = st.y_gamma(iup, jup, st.hx * isign, hys, v1, v2, u.at(i, jup));

    let vdif = 0.5 * dt * (u.at(i + 1, jup) * gamp - u.at(i, jup) * gamm) / st.hx;
    let stem = st.s.at(i, jup) + (jsign * st.hy - v1 * dt) * 0.5 * st.slopes.at(i, jup).sy;
    let vaddif = stem * 0.5 * dt * (v.at(i, jup + 1) - v.at(i, jup)) / st.hy;
    let divu = (u.at(i + 1, jup) - u.at(i, jup)) / st.hx + (v.at(i, jup + 1) - v.at(i, jup)) / st.hy;
    stem - vdif - vaddif + 0.5 * dt * stem * divu + (dt / 2.0) * st.force.at(i, jup)
}

/// Compute both edge-state arrays over the valid faces of `geom`.
///
/// Writes component `edge_comp` of `xedge` on every x-face of the valid
/// box and of `yedge` on every y-face. Nothing else is written.
///
/// # Panics
///
/// Panics if `slopes` does not cover the valid cells grown by one, or an
/// output array does not cover its valid face box.
#[allow(clippy::too_many_arguments)]
pub fn assemble_edge_states(
    s: &Field2D,
    state_comp: usize,
    slopes: &Field2D,
    u_face: &Field2D,
    v_face: &Field2D,
    force: &Field2D,
    force_comp: usize,
    xedge: &mut Field2D,
    yedge: &mut Field2D,
    edge_comp: usize,
    geom: &Geometry2D,
    dt: f64,
    config: &BdsConfig,
) {
    let domain = geom.domain();
    let x_faces = domain.convert(Centering::XFace);
    let y_faces = domain.convert(Centering::YFace);
    let donors = domain.grow(1);
    assert!(
        slopes.index_box().contains_box(&donors),
        "slope array {} does not cover donor cells {}",
        slopes.index_box(),
        donors
    );
    assert!(
        xedge.index_box().contains_box(&x_faces) && yedge.index_box().contains_box(&y_faces),
        "edge arrays {} / {} do not cover faces {} / {}",
        xedge.index_box(),
        yedge.index_box(),
        x_faces,
        y_faces
    );

    let stencil = EdgeStencil {
        s: s.view(state_comp),
        slopes: SlopeView::new(slopes),
        u: u_face.view(0),
        v: v_face.view(0),
        force: force.view(force_comp),
        hx: geom.hx(),
        hy: geom.hy(),
        dt,
    };

    evaluate_tiled(
        &x_faces,
        config.tile_size,
        |i, j| x_edge_state(&stencil, i, j),
        |i, j, value| xedge.set(i, j, edge_comp, value),
    );
    evaluate_tiled(
        &y_faces,
        config.tile_size,
        |i, j| y_edge_state(&stencil, i, j),
        |i, j, value| yedge.set(i, j, edge_comp, value),
    );
}
