//! Advective time-step diagnostics.
//!
//! The reconstruction itself accepts any positive `dt`, but its upwind
//! traces stay inside the donor cell only for
//! `dt·(|u|/hx + |v|/hy) ≤ 1`. These helpers measure that number for a
//! face velocity field and pick a `dt` for a target CFL.

use crate::grid::{Field2D, Geometry2D};

/// Largest advective rate `max(|u_lo|,|u_hi|)/hx + max(|v_lo|,|v_hi|)/hy` over the valid cells.
///
/// A cell whose rate is NaN makes the result NaN.
fn max_advective_rate(u_face: &Field2D, v_face: &Field2D, geom: &Geometry2D) -> f64 {
    let u = u_face.view(0);
    let v = v_face.view(0);
    let (hx, hy) = (geom.hx(), geom.hy());
    geom.domain()
        .iter()
        .map(|(i, j)| {
            let ux = u.at(i, j).abs().max(u.at(i + 1, j).abs());
            let vy = v.at(i, j).abs().max(v.at(i, j + 1).abs());
            ux / hx + vy / hy
        })
        .fold(0.0, |acc: f64, rate| if rate > acc || rate.is_nan() { rate } else { acc })
}

/// Advective CFL number of a step of size `dt`.
///
/// # Example
///
/// ```
/// use bds_rs::diagnostics::advective_cfl;
/// use bds_rs::grid::{Field2D, Geometry2D};
/// use bds_rs::types::Centering;
///
/// let geom = Geometry2D::uniform(4, 4, 0.5, 0.5);
/// let d = geom.domain();
/// let u = Field2D::filled(d.convert(Centering::XFace), Centering::XFace, 1, 1.0);
/// let v = Field2D::filled(d.convert(Centering::YFace), Centering::YFace, 1, -0.5);
/// assert!((advective_cfl(&u, &v, &geom, 0.1) - 0.3).abs() < 1e-12);
/// ```
pub fn advective_cfl(u_face: &Field2D, v_face: &Field2D, geom: &Geometry2D, dt: f64) -> f64 {
    dt * max_advective_rate(u_face, v_face, geom)
}

/// Time step giving an advective CFL number of `cfl`.
///
/// Infinite for a still velocity field.
pub fn compute_dt_advection(
    u_face: &Field2D,
    v_face: &Field2D,
    geom: &Geometry2D,
    cfl: f64,
) -> f64 {
    let rate = max_advective_rate(u_face, v_face, geom);
    if rate.is_nan() {
        log::warn!("non-finite velocity in CFL estimate on {}", geom.domain());
        return f64::NAN;
    }
    if rate == 0.0 {
        return f64::INFINITY;
    }
    let dt = cfl / rate;
    log::debug!("advective dt = {:e} (cfl = {}, max rate = {:e})", dt, cfl, rate);
    dt
}
