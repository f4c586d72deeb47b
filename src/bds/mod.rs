//! BDS edge-state reconstruction.
//!
//! [`compute_edge_state`] runs the three stages on one patch:
//!
//! 1. [`corner`]: bicubic interpolation of the cell averages to the nodes
//! 2. [`slopes`]: bilinear-plus-cross-term slopes, limited by [`limiter`]
//! 3. [`edge`]: upwind states on every valid x-face and y-face at `t + dt/2`
//!
//! Each stage completes before the next one reads its output. The corner
//! and slope arrays are scratch owned by the call.
//!
//! # Ghost cells
//!
//! Boundaries enter only through ghost cells filled by the caller (see
//! [`crate::boundary`]). The state needs [`REQUIRED_STATE_GHOST_CELLS`]
//! layers, velocities and forcing need one.
//!
//! # Example
//!
//! ```
//! use bds_rs::bds::compute_edge_state;
//! use bds_rs::grid::{Field2D, Geometry2D};
//! use bds_rs::types::Centering;
//!
//! let geom = Geometry2D::uniform(8, 8, 1.0, 1.0);
//! let domain = geom.domain();
//! let s = Field2D::filled(domain.grow(3), Centering::Cell, 1, 2.0);
//! let u = Field2D::filled(domain.convert(Centering::XFace).grow(1), Centering::XFace, 1, 0.5);
//! let v = Field2D::filled(domain.convert(Centering::YFace).grow(1), Centering::YFace, 1, -0.25);
//! let force = Field2D::new(domain.grow(1), Centering::Cell, 1);
//! let mut xedge = Field2D::on_domain(&domain, Centering::XFace, 0, 1);
//! let mut yedge = Field2D::on_domain(&domain, Centering::YFace, 0, 1);
//!
//! compute_edge_state(&s, 0, &geom, &mut xedge, &mut yedge, 0, &u, &v, &force, 0, true, 0.1)?;
//! assert!((xedge.get(3, 4, 0) - 2.0).abs() < 1e-12);
//! # Ok::<(), bds_rs::BdsError>(())
//! ```

pub mod config;
pub mod corner;
pub mod edge;
pub mod limiter;
pub mod slopes;
pub mod tiling;

pub use config::BdsConfig;
pub use corner::{CORNER_STENCIL_REACH, corner_value, interpolate_corners};
pub use edge::{EdgeStencil, GammaTrace, assemble_edge_states, gamma_integral, x_edge_state, y_edge_state};
pub use limiter::{ConstrainedLimiter, CornerLimiter, NoLimiter, StandardLimiter};
pub use slopes::{Slopes, compute_slopes, fit_cell};

use crate::error::BdsError;
use crate::grid::{Field2D, Geometry2D};
use crate::types::{Centering, IndexBox};

/// Ghost layers the state array needs around the valid cells.
///
/// Slopes are fitted one cell outside the valid box, their nodes reach one
/// more, and the corner stencil two beyond that on the low side.
pub const REQUIRED_STATE_GHOST_CELLS: usize = 3;

/// Ghost layers the velocity arrays need around their valid faces.
pub const REQUIRED_VELOCITY_GHOST_CELLS: usize = 1;

/// Ghost layers the forcing array needs around the valid cells.
pub const REQUIRED_FORCE_GHOST_CELLS: usize = 1;

/// Check centering, component and ghost coverage of one argument.
fn check_array(
    field: &Field2D,
    name: &'static str,
    expected: Centering,
    comp: usize,
    domain: &IndexBox,
    ghosts: usize,
) -> Result<(), BdsError> {
    if field.centering() != expected {
        return Err(BdsError::CenteringMismatch {
            field: name,
            expected,
            actual: field.centering(),
        });
    }
    if comp >= field.n_comp() {
        return Err(BdsError::ComponentOutOfRange {
            field: name,
            comp,
            n_comp: field.n_comp(),
        });
    }
    let available = field.index_box().margin_around(&domain.convert(expected));
    if available < ghosts as isize {
        return Err(BdsError::insufficient_ghosts(name, ghosts, available));
    }
    Ok(())
}

/// Compute edge states of one component with the default configuration.
///
/// See [`compute_edge_state_with_config`].
#[allow(clippy::too_many_arguments)]
pub fn compute_edge_state(
    s: &Field2D,
    state_comp: usize,
    geom: &Geometry2D,
    xedge: &mut Field2D,
    yedge: &mut Field2D,
    edge_comp: usize,
    u_face: &Field2D,
    v_face: &Field2D,
    force: &Field2D,
    force_comp: usize,
    is_conservative: bool,
    dt: f64,
) -> Result<(), BdsError> {
    compute_edge_state_with_config(
        s,
        state_comp,
        geom,
        xedge,
        yedge,
        edge_comp,
        u_face,
        v_face,
        force,
        force_comp,
        is_conservative,
        dt,
        &BdsConfig::default(),
    )
}

/// Compute edge states of component `state_comp` of `s` at `t + dt/2`.
///
/// Writes component `edge_comp` of `xedge` on the valid x-faces and of
/// `yedge` on the valid y-faces of `geom`.
///
/// # Errors
///
/// - [`BdsError::NonConservative`] if `is_conservative` is false; nothing
///   else is checked and nothing is written
/// - [`BdsError::CenteringMismatch`], [`BdsError::ComponentOutOfRange`],
///   [`BdsError::InsufficientGhostCells`] for an unusable array
/// - [`BdsError::InvalidTimeStep`] if `dt` is not finite and positive
///
/// Outputs are untouched when an error is returned.
#[allow(clippy::too_many_arguments)]
pub fn compute_edge_state_with_config(
    s: &Field2D,
    state_comp: usize,
    geom: &Geometry2D,
    xedge: &mut Field2D,
    yedge: &mut Field2D,
    edge_comp: usize,
    u_face: &Field2D,
    v_face: &Field2D,
    force: &Field2D,
    force_comp: usize,
    is_conservative: bool,
    dt: f64,
    config: &BdsConfig,
) -> Result<(), BdsError> {
    if !is_conservative {
        return Err(BdsError::NonConservative);
    }

    let domain = geom.domain();
    check_array(s, "s", Centering::Cell, state_comp, &domain, REQUIRED_STATE_GHOST_CELLS)?;
    check_array(u_face, "u_face", Centering::XFace, 0, &domain, REQUIRED_VELOCITY_GHOST_CELLS)?;
    check_array(v_face, "v_face", Centering::YFace, 0, &domain, REQUIRED_VELOCITY_GHOST_CELLS)?;
    check_array(force, "force", Centering::Cell, force_comp, &domain, REQUIRED_FORCE_GHOST_CELLS)?;
    check_array(xedge, "xedge", Centering::XFace, edge_comp, &domain, 0)?;
    check_array(yedge, "yedge", Centering::YFace, edge_comp, &domain, 0)?;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(BdsError::InvalidTimeStep(dt));
    }

    log::debug!(
        "BDS edge states on {} (hx = {}, hy = {}, dt = {}, limiter = {})",
        domain,
        geom.hx(),
        geom.hy(),
        dt,
        config.limiter_name()
    );

    let sint = corner::interpolate_corners(
        s,
        state_comp,
        &domain.convert(Centering::Node).grow(1),
        config,
    );
    let slopes = slopes::compute_slopes(s, state_comp, &sint, geom, &domain.grow(1), config);
    edge::assemble_edge_states(
        s,
        state_comp,
        &slopes,
        u_face,
        v_face,
        force,
        force_comp,
        xedge,
        yedge,
        edge_comp,
        geom,
        dt,
        config,
    );
    Ok(())
}

/// Compute edge states for `ncomp` consecutive components.
///
/// Component `n` reads `s[state_comp + n]` and `force[force_comp + n]` and
/// writes `xedge[edge_comp + n]`, `yedge[edge_comp + n]`. `iconserv[n]`
/// is the conservative flag of component `n`.
///
/// # Errors
///
/// [`BdsError::IconservLength`] if `iconserv` does not have `ncomp`
/// entries; otherwise the first error of any component (earlier
/// components are already written).
#[allow(clippy::too_many_arguments)]
pub fn compute_edge_states(
    s: &Field2D,
    state_comp: usize,
    geom: &Geometry2D,
    xedge: &mut Field2D,
    yedge: &mut Field2D,
    edge_comp: usize,
    u_face: &Field2D,
    v_face: &Field2D,
    force: &Field2D,
    force_comp: usize,
    ncomp: usize,
    iconserv: &[bool],
    dt: f64,
    config: &BdsConfig,
) -> Result<(), BdsError> {
    if iconserv.len() != ncomp {
        return Err(BdsError::IconservLength {
            expected: ncomp,
            actual: iconserv.len(),
        });
    }
    for (n, &conservative) in iconserv.iter().enumerate() {
        compute_edge_state_with_config(
            s,
            state_comp + n,
            geom,
            xedge,
            yedge,
            edge_comp + n,
            u_face,
            v_face,
            force,
            force_comp + n,
            conservative,
            dt,
            config,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Patch {
        geom: Geometry2D,
        s: Field2D,
        u: Field2D,
        v: Field2D,
        force: Field2D,
        xedge: Field2D,
        yedge: Field2D,
    }

    fn patch(n_comp: usize) -> Patch {
        let geom = Geometry2D::uniform(6, 5, 1.0, 1.0);
        let domain = geom.domain();
        let mut s = Field2D::on_domain(&domain, Centering::Cell, 3, n_comp);
        for comp in 0..n_comp {
            s.fill_with(comp, |_, _| comp as f64 + 1.0);
        }
        Patch {
            geom,
            s,
            u: Field2D::filled(domain.convert(Centering::XFace).grow(1), Centering::XFace, 1, 0.3),
            v: Field2D::filled(domain.convert(Centering::YFace).grow(1), Centering::YFace, 1, 0.2),
            force: Field2D::on_domain(&domain, Centering::Cell, 1, n_comp),
            xedge: Field2D::on_domain(&domain, Centering::XFace, 0, n_comp),
            yedge: Field2D::on_domain(&domain, Centering::YFace, 0, n_comp),
        }
    }

    fn run(p: &mut Patch, conservative: bool, dt: f64) -> Result<(), BdsError> {
        compute_edge_state(
            &p.s,
            0,
            &p.geom,
            &mut p.xedge,
            &mut p.yedge,
            0,
            &p.u,
            &p.v,
            &p.force,
            0,
            conservative,
            dt,
        )
    }

    #[test]
    fn test_non_conservative_rejected_before_anything_else() {
        let mut p = patch(1);
        // dt is invalid too; the configuration check comes first
        assert_eq!(run(&mut p, false, -1.0), Err(BdsError::NonConservative));
        assert_eq!(p.xedge.max_abs(0, &p.xedge.index_box()), 0.0);
    }

    #[test]
    fn test_invalid_time_step() {
        let mut p = patch(1);
        assert_eq!(run(&mut p, true, 0.0), Err(BdsError::InvalidTimeStep(0.0)));
        assert!(matches!(run(&mut p, true, f64::NAN), Err(BdsError::InvalidTimeStep(_))));
    }

    #[test]
    fn test_state_needs_three_ghost_layers() {
        let mut p = patch(1);
        p.s = Field2D::on_domain(&p.geom.domain(), Centering::Cell, 2, 1);
        assert_eq!(
            run(&mut p, true, 0.1),
            Err(BdsError::InsufficientGhostCells {
                field: "s",
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_velocity_centering_checked() {
        let mut p = patch(1);
        p.u = Field2D::on_domain(&p.geom.domain(), Centering::Cell, 1, 1);
        assert_eq!(
            run(&mut p, true, 0.1),
            Err(BdsError::CenteringMismatch {
                field: "u_face",
                expected: Centering::XFace,
                actual: Centering::Cell
            })
        );
    }

    #[test]
    fn test_edge_component_checked() {
        let mut p = patch(1);
        let err = compute_edge_state(
            &p.s, 0, &p.geom, &mut p.xedge, &mut p.yedge, 1, &p.u, &p.v, &p.force, 0, true, 0.1,
        );
        assert!(matches!(
            err,
            Err(BdsError::ComponentOutOfRange { field: "xedge", comp: 1, n_comp: 1 })
        ));
    }

    #[test]
    fn test_multi_component_driver() {
        let mut p = patch(2);
        compute_edge_states(
            &p.s,
            0,
            &p.geom,
            &mut p.xedge,
            &mut p.yedge,
            0,
            &p.u,
            &p.v,
            &p.force,
            0,
            2,
            &[true, true],
            0.1,
            &BdsConfig::default(),
        )
        .unwrap();
        for comp in 0..2 {
            let expected = comp as f64 + 1.0;
            for (i, j) in p.xedge.index_box().iter() {
                assert!((p.xedge.get(i, j, comp) - expected).abs() < 1e-12);
            }
            for (i, j) in p.yedge.index_box().iter() {
                assert!((p.yedge.get(i, j, comp) - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_iconserv_length_and_flags() {
        let mut p = patch(2);
        let mut call = |iconserv: &[bool]| {
            compute_edge_states(
                &p.s,
                0,
                &p.geom,
                &mut p.xedge,
                &mut p.yedge,
                0,
                &p.u,
                &p.v,
                &p.force,
                0,
                2,
                iconserv,
                0.1,
                &BdsConfig::default(),
            )
        };
        assert_eq!(
            call(&[true]),
            Err(BdsError::IconservLength {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(call(&[true, false]), Err(BdsError::NonConservative));
    }
}
