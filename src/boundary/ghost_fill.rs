//! Ghost-cell filling for patch arrays.
//!
//! The reconstruction kernel reads ghost cells but never writes them. This
//! module fills them from the valid data according to a [`BcType`] per side.

use crate::error::BdsError;
use crate::grid::Field2D;
use crate::types::{Direction, IndexBox, SideBoundaries};

/// Boundary-condition kind applied on one side of a patch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BcType {
    /// Wrap around to the opposite side. Both sides of a direction must agree.
    Periodic,
    /// Copy the nearest valid value (zero gradient).
    #[default]
    FirstOrderExtrap,
    /// Mirror the valid data about the boundary.
    ReflectEven,
    /// Mirror the valid data about the boundary and flip its sign.
    ReflectOdd,
    /// Fixed external value in every ghost point.
    Dirichlet(f64),
}

impl std::fmt::Display for BcType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BcType::Periodic => write!(f, "periodic"),
            BcType::FirstOrderExtrap => write!(f, "foextrap"),
            BcType::ReflectEven => write!(f, "reflect_even"),
            BcType::ReflectOdd => write!(f, "reflect_odd"),
            BcType::Dirichlet(v) => write!(f, "ext_dir({})", v),
        }
    }
}

/// Boundary-condition kinds on the four sides of a patch.
pub type FieldBoundaries = SideBoundaries<BcType>;

/// Valid index range along `dir` for a field of the given nodality.
fn valid_range(domain: &IndexBox, dir: Direction, nodal: bool) -> (isize, isize) {
    let lo = domain.lo_in(dir);
    let hi = domain.hi_in(dir) + isize::from(nodal);
    (lo, hi)
}

/// How one ghost point gets its value.
enum GhostSource {
    /// `sign * valid[src]`
    Copy { src: isize, sign: f64 },
    Fixed(f64),
}

/// Source of ghost index `g` on the low (`low = true`) or high side.
fn ghost_source(
    bc: BcType,
    g: isize,
    low: bool,
    (vlo, vhi): (isize, isize),
    period: isize,
    nodal: bool,
) -> GhostSource {
    let mirror = |g: isize| -> isize {
        // Cell data mirrors about the face, nodal data about the boundary node.
        let shift = isize::from(!nodal);
        let src = if low { 2 * vlo - shift - g } else { 2 * vhi + shift - g };
        src.clamp(vlo, vhi)
    };
    match bc {
        BcType::Periodic => GhostSource::Copy {
            src: vlo + (g - vlo).rem_euclid(period),
            sign: 1.0,
        },
        BcType::FirstOrderExtrap => GhostSource::Copy {
            src: if low { vlo } else { vhi },
            sign: 1.0,
        },
        BcType::ReflectEven => GhostSource::Copy {
            src: mirror(g),
            sign: 1.0,
        },
        BcType::ReflectOdd => GhostSource::Copy {
            src: mirror(g),
            sign: -1.0,
        },
        BcType::Dirichlet(value) => GhostSource::Fixed(value),
    }
}

/// Fill the ghost entries of one component of `field`.
///
/// `domain` is the valid *cell* box; the valid region of the field follows
/// from its centering (a nodal direction includes both boundary faces).
/// The x-direction is filled first over the valid rows, then the
/// y-direction over every column, so corner ghosts are filled too.
///
/// # Errors
///
/// - [`BdsError::ComponentOutOfRange`] if `comp` is not a component of `field`
/// - [`BdsError::InconsistentPeriodicity`] if only one side of a direction is periodic
pub fn fill_ghost_cells(
    field: &mut Field2D,
    comp: usize,
    domain: &IndexBox,
    bcs: &FieldBoundaries,
) -> Result<(), BdsError> {
    if comp >= field.n_comp() {
        return Err(BdsError::ComponentOutOfRange {
            field: "ghost fill",
            comp,
            n_comp: field.n_comp(),
        });
    }
    for dir in Direction::ALL {
        let lo_periodic = matches!(bcs.low(dir), BcType::Periodic);
        let hi_periodic = matches!(bcs.high(dir), BcType::Periodic);
        if lo_periodic != hi_periodic {
            return Err(BdsError::InconsistentPeriodicity(dir));
        }
    }

    let centering = field.centering();
    let array_box = field.index_box();
    let x_nodal = centering.is_nodal(Direction::X);
    let y_nodal = centering.is_nodal(Direction::Y);
    let (xlo, xhi) = valid_range(domain, Direction::X, x_nodal);
    let (ylo, yhi) = valid_range(domain, Direction::Y, y_nodal);

    let (ilo, jlo) = array_box.lo();
    let (ihi, jhi) = array_box.hi();

    // x-direction over valid rows
    let period = domain.nx() as isize;
    for j in ylo.max(jlo)..=yhi.min(jhi) {
        for (i, low) in (ilo..xlo).map(|i| (i, true)).chain((xhi + 1..=ihi).map(|i| (i, false))) {
            let bc = if low { bcs.west } else { bcs.east };
            let value = match ghost_source(bc, i, low, (xlo, xhi), period, x_nodal) {
                GhostSource::Copy { src, sign } => sign * field.get(src, j, comp),
                GhostSource::Fixed(value) => value,
            };
            field.set(i, j, comp, value);
        }
    }

    // y-direction over every column, ghosts included
    let period = domain.ny() as isize;
    for i in ilo..=ihi {
        for (j, low) in (jlo..ylo).map(|j| (j, true)).chain((yhi + 1..=jhi).map(|j| (j, false))) {
            let bc = if low { bcs.south } else { bcs.north };
            let value = match ghost_source(bc, j, low, (ylo, yhi), period, y_nodal) {
                GhostSource::Copy { src, sign } => sign * field.get(i, src, comp),
                GhostSource::Fixed(value) => value,
            };
            field.set(i, j, comp, value);
        }
    }

    log::trace!(
        "filled {} ghosts of {} over {} (bcs {})",
        centering,
        array_box,
        domain,
        bcs
    );
    Ok(())
}
