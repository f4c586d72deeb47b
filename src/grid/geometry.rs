//! Uniform Cartesian patch geometry.

use crate::types::{Bounds2D, IndexBox};

/// Geometry of one uniform patch: valid cell box, physical bounds, cell sizes.
///
/// # Example
///
/// ```
/// use bds_rs::grid::Geometry2D;
/// use bds_rs::types::{Bounds2D, IndexBox};
///
/// let geom = Geometry2D::new(IndexBox::from_size(10, 5), Bounds2D::new(0.0, 1.0, 0.0, 1.0));
/// assert_eq!(geom.hx(), 0.1);
/// assert_eq!(geom.hy(), 0.2);
/// assert_eq!(geom.cell_center(0, 0), (0.05, 0.1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry2D {
    domain: IndexBox,
    bounds: Bounds2D,
    hx: f64,
    hy: f64,
}

impl Geometry2D {
    /// Geometry from a cell box and the physical bounds of those cells.
    pub fn new(domain: IndexBox, bounds: Bounds2D) -> Self {
        let hx = bounds.width() / domain.nx() as f64;
        let hy = bounds.height() / domain.ny() as f64;
        Self {
            domain,
            bounds,
            hx,
            hy,
        }
    }

    /// Geometry with cells `[0, nx-1] × [0, ny-1]` of size `hx × hy`, origin at zero.
    ///
    /// # Panics
    ///
    /// Panics if `hx` or `hy` is not strictly positive.
    pub fn uniform(nx: usize, ny: usize, hx: f64, hy: f64) -> Self {
        assert!(hx > 0.0, "hx must be positive, got {}", hx);
        assert!(hy > 0.0, "hy must be positive, got {}", hy);
        let domain = IndexBox::from_size(nx, ny);
        let bounds = Bounds2D::new(0.0, nx as f64 * hx, 0.0, ny as f64 * hy);
        Self {
            domain,
            bounds,
            hx,
            hy,
        }
    }

    /// Valid (non-ghost) cell box.
    #[inline]
    pub fn domain(&self) -> IndexBox {
        self.domain
    }

    #[inline]
    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    /// Cell width.
    #[inline]
    pub fn hx(&self) -> f64 {
        self.hx
    }

    /// Cell height.
    #[inline]
    pub fn hy(&self) -> f64 {
        self.hy
    }

    /// Centre of cell `(i, j)`; valid for ghost indices too.
    pub fn cell_center(&self, i: isize, j: isize) -> (f64, f64) {
        let (ilo, jlo) = self.domain.lo();
        (
            self.bounds.x_min + ((i - ilo) as f64 + 0.5) * self.hx,
            self.bounds.y_min + ((j - jlo) as f64 + 0.5) * self.hy,
        )
    }

    /// Lower-left corner of cell `(i, j)`.
    pub fn node(&self, i: isize, j: isize) -> (f64, f64) {
        let (ilo, jlo) = self.domain.lo();
        (
            self.bounds.x_min + (i - ilo) as f64 * self.hx,
            self.bounds.y_min + (j - jlo) as f64 * self.hy,
        )
    }
}
