//! Physical extent of a rectangular problem domain.

use std::fmt;

/// Physical bounds `[x_min, x_max] × [y_min, y_max]` of the valid cells.
///
/// Together with the cell index box this fixes the cell sizes `hx`, `hy`
/// (see [`Geometry2D`](crate::grid::Geometry2D)).
///
/// # Example
///
/// ```
/// use bds_rs::types::Bounds2D;
///
/// let bounds = Bounds2D::new(0.0, 2.0, -1.0, 1.0);
/// assert_eq!(bounds.width(), 2.0);
/// assert_eq!(bounds.height(), 2.0);
/// assert!(bounds.contains(1.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    /// Low x edge (west)
    pub x_min: f64,
    /// High x edge (east)
    pub x_max: f64,
    /// Low y edge (south)
    pub y_min: f64,
    /// High y edge (north)
    pub y_max: f64,
}

impl Bounds2D {
    /// Create bounds.
    ///
    /// # Panics
    ///
    /// Panics unless `x_max > x_min` and `y_max > y_min` (both finite).
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        assert!(
            x_min.is_finite() && x_max.is_finite() && x_max > x_min,
            "x_max ({}) must be greater than x_min ({})",
            x_max,
            x_min
        );
        assert!(
            y_min.is_finite() && y_max.is_finite() && y_max > y_min,
            "y_max ({}) must be greater than y_min ({})",
            y_max,
            y_min
        );
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// `[0, 1] × [0, 1]`.
    pub fn unit_square() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive point test.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

impl Default for Bounds2D {
    fn default() -> Self {
        Self::unit_square()
    }
}
