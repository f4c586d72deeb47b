//! Boundary conditions via ghost cells.
//!
//! Domain boundaries enter the reconstruction only through pre-filled ghost
//! cells. [`fill_ghost_cells`] provides the fill for the usual kinds:
//!
//! - [`BcType::Periodic`]: wrap-around
//! - [`BcType::FirstOrderExtrap`]: zero gradient (outflow)
//! - [`BcType::ReflectEven`] / [`BcType::ReflectOdd`]: symmetry walls, the odd
//!   kind for normal velocity components
//! - [`BcType::Dirichlet`]: prescribed external value (inflow)
//!
//! # Example
//!
//! ```
//! use bds_rs::boundary::{BcType, FieldBoundaries, fill_ghost_cells};
//! use bds_rs::grid::Field2D;
//! use bds_rs::types::{Centering, IndexBox};
//!
//! let domain = IndexBox::from_size(8, 8);
//! let mut s = Field2D::on_domain(&domain, Centering::Cell, 3, 1);
//! s.fill_with(0, |i, _| i as f64);
//! fill_ghost_cells(&mut s, 0, &domain, &FieldBoundaries::uniform(BcType::Periodic)).unwrap();
//! assert_eq!(s.get(-1, 0, 0), 7.0);
//! ```

mod ghost_fill;

pub use ghost_fill::{BcType, FieldBoundaries, fill_ghost_cells};
