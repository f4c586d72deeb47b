//! Patch geometry and array containers.
//!
//! The reconstruction works on a single uniform patch: a [`Geometry2D`]
//! (valid cell box and cell sizes) plus [`Field2D`] arrays that cover the
//! valid region of their centering and a ghost margin around it.

mod field;
mod geometry;

pub use field::{Field2D, FieldView};
pub use geometry::Geometry2D;
