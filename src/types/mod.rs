//! Strongly-typed index and domain types.
//!
//! - [`IndexBox`]: inclusive rectangle of signed cell/face/node indices
//! - [`Centering`]: staggering of an array relative to the cells
//! - [`TileSize`]: tile extent for stage iteration
//! - [`Bounds2D`]: physical extent of the valid cells
//! - [`SideBoundaries`]: one value per domain side
//!
//! # Example
//!
//! ```
//! use bds_rs::types::{Centering, IndexBox};
//!
//! let cells = IndexBox::from_size(16, 16);
//! let x_faces = cells.convert(Centering::XFace);
//! assert_eq!((x_faces.nx(), x_faces.ny()), (17, 16));
//! ```

mod bounds;
mod index_box;
mod sides;

pub use bounds::Bounds2D;
pub use index_box::{Centering, Direction, IndexBox, TileSize};
pub use sides::SideBoundaries;
