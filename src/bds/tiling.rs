//! Tiled evaluation of point-wise stage kernels.
//!
//! Every stage of the reconstruction computes each output point from inputs
//! only, so the iteration region splits into independent tiles. The serial
//! build visits tiles in order and writes directly. With the `parallel`
//! feature tiles are evaluated concurrently into tile-local buffers, which
//! are scattered into the destination once every tile has finished.

use crate::types::{IndexBox, TileSize};

/// Evaluate `kernel` at every point of `region` and hand each result to `write`.
///
/// `write` sees each point exactly once. Results never depend on `tile`.
#[cfg(not(feature = "parallel"))]
pub fn evaluate_tiled<T, K, W>(region: &IndexBox, tile: TileSize, kernel: K, mut write: W)
where
    T: Send,
    K: Fn(isize, isize) -> T + Sync,
    W: FnMut(isize, isize, T),
{
    let tiles = region.tiles(tile);
    log::trace!("evaluating {} in {} tiles", region, tiles.len());
    for bx in tiles {
        for (i, j) in bx.iter() {
            write(i, j, kernel(i, j));
        }
    }
}

/// Evaluate `kernel` at every point of `region` and hand each result to `write`.
///
/// Tiles run on the rayon pool; `write` runs on the calling thread after
/// all tiles have completed.
#[cfg(feature = "parallel")]
pub fn evaluate_tiled<T, K, W>(region: &IndexBox, tile: TileSize, kernel: K, mut write: W)
where
    T: Send,
    K: Fn(isize, isize) -> T + Sync,
    W: FnMut(isize, isize, T),
{
    use rayon::prelude::*;

    let tiles = region.tiles(tile);
    log::trace!("evaluating {} in {} parallel tiles", region, tiles.len());
    let results: Vec<(IndexBox, Vec<T>)> = tiles
        .into_par_iter()
        .map(|bx| {
            let values = bx.iter().map(|(i, j)| kernel(i, j)).collect();
            (bx, values)
        })
        .collect();

    for (bx, values) in results {
        for ((i, j), value) in bx.iter().zip(values) {
            write(i, j, value);
        }
    }
}
