//! Integer index boxes, staggering and tiling.
//!
//! An [`IndexBox`] is an inclusive rectangle of signed `(i, j)` indices.
//! Ghost cells live at negative indices or past the valid `hi`, so indices
//! are `isize` throughout.

use std::fmt;

/// Coordinate direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// x (index `i`)
    X,
    /// y (index `j`)
    Y,
}

impl Direction {
    /// Both directions, x first.
    pub const ALL: [Direction; 2] = [Direction::X, Direction::Y];

    /// Array slot for this direction.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::X => write!(f, "x"),
            Direction::Y => write!(f, "y"),
        }
    }
}

/// Where values of an array live relative to the cells.
///
/// - `Cell`: cell centres, `(Nx, Ny)` valid points
/// - `XFace`: centres of vertical faces, `(Nx+1, Ny)`
/// - `YFace`: centres of horizontal faces, `(Nx, Ny+1)`
/// - `Node`: cell corners, `(Nx+1, Ny+1)`
///
/// Face and node `(i, j)` are the low-side face / lower-left corner of cell `(i, j)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Centering {
    Cell,
    XFace,
    YFace,
    Node,
}

impl Centering {
    /// Whether this centering is nodal (staggered) in the given direction.
    #[inline]
    pub const fn is_nodal(self, dir: Direction) -> bool {
        matches!(
            (self, dir),
            (Centering::XFace, Direction::X)
                | (Centering::YFace, Direction::Y)
                | (Centering::Node, _)
        )
    }
}

impl fmt::Display for Centering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Centering::Cell => "cell",
            Centering::XFace => "x-face",
            Centering::YFace => "y-face",
            Centering::Node => "node",
        };
        write!(f, "{}", name)
    }
}

/// Tile extent used to split a stage's iteration region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSize {
    /// Points per tile in x
    pub nx: usize,
    /// Points per tile in y
    pub ny: usize,
}

impl TileSize {
    /// Create a tile size.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    pub fn new(nx: usize, ny: usize) -> Self {
        assert!(nx > 0, "tile nx must be positive, got {}", nx);
        assert!(ny > 0, "tile ny must be positive, got {}", ny);
        Self { nx, ny }
    }
}

impl Default for TileSize {
    /// Long, thin tiles: whole rows in x, a few rows in y.
    fn default() -> Self {
        Self { nx: 1024, ny: 8 }
    }
}

/// Inclusive rectangle of integer indices.
///
/// # Example
///
/// ```
/// use bds_rs::types::{Centering, IndexBox};
///
/// let cells = IndexBox::from_size(8, 4);
/// assert_eq!(cells.nx(), 8);
/// assert_eq!(cells.convert(Centering::XFace).nx(), 9);
/// assert_eq!(cells.grow(2).lo(), (-2, -2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBox {
    lo: [isize; 2],
    hi: [isize; 2],
}

impl IndexBox {
    /// Create a box from inclusive corners.
    ///
    /// # Panics
    ///
    /// Panics if the box would be empty.
    pub fn new(lo: (isize, isize), hi: (isize, isize)) -> Self {
        assert!(
            hi.0 >= lo.0 && hi.1 >= lo.1,
            "empty index box: lo = {:?}, hi = {:?}",
            lo,
            hi
        );
        Self {
            lo: [lo.0, lo.1],
            hi: [hi.0, hi.1],
        }
    }

    /// Box `[0, nx-1] × [0, ny-1]`.
    pub fn from_size(nx: usize, ny: usize) -> Self {
        assert!(nx > 0 && ny > 0, "box size must be positive, got {}×{}", nx, ny);
        Self::new((0, 0), (nx as isize - 1, ny as isize - 1))
    }

    #[inline]
    pub fn lo(&self) -> (isize, isize) {
        (self.lo[0], self.lo[1])
    }

    #[inline]
    pub fn hi(&self) -> (isize, isize) {
        (self.hi[0], self.hi[1])
    }

    /// Low index along `dir`.
    #[inline]
    pub fn lo_in(&self, dir: Direction) -> isize {
        self.lo[dir.index()]
    }

    /// High index along `dir`.
    #[inline]
    pub fn hi_in(&self, dir: Direction) -> isize {
        self.hi[dir.index()]
    }

    /// Number of points along `dir`.
    #[inline]
    pub fn len(&self, dir: Direction) -> usize {
        (self.hi[dir.index()] - self.lo[dir.index()] + 1) as usize
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.len(Direction::X)
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.len(Direction::Y)
    }

    /// Total number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Grow (or shrink, for negative `n`) by `n` in every direction.
    pub fn grow(&self, n: isize) -> Self {
        Self::new(
            (self.lo[0] - n, self.lo[1] - n),
            (self.hi[0] + n, self.hi[1] + n),
        )
    }

    /// Grow by `n` along one direction only.
    pub fn grow_in(&self, dir: Direction, n: isize) -> Self {
        let mut out = *self;
        out.lo[dir.index()] -= n;
        out.hi[dir.index()] += n;
        Self::new(out.lo(), out.hi())
    }

    /// Convert a cell-centred box to the index box of another centering.
    ///
    /// Nodal directions gain one point on the high side.
    pub fn convert(&self, centering: Centering) -> Self {
        let mut hi = self.hi;
        for dir in Direction::ALL {
            if centering.is_nodal(dir) {
                hi[dir.index()] += 1;
            }
        }
        Self { lo: self.lo, hi }
    }

    #[inline]
    pub fn contains(&self, i: isize, j: isize) -> bool {
        i >= self.lo[0] && i <= self.hi[0] && j >= self.lo[1] && j <= self.hi[1]
    }

    pub fn contains_box(&self, other: &IndexBox) -> bool {
        self.contains(other.lo[0], other.lo[1]) && self.contains(other.hi[0], other.hi[1])
    }

    /// Overlap of two boxes, if any.
    pub fn intersect(&self, other: &IndexBox) -> Option<IndexBox> {
        let lo = [self.lo[0].max(other.lo[0]), self.lo[1].max(other.lo[1])];
        let hi = [self.hi[0].min(other.hi[0]), self.hi[1].min(other.hi[1])];
        (hi[0] >= lo[0] && hi[1] >= lo[1]).then_some(IndexBox { lo, hi })
    }

    /// Smallest distance by which `self` extends past `inner` on any side.
    ///
    /// Negative when `inner` is not contained.
    pub fn margin_around(&self, inner: &IndexBox) -> isize {
        (0..2)
            .flat_map(|d| [inner.lo[d] - self.lo[d], self.hi[d] - inner.hi[d]])
            .min()
            .unwrap_or(0)
    }

    /// Linear offset of `(i, j)` with `i` fastest.
    #[inline]
    pub fn offset(&self, i: isize, j: isize) -> usize {
        debug_assert!(
            self.contains(i, j),
            "index ({}, {}) outside box {}",
            i,
            j,
            self
        );
        (j - self.lo[1]) as usize * self.nx() + (i - self.lo[0]) as usize
    }

    /// Iterate all points, `i` fastest.
    pub fn iter(&self) -> impl Iterator<Item = (isize, isize)> + use<> {
        let (ilo, jlo) = self.lo();
        let (ihi, jhi) = self.hi();
        (jlo..=jhi).flat_map(move |j| (ilo..=ihi).map(move |i| (i, j)))
    }

    /// Split into tiles of at most `tile` points per direction, row-major.
    pub fn tiles(&self, tile: TileSize) -> Vec<IndexBox> {
        let mut tiles = Vec::new();
        let mut j0 = self.lo[1];
        while j0 <= self.hi[1] {
            let j1 = (j0 + tile.ny as isize - 1).min(self.hi[1]);
            let mut i0 = self.lo[0];
            while i0 <= self.hi[0] {
                let i1 = (i0 + tile.nx as isize - 1).min(self.hi[0]);
                tiles.push(IndexBox {
                    lo: [i0, j0],
                    hi: [i1, j1],
                });
                i0 = i1 + 1;
            }
            j0 = j1 + 1;
        }
        tiles
    }
}

impl fmt::Display for IndexBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}]×[{}..={}]",
            self.lo[0], self.hi[0], self.lo[1], self.hi[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_centering() {
        let b = IndexBox::from_size(4, 3);
        assert_eq!(b.convert(Centering::Cell), b);
        assert_eq!(b.convert(Centering::XFace).hi(), (4, 2));
        assert_eq!(b.convert(Centering::YFace).hi(), (3, 3));
        assert_eq!(b.convert(Centering::Node).hi(), (4, 3));
    }

    #[test]
    fn test_grow_and_margin() {
        let b = IndexBox::from_size(4, 4);
        let g = b.grow(2);
        assert_eq!(g.lo(), (-2, -2));
        assert_eq!(g.hi(), (5, 5));
        assert_eq!(g.margin_around(&b), 2);
        assert_eq!(b.margin_around(&g), -2);
        assert_eq!(b.grow_in(Direction::Y, 1).lo(), (0, -1));
    }

    #[test]
    fn test_offset_is_x_fastest() {
        let b = IndexBox::new((-1, -1), (2, 1));
        assert_eq!(b.offset(-1, -1), 0);
        assert_eq!(b.offset(0, -1), 1);
        assert_eq!(b.offset(-1, 0), 4);
        assert_eq!(b.offset(2, 1), b.num_points() - 1);
    }

    #[test]
    fn test_iter_order() {
        let b = IndexBox::new((0, 0), (1, 1));
        let pts: Vec<_> = b.iter().collect();
        assert_eq!(pts, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_tiles_cover_box_once() {
        let b = IndexBox::new((-2, -1), (9, 6));
        let tiles = b.tiles(TileSize::new(5, 3));
        let total: usize = tiles.iter().map(|t| t.num_points()).sum();
        assert_eq!(total, b.num_points());
        for t in &tiles {
            assert!(b.contains_box(t));
            assert!(t.nx() <= 5 && t.ny() <= 3);
        }
        for (a, ta) in tiles.iter().enumerate() {
            for tb in &tiles[a + 1..] {
                assert!(ta.intersect(tb).is_none());
            }
        }
    }

    #[test]
    fn test_intersect() {
        let a = IndexBox::new((0, 0), (4, 4));
        let b = IndexBox::new((3, -2), (8, 1));
        assert_eq!(a.intersect(&b), Some(IndexBox::new((3, 0), (4, 1))));
        let c = IndexBox::new((6, 6), (7, 7));
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    #[should_panic(expected = "empty index box")]
    fn test_empty_box_panics() {
        IndexBox::new((2, 0), (1, 3));
    }
}
