//! Dense multi-component arrays over an index box.

use crate::types::{Centering, IndexBox};

/// A patch array: one `f64` per point of an [`IndexBox`] per component.
///
/// The box includes any ghost margin. Storage is component-major, each
/// component laid out with `i` fastest.
///
/// # Example
///
/// ```
/// use bds_rs::grid::Field2D;
/// use bds_rs::types::{Centering, IndexBox};
///
/// let cells = IndexBox::from_size(4, 4);
/// let mut s = Field2D::on_domain(&cells, Centering::Cell, 2, 1);
/// s.set(-2, 5, 0, 1.5);
/// assert_eq!(s.get(-2, 5, 0), 1.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    bx: IndexBox,
    centering: Centering,
    n_comp: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Zero-initialised array over `bx`.
    ///
    /// # Panics
    ///
    /// Panics if `n_comp` is zero.
    pub fn new(bx: IndexBox, centering: Centering, n_comp: usize) -> Self {
        assert!(n_comp > 0, "a field needs at least one component");
        Self {
            bx,
            centering,
            n_comp,
            data: vec![0.0; bx.num_points() * n_comp],
        }
    }

    /// Array over a cell box converted to `centering`, grown by `n_grow` ghosts.
    pub fn on_domain(
        domain: &IndexBox,
        centering: Centering,
        n_grow: usize,
        n_comp: usize,
    ) -> Self {
        Self::new(
            domain.convert(centering).grow(n_grow as isize),
            centering,
            n_comp,
        )
    }

    /// Single-component array with every point (ghosts included) set by `f(i, j)`.
    pub fn from_fn<F>(bx: IndexBox, centering: Centering, mut f: F) -> Self
    where
        F: FnMut(isize, isize) -> f64,
    {
        let data = bx.iter().map(|(i, j)| f(i, j)).collect();
        Self {
            bx,
            centering,
            n_comp: 1,
            data,
        }
    }

    /// Array with every entry set to `value`.
    pub fn filled(bx: IndexBox, centering: Centering, n_comp: usize, value: f64) -> Self {
        let mut field = Self::new(bx, centering, n_comp);
        field.data.fill(value);
        field
    }

    /// Full index box, ghosts included.
    #[inline]
    pub fn index_box(&self) -> IndexBox {
        self.bx
    }

    #[inline]
    pub fn centering(&self) -> Centering {
        self.centering
    }

    #[inline]
    pub fn n_comp(&self) -> usize {
        self.n_comp
    }

    #[inline]
    fn index(&self, i: isize, j: isize, comp: usize) -> usize {
        debug_assert!(comp < self.n_comp);
        comp * self.bx.num_points() + self.bx.offset(i, j)
    }

    #[inline]
    pub fn get(&self, i: isize, j: isize, comp: usize) -> f64 {
        self.data[self.index(i, j, comp)]
    }

    #[inline]
    pub fn set(&mut self, i: isize, j: isize, comp: usize, value: f64) {
        let idx = self.index(i, j, comp);
        self.data[idx] = value;
    }

    /// Set one component from `f(i, j)` over the whole box.
    pub fn fill_with<F>(&mut self, comp: usize, mut f: F)
    where
        F: FnMut(isize, isize) -> f64,
    {
        let bx = self.bx;
        for ((i, j), value) in bx.iter().zip(self.component_mut(comp)) {
            *value = f(i, j);
        }
    }

    /// Raw storage of one component.
    pub fn component(&self, comp: usize) -> &[f64] {
        let n = self.bx.num_points();
        &self.data[comp * n..(comp + 1) * n]
    }

    /// Mutable raw storage of one component.
    pub fn component_mut(&mut self, comp: usize) -> &mut [f64] {
        let n = self.bx.num_points();
        &mut self.data[comp * n..(comp + 1) * n]
    }

    /// Borrowed read-only view of one component.
    ///
    /// # Panics
    ///
    /// Panics if `comp` is out of range.
    pub fn view(&self, comp: usize) -> FieldView<'_> {
        assert!(
            comp < self.n_comp,
            "component {} out of range ({} components)",
            comp,
            self.n_comp
        );
        FieldView {
            bx: self.bx,
            data: self.component(comp),
        }
    }

    /// Maximum `|value|` of one component over `region`.
    pub fn max_abs(&self, comp: usize, region: &IndexBox) -> f64 {
        let view = self.view(comp);
        region
            .iter()
            .map(|(i, j)| view.at(i, j).abs())
            .fold(0.0, f64::max)
    }
}

/// Read-only single-component window into a [`Field2D`].
///
/// `Copy` and `Sync`, so stage kernels capture it by value.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    bx: IndexBox,
    data: &'a [f64],
}

impl FieldView<'_> {
    #[inline]
    pub fn at(&self, i: isize, j: isize) -> f64 {
        self.data[self.bx.offset(i, j)]
    }

    #[inline]
    pub fn index_box(&self) -> IndexBox {
        self.bx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_are_independent() {
        let bx = IndexBox::new((-1, -1), (2, 2));
        let mut f = Field2D::new(bx, Centering::Cell, 3);
        f.set(0, 0, 0, 1.0);
        f.set(0, 0, 2, 3.0);
        assert_eq!(f.get(0, 0, 0), 1.0);
        assert_eq!(f.get(0, 0, 1), 0.0);
        assert_eq!(f.get(0, 0, 2), 3.0);
        assert_eq!(f.view(2).at(0, 0), 3.0);
    }

    #[test]
    fn test_on_domain_box() {
        let cells = IndexBox::from_size(4, 3);
        let u = Field2D::on_domain(&cells, Centering::XFace, 1, 1);
        assert_eq!(u.index_box(), IndexBox::new((-1, -1), (5, 3)));
        assert_eq!(u.centering(), Centering::XFace);
    }

    #[test]
    fn test_from_fn_and_fill_with() {
        let bx = IndexBox::from_size(3, 2);
        let f = Field2D::from_fn(bx, Centering::Cell, |i, j| (10 * j + i) as f64);
        assert_eq!(f.get(2, 1, 0), 12.0);

        let mut g = Field2D::new(bx, Centering::Cell, 2);
        g.fill_with(1, |i, j| (i * j) as f64);
        assert_eq!(g.get(2, 1, 1), 2.0);
        assert_eq!(g.get(2, 1, 0), 0.0);
    }

    #[test]
    fn test_max_abs() {
        let bx = IndexBox::from_size(4, 4);
        let f = Field2D::from_fn(bx, Centering::Cell, |i, j| (i - j) as f64);
        assert_eq!(f.max_abs(0, &bx), 3.0);
        assert_eq!(f.max_abs(0, &IndexBox::new((1, 1), (2, 2))), 1.0);
    }

    #[test]
    #[should_panic(expected = "component 1 out of range")]
    fn test_view_out_of_range() {
        let f = Field2D::new(IndexBox::from_size(2, 2), Centering::Cell, 1);
        f.view(1);
    }
}
