//! Dense matrices with an explicit storage order.
//!
//! A [`Matrix`] owns a flat `f64` buffer plus its shape and [`Layout`].
//! The layout is chosen once at construction; changing it means building a
//! new matrix with [`Matrix::to_layout`].

pub mod scale;
pub mod transpose;

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Which index varies fastest in linear storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Consecutive elements of a row are adjacent (C order).
    RowMajor,
    /// Consecutive elements of a column are adjacent (Fortran order).
    #[default]
    ColMajor,
}

impl Layout {
    /// (row stride, column stride) for a `rows × cols` matrix.
    pub fn strides(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Layout::RowMajor => (cols, 1),
            Layout::ColMajor => (1, rows),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::RowMajor => "row-major",
            Layout::ColMajor => "col-major",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense `rows × cols` matrix of `f64`.
///
/// Invariant: `data.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    layout: Layout,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize, layout: Layout) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
            layout,
        }
    }

    /// Wrap a buffer that is already stored in `layout` order.
    pub fn from_vec(rows: usize, cols: usize, layout: Layout, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::mismatch("Matrix::from_vec", (rows, cols), (data.len(), 1)));
        }
        Ok(Self {
            data,
            rows,
            cols,
            layout,
        })
    }

    /// Build from row literals, stored in whatever `layout` is asked for.
    ///
    /// ```
    /// use matmul_loops::{Layout, Matrix};
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], Layout::ColMajor).unwrap();
    /// assert_eq!(a.shape(), (3, 2));
    /// assert_eq!(a.as_slice(), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], layout: Layout) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != ncols) {
            return Err(Error::mismatch(
                "Matrix::from_rows",
                (nrows, ncols),
                (nrows, bad.as_ref().len()),
            ));
        }
        Ok(Self::from_fn(nrows, ncols, layout, |i, j| rows[i].as_ref()[j]))
    }

    /// Fill element (i, j) with `f(i, j)`, visiting elements in storage order.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        layout: Layout,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        match layout {
            Layout::RowMajor => {
                for i in 0..rows {
                    for j in 0..cols {
                        data.push(f(i, j));
                    }
                }
            }
            Layout::ColMajor => {
                for j in 0..cols {
                    for i in 0..rows {
                        data.push(f(i, j));
                    }
                }
            }
        }
        Self {
            data,
            rows,
            cols,
            layout,
        }
    }

    pub fn identity(n: usize, layout: Layout) -> Self {
        Self::from_fn(n, n, layout, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Square matrix with `diag` on the diagonal.
    pub fn diagonal(diag: &[f64], layout: Layout) -> Self {
        let n = diag.len();
        Self::from_fn(n, n, layout, |i, j| if i == j { diag[i] } else { 0.0 })
    }

    /// Uniform values in [-1, 1) from a seeded generator. The same seed and
    /// shape give the same logical matrix regardless of layout.
    pub fn random(rows: usize, cols: usize, layout: Layout, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let row_major: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self::from_fn(rows, cols, layout, |i, j| row_major[i * cols + j])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// (row stride, column stride) into [`as_slice`](Self::as_slice).
    pub fn strides(&self) -> (usize, usize) {
        self.layout.strides(self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        let (rs, cs) = self.strides();
        i * rs + j * cs
    }

    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.offset(i, j);
        self.data[idx] = value;
    }

    /// Reset every element to zero without reallocating.
    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Sum of all elements. Used as a cheap fingerprint of a product.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Copy of this matrix stored in `layout` order.
    pub fn to_layout(&self, layout: Layout) -> Self {
        if layout == self.layout {
            return self.clone();
        }
        let mut data = vec![0.0; self.data.len()];
        // The buffer is `runs × run_len` with runs along the slow index.
        let (runs, run_len) = match self.layout {
            Layout::RowMajor => (self.rows, self.cols),
            Layout::ColMajor => (self.cols, self.rows),
        };
        transpose::transpose(&self.data, &mut data, runs, run_len);
        Self {
            data,
            rows: self.rows,
            cols: self.cols,
            layout,
        }
    }

    /// Largest element-wise `|x - y| / max(|x|, |y|, 1)` against `other`.
    ///
    /// Layouts may differ; elements are compared by logical position.
    pub fn max_relative_error(&self, other: &Matrix) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(Error::mismatch("Matrix::max_relative_error", self.shape(), other.shape()));
        }
        let mut worst: f64 = 0.0;
        for i in 0..self.rows {
            for j in 0..self.cols {
                let (x, y) = (self.get(i, j), other.get(i, j));
                let scale = x.abs().max(y.abs()).max(1.0);
                worst = worst.max((x - y).abs() / scale);
            }
        }
        Ok(worst)
    }

    pub(crate) fn view(&self) -> View<'_> {
        let (rs, cs) = self.strides();
        View {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            rs,
            cs,
        }
    }

    pub(crate) fn view_mut(&mut self) -> ViewMut<'_> {
        let (rs, cs) = self.strides();
        ViewMut {
            data: &mut self.data,
            rows: self.rows,
            cols: self.cols,
            rs,
            cs,
        }
    }
}

/// Borrowed strided window onto a matrix buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct View<'a> {
    pub data: &'a [f64],
    pub rows: usize,
    pub cols: usize,
    pub rs: usize,
    pub cs: usize,
}

impl<'a> View<'a> {
    /// Rows `start..end`, same strides. Requires `start < rows`.
    pub fn row_range(self, start: usize, end: usize) -> View<'a> {
        View {
            data: &self.data[start * self.rs..],
            rows: end - start,
            ..self
        }
    }
}

/// Mutable counterpart of [`View`].
#[derive(Debug)]
pub(crate) struct ViewMut<'a> {
    pub data: &'a mut [f64],
    pub rows: usize,
    pub cols: usize,
    pub rs: usize,
    pub cs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_hold_same_logical_values() {
        let rows = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let r = Matrix::from_rows(&rows, Layout::RowMajor).unwrap();
        let c = Matrix::from_rows(&rows, Layout::ColMajor).unwrap();

        assert_eq!(r.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(c.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(r.get(i, j), c.get(i, j));
            }
        }
    }

    #[test]
    fn test_to_layout_round_trip() {
        let a = Matrix::random(9, 4, Layout::ColMajor, 7);
        let r = a.to_layout(Layout::RowMajor);

        assert_eq!(r.layout(), Layout::RowMajor);
        assert_eq!(a.max_relative_error(&r).unwrap(), 0.0);
        assert_eq!(r.to_layout(Layout::ColMajor), a);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = Matrix::from_vec(2, 3, Layout::RowMajor, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Matrix::from_rows(&rows, Layout::RowMajor).is_err());
    }

    #[test]
    fn test_random_is_seeded_and_layout_independent() {
        let a = Matrix::random(5, 6, Layout::RowMajor, 42);
        let b = Matrix::random(5, 6, Layout::ColMajor, 42);
        let c = Matrix::random(5, 6, Layout::RowMajor, 43);

        assert_eq!(a.max_relative_error(&b).unwrap(), 0.0);
        assert_ne!(a, c);
        assert!(a.as_slice().iter().all(|x| (-1.0..1.0).contains(x)));
    }

    #[test]
    fn test_fill_zero_keeps_shape() {
        let mut a = Matrix::random(3, 3, Layout::ColMajor, 1);
        a.fill_zero();
        assert_eq!(a.shape(), (3, 3));
        assert_eq!(a.sum(), 0.0);
    }

    #[test]
    fn test_row_range_view() {
        let a = Matrix::from_fn(6, 4, Layout::ColMajor, |i, j| (10 * i + j) as f64);
        let v = a.view().row_range(2, 5);

        assert_eq!(v.rows, 3);
        assert_eq!(v.data[v.rs + 3 * v.cs], 33.0);
    }
}
