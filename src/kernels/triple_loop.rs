//! The six textbook triple loops.
//!
//! Every variant executes the same statement
//! `C[i,j] += A[i,k] * B[k,j]` the same number of times, and for a fixed
//! (i, j) always visits k in increasing order. Only the order in which
//! memory is touched differs, which is exactly what the benchmark measures.
//!
//! Operands are strided views, so one function covers any mix of layouts:
//! element (r, c) of a view lives at `r * rs + c * cs`.

use super::LoopOrder;
use crate::matrix::{View, ViewMut};

/// C += A * B for `c.rows × c.cols` outputs and `a.cols` inner terms.
///
/// Shapes are assumed checked by the caller.
pub(crate) fn accumulate(order: LoopOrder, a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    debug_assert_eq!(a.rows, c.rows);
    debug_assert_eq!(a.cols, b.rows);
    debug_assert_eq!(b.cols, c.cols);

    match order {
        LoopOrder::Ijk => ijk(a, b, c),
        LoopOrder::Ikj => ikj(a, b, c),
        LoopOrder::Jik => jik(a, b, c),
        LoopOrder::Jki => jki(a, b, c),
        LoopOrder::Kij => kij(a, b, c),
        LoopOrder::Kji => kji(a, b, c),
    }
}

// Innermost k: dot product. Reads a row of A and a column of B.
fn ijk(a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    let (m, n, p) = (c.rows, c.cols, a.cols);
    for i in 0..m {
        for j in 0..n {
            for k in 0..p {
                c.data[i * c.rs + j * c.cs] += a.data[i * a.rs + k * a.cs] * b.data[k * b.rs + j * b.cs];
            }
        }
    }
}

// Innermost j: row of C updated from a row of B. Unit stride when row-major.
fn ikj(a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    let (m, n, p) = (c.rows, c.cols, a.cols);
    for i in 0..m {
        for k in 0..p {
            for j in 0..n {
                c.data[i * c.rs + j * c.cs] += a.data[i * a.rs + k * a.cs] * b.data[k * b.rs + j * b.cs];
            }
        }
    }
}

fn jik(a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    let (m, n, p) = (c.rows, c.cols, a.cols);
    for j in 0..n {
        for i in 0..m {
            for k in 0..p {
                c.data[i * c.rs + j * c.cs] += a.data[i * a.rs + k * a.cs] * b.data[k * b.rs + j * b.cs];
            }
        }
    }
}

// Innermost i: column of C updated from a column of A. Unit stride when column-major.
fn jki(a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    let (m, n, p) = (c.rows, c.cols, a.cols);
    for j in 0..n {
        for k in 0..p {
            for i in 0..m {
                c.data[i * c.rs + j * c.cs] += a.data[i * a.rs + k * a.cs] * b.data[k * b.rs + j * b.cs];
            }
        }
    }
}

// Outer product form: rank-1 update of all of C per k.
fn kij(a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    let (m, n, p) = (c.rows, c.cols, a.cols);
    for k in 0..p {
        for i in 0..m {
            for j in 0..n {
                c.data[i * c.rs + j * c.cs] += a.data[i * a.rs + k * a.cs] * b.data[k * b.rs + j * b.cs];
            }
        }
    }
}

fn kji(a: View<'_>, b: View<'_>, c: &mut ViewMut<'_>) {
    let (m, n, p) = (c.rows, c.cols, a.cols);
    for k in 0..p {
        for j in 0..n {
            for i in 0..m {
                c.data[i * c.rs + j * c.cs] += a.data[i * a.rs + k * a.cs] * b.data[k * b.rs + j * b.cs];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Layout, Matrix};

    #[test]
    fn test_every_order_matches_hand_computed_product() {
        // [1 2 3; 4 5 6] * [7 8; 9 10; 11 12] = [58 64; 139 154]
        for layout in [Layout::RowMajor, Layout::ColMajor] {
            let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], layout).unwrap();
            let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]], layout).unwrap();
            for order in LoopOrder::ALL {
                let mut c = Matrix::zeros(2, 2, layout);
                accumulate(order, a.view(), b.view(), &mut c.view_mut());
                assert_eq!(
                    c,
                    Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]], layout).unwrap(),
                    "{order} {layout}"
                );
            }
        }
    }

    #[test]
    fn test_orders_are_bit_identical() {
        // k runs in the same direction for every (i, j), so summation order never changes.
        let a = Matrix::random(13, 17, Layout::ColMajor, 1);
        let b = Matrix::random(17, 11, Layout::RowMajor, 2);
        let mut reference = Matrix::zeros(13, 11, Layout::ColMajor);
        accumulate(LoopOrder::Ijk, a.view(), b.view(), &mut reference.view_mut());

        for order in LoopOrder::ALL {
            let mut c = Matrix::zeros(13, 11, Layout::ColMajor);
            accumulate(order, a.view(), b.view(), &mut c.view_mut());
            assert_eq!(c, reference, "{order}");
        }
    }
}
