/// Tile edge used by [`transpose`]. 32×32 doubles is 8 KiB per tile, so a
/// source tile and its destination tile sit in L1 together.
const TILE: usize = 32;

/// Transpose a dense buffer: dst = src^T
///
/// `src` holds `rows` runs of `cols` contiguous values; `dst` receives `cols`
/// runs of `rows` values. Reading a row-major buffer this way produces the
/// column-major buffer of the same matrix, and vice versa, which is how
/// [`Matrix::to_layout`](super::Matrix::to_layout) switches storage order.
///
/// Works tile by tile so that neither side is walked with a full-length
/// stride for long.
///
/// # Example
///
/// ```
/// use matmul_loops::matrix::transpose::transpose;
///
/// let src = vec![1.0, 2.0, 3.0,   // 2 runs of 3
///                4.0, 5.0, 6.0];
/// let mut dst = vec![0.0; 6];     // 3 runs of 2
///
/// transpose(&src, &mut dst, 2, 3);
///
/// assert_eq!(dst, vec![1.0, 4.0,
///                      2.0, 5.0,
///                      3.0, 6.0]);
/// ```
///
/// # Panics
///
/// Panics if either buffer is shorter than `rows * cols`.
pub fn transpose(src: &[f64], dst: &mut [f64], rows: usize, cols: usize) {
    assert!(src.len() >= rows * cols, "src: expected {} elements", rows * cols);
    assert!(dst.len() >= rows * cols, "dst: expected {} elements", rows * cols);

    for i0 in (0..rows).step_by(TILE) {
        let i1 = (i0 + TILE).min(rows);
        for j0 in (0..cols).step_by(TILE) {
            let j1 = (j0 + TILE).min(cols);
            for i in i0..i1 {
                for j in j0..j1 {
                    dst[j * rows + i] = src[i * cols + j];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_crosses_tile_edges() {
        let (rows, cols) = (TILE + 3, 2 * TILE + 1);
        let src: Vec<f64> = (0..rows * cols).map(|x| x as f64).collect();
        let mut dst = vec![0.0; rows * cols];

        transpose(&src, &mut dst, rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                assert_eq!(dst[j * rows + i], src[i * cols + j]);
            }
        }
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let src: Vec<f64> = (0..7 * 5).map(|x| (x % 11) as f64).collect();
        let mut once = vec![0.0; 35];
        let mut twice = vec![0.0; 35];

        transpose(&src, &mut once, 7, 5);
        transpose(&once, &mut twice, 5, 7);

        assert_eq!(src, twice);
    }
}
