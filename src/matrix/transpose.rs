/// Write `src` (rows × cols) into `dst` as its transpose (cols × rows).
///
/// The dispatcher transposes B once per call so the column feeding an
/// output cell becomes a contiguous slice the SIMD kernels can load
/// straight from.
///
/// ```
/// use imatmul::matrix::transpose::transpose;
///
/// let src = vec![1, 2, 3,   // 2×3
///                4, 5, 6];
/// let mut dst = vec![0; 6]; // 3×2
///
/// transpose(&src, &mut dst, 2, 3);
///
/// assert_eq!(dst, vec![1, 4,
///                      2, 5,
///                      3, 6]);
/// ```
pub fn transpose(src: &[i32], dst: &mut [i32], rows: usize, cols: usize) {
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);

    for (i, src_row) in src.chunks_exact(cols).enumerate() {
        for (j, &value) in src_row.iter().enumerate() {
            dst[j * rows + i] = value;
        }
    }
}
