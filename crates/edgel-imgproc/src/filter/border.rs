/// Map an out-of-bounds index back into `[0, len)` reflecting across the border,
/// including the border pixel (`d c b a | a b c d | d c b a`).
///
/// The reflection repeats, so offsets larger than `len` are valid. This matters
/// for wide kernels on small images.
///
/// PRECONDITION: `len > 0`.
///
/// # Examples
///
/// ```
/// use edgel_imgproc::filter::border::reflect_index;
///
/// assert_eq!(reflect_index(-1, 4), 0);
/// assert_eq!(reflect_index(4, 4), 3);
/// assert_eq!(reflect_index(-5, 4), 3);
/// ```
#[inline]
pub fn reflect_index(idx: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let m = idx.rem_euclid(period);
    if m >= len {
        (period - 1 - m) as usize
    } else {
        m as usize
    }
}
