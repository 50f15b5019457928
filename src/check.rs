/// Returns `true` if no element of `v` is less than its predecessor.
#[inline]
pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    is_sorted_by(v, |a, b| a < b)
}

#[inline]
pub fn is_sorted_by<T, F>(v: &[T], mut is_less: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    v.windows(2).all(|w| !is_less(&w[1], &w[0]))
}

/// Number of passes a bottom-up merge sort makes over a sequence of length `len`.
///
/// That is `ceil(log2(len))`, and 0 for `len <= 1`.
pub const fn pass_count(len: usize) -> usize {
    if len <= 1 {
        0
    } else {
        (usize::BITS - (len - 1).leading_zeros()) as usize
    }
}
