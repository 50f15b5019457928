use std::cmp::Ordering;
use std::mem;
use std::ptr;

/// Scratch space for merging, sized once for the whole sequence.
///
/// The buffer never owns elements. During a merge it holds bitwise copies of the range being
/// merged, and every one of them is moved back into the sequence before the merge returns, even if
/// the comparison function panics. Dropping a `Scratch` only frees the allocation.
pub struct Scratch<T> {
    buf: Vec<T>,
}

impl<T> Scratch<T> {
    /// Allocates room for merging any range of a sequence of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(len),
        }
    }

    /// Highest exclusive index that may be used as `hi + 1` when merging with this buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }
}

/// Stably merges the sorted runs `v[lo..=mid]` and `v[mid + 1..=hi]` into `v[lo..=hi]`.
///
/// Panics if `lo <= mid <= hi < v.len()` does not hold or if `scratch` is too small to mirror
/// `v[..=hi]`. Nothing is moved in that case.
#[inline]
pub fn merge<T>(v: &mut [T], scratch: &mut Scratch<T>, lo: usize, mid: usize, hi: usize)
where
    T: Ord,
{
    merge_by(v, scratch, lo, mid, hi, |a, b| a.cmp(b));
}

/// Like [`merge`], ordering elements with `compare`.
#[inline]
pub fn merge_by<T, F>(
    v: &mut [T],
    scratch: &mut Scratch<T>,
    lo: usize,
    mid: usize,
    hi: usize,
    mut compare: F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    check_bounds(v.len(), scratch.capacity(), lo, mid, hi);

    if mem::size_of::<T>() == 0 {
        // Zero-sized values are indistinguishable, any order is sorted.
        return;
    }

    merge_runs(v, scratch, lo, mid, hi, &mut |a, b| {
        compare(a, b) == Ordering::Less
    });
}

#[inline]
fn check_bounds(len: usize, scratch_len: usize, lo: usize, mid: usize, hi: usize) {
    assert!(
        lo <= mid && mid <= hi && hi < len,
        "invalid merge range lo: {lo} mid: {mid} hi: {hi} for len: {len}"
    );
    assert!(
        hi < scratch_len,
        "scratch buffer of len {scratch_len} too small for hi: {hi}"
    );
}

/// Merge step shared by the driver and the public entry points.
///
/// The caller must have checked the bounds with `check_bounds`, and `T` must not be zero-sized.
pub(crate) fn merge_runs<T, F>(
    v: &mut [T],
    scratch: &mut Scratch<T>,
    lo: usize,
    mid: usize,
    hi: usize,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(lo <= mid && mid <= hi && hi < v.len() && hi < scratch.capacity());
    debug_assert!(crate::check::is_sorted_by(&v[lo..=mid], &mut *is_less));
    debug_assert!(crate::check::is_sorted_by(&v[mid + 1..=hi], &mut *is_less));

    let v_ptr = v.as_mut_ptr();
    let aux = scratch.as_mut_ptr();

    // SAFETY: `lo..=hi` is in bounds for both `v` and the scratch allocation, and the two never
    // overlap. From here on `state` tracks which copies in `aux` have not been moved back yet. If
    // `is_less` panics, dropping `state` writes them into the still unfilled tail of `v[lo..=hi]`,
    // so `v` holds every element it initially held exactly once.
    unsafe {
        ptr::copy_nonoverlapping(v_ptr.add(lo), aux.add(lo), hi - lo + 1);

        let mut state = MergeState {
            aux,
            dest: v_ptr,
            i: lo,
            mid,
            j: mid + 1,
            hi,
            k: lo,
        };

        while state.k <= hi {
            let take_right = if state.i > mid {
                true
            } else if state.j > hi {
                false
            } else {
                // Strict less-than keeps equal elements in left to right order.
                is_less(&*aux.add(state.j), &*aux.add(state.i))
            };

            let src = if take_right {
                state.j += 1;
                state.j - 1
            } else {
                state.i += 1;
                state.i - 1
            };

            ptr::copy_nonoverlapping(aux.add(src), v_ptr.add(state.k), 1);
            state.k += 1;
        }
        // Both runs are fully consumed here, so dropping `state` copies nothing.
    }
}

// When dropped, copies whatever is left of both runs in `aux` into `dest[k..]`.
struct MergeState<T> {
    aux: *mut T,
    dest: *mut T,
    i: usize,
    mid: usize,
    j: usize,
    hi: usize,
    k: usize,
}

impl<T> Drop for MergeState<T> {
    fn drop(&mut self) {
        // SAFETY: `i..=mid` and `j..=hi` are the unconsumed copies, and together they are exactly
        // as long as the unfilled range `k..=hi` of `dest`.
        unsafe {
            let left_len = (self.mid + 1).saturating_sub(self.i);
            ptr::copy_nonoverlapping(self.aux.add(self.i), self.dest.add(self.k), left_len);

            let right_len = (self.hi + 1).saturating_sub(self.j);
            ptr::copy_nonoverlapping(
                self.aux.add(self.j),
                self.dest.add(self.k + left_len),
                right_len,
            );
        }
    }
}
