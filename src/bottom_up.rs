use std::cmp::{self, Ordering};
use std::mem;

use crate::check;
use crate::merge::{self, Scratch};
use crate::trace::{MergeObserver, MergeStep};

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    stable_sort(v, |a, b| a.lt(b), &mut ());
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    stable_sort(v, |a, b| compare(a, b) == Ordering::Less, &mut ());
}

#[inline]
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    stable_sort(v, |a, b| f(a).lt(&f(b)), &mut ());
}

/// Same as [`sort_by`], reporting every pass and merge to `observer`.
pub fn sort_by_observed<T, F, O>(v: &mut [T], mut compare: F, observer: &mut O)
where
    F: FnMut(&T, &T) -> Ordering,
    O: MergeObserver<T>,
{
    stable_sort(v, |a, b| compare(a, b) == Ordering::Less, observer);
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

#[inline]
fn stable_sort<T, F, O>(v: &mut [T], mut is_less: F, observer: &mut O)
where
    F: FnMut(&T, &T) -> bool,
    O: MergeObserver<T>,
{
    if mem::size_of::<T>() == 0 {
        // Sorting has no meaningful behavior on zero-sized types. Do nothing.
        return;
    }

    merge_sort(v, &mut is_less, observer);
}

fn merge_sort<T, F, O>(v: &mut [T], is_less: &mut F, observer: &mut O)
where
    F: FnMut(&T, &T) -> bool,
    O: MergeObserver<T>,
{
    let len = v.len();

    // One allocation for the whole call, released on every exit path including unwinding.
    let mut scratch = Scratch::new(len);

    // Runs of `run_len` are sorted at the start of each pass. `run_len < len` guarantees the
    // subtraction below can't underflow, and positions at or past `len - run_len` have no right
    // run to merge with.
    let mut run_len = 1;
    while run_len < len {
        observer.pass_started(run_len);

        let mut lo = 0;
        while lo < len - run_len {
            let mid = lo + run_len - 1;
            let hi = cmp::min(lo + 2 * run_len - 1, len - 1);

            merge::merge_runs(v, &mut scratch, lo, mid, hi, is_less);

            let step = MergeStep {
                run_len,
                lo,
                mid,
                hi,
            };
            observer.merged(v, step);

            lo += 2 * run_len;
        }

        run_len *= 2;
    }

    debug_assert!(check::is_sorted_by(v, &mut *is_less));
}
