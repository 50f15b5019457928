//! Iterative (bottom-up) stable merge sort.
//!
//! Runs of length 1, 2, 4, ... are merged pairwise from left to right until a single run spans
//! the whole slice. No recursion, and a single scratch buffer the size of the input per call.

pub mod bottom_up;
pub mod check;
pub mod merge;
pub mod trace;

pub use bottom_up::{sort, sort_by, sort_by_key, sort_by_observed};
pub use check::{is_sorted, is_sorted_by, pass_count};
pub use merge::{merge, merge_by, Scratch};
pub use trace::{ArrayHistory, LogObserver, MergeObserver, MergeStep, MergeTrace, TraceWriter};
