//! Hooks for watching a bottom-up merge sort at work.
//!
//! [`sort_by_observed`](crate::sort_by_observed) tells an observer when a pass over a new run size
//! starts and hands it the whole sequence after every merge. The default entry points use `()`,
//! which does nothing and compiles away.

use std::fmt;
use std::io::{self, Write};

/// One completed merge of `v[lo..=mid]` and `v[mid + 1..=hi]` during the pass with `run_len`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MergeStep {
    pub run_len: usize,
    pub lo: usize,
    pub mid: usize,
    pub hi: usize,
}

pub trait MergeObserver<T> {
    /// Called before the sweep that merges runs of length `run_len`.
    #[inline]
    fn pass_started(&mut self, _run_len: usize) {}

    /// Called after `step` was merged. `v` is the whole sequence.
    #[inline]
    fn merged(&mut self, _v: &[T], _step: MergeStep) {}
}

impl<T> MergeObserver<T> for () {}

impl<T, A, B> MergeObserver<T> for (A, B)
where
    A: MergeObserver<T>,
    B: MergeObserver<T>,
{
    #[inline]
    fn pass_started(&mut self, run_len: usize) {
        self.0.pass_started(run_len);
        self.1.pass_started(run_len);
    }

    #[inline]
    fn merged(&mut self, v: &[T], step: MergeStep) {
        self.0.merged(v, step);
        self.1.merged(v, step);
    }
}

impl<T, O: MergeObserver<T> + ?Sized> MergeObserver<T> for &mut O {
    #[inline]
    fn pass_started(&mut self, run_len: usize) {
        (**self).pass_started(run_len);
    }

    #[inline]
    fn merged(&mut self, v: &[T], step: MergeStep) {
        (**self).merged(v, step);
    }
}

/// Records the run size of every pass and every merge step, in order.
///
/// The `Display` output is the classic trace:
///
/// ```text
/// size=1
/// merge(a,  0,  0,  1)
/// merge(a,  2,  2,  3)
/// size=2
/// merge(a,  0,  1,  3)
/// ```
#[derive(Clone, Debug, Default)]
pub struct MergeTrace {
    passes: Vec<usize>,
    steps: Vec<MergeStep>,
}

impl MergeTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run sizes of all passes, `1, 2, 4, ...`.
    pub fn passes(&self) -> &[usize] {
        &self.passes
    }

    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    pub fn merge_count(&self) -> usize {
        self.steps.len()
    }
}

impl<T> MergeObserver<T> for MergeTrace {
    fn pass_started(&mut self, run_len: usize) {
        self.passes.push(run_len);
    }

    fn merged(&mut self, _v: &[T], step: MergeStep) {
        self.steps.push(step);
    }
}

impl fmt::Display for MergeTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .steps
            .iter()
            .map(|step| step.hi.to_string().len())
            .max()
            .unwrap_or(1)
            .max(2);

        let mut steps = self.steps.iter().peekable();
        for &run_len in &self.passes {
            writeln!(f, "size={run_len}")?;
            while let Some(step) = steps.next_if(|step| step.run_len == run_len) {
                writeln!(
                    f,
                    "merge(a, {:>w$}, {:>w$}, {:>w$})",
                    step.lo,
                    step.mid,
                    step.hi,
                    w = width
                )?;
            }
        }

        Ok(())
    }
}

/// Keeps a copy of the whole sequence after every merge.
///
/// That is `N - 1` copies of `N` elements, meant for small inputs. [`TraceWriter`] streams the
/// merged ranges instead.
#[derive(Clone, Debug)]
pub struct ArrayHistory<T> {
    snapshots: Vec<(MergeStep, Vec<T>)>,
}

impl<T> ArrayHistory<T> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn snapshots(&self) -> &[(MergeStep, Vec<T>)] {
        &self.snapshots
    }

    pub fn into_inner(self) -> Vec<(MergeStep, Vec<T>)> {
        self.snapshots
    }
}

impl<T> Default for ArrayHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MergeObserver<T> for ArrayHistory<T> {
    fn merged(&mut self, v: &[T], step: MergeStep) {
        self.snapshots.push((step, v.to_vec()));
    }
}

/// Writes the [`MergeTrace`] layout as the sort runs, each merge line followed by the freshly
/// merged range.
///
/// ```text
/// size=1
/// merge(a,  0,  0,  1)  E M
/// ```
///
/// Observers cannot fail, so the first write error is kept and returned by
/// [`finish`](Self::finish). Later output is skipped.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes and hands back the writer, or the first error hit while tracing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        self.out.flush()?;
        Ok(self.out)
    }

    fn write_with(&mut self, write_fn: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_none() {
            if let Err(err) = write_fn(&mut self.out) {
                self.error = Some(err);
            }
        }
    }
}

impl<T: fmt::Display, W: Write> MergeObserver<T> for TraceWriter<W> {
    fn pass_started(&mut self, run_len: usize) {
        self.write_with(|out| writeln!(out, "size={run_len}"));
    }

    fn merged(&mut self, v: &[T], step: MergeStep) {
        // The last merge of a sort always ends at `v.len() - 1`, so this matches the width
        // `MergeTrace` derives from its recorded steps.
        let width = (v.len() - 1).to_string().len().max(2);

        self.write_with(|out| {
            write!(
                out,
                "merge(a, {:>w$}, {:>w$}, {:>w$}) ",
                step.lo,
                step.mid,
                step.hi,
                w = width
            )?;
            for elem in &v[step.lo..=step.hi] {
                write!(out, " {elem}")?;
            }
            writeln!(out)
        });
    }
}

/// Emits every pass and merge through `log` at trace level.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogObserver;

impl<T> MergeObserver<T> for LogObserver {
    fn pass_started(&mut self, run_len: usize) {
        log::trace!(target: "mergebu::trace", "size={run_len}");
    }

    fn merged(&mut self, v: &[T], step: MergeStep) {
        log::trace!(
            target: "mergebu::trace",
            "merge(a, {}, {}, {}) of len {}",
            step.lo,
            step.mid,
            step.hi,
            v.len()
        );
    }
}
