//! Recursive range splitting over the address list.
//!
//! A [`Range`] at or above the threshold is halved and both halves run
//! through `rayon::join`, so the parent waits on its children while its
//! worker thread steals other ready work. Ranges below the threshold are
//! handed to the leaf closure.

use std::fmt;

use super::Cancellation;

/// Contiguous index span `[start, start + len)` over the address list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    pub start: usize,
    pub len: usize,
}

impl Range {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Range covering a whole list of `len` entries
    pub fn full(len: usize) -> Self {
        Self { start: 0, len }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Whether this range is probed directly instead of split.
    ///
    /// Ranges of length 0 or 1 cannot shrink further and are always leaves,
    /// so a threshold of 0 or 1 yields one leaf per address.
    pub fn is_leaf(&self, threshold: usize) -> bool {
        self.len < threshold || self.len <= 1
    }

    /// Halve the range. An odd length puts the extra index in the second half.
    pub fn split(&self) -> (Range, Range) {
        let split = self.len / 2;
        (
            Range::new(self.start, split),
            Range::new(self.start + split, self.len - split),
        )
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}

/// Run `leaf` on every leaf of the split tree rooted at `range`.
///
/// Returns once the whole tree has completed. Empty leaves are skipped.
/// A cancelled token stops further forking; ranges not yet started are
/// dropped.
pub fn fork_join<F>(range: Range, threshold: usize, cancel: &Cancellation, leaf: &F)
where
    F: Fn(Range) + Sync,
{
    if cancel.is_cancelled() {
        return;
    }

    if range.is_leaf(threshold) {
        if !range.is_empty() {
            leaf(range);
        }
        return;
    }

    let (left, right) = range.split();
    log::trace!("Splitting {range} into {left} and {right}");
    rayon::join(
        || fork_join(left, threshold, cancel, leaf),
        || fork_join(right, threshold, cancel, leaf),
    );
}

/// Leaf ranges `fork_join` would visit, in index order.
pub fn plan(range: Range, threshold: usize) -> Vec<Range> {
    let mut leaves = Vec::new();
    collect_leaves(range, threshold, &mut leaves);
    leaves
}

fn collect_leaves(range: Range, threshold: usize, leaves: &mut Vec<Range>) {
    if range.is_leaf(threshold) {
        if !range.is_empty() {
            leaves.push(range);
        }
        return;
    }
    let (left, right) = range.split();
    collect_leaves(left, threshold, leaves);
    collect_leaves(right, threshold, leaves);
}
