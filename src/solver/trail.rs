//! Undo log with checkpoints.

use std::iter::Rev;
use std::vec::Drain;

/// A stack of undo records split into checkpoints, one per search level.
///
/// Backtracking to a checkpoint drains every record pushed after it, newest
/// first, so the caller can replay them in reverse.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// At index i is the trail length when checkpoint i + 1 was opened.
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// Written by hand so that T need not implement Default.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: 0,
            trail_delimiter: Vec::new(),
            trail: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Records pushed since the current checkpoint was opened.
    pub(crate) fn values_at_current_checkpoint(&self) -> &[T] {
        let start = self.trail_delimiter.last().copied().unwrap_or(0);
        &self.trail[start..]
    }

    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        debug_assert!(new_checkpoint < self.current_checkpoint);

        let new_trail_len = self.trail_delimiter[new_checkpoint];

        self.current_checkpoint = new_checkpoint;
        self.trail_delimiter.truncate(new_checkpoint);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }

    pub(crate) fn len(&self) -> usize {
        self.trail.len()
    }
}
