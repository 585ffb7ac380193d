//! Domain store: candidate arena plus undo log.
//!
//! Candidates are compiled once into compact integer form and never move.
//! Pruning only flips a liveness flag and pushes the removal on the trail;
//! backtracking drains the trail back to a checkpoint and revives the
//! removed candidates in reverse. A node therefore costs O(removed) to undo
//! instead of a copy of every domain.

use std::collections::HashMap;

use super::trail::Trail;
use crate::models::Assignment;

/// A candidate assignment with interned identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    instructor: u32,
    room: u32,
    cohort: u32,
    first: u32,
    second: u32,
}

impl Candidate {
    /// Same rule as [`Assignment::conflicts_with`].
    #[inline]
    pub(crate) fn conflicts_with(&self, other: &Self) -> bool {
        let overlap = self.first == other.first
            || self.first == other.second
            || self.second == other.first
            || self.second == other.second;
        overlap
            && (self.instructor == other.instructor
                || self.room == other.room
                || self.cohort == other.cohort)
    }
}

/// Maps identifier strings to dense integers.
#[derive(Debug, Default)]
pub(crate) struct Interner {
    ids: HashMap<String, u32>,
}

impl Interner {
    pub(crate) fn intern(&mut self, id: &str) -> u32 {
        if let Some(&n) = self.ids.get(id) {
            return n;
        }
        let n = self.ids.len() as u32;
        let _ = self.ids.insert(id.to_string(), n);
        n
    }

    /// Compiles an assignment. Identities of different kinds share one
    /// numbering; they are only ever compared field by field.
    pub(crate) fn candidate(&mut self, assignment: &Assignment) -> Candidate {
        Candidate {
            instructor: self.intern(&assignment.instructor_id),
            room: self.intern(&assignment.room_id),
            cohort: self.intern(&assignment.cohort),
            first: self.intern(&assignment.slots.first),
            second: self.intern(&assignment.slots.second),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Removal {
    var: usize,
    value: usize,
}

/// Live candidates per variable with transactional prune/restore.
#[derive(Debug, Clone)]
pub(crate) struct DomainStore {
    values: Vec<Vec<Candidate>>,
    live: Vec<Vec<bool>>,
    live_count: Vec<usize>,
    trail: Trail<Removal>,
}

impl DomainStore {
    pub(crate) fn new(values: Vec<Vec<Candidate>>) -> Self {
        let live = values.iter().map(|v| vec![true; v.len()]).collect();
        let live_count = values.iter().map(Vec::len).collect();
        Self {
            values,
            live,
            live_count,
            trail: Trail::default(),
        }
    }

    pub(crate) fn num_vars(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn live_count(&self, var: usize) -> usize {
        self.live_count[var]
    }

    #[inline]
    pub(crate) fn candidate(&self, var: usize, value: usize) -> &Candidate {
        &self.values[var][value]
    }

    /// Live value indices of a variable, in natural order.
    pub(crate) fn live_values(&self, var: usize) -> impl Iterator<Item = usize> + '_ {
        self.live[var]
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(value, _)| value)
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    /// Removes a live value, recording it on the trail.
    pub(crate) fn remove(&mut self, var: usize, value: usize) {
        debug_assert!(self.live[var][value]);
        self.live[var][value] = false;
        self.live_count[var] -= 1;
        self.trail.push(Removal { var, value });
    }

    /// Values removed since the current checkpoint was opened.
    pub(crate) fn removed_at_current_checkpoint(&self) -> usize {
        self.trail.values_at_current_checkpoint().len()
    }

    /// Restores every removal made after `checkpoint`.
    pub(crate) fn backtrack_to(&mut self, checkpoint: usize) {
        if checkpoint >= self.trail.get_checkpoint() {
            return;
        }
        for removal in self.trail.synchronise(checkpoint) {
            self.live[removal.var][removal.value] = true;
            self.live_count[removal.var] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotPair;

    fn compile(specs: &[(&str, &str, &str, &str, &str)]) -> (Interner, Vec<Candidate>) {
        let mut interner = Interner::default();
        let candidates = specs
            .iter()
            .map(|&(i, r, c, a, b)| {
                interner.candidate(&Assignment::new("S", "C", c, i, r, SlotPair::new(a, b)))
            })
            .collect();
        (interner, candidates)
    }

    #[test]
    fn test_compiled_conflict_matches_assignment_rule() {
        let (_, c) = compile(&[
            ("P1", "H1", "1", "t1", "t2"),
            ("P1", "H2", "3", "t2", "t3"),
            ("P2", "H2", "3", "t1", "t2"),
            ("P1", "H1", "1", "t3", "t4"),
        ]);
        assert!(c[0].conflicts_with(&c[1]));
        assert!(!c[0].conflicts_with(&c[2]));
        assert!(!c[0].conflicts_with(&c[3]));
        assert!(c[1].conflicts_with(&c[3]));
    }

    #[test]
    fn test_interner_is_stable() {
        let mut interner = Interner::default();
        let a = interner.intern("P1");
        let b = interner.intern("H1");
        assert_ne!(a, b);
        assert_eq!(interner.intern("P1"), a);
    }

    #[test]
    fn test_remove_and_restore() {
        let (_, c) = compile(&[
            ("P1", "H1", "1", "t1", "t2"),
            ("P1", "H1", "1", "t2", "t3"),
            ("P1", "H1", "1", "t3", "t4"),
        ]);
        let mut store = DomainStore::new(vec![c.clone(), c]);
        assert_eq!(store.num_vars(), 2);

        let root = store.checkpoint();
        store.new_checkpoint();
        store.remove(1, 0);
        store.remove(1, 2);
        assert_eq!(store.live_count(1), 1);
        assert_eq!(store.removed_at_current_checkpoint(), 2);
        assert_eq!(store.live_values(1).collect::<Vec<_>>(), vec![1]);

        store.new_checkpoint();
        store.remove(0, 1);
        assert_eq!(store.live_values(0).collect::<Vec<_>>(), vec![0, 2]);

        store.backtrack_to(root + 1);
        assert_eq!(store.live_values(0).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(store.live_count(1), 1);

        store.backtrack_to(root);
        assert_eq!(store.live_values(1).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(store.live_count(1), 3);
    }

    #[test]
    fn test_backtrack_to_current_is_noop() {
        let (_, c) = compile(&[("P1", "H1", "1", "t1", "t2")]);
        let mut store = DomainStore::new(vec![c]);
        store.new_checkpoint();
        store.remove(0, 0);
        store.backtrack_to(store.checkpoint());
        assert_eq!(store.live_count(0), 0);
    }
}
