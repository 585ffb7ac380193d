//! Solution (timetable) model.
//!
//! A solution holds exactly one assignment per scheduled session, in the
//! order the sessions were given to the solver. It is immutable once the
//! solver returns it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Assignment;

/// A complete timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    assignments: Vec<Assignment>,
}

/// A double booking found in a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What is double-booked.
    pub violation_type: ViolationType,
    /// First session involved.
    pub first_session: String,
    /// Second session involved.
    pub second_session: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of double bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// One instructor in two overlapping sessions.
    InstructorClash,
    /// One room hosting two overlapping sessions.
    RoomClash,
    /// One cohort attending two overlapping sessions.
    CohortClash,
}

impl Solution {
    /// Builds a solution from assignments, in session order.
    pub(crate) fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// All assignments, in session input order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no session was scheduled.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finds the assignment for a given session.
    pub fn assignment_for_session(&self, session_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.session_id == session_id)
    }

    /// Returns all assignments for a given cohort.
    pub fn assignments_for_cohort(&self, cohort: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.cohort == cohort)
            .collect()
    }

    /// Returns all assignments for a given instructor.
    pub fn assignments_for_instructor(&self, instructor_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.instructor_id == instructor_id)
            .collect()
    }

    /// Returns all assignments for a given room.
    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Cohorts present in the timetable, sorted.
    pub fn cohorts(&self) -> Vec<&str> {
        let mut cohorts: Vec<&str> = self.assignments.iter().map(|a| a.cohort.as_str()).collect();
        cohorts.sort_unstable();
        cohorts.dedup();
        cohorts
    }

    /// Number of sessions taught by each instructor.
    pub fn instructor_loads(&self) -> HashMap<String, usize> {
        let mut loads: HashMap<String, usize> = HashMap::new();
        for a in &self.assignments {
            *loads.entry(a.instructor_id.clone()).or_insert(0) += 1;
        }
        loads
    }

    /// Re-checks every pair of assignments for double bookings.
    ///
    /// A solver-produced solution always returns an empty list. Each
    /// clashing pair is reported once per shared resource.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (i, a) in self.assignments.iter().enumerate() {
            for b in &self.assignments[i + 1..] {
                if !a.slots.overlaps(&b.slots) {
                    continue;
                }
                if a.instructor_id == b.instructor_id {
                    violations.push(Violation::new(
                        ViolationType::InstructorClash,
                        a,
                        b,
                        format!("instructor '{}' is double-booked", a.instructor_id),
                    ));
                }
                if a.room_id == b.room_id {
                    violations.push(Violation::new(
                        ViolationType::RoomClash,
                        a,
                        b,
                        format!("room '{}' is double-booked", a.room_id),
                    ));
                }
                if a.cohort == b.cohort {
                    violations.push(Violation::new(
                        ViolationType::CohortClash,
                        a,
                        b,
                        format!("cohort '{}' has overlapping sessions", a.cohort),
                    ));
                }
            }
        }
        violations
    }

    /// Whether the timetable has no double bookings.
    pub fn is_conflict_free(&self) -> bool {
        self.violations().is_empty()
    }
}

impl Violation {
    fn new(violation_type: ViolationType, a: &Assignment, b: &Assignment, message: String) -> Self {
        Self {
            violation_type,
            first_session: a.session_id.clone(),
            second_session: b.session_id.clone(),
            message,
        }
    }
}
