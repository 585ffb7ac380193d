//! End-to-end timetabling pipeline.
//!
//! # Algorithm
//!
//! 1. Keep only the sessions of the selected cohorts (all by default).
//! 2. Order time slots by (day, start time).
//! 3. Build domains; abort with every diagnostic if any session is
//!    infeasible.
//! 4. Run the backtracking solver on the sessions that have domains.
//!
//! Retrying with a relaxed problem (fewer cohorts, more rooms or
//! instructors) is up to the caller.

use log::{info, warn};
use thiserror::Error;

use crate::domain::{build_domains, BuildError, Diagnostics, DomainBuild};
use crate::models::{order_time_slots, select_cohorts, Instructor, Room, Session, TimeSlot};
use crate::solver::{BacktrackingSolver, SolveError, SolveResult, SolverConfig};

/// Input container for timetabling.
#[derive(Debug, Clone)]
pub struct TimetableRequest {
    /// Sessions to place.
    pub sessions: Vec<Session>,
    /// Available instructors.
    pub instructors: Vec<Instructor>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Bookable slots, in any order.
    pub slots: Vec<TimeSlot>,
    /// Cohorts to timetable. Empty = all.
    pub cohorts: Vec<String>,
    /// Search configuration.
    pub config: SolverConfig,
}

/// Why a request produced no timetable before or instead of searching.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The slot configuration admits no session at all.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Some sessions can never be placed; search was not attempted.
    #[error("{} session(s) cannot be scheduled with the given data", .0.len())]
    Infeasible(Diagnostics),
    /// The solver rejected its input.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl TimetableRequest {
    /// Creates a new request.
    pub fn new(
        sessions: Vec<Session>,
        instructors: Vec<Instructor>,
        rooms: Vec<Room>,
        slots: Vec<TimeSlot>,
    ) -> Self {
        Self {
            sessions,
            instructors,
            rooms,
            slots,
            cohorts: Vec::new(),
            config: SolverConfig::default(),
        }
    }

    /// Restricts the request to the given cohorts.
    pub fn with_cohorts<I, S>(mut self, cohorts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cohorts = cohorts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the search configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sessions selected by the cohort filter, in input order.
    pub fn selected_sessions(&self) -> Vec<Session> {
        if self.cohorts.is_empty() {
            self.sessions.clone()
        } else {
            select_cohorts(&self.sessions, self.cohorts.as_slice())
        }
    }

    /// Builds domains for the selected sessions without searching.
    ///
    /// # Errors
    /// [`BuildError`] when the slots admit no session at all.
    pub fn build(&self) -> Result<DomainBuild, BuildError> {
        let sessions = self.selected_sessions();
        let slots = order_time_slots(&self.slots);
        build_domains(&sessions, &self.instructors, &self.rooms, &slots)
    }

    /// Runs the full pipeline.
    ///
    /// "No solution" and interrupted searches are returned as
    /// [`SolveResult`] values, not errors.
    ///
    /// # Errors
    /// - [`TimetableError::Build`] for an unusable slot configuration
    /// - [`TimetableError::Infeasible`] with every diagnostic when any
    ///   selected session can never be placed
    pub fn run(&self) -> Result<SolveResult, TimetableError> {
        let sessions = self.selected_sessions();
        info!(
            "timetabling {} of {} sessions{}",
            sessions.len(),
            self.sessions.len(),
            if self.cohorts.is_empty() {
                String::new()
            } else {
                format!(" for cohorts {}", self.cohorts.join(", "))
            }
        );

        let slots = order_time_slots(&self.slots);
        let build = build_domains(&sessions, &self.instructors, &self.rooms, &slots)?;

        if !build.is_feasible() {
            for (session_id, diagnostic) in build.diagnostics.iter() {
                warn!("session '{session_id}': {}", diagnostic.message);
            }
            return Err(TimetableError::Infeasible(build.diagnostics));
        }

        let solvable = build.solvable_sessions(&sessions);
        let solver = BacktrackingSolver::new().with_config(self.config.clone());
        Ok(solver.solve(&solvable, &build.domains)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiagnosticKind;
    use crate::solver::SolveOutcome;

    fn slots() -> Vec<TimeSlot> {
        // Deliberately out of order
        vec![
            TimeSlot::new("m10", "Monday", "10:00"),
            TimeSlot::new("s10", "Sunday", "10:00"),
            TimeSlot::new("m9", "Monday", "09:00"),
            TimeSlot::new("s9", "Sunday", "09:00"),
        ]
    }

    fn request() -> TimetableRequest {
        TimetableRequest::new(
            vec![
                Session::lecture("S1", "CSC 111", "1"),
                Session::lab("S2", "CSC 111", "1"),
                Session::lecture("S3", "MTH 212", "3"),
            ],
            vec![
                Instructor::professor("P1").with_courses(["CSC 111", "MTH 212"]),
                Instructor::engineer("E1").with_course("CSC 111"),
            ],
            vec![Room::lecture("H1"), Room::lab("L1")],
            slots(),
        )
    }

    #[test]
    fn test_run_solves_and_orders_slots() {
        let result = request().run().unwrap();
        let solution = result.solution().unwrap();
        assert_eq!(solution.len(), 3);
        assert!(solution.is_conflict_free());
        for a in solution.assignments() {
            assert!(
                (a.slots.first == "s9" && a.slots.second == "s10")
                    || (a.slots.first == "m9" && a.slots.second == "m10")
            );
        }
    }

    #[test]
    fn test_cohort_filter() {
        let req = request().with_cohorts(["3"]);
        assert_eq!(req.selected_sessions().len(), 1);

        let solution = req.run().unwrap().into_solution().unwrap();
        assert_eq!(solution.len(), 1);
        assert!(solution.assignment_for_session("S3").is_some());
    }

    #[test]
    fn test_infeasible_aborts_before_search() {
        let mut req = request();
        req.sessions.push(Session::lecture("S4", "PHY 113", "1"));

        match req.run() {
            Err(TimetableError::Infeasible(diagnostics)) => {
                assert_eq!(diagnostics.len(), 1);
                assert_eq!(
                    diagnostics.get("S4").unwrap().kind,
                    DiagnosticKind::NoQualifiedInstructors
                );
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_infeasible_subset_can_be_dropped_by_cohort() {
        let mut req = request();
        req.sessions.push(Session::lecture("S4", "PHY 113", "5"));
        assert!(req.run().is_err());

        let req = req.with_cohorts(["1", "3"]);
        assert!(req.run().unwrap().is_solved());
    }

    #[test]
    fn test_no_slot_pairs_error() {
        let mut req = request();
        req.slots = vec![TimeSlot::new("s9", "Sunday", "09:00")];
        let err = req.run().unwrap_err();
        assert!(matches!(err, TimetableError::Build(BuildError::NoSlotPairs)));
    }

    #[test]
    fn test_tight_problem_reports_no_solution() {
        // Three cohort-1 sessions but only two disjoint slot-pairs
        let mut req = request();
        req.sessions.push(Session::lecture("S4", "MTH 212", "1"));
        let result = req.run().unwrap();
        assert_eq!(result.outcome, SolveOutcome::NoSolution);
    }

    #[test]
    fn test_build_only() {
        let build = request().build().unwrap();
        assert!(build.is_feasible());
        assert_eq!(build.domains.len(), 3);
    }
}
