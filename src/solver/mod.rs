//! Backtracking constraint solver.
//!
//! Consumes the domains produced by [`build_domains`](crate::domain::build_domains)
//! and searches for one candidate per session such that no instructor, room
//! or cohort is booked twice in overlapping slot-pairs.
//!
//! # Key Components
//!
//! - [`BacktrackingSolver`]: MRV variable ordering, LCV value ordering,
//!   forward checking
//! - [`SolverConfig`]: node/time limits, cancellation, worker count
//! - [`SolveResult`]: [`SolveOutcome`] plus [`SearchStats`]
//!
//! # Design
//!
//! Domains live in one arena with per-candidate liveness flags. Pruning
//! pushes removals onto a trail split into one checkpoint per search level,
//! and backtracking replays the removals in reverse. Sibling branches
//! therefore never observe each other's pruning, without copying domains at
//! every node.
//!
//! The first satisfying timetable found is returned; no objective is
//! optimized.
//!
//! # References
//!
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//!   Ch. 6

mod config;
#[cfg(feature = "parallel")]
mod parallel;
mod search;
mod store;
mod trail;

pub use config::SolverConfig;
pub use search::{solve, BacktrackingSolver, SearchStats, SolveOutcome, SolveResult};

use thiserror::Error;

/// Contract violations detected before search starts.
///
/// Unsatisfiable problems are not errors; they end in
/// [`SolveOutcome::NoSolution`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A session was passed without a domain entry, e.g. a diagnosed one.
    #[error("session '{0}' has no domain; only sessions with a domain entry may be solved")]
    MissingDomain(String),
    /// The same session id was passed twice.
    #[error("session '{0}' was given more than once")]
    DuplicateSession(String),
}
