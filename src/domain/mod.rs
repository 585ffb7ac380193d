//! Domain construction with feasibility diagnostics.
//!
//! For every session, enumerates each compatible (instructor, room,
//! slot-pair) combination. Sessions that can never be placed are reported
//! as [`Diagnostics`] instead of failing the build, so the caller can show
//! every problem at once before any search runs.
//!
//! # Algorithm
//! Per session, in input order:
//! 1. Eligible instructors (qualification + role). None → diagnostic.
//! 2. Eligible rooms (type + lab sub-type). None → diagnostic.
//! 3. Cross-product instructors × rooms × slot-pairs, in that nesting
//!    order. The slot-pair list is derived once for all sessions.
//!
//! # Complexity
//! O(s * (i + r + i * r * p)) for s sessions, i instructors, r rooms and
//! p slot-pairs.

mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{slot_pairs, Assignment, Instructor, Room, Session, SlotPair, TimeSlot};

/// Candidate assignments per session, keyed by session ID.
///
/// Candidate order within a domain is the builder's enumeration order and
/// is the natural order the solver's tie-breaks refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domains {
    entries: HashMap<String, Vec<Assignment>>,
}

impl Domains {
    /// Creates an empty domain map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the candidates of a session.
    pub fn insert(&mut self, session_id: impl Into<String>, candidates: Vec<Assignment>) {
        let _ = self.entries.insert(session_id.into(), candidates);
    }

    /// Candidates of a session.
    pub fn get(&self, session_id: &str) -> Option<&[Assignment]> {
        self.entries.get(session_id).map(Vec::as_slice)
    }

    /// Whether a session has a domain entry.
    pub fn contains(&self, session_id: &str) -> bool {
        self.entries.contains_key(session_id)
    }

    /// Number of sessions with a domain.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no session has a domain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of candidates across all sessions.
    pub fn total_candidates(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterates (session ID, candidates) in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Assignment])> {
        self.entries
            .iter()
            .map(|(id, values)| (id.as_str(), values.as_slice()))
    }
}

/// Output of [`build_domains`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBuild {
    /// Candidates for every placeable session.
    pub domains: Domains,
    /// Reasons for every session that can never be placed.
    pub diagnostics: Diagnostics,
}

impl DomainBuild {
    /// Whether every session got a domain.
    pub fn is_feasible(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The sessions that received a domain, in input order.
    ///
    /// These are the only sessions that may be handed to the solver.
    pub fn solvable_sessions<'a>(&self, sessions: &'a [Session]) -> Vec<&'a Session> {
        sessions
            .iter()
            .filter(|s| self.domains.contains(&s.id))
            .collect()
    }
}

/// Configuration errors that prevent building any domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No two consecutive slots share a day, so no session can be placed
    /// anywhere.
    #[error("no two consecutive time slots fall on the same day; at least one day needs two slots")]
    NoSlotPairs,
}

/// Builds candidate domains and diagnostics.
///
/// `ordered_slots` must already be in week order (see
/// [`order_time_slots`](crate::models::order_time_slots)); it is trusted
/// as given.
///
/// # Errors
/// [`BuildError::NoSlotPairs`] when there are sessions to place but the
/// slot sequence contains no consecutive same-day pair.
pub fn build_domains(
    sessions: &[Session],
    instructors: &[Instructor],
    rooms: &[Room],
    ordered_slots: &[TimeSlot],
) -> Result<DomainBuild, BuildError> {
    let pairs = slot_pairs(ordered_slots);
    if pairs.is_empty() && !sessions.is_empty() {
        return Err(BuildError::NoSlotPairs);
    }

    let mut build = DomainBuild::default();

    for session in sessions {
        match session_domain(session, instructors, rooms, &pairs) {
            Ok(candidates) => build.domains.insert(&session.id, candidates),
            Err(diagnostic) => {
                debug!("session '{}': {}", session.id, diagnostic.message);
                build.diagnostics.insert(&session.id, diagnostic);
            }
        }
    }

    info!(
        "built domains for {} of {} sessions ({} candidates, {} slot-pairs, {} diagnostics)",
        build.domains.len(),
        sessions.len(),
        build.domains.total_candidates(),
        pairs.len(),
        build.diagnostics.len()
    );

    Ok(build)
}

/// Enumerates the candidates of one session.
fn session_domain(
    session: &Session,
    instructors: &[Instructor],
    rooms: &[Room],
    pairs: &[SlotPair],
) -> Result<Vec<Assignment>, Diagnostic> {
    let label = session.delivery.label();

    let eligible_instructors: Vec<&Instructor> =
        instructors.iter().filter(|i| i.can_teach(session)).collect();
    if eligible_instructors.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::NoQualifiedInstructors,
            format!(
                "Course '{}' ({label}) has no qualified instructors.",
                session.display_name()
            ),
        ));
    }

    let eligible_rooms: Vec<&Room> = rooms.iter().filter(|r| r.can_host(session)).collect();
    if eligible_rooms.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::NoEligibleRooms,
            format!(
                "Course '{}' ({label}) has no available rooms of the required type.",
                session.display_name()
            ),
        ));
    }

    let mut candidates =
        Vec::with_capacity(eligible_instructors.len() * eligible_rooms.len() * pairs.len());
    for instructor in &eligible_instructors {
        for room in &eligible_rooms {
            for pair in pairs {
                candidates.push(Assignment::candidate(session, instructor, room, pair));
            }
        }
    }

    if candidates.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::NoCombinations,
            format!(
                "Course '{}' ({label}) has qualified instructors and rooms, but 0 (instructor, room, time) combinations were found.",
                session.display_name()
            ),
        ));
    }

    Ok(candidates)
}
