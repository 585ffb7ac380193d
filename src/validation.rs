//! Input validation for timetabling problems.
//!
//! Checks structural integrity of the records before domains are built.
//! The domain builder trusts its input; these checks are what a caller runs
//! first to catch data-entry mistakes. Detects:
//! - Duplicate IDs (sessions, instructors, rooms, time slots)
//! - Day names outside the teaching week
//! - Unparsable start times
//! - Slot lists not in week order
//! - No day with two consecutive slots

use crate::models::{slot_pairs, Instructor, Room, Session, TimeSlot};
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A slot's day is not a teaching day.
    UnknownDay,
    /// A slot's start time is not `HH:MM`.
    InvalidStartTime,
    /// The slot list is not sorted by (day, start time).
    UnorderedSlots,
    /// No two consecutive slots share a day.
    NoSlotPairs,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate session, instructor, room or slot IDs
/// 2. Every slot day is a teaching day
/// 3. Every slot start time parses
/// 4. Slots are in (day, start time) order
/// 5. At least one day has two consecutive slots
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    sessions: &[Session],
    instructors: &[Instructor],
    rooms: &[Room],
    slots: &[TimeSlot],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("session", sessions.iter().map(|s| s.id.as_str()), &mut errors);
    check_unique("instructor", instructors.iter().map(|i| i.id.as_str()), &mut errors);
    check_unique("room", rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("time slot", slots.iter().map(|t| t.id.as_str()), &mut errors);

    for slot in slots {
        if slot.day_rank().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                format!("Time slot '{}' has unknown day '{}'", slot.id, slot.day),
            ));
        }
        if slot.start_minutes().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidStartTime,
                format!(
                    "Time slot '{}' has invalid start time '{}'",
                    slot.id, slot.start_time
                ),
            ));
        }
    }

    // Ordering is only meaningful once every day and time is recognized
    if let Some(pos) = first_out_of_order(slots) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnorderedSlots,
            format!(
                "Time slot '{}' comes before '{}' but is later in the week",
                slots[pos].id,
                slots[pos + 1].id
            ),
        ));
    }

    if !sessions.is_empty() && slot_pairs(slots).is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoSlotPairs,
            "No day has two consecutive time slots; sessions need two",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
}

/// Index `i` of the first adjacent pair with `slots[i]` after `slots[i + 1]`.
fn first_out_of_order(slots: &[TimeSlot]) -> Option<usize> {
    let key = |s: &TimeSlot| Some((s.day_rank()?, s.start_minutes()?));
    slots.windows(2).position(|w| match (key(&w[0]), key(&w[1])) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    })
}
