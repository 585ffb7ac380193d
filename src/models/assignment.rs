//! Assignment (domain value) model.
//!
//! An assignment binds one session to one instructor, one room and one
//! slot-pair. The domain builder enumerates them as candidates; the solver
//! picks one per session.

use serde::{Deserialize, Serialize};

use super::{Instructor, Room, Session, SlotPair};

/// A session-instructor-room-time binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned session ID.
    pub session_id: String,
    /// Session's course ID (denormalized for query convenience).
    pub course_id: String,
    /// Session's cohort (denormalized; part of the conflict rule).
    pub cohort: String,
    /// Assigned instructor ID.
    pub instructor_id: String,
    /// Assigned room ID.
    pub room_id: String,
    /// Occupied slot-pair.
    pub slots: SlotPair,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        session_id: impl Into<String>,
        course_id: impl Into<String>,
        cohort: impl Into<String>,
        instructor_id: impl Into<String>,
        room_id: impl Into<String>,
        slots: SlotPair,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            course_id: course_id.into(),
            cohort: cohort.into(),
            instructor_id: instructor_id.into(),
            room_id: room_id.into(),
            slots,
        }
    }

    /// Creates a candidate for `session` from its resources.
    pub fn candidate(
        session: &Session,
        instructor: &Instructor,
        room: &Room,
        slots: &SlotPair,
    ) -> Self {
        Self::new(
            &session.id,
            &session.course_id,
            &session.cohort,
            &instructor.id,
            &room.id,
            slots.clone(),
        )
    }

    /// Whether the two assignments cannot both hold.
    ///
    /// They conflict iff their slot-pairs share a slot and they share the
    /// instructor, the room or the cohort.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.slots.overlaps(&other.slots)
            && (self.instructor_id == other.instructor_id
                || self.room_id == other.room_id
                || self.cohort == other.cohort)
    }
}
