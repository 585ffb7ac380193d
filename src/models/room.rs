//! Room model.
//!
//! Rooms host sessions. Lectures and tutorials need a lecture room; labs
//! need a lab, and a lab session that names a sub-type (e.g. "Network",
//! "Electronics") only fits a lab of that sub-type.

use serde::{Deserialize, Serialize};

use super::Session;

/// A room that can host sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Room classification.
    pub room_type: RoomType,
    /// Lab sub-type (lab rooms only). Empty strings mean "none".
    #[serde(default)]
    pub lab_type: Option<String>,
}

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Lecture hall or classroom.
    Lecture,
    /// Laboratory.
    Lab,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            room_type,
            lab_type: None,
        }
    }

    /// Creates a lecture room.
    pub fn lecture(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lecture)
    }

    /// Creates a lab room without sub-type.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lab)
    }

    /// Sets the lab sub-type.
    pub fn with_lab_type(mut self, lab_type: impl Into<String>) -> Self {
        self.lab_type = Some(lab_type.into());
        self
    }

    /// Lab sub-type, if any.
    pub fn lab_type(&self) -> Option<&str> {
        self.lab_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether this room can host the session.
    ///
    /// A lab session without a sub-type only fits a generic lab; it never
    /// takes a specialized one.
    pub fn can_host(&self, session: &Session) -> bool {
        if !session.delivery.is_lab() {
            return self.room_type == RoomType::Lecture;
        }
        self.room_type == RoomType::Lab && self.lab_type() == session.lab_type()
    }
}
