//! Instructor model.
//!
//! Instructors teach sessions. A professor covers lectures and tutorials,
//! an engineer covers labs, and either only teaches courses they are
//! qualified for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{DeliveryType, Session};

/// An instructor who can be assigned to sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Teaching role.
    pub role: InstructorRole,
    /// Course identifiers this instructor may teach.
    #[serde(default)]
    pub qualified_courses: BTreeSet<String>,
}

/// Instructor role, which decides the delivery types they may teach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructorRole {
    /// Teaches lectures and tutorials.
    #[serde(alias = "Prof")]
    Professor,
    /// Teaches labs.
    #[serde(alias = "Eng")]
    Engineer,
}

impl InstructorRole {
    /// Whether this role delivers sessions of the given type.
    #[inline]
    pub fn covers(self, delivery: DeliveryType) -> bool {
        match self {
            InstructorRole::Professor => {
                matches!(delivery, DeliveryType::Lecture | DeliveryType::Tutorial)
            }
            InstructorRole::Engineer => matches!(delivery, DeliveryType::Lab),
        }
    }
}

impl Instructor {
    /// Creates a new instructor with no qualifications.
    pub fn new(id: impl Into<String>, role: InstructorRole) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role,
            qualified_courses: BTreeSet::new(),
        }
    }

    /// Creates a professor.
    pub fn professor(id: impl Into<String>) -> Self {
        Self::new(id, InstructorRole::Professor)
    }

    /// Creates an engineer.
    pub fn engineer(id: impl Into<String>) -> Self {
        Self::new(id, InstructorRole::Engineer)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a qualified course.
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.qualified_courses.insert(course_id.into());
        self
    }

    /// Adds several qualified courses.
    pub fn with_courses<I, S>(mut self, course_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualified_courses
            .extend(course_ids.into_iter().map(Into::into));
        self
    }

    /// Whether this instructor is qualified for a course.
    pub fn is_qualified_for(&self, course_id: &str) -> bool {
        self.qualified_courses.contains(course_id)
    }

    /// Whether this instructor may teach the session: qualified for its
    /// course and holding the role its delivery type requires.
    pub fn can_teach(&self, session: &Session) -> bool {
        self.is_qualified_for(&session.course_id) && self.role.covers(session.delivery)
    }
}
