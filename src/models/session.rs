//! Session model.
//!
//! A session is one teaching occurrence of a course (a lecture, a tutorial
//! or a lab) that needs an instructor, a room and a slot-pair. Sessions are
//! the variables of the timetabling problem.

use serde::{Deserialize, Serialize};

/// Default specialization tag for sessions shared by every track.
pub const GENERAL_SPECIALIZATION: &str = "General";

/// A teaching session to be timetabled.
///
/// Sessions are owned by the caller and only borrowed by the domain builder
/// and the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Owning course identifier (matched against instructor qualifications).
    pub course_id: String,
    /// Delivery type.
    pub delivery: DeliveryType,
    /// Required lab sub-type (labs only). Empty strings mean "none".
    #[serde(default)]
    pub lab_type: Option<String>,
    /// Specialization (track) tag.
    #[serde(default = "default_specialization")]
    pub specialization: String,
    /// Cohort (semester) whose students attend this session.
    pub cohort: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
}

/// How a session is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryType {
    /// Lecture: taught by a professor in a lecture room.
    Lecture,
    /// Tutorial: taught by a professor in a lecture room.
    #[serde(alias = "Tut")]
    Tutorial,
    /// Lab: taught by an engineer in a lab room.
    Lab,
}

fn default_specialization() -> String {
    GENERAL_SPECIALIZATION.to_string()
}

impl DeliveryType {
    /// Whether this delivery type takes place in a lab.
    #[inline]
    pub fn is_lab(self) -> bool {
        matches!(self, DeliveryType::Lab)
    }

    /// Short label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryType::Lecture => "Lecture",
            DeliveryType::Tutorial => "Tutorial",
            DeliveryType::Lab => "Lab",
        }
    }
}

impl Session {
    /// Creates a new session.
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        delivery: DeliveryType,
        cohort: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            delivery,
            lab_type: None,
            specialization: default_specialization(),
            cohort: cohort.into(),
            name: String::new(),
        }
    }

    /// Creates a lecture session.
    pub fn lecture(
        id: impl Into<String>,
        course_id: impl Into<String>,
        cohort: impl Into<String>,
    ) -> Self {
        Self::new(id, course_id, DeliveryType::Lecture, cohort)
    }

    /// Creates a tutorial session.
    pub fn tutorial(
        id: impl Into<String>,
        course_id: impl Into<String>,
        cohort: impl Into<String>,
    ) -> Self {
        Self::new(id, course_id, DeliveryType::Tutorial, cohort)
    }

    /// Creates a lab session.
    pub fn lab(
        id: impl Into<String>,
        course_id: impl Into<String>,
        cohort: impl Into<String>,
    ) -> Self {
        Self::new(id, course_id, DeliveryType::Lab, cohort)
    }

    /// Sets the required lab sub-type.
    pub fn with_lab_type(mut self, lab_type: impl Into<String>) -> Self {
        self.lab_type = Some(lab_type.into());
        self
    }

    /// Sets the specialization tag.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Required lab sub-type, if any.
    pub fn lab_type(&self) -> Option<&str> {
        self.lab_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Name for messages: the display name, or the id when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Keeps only the sessions attended by one of `cohorts`, in input order.
///
/// Used to timetable a subset of semesters at once when the full problem is
/// too tight.
pub fn select_cohorts<S: AsRef<str>>(sessions: &[Session], cohorts: &[S]) -> Vec<Session> {
    sessions
        .iter()
        .filter(|s| cohorts.iter().any(|c| c.as_ref() == s.cohort))
        .cloned()
        .collect()
}
