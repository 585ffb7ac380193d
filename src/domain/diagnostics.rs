//! Infeasibility diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Why a session can never be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Failure category.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of per-session infeasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// No instructor is both qualified for the course and of the right role.
    NoQualifiedInstructors,
    /// No room has the required type or lab sub-type.
    NoEligibleRooms,
    /// Instructors and rooms exist but no combination with a slot-pair does.
    NoCombinations,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Per-session diagnostics, keyed by session ID.
///
/// Insertion order follows the session input order. Serialized as a list
/// of `(session ID, diagnostic)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(String, Diagnostic)>",
    into = "Vec<(String, Diagnostic)>"
)]
pub struct Diagnostics {
    entries: Vec<(String, Diagnostic)>,
    /// Session ID -> position in `entries`.
    index: HashMap<String, usize>,
}

impl Diagnostics {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic, replacing any earlier one for the same session.
    pub fn insert(&mut self, session_id: impl Into<String>, diagnostic: Diagnostic) {
        let session_id = session_id.into();
        match self.index.get(&session_id) {
            Some(&pos) => self.entries[pos].1 = diagnostic,
            None => {
                self.index.insert(session_id.clone(), self.entries.len());
                self.entries.push((session_id, diagnostic));
            }
        }
    }

    /// Diagnostic for a session, if any.
    pub fn get(&self, session_id: &str) -> Option<&Diagnostic> {
        self.index.get(session_id).map(|&pos| &self.entries[pos].1)
    }

    /// Whether a session was diagnosed.
    pub fn contains(&self, session_id: &str) -> bool {
        self.get(session_id).is_some()
    }

    /// Number of diagnosed sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every session passed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates (session ID, diagnostic) in session input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.entries.iter().map(|(id, d)| (id.as_str(), d))
    }
}

impl From<Vec<(String, Diagnostic)>> for Diagnostics {
    fn from(entries: Vec<(String, Diagnostic)>) -> Self {
        let mut diagnostics = Self::new();
        for (session_id, diagnostic) in entries {
            diagnostics.insert(session_id, diagnostic);
        }
        diagnostics
    }
}

impl From<Diagnostics> for Vec<(String, Diagnostic)> {
    fn from(diagnostics: Diagnostics) -> Self {
        diagnostics.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut d = Diagnostics::new();
        assert!(d.is_empty());
        d.insert("S2", Diagnostic::new(DiagnosticKind::NoEligibleRooms, "no rooms"));
        d.insert("S1", Diagnostic::new(DiagnosticKind::NoQualifiedInstructors, "no one"));

        assert_eq!(d.len(), 2);
        assert!(d.contains("S1"));
        assert!(!d.contains("S3"));
        assert_eq!(d.get("S2").unwrap().kind, DiagnosticKind::NoEligibleRooms);

        let order: Vec<&str> = d.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["S2", "S1"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut d = Diagnostics::new();
        d.insert("S1", Diagnostic::new(DiagnosticKind::NoEligibleRooms, "a"));
        d.insert("S1", Diagnostic::new(DiagnosticKind::NoCombinations, "b"));
        assert_eq!(d.len(), 1);
        assert_eq!(d.get("S1").unwrap().message, "b");
    }

    #[test]
    fn test_lookup_after_many_inserts() {
        let mut d = Diagnostics::new();
        for i in 0..500 {
            d.insert(
                format!("S{i}"),
                Diagnostic::new(DiagnosticKind::NoEligibleRooms, format!("m{i}")),
            );
        }
        d.insert("S250", Diagnostic::new(DiagnosticKind::NoCombinations, "again"));

        assert_eq!(d.len(), 500);
        assert_eq!(d.get("S499").unwrap().message, "m499");
        assert_eq!(d.get("S250").unwrap().kind, DiagnosticKind::NoCombinations);
        assert_eq!(d.iter().nth(250).unwrap().1.message, "again");
    }

    #[test]
    fn test_json_keeps_order_and_lookup() {
        let mut d = Diagnostics::new();
        d.insert("S2", Diagnostic::new(DiagnosticKind::NoEligibleRooms, "no rooms"));
        d.insert("S1", Diagnostic::new(DiagnosticKind::NoQualifiedInstructors, "no one"));

        let json = serde_json::to_string(&d).unwrap();
        let back: Diagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(back.contains("S1"));
        let order: Vec<&str> = back.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["S2", "S1"]);
    }
}
