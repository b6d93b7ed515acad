//! Diagnostic note accumulation
//!
//! Every resolution stage records its failures as typed notes instead of
//! aborting. Notes are kept structured until the formatting boundary, where
//! they are joined into a single whitespace-normalized string.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational (a source was empty or skipped)
    Info,
    /// A data source failed; the result is partial
    Warning,
    /// A cross-check anomaly (e.g. usage exceeding capacity)
    Critical,
}

/// A single diagnostic note from one resolution stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Note severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
}

/// Ordered collection of notes for one resolution routine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notes(Vec<Note>);

impl Notes {
    /// Create an empty note list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a note
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.0.push(Note {
            severity,
            message: message.into(),
        });
    }

    /// True if no notes were recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the recorded notes
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.0.iter()
    }

    /// Highest severity recorded, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.0.iter().map(|n| n.severity).max_by_key(|s| match s {
            Severity::Info => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        })
    }

    /// Join all messages into one whitespace-normalized string
    ///
    /// Internal runs of whitespace collapse to single spaces so the result
    /// is safe to embed in a single-line diagnostic field.
    pub fn joined(&self) -> String {
        let combined = self
            .0
            .iter()
            .map(|n| n.message.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        combined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_normalizes_whitespace() {
        let mut notes = Notes::new();
        notes.push(Severity::Warning, "first  problem\nwith newline");
        notes.push(Severity::Info, "  second problem ");
        assert_eq!(
            notes.joined(),
            "first problem with newline second problem"
        );
    }

    #[test]
    fn empty_notes_join_to_empty_string() {
        let notes = Notes::new();
        assert!(notes.is_empty());
        assert_eq!(notes.joined(), "");
        assert_eq!(notes.max_severity(), None);
    }

    #[test]
    fn max_severity_tracks_highest() {
        let mut notes = Notes::new();
        notes.push(Severity::Info, "a");
        notes.push(Severity::Critical, "b");
        notes.push(Severity::Warning, "c");
        assert_eq!(notes.max_severity(), Some(Severity::Critical));
    }
}
