//! Student records and the mark coercion rule shared by both grading flows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three graded subjects, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Mathematics,
    Science,
    English,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Mathematics, Subject::Science, Subject::English];

    /// Header name of the subject's column in a dataset.
    pub fn column(self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Science => "Science",
            Subject::English => "English",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Marks for the three subjects. Values are passed through unchanged, so a
/// mark outside `[0, 100]` is graded as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Marks {
    pub mathematics: f64,
    pub science: f64,
    pub english: f64,
}

impl Marks {
    pub fn new(mathematics: f64, science: f64, english: f64) -> Self {
        Self {
            mathematics: normalize(mathematics),
            science: normalize(science),
            english: normalize(english),
        }
    }

    /// Builds marks from raw text cells, coercing each one with [`coerce_mark`].
    pub fn from_cells(mathematics: &str, science: &str, english: &str) -> Self {
        Self {
            mathematics: coerce_mark(mathematics),
            science: coerce_mark(science),
            english: coerce_mark(english),
        }
    }

    pub fn get(&self, subject: Subject) -> f64 {
        match subject {
            Subject::Mathematics => self.mathematics,
            Subject::Science => self.science,
            Subject::English => self.english,
        }
    }

    pub fn total(&self) -> f64 {
        self.mathematics + self.science + self.english
    }
}

/// Parses a raw mark cell. Blank, non-numeric, NaN and infinite values all
/// become `0.0`.
pub fn coerce_mark(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(normalize).unwrap_or(0.0)
}

fn normalize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// One student: opaque identifying fields plus marks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentRecord {
    pub name: String,
    pub roll: String,
    pub marks: Marks,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, roll: impl Into<String>, marks: Marks) -> Self {
        Self {
            name: name.into(),
            roll: roll.into(),
            marks,
        }
    }
}
