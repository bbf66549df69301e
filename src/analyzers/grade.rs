use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::Marks;

/// Number of graded subjects; percentage is always `total / SUBJECT_COUNT`.
pub const SUBJECT_COUNT: f64 = 3.0;

/// Highest attainable total across all subjects.
pub const MAX_TOTAL: f64 = 300.0;

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Converts a percentage (0–100) into a letter grade.
    ///
    /// | Range       | Grade |
    /// |-------------|-------|
    /// | >= 90       | A     |
    /// | >= 80       | B     |
    /// | >= 70       | C     |
    /// | >= 60       | D     |
    /// | < 60        | F     |
    pub fn from_percentage(p: f64) -> Self {
        match p {
            p if p >= 90.0 => Grade::A,
            p if p >= 80.0 => Grade::B,
            p if p >= 70.0 => Grade::C,
            p if p >= 60.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn tier(self) -> FeedbackTier {
        match self {
            Grade::A | Grade::B => FeedbackTier::Praise,
            Grade::F => FeedbackTier::Warning,
            Grade::C | Grade::D => FeedbackTier::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification used to pick a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    Praise,
    Warning,
    Neutral,
}

impl FeedbackTier {
    /// Message shown to the student. Neutral results get none.
    pub fn message(self) -> Option<&'static str> {
        match self {
            FeedbackTier::Praise => Some("Congratulations on your excellent performance!"),
            FeedbackTier::Warning => {
                Some("Warning: You have failed. Please consult your instructor.")
            }
            FeedbackTier::Neutral => None,
        }
    }
}

/// Derived grading fields for one set of marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeResult {
    pub total: f64,
    pub percentage: f64,
    pub grade: Grade,
    pub tier: FeedbackTier,
}

/// Grades one student's marks.
pub fn classify(marks: &Marks) -> GradeResult {
    let total = marks.total();
    let percentage = total / SUBJECT_COUNT;
    let grade = Grade::from_percentage(percentage);

    GradeResult {
        total,
        percentage,
        grade,
        tier: grade.tier(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_percentage(100.0), Grade::A);
        assert_eq!(Grade::from_percentage(90.0), Grade::A);
        assert_eq!(Grade::from_percentage(89.999), Grade::B);
        assert_eq!(Grade::from_percentage(80.0), Grade::B);
        assert_eq!(Grade::from_percentage(79.999), Grade::C);
        assert_eq!(Grade::from_percentage(70.0), Grade::C);
        assert_eq!(Grade::from_percentage(69.999), Grade::D);
        assert_eq!(Grade::from_percentage(60.0), Grade::D);
        assert_eq!(Grade::from_percentage(59.999), Grade::F);
        assert_eq!(Grade::from_percentage(0.0), Grade::F);
        assert_eq!(Grade::from_percentage(-5.0), Grade::F);
    }

    #[test]
    fn test_nan_percentage_is_f() {
        assert_eq!(Grade::from_percentage(f64::NAN), Grade::F);
    }

    #[test]
    fn test_tier_lookup() {
        assert_eq!(Grade::A.tier(), FeedbackTier::Praise);
        assert_eq!(Grade::B.tier(), FeedbackTier::Praise);
        assert_eq!(Grade::C.tier(), FeedbackTier::Neutral);
        assert_eq!(Grade::D.tier(), FeedbackTier::Neutral);
        assert_eq!(Grade::F.tier(), FeedbackTier::Warning);
    }

    #[test]
    fn test_neutral_has_no_message() {
        assert!(FeedbackTier::Neutral.message().is_none());
        assert!(FeedbackTier::Praise.message().is_some());
        assert!(FeedbackTier::Warning.message().unwrap().starts_with("Warning"));
    }

    #[test]
    fn test_classify_boundary_record() {
        let result = classify(&Marks::new(90.0, 90.0, 90.0));
        assert_eq!(result.total, 270.0);
        assert_eq!(result.percentage, 90.0);
        assert_eq!(result.grade, Grade::A);
        assert_eq!(result.tier, FeedbackTier::Praise);
    }

    #[test]
    fn test_classify_coerced_marks() {
        let result = classify(&Marks::from_cells("absent", "80", "70"));
        assert_eq!(result.total, 150.0);
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.grade, Grade::F);
        assert_eq!(result.tier, FeedbackTier::Warning);
    }

    #[test]
    fn test_percentage_is_total_over_three() {
        let result = classify(&Marks::new(81.0, 77.5, 64.25));
        assert_eq!(result.total, 81.0 + 77.5 + 64.25);
        assert_eq!(result.percentage, result.total / 3.0);
        assert_eq!(result.grade, Grade::C);
    }
}
