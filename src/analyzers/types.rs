//! Data types produced by the batch aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::grade::Grade;
use crate::record::Subject;

/// Summary statistics for one subject. All fields are NaN when there are no
/// records; NaN serializes to JSON `null`.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectStats {
    pub subject: Subject,
    pub average: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything reported for a batch run.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub subjects: Vec<SubjectStats>,
    pub threshold: u16,
    pub high_performers: usize,
    pub grade_distribution: BTreeMap<Grade, usize>,
}

/// One point on the subject-average line chart.
#[derive(Debug, Serialize)]
pub struct SubjectAverage {
    pub subject: Subject,
    pub average: f64,
}

/// One bar of the grade distribution chart.
#[derive(Debug, PartialEq, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

/// One point on the total-vs-percentage scatter plot.
#[derive(Debug, Serialize)]
pub struct ScatterPoint {
    pub total: f64,
    pub percentage: f64,
    pub grade: Grade,
    pub color: &'static str,
}

/// Series backing the three dashboard charts.
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub subject_averages: Vec<SubjectAverage>,
    pub grade_distribution: Vec<GradeCount>,
    pub scatter: Vec<ScatterPoint>,
}
