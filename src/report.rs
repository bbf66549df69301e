//! Human-readable text for the single-record and batch flows.

use std::fmt::Write;
use std::path::Path;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analyzers::grade::{GradeResult, MAX_TOTAL};
use crate::analyzers::types::{BatchSummary, SubjectStats};
use crate::record::StudentRecord;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Average")]
    average: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

impl From<&SubjectStats> for StatsRow {
    fn from(s: &SubjectStats) -> Self {
        Self {
            subject: s.subject.to_string(),
            average: stat_cell(s.average),
            std_dev: stat_cell(s.std_dev),
            min: stat_cell(s.min),
            max: stat_cell(s.max),
        }
    }
}

/// NaN means there were no records to aggregate.
fn stat_cell(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Summary for one student followed by the feedback message, if the tier
/// has one.
pub fn render_student_summary(record: &StudentRecord, result: &GradeResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Name: {} | Roll: {}", record.name, record.roll);
    let _ = writeln!(output, "Total: {} / {}", result.total, MAX_TOTAL);
    let _ = writeln!(output, "Percentage: {:.2}%", result.percentage);
    let _ = write!(output, "Grade: {}", result.grade);

    if let Some(message) = result.tier.message() {
        let _ = write!(output, "\n{message}");
    }

    output
}

/// Statistics table with one row per subject.
pub fn render_stats_table(subjects: &[SubjectStats]) -> String {
    let rows: Vec<StatsRow> = subjects.iter().map(StatsRow::from).collect();
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn render_batch_report(summary: &BatchSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Students analyzed: {}", summary.record_count);
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", render_stats_table(&summary.subjects));
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Number of high performers (> {}): {}",
        summary.threshold, summary.high_performers
    );

    if summary.grade_distribution.is_empty() {
        let _ = write!(output, "No grades to report.");
    } else {
        let counts: Vec<String> = summary
            .grade_distribution
            .iter()
            .map(|(grade, count)| format!("{grade}: {count}"))
            .collect();
        let _ = write!(output, "Grades: {}", counts.join(", "));
    }

    output
}

/// Closing line of a batch run naming the cleaned CSV.
pub fn render_completion(written: &Path) -> String {
    format!("Cleaned CSV written to {}", written.display())
}
