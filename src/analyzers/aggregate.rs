use crate::analyzers::grade::{Grade, GradeResult};
use crate::analyzers::types::{BatchSummary, SubjectStats};
use crate::analyzers::utility::{max, mean, min, stddev};
use crate::dataset::EnrichedDataset;
use crate::record::{Marks, Subject};
use chrono::Utc;
use std::collections::BTreeMap;

/// Per-subject mean, population standard deviation, min and max, one entry
/// per subject in column order.
pub fn subject_stats(marks: &[Marks]) -> Vec<SubjectStats> {
    Subject::ALL
        .iter()
        .map(|&subject| {
            let series: Vec<f64> = marks.iter().map(|m| m.get(subject)).collect();
            let avg = mean(&series);

            SubjectStats {
                subject,
                average: avg,
                std_dev: stddev(&series, avg),
                min: min(&series),
                max: max(&series),
            }
        })
        .collect()
}

/// Counts results whose total is strictly greater than `threshold`.
pub fn high_performers(results: &[GradeResult], threshold: u16) -> usize {
    let threshold = f64::from(threshold);
    results.iter().filter(|r| r.total > threshold).count()
}

/// Number of results per grade. Grades nobody received are absent.
pub fn grade_distribution(results: &[GradeResult]) -> BTreeMap<Grade, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.grade).or_insert(0) += 1;
    }
    counts
}

/// Builds the full batch report for an enriched dataset.
pub fn summarize(dataset: &EnrichedDataset, threshold: u16) -> BatchSummary {
    let results = dataset.results();

    BatchSummary {
        generated_at: Utc::now(),
        record_count: dataset.len(),
        subjects: subject_stats(&dataset.marks()),
        threshold,
        high_performers: high_performers(&results, threshold),
        grade_distribution: grade_distribution(&results),
    }
}
