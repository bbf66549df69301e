//! Series for the dashboard charts. Rendering is left to whatever consumes
//! the JSON.

use crate::analyzers::aggregate::{grade_distribution, subject_stats};
use crate::analyzers::grade::Grade;
use crate::analyzers::types::{ChartData, GradeCount, ScatterPoint, SubjectAverage};
use crate::dataset::EnrichedDataset;

/// Scatter colour for each grade.
pub fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "green",
        Grade::B => "blue",
        Grade::C => "orange",
        Grade::D => "purple",
        Grade::F => "red",
    }
}

pub fn chart_data(dataset: &EnrichedDataset) -> ChartData {
    let results = dataset.results();

    let subject_averages = subject_stats(&dataset.marks())
        .into_iter()
        .map(|s| SubjectAverage {
            subject: s.subject,
            average: s.average,
        })
        .collect();

    let grade_distribution = grade_distribution(&results)
        .into_iter()
        .map(|(grade, count)| GradeCount { grade, count })
        .collect();

    let scatter = results
        .iter()
        .map(|r| ScatterPoint {
            total: r.total,
            percentage: r.percentage,
            grade: r.grade,
            color: grade_color(r.grade),
        })
        .collect();

    ChartData {
        subject_averages,
        grade_distribution,
        scatter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_chart_data() {
        let raw = "Mathematics,Science,English\n90,90,90\n50,50,50\n95,95,95\n";
        let dataset = Dataset::from_reader(raw.as_bytes()).unwrap().enrich();
        let charts = chart_data(&dataset);

        assert_eq!(charts.subject_averages.len(), 3);
        assert!((charts.subject_averages[0].average - 235.0 / 3.0).abs() < 1e-9);

        assert_eq!(
            charts.grade_distribution,
            vec![
                GradeCount { grade: Grade::A, count: 2 },
                GradeCount { grade: Grade::F, count: 1 },
            ]
        );

        assert_eq!(charts.scatter.len(), 3);
        assert_eq!(charts.scatter[1].color, "red");
        assert_eq!(charts.scatter[0].total, 270.0);
    }

    #[test]
    fn test_chart_data_serializes_nan_as_null() {
        let dataset = Dataset::from_reader("Mathematics,Science,English\n".as_bytes())
            .unwrap()
            .enrich();
        let json = serde_json::to_value(chart_data(&dataset)).unwrap();

        assert!(json["subject_averages"][0]["average"].is_null());
        assert_eq!(json["scatter"].as_array().unwrap().len(), 0);
    }
}
