//! Output formatting and persistence for graded datasets.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::BatchSummary;
use crate::dataset::EnrichedDataset;

/// Logs a batch summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &BatchSummary) {
    debug!("{:#?}", summary);
}

/// Prints any serializable value to stdout as pretty JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes any serializable value to `path` as pretty JSON.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    info!("JSON written");
    Ok(())
}

/// Writes the enriched dataset as CSV, replacing any existing file.
///
/// With `gzip`, the content is compressed and `.gz` is appended to the path
/// unless it already ends that way. Returns the path actually written.
#[tracing::instrument(skip_all, fields(path = %path.display(), rows = dataset.len()))]
pub fn write_dataset(path: &Path, dataset: &EnrichedDataset, gzip: bool) -> Result<PathBuf> {
    let csv = dataset.to_csv_bytes()?;

    let (body, target) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&csv)?;
        (encoder.finish()?, gz_path(path))
    } else {
        (csv, path.to_path_buf())
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    debug!(bytes = body.len(), gzip, "Writing cleaned CSV");
    std::fs::write(&target, body)
        .with_context(|| format!("failed to write {}", target.display()))?;

    Ok(target)
}

fn gz_path(path: &Path) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".gz");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::summarize;
    use crate::dataset::Dataset;
    use crate::parser::parse_dataset;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample() -> EnrichedDataset {
        let raw = "Name,Roll,Mathematics,Science,English\nAsha,1,90,90,90\nBen,2,x,80,70\n";
        Dataset::from_reader(raw.as_bytes()).unwrap().enrich()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summarize(&sample(), 250));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&summarize(&sample(), 250)).unwrap();
    }

    #[test]
    fn test_write_dataset_plain() {
        let path = temp_path("student_analyzer_test_plain.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let written = write_dataset(&path, &sample(), false).unwrap();
        assert_eq!(written, path);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,Roll,Mathematics,Science,English,Total,Percentage,Grade"
        );
        assert_eq!(lines[2], "Ben,2,0.0,80.0,70.0,150.0,50.0,F");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_dataset_overwrites() {
        let path = temp_path("student_analyzer_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_dataset(&path, &sample(), false).unwrap();
        write_dataset(&path, &sample(), false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("Name")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_dataset_gzip() {
        let path = temp_path("student_analyzer_test_gzip.csv");
        let expected = temp_path("student_analyzer_test_gzip.csv.gz");
        let _ = fs::remove_file(&expected);

        let written = write_dataset(&path, &sample(), true).unwrap();
        assert_eq!(written, expected);

        let bytes = fs::read(&written).unwrap();
        let reparsed = parse_dataset(&bytes).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed.column("Grade").unwrap(), vec!["A", "F"]);

        fs::remove_file(&written).unwrap();
    }

    #[test]
    fn test_gz_path_keeps_existing_extension() {
        assert_eq!(gz_path(Path::new("out.csv.gz")), PathBuf::from("out.csv.gz"));
        assert_eq!(gz_path(Path::new("out.csv")), PathBuf::from("out.csv.gz"));
    }

    #[test]
    fn test_write_json() {
        let path = temp_path("student_analyzer_test_summary.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &summarize(&sample(), 100)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["high_performers"], 2);
        assert_eq!(value["grade_distribution"]["A"], 1);

        fs::remove_file(&path).unwrap();
    }
}
