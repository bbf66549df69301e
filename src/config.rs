use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::analyzers::grade::MAX_TOTAL;

pub const DEFAULT_LOG_FILE: &str = "logs/student_analyzer.log";
pub const DEFAULT_INPUT: &str = "students_raw.csv";
pub const DEFAULT_OUTPUT: &str = "students_cleaned.csv";
pub const DEFAULT_THRESHOLD: u16 = 250;

/// Runtime settings read from the environment (and `.env`, once
/// `dotenvy::dotenv` has run). Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_file_path: PathBuf,
    pub input: String,
    pub output: PathBuf,
    threshold: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_file_path: lookup("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
            input: lookup("STUDENT_ANALYZER_INPUT").unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            output: lookup("STUDENT_ANALYZER_OUTPUT")
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string())
                .into(),
            threshold: lookup("STUDENT_ANALYZER_THRESHOLD"),
        }
    }

    /// High-performer threshold: `flag` if given, otherwise
    /// `STUDENT_ANALYZER_THRESHOLD`, otherwise [`DEFAULT_THRESHOLD`]. The
    /// environment value is only validated when it is actually used.
    pub fn threshold(&self, flag: Option<u16>) -> Result<u16> {
        if let Some(value) = flag {
            return Ok(value);
        }
        match &self.threshold {
            Some(raw) => parse_threshold(raw)
                .with_context(|| format!("invalid STUDENT_ANALYZER_THRESHOLD '{raw}'")),
            None => Ok(DEFAULT_THRESHOLD),
        }
    }
}

/// Parses a high-performer threshold, which must lie in `[0, 300]`.
pub fn parse_threshold(raw: &str) -> Result<u16> {
    let value: u16 = raw.trim().parse()?;
    if f64::from(value) > MAX_TOTAL {
        bail!("threshold must be between 0 and {MAX_TOTAL}");
    }
    Ok(value)
}
