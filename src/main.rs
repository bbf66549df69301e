//! CLI entry point for the Student Performance Analyzer.
//!
//! Provides subcommands for grading a single student and for grading a
//! whole CSV dataset with summary statistics.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_analyzer::analyzers::aggregate::summarize;
use student_analyzer::analyzers::charts::chart_data;
use student_analyzer::analyzers::grade::classify;
use student_analyzer::config::Settings;
use student_analyzer::fetch::load_source;
use student_analyzer::output::{print_json, print_pretty, write_dataset, write_json};
use student_analyzer::parser::parse_dataset;
use student_analyzer::record::{Marks, StudentRecord};
use student_analyzer::report::{render_batch_report, render_completion, render_student_summary};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_analyzer")]
#[command(about = "Grade student marks and summarize class performance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single student's marks
    Grade {
        /// Student name
        #[arg(long, default_value = "")]
        name: String,

        /// Roll number
        #[arg(long, default_value = "")]
        roll: String,

        /// Mathematics mark (0-100)
        #[arg(long, value_parser = parse_mark)]
        mathematics: f64,

        /// Science mark (0-100)
        #[arg(long, value_parser = parse_mark)]
        science: f64,

        /// English mark (0-100)
        #[arg(long, value_parser = parse_mark)]
        english: f64,
    },
    /// Grade every student in a CSV file or URL and summarize the results
    Analyze {
        /// Path to file or URL to fetch [default: STUDENT_ANALYZER_INPUT or students_raw.csv]
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Where to write the cleaned CSV [default: STUDENT_ANALYZER_OUTPUT or students_cleaned.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// High-performer threshold on total marks (0-300) [default: STUDENT_ANALYZER_THRESHOLD or 250]
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(0..=300))]
        threshold: Option<u16>,

        /// Gzip compress the cleaned CSV
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// How to print the summary
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Optional: write chart series as JSON to this path
        #[arg(long)]
        charts: Option<PathBuf>,
    },
}

fn parse_mark(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("mark must be between 0 and 100, got {value}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    let settings = Settings::from_env();
    let _file_guard = init_tracing(&settings.log_file_path)?;

    match cli.command {
        Commands::Grade {
            name,
            roll,
            mathematics,
            science,
            english,
        } => {
            let record = StudentRecord::new(name, roll, Marks::new(mathematics, science, english));
            let result = classify(&record.marks);

            info!(
                name = %record.name,
                roll = %record.roll,
                total = result.total,
                grade = %result.grade,
                "Student graded"
            );

            println!("{}", render_student_summary(&record, &result));
        }
        Commands::Analyze {
            source,
            output,
            threshold,
            gzip,
            format,
            charts,
        } => {
            let threshold = settings.threshold(threshold)?;
            let source = source.unwrap_or(settings.input);
            let output = output.unwrap_or(settings.output);

            let bytes = load_source(&source).await?;
            let dataset = parse_dataset(&bytes)?;
            info!(rows = dataset.len(), source = %source, "Dataset parsed");

            let enriched = dataset.enrich();
            let written = write_dataset(&output, &enriched, gzip)?;

            let summary = summarize(&enriched, threshold);
            print_pretty(&summary);

            match format {
                OutputFormat::Table => {
                    println!("{}", render_batch_report(&summary));
                    println!("{}", render_completion(&written));
                }
                // Keep stdout parseable as JSON.
                OutputFormat::Json => {
                    print_json(&summary)?;
                    eprintln!("{}", render_completion(&written));
                }
            }

            if let Some(path) = charts {
                write_json(&path, &chart_data(&enriched))?;
            }

            info!(
                output = %written.display(),
                high_performers = summary.high_performers,
                "Analysis complete"
            );
        }
    }

    Ok(())
}

/// Colored stderr logging plus a JSON daily rolling log file. The returned
/// guard flushes the file writer on drop.
fn init_tracing(log_file_path: &Path) -> Result<WorkerGuard> {
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("student_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
