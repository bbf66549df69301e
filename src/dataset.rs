//! Tabular student data: loading, the one-pass grading transform, and the
//! enriched table that is written back out.

use anyhow::{Result, bail};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::Read;
use tracing::{debug, warn};

use crate::analyzers::grade::{GradeResult, classify};
use crate::analyzers::utility::format_number;
use crate::record::{Marks, StudentRecord, Subject};

/// Columns appended by [`Dataset::enrich`], in order.
pub const DERIVED_COLUMNS: [&str; 3] = ["Total", "Percentage", "Grade"];

const NAME_COLUMN: &str = "Name";
const ROLL_COLUMN: &str = "Roll";

/// Raw rows as read from a CSV source. Every row has exactly one cell per
/// header.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    subject_columns: [usize; 3],
}

impl Dataset {
    /// Reads a CSV with a header row. The header must name every subject
    /// column; rows shorter than the header are padded with empty cells.
    ///
    /// Subject cells that are not valid UTF-8 are read as empty (and so
    /// coerce to zero); other cells are decoded lossily. Header text is kept
    /// as written.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = rdr
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        let subject_columns = locate_subjects(&headers)?;

        let mut rows = Vec::new();
        for (index, result) in rdr.byte_records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                bail!(
                    "row {} has {} fields but the header has {}",
                    index + 1,
                    record.len(),
                    headers.len()
                );
            }
            if record.len() < headers.len() {
                warn!(row = index + 1, fields = record.len(), "Padding short row");
            }

            let mut cells: Vec<String> = record
                .iter()
                .enumerate()
                .map(|(column, field)| {
                    if subject_columns.contains(&column) {
                        std::str::from_utf8(field).map(str::to_string).unwrap_or_else(|_| {
                            debug!(row = index + 1, column, "Non-UTF-8 mark read as empty");
                            String::new()
                        })
                    } else {
                        String::from_utf8_lossy(field).into_owned()
                    }
                })
                .collect();
            cells.resize(headers.len(), String::new());
            rows.push(cells);
        }

        debug!(columns = headers.len(), rows = rows.len(), "Dataset loaded");

        Ok(Self {
            headers,
            rows,
            subject_columns,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = find_column(&self.headers, name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Student records with marks coerced to numbers.
    pub fn records(&self) -> Vec<StudentRecord> {
        let name = find_column(&self.headers, NAME_COLUMN);
        let roll = find_column(&self.headers, ROLL_COLUMN);
        let [m, s, e] = self.subject_columns;

        self.rows
            .iter()
            .map(|row| StudentRecord {
                name: name.map(|i| row[i].clone()).unwrap_or_default(),
                roll: roll.map(|i| row[i].clone()).unwrap_or_default(),
                marks: Marks::from_cells(&row[m], &row[s], &row[e]),
            })
            .collect()
    }

    /// Grades every row. Subject cells are rewritten with their coerced
    /// values and `Total`, `Percentage`, `Grade` are appended; columns with
    /// those names that already exist are overwritten in place.
    pub fn enrich(self) -> EnrichedDataset {
        let students = self.records();
        let mut headers = self.headers;

        let derived = DERIVED_COLUMNS.map(|name| {
            find_column(&headers, name).unwrap_or_else(|| {
                headers.push(name.to_string());
                headers.len() - 1
            })
        });

        let mut rows = Vec::with_capacity(self.rows.len());
        let mut graded = Vec::with_capacity(self.rows.len());

        for (mut cells, record) in self.rows.into_iter().zip(students) {
            cells.resize(headers.len(), String::new());

            for (subject, &index) in Subject::ALL.iter().zip(&self.subject_columns) {
                cells[index] = format_number(record.marks.get(*subject));
            }

            let result = classify(&record.marks);
            cells[derived[0]] = format_number(result.total);
            cells[derived[1]] = format_number(result.percentage);
            cells[derived[2]] = result.grade.to_string();

            rows.push(cells);
            graded.push(GradedStudent { record, result });
        }

        EnrichedDataset {
            headers,
            rows,
            students: graded,
        }
    }
}

/// Header lookup ignores surrounding whitespace.
fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn locate_subjects(headers: &[String]) -> Result<[usize; 3]> {
    let mut indices = [0; 3];
    for (slot, subject) in indices.iter_mut().zip(Subject::ALL) {
        match find_column(headers, subject.column()) {
            Some(index) => *slot = index,
            None => bail!("missing required column '{}'", subject.column()),
        }
    }
    Ok(indices)
}

/// A record together with its derived grading fields.
#[derive(Debug, Clone)]
pub struct GradedStudent {
    pub record: StudentRecord,
    pub result: GradeResult,
}

/// Output of [`Dataset::enrich`]: the cleaned table plus the typed results it
/// was built from.
#[derive(Debug, Clone)]
pub struct EnrichedDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    students: Vec<GradedStudent>,
}

impl EnrichedDataset {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn students(&self) -> &[GradedStudent] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn marks(&self) -> Vec<Marks> {
        self.students.iter().map(|s| s.record.marks).collect()
    }

    pub fn results(&self) -> Vec<GradeResult> {
        self.students.iter().map(|s| s.result).collect()
    }

    /// Encodes the table as UTF-8 CSV text.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("failed to finish CSV output: {}", e.error()))
    }
}
