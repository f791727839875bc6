//! Newline-delimited JSON reader that skips and counts malformed records.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CurataError, Result};
use crate::item::{CandidateItem, PipelineItem};

/// A line that could not be turned into an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub error: String,
}

/// Counts for one read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadReport {
    /// Non-blank lines seen.
    pub total_lines: usize,
    pub parsed: usize,
    pub skipped: usize,
    #[serde(default)]
    pub malformed: Vec<MalformedLine>,
}

/// Reads pipeline records from an NDJSON source.
pub struct RecordReader<R> {
    inner: R,
}

impl RecordReader<BufReader<File>> {
    /// Open a file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CurataError::io(path, e))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read every record, keeping the most specific shape of each.
    ///
    /// Blank lines are ignored. Lines that are not valid records are logged
    /// and listed in the report; only an I/O failure aborts the read.
    pub fn read_records(self) -> Result<(Vec<PipelineItem>, ReadReport)> {
        let mut report = ReadReport::default();
        let mut records = Vec::new();

        for (idx, line) in self.inner.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| CurataError::io("<input>", e))?;
            if line.trim().is_empty() {
                continue;
            }
            report.total_lines += 1;

            match parse_line(&line, line_no) {
                Ok(record) => {
                    report.parsed += 1;
                    records.push(record);
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping malformed record");
                    report.skipped += 1;
                    report.malformed.push(MalformedLine {
                        line: line_no,
                        error: e.to_string(),
                    });
                }
            }
        }

        debug!(
            parsed = report.parsed,
            skipped = report.skipped,
            "finished reading records"
        );
        Ok((records, report))
    }

    /// Read every record and reduce it to its original candidate.
    pub fn read_candidates(self) -> Result<(Vec<CandidateItem>, ReadReport)> {
        let (records, report) = self.read_records()?;
        let candidates = records.into_iter().map(PipelineItem::into_candidate).collect();
        Ok((candidates, report))
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<PipelineItem> {
    let record: PipelineItem =
        serde_json::from_str(line).map_err(|e| CurataError::MalformedRecord {
            line: line_no,
            message: describe_parse_error(line, e),
        })?;

    if record.candidate().id.trim().is_empty() {
        return Err(CurataError::MalformedRecord {
            line: line_no,
            message: "field `id` must not be empty".to_string(),
        });
    }
    Ok(record)
}

/// Untagged parsing only reports "did not match any variant"; retry as a
/// plain candidate to recover the specific field error.
fn describe_parse_error(line: &str, original: serde_json::Error) -> String {
    match serde_json::from_str::<CandidateItem>(line) {
        Err(e) => e.to_string(),
        Ok(_) => original.to_string(),
    }
}
