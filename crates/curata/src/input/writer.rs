//! Append-only NDJSON writer and JSON report writer.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CurataError, Result};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CurataError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Appends one JSON record per line to a file.
pub struct RecordWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl RecordWriter {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                CurataError::Persistence(format!(
                    "Failed to open file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Create or truncate `path`, creating its parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let file = File::create(path).map_err(|e| {
            CurataError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| CurataError::io(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a, T, I>(&mut self, records: I) -> Result<()>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Records written through this writer.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| CurataError::io(&self.path, e))
    }
}

impl Drop for RecordWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Write a pretty-printed JSON report, replacing any existing file.
pub fn write_report<T: Serialize>(path: impl AsRef<Path>, report: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| {
        CurataError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| {
        CurataError::Persistence(format!("Failed to serialize report: {}", e))
    })?;
    writer.flush().map_err(|e| CurataError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RecordReader;
    use crate::item::CandidateItem;
    use tempfile::TempDir;

    #[test]
    fn test_append_keeps_existing_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/items.jsonl");

        {
            let mut w = RecordWriter::append(&path).unwrap();
            w.write(&CandidateItem::new("1", "first")).unwrap();
        }
        {
            let mut w = RecordWriter::append(&path).unwrap();
            w.write(&CandidateItem::new("2", "second")).unwrap();
            assert_eq!(w.written(), 1);
        }

        let (items, report) = RecordReader::open(&path).unwrap().read_candidates().unwrap();
        assert_eq!(report.skipped, 0);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_create_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.jsonl");
        RecordWriter::append(&path)
            .unwrap()
            .write(&CandidateItem::new("old", "stale"))
            .unwrap();
        {
            let mut w = RecordWriter::create(&path).unwrap();
            w.write(&CandidateItem::new("new", "fresh")).unwrap();
        }
        let (items, _) = RecordReader::open(&path).unwrap().read_candidates().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "new");
    }

    #[test]
    fn test_write_report_pretty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        write_report(&path, &serde_json::json!({"total_items": 3})).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"total_items\": 3"));
    }
}
