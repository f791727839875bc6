//! Fuzz target for RecordReader.
//!
//! The NDJSON reader must never panic and must account for every
//! non-blank line as either parsed or skipped.

#![no_main]

use curata::input::RecordReader;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    // Invalid UTF-8 surfaces as an I/O error, which is fine
    if let Ok((records, report)) = RecordReader::new(Cursor::new(data)).read_records() {
        assert_eq!(records.len(), report.parsed);
        assert_eq!(report.parsed + report.skipped, report.total_lines);
        assert_eq!(report.malformed.len(), report.skipped);
        for record in &records {
            assert!(!record.candidate().id.trim().is_empty());
        }
    }
});
