//! NDJSON input and output.

mod reader;
mod writer;

pub use reader::{MalformedLine, ReadReport, RecordReader};
pub use writer::{RecordWriter, write_report};
