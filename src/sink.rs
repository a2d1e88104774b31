//! Load targets.
//!
//! A [`Sink`] receives the final record set of a run. Loading never fails:
//! sinks accept any well-formed record set and report how many records they
//! took.

use std::fmt::Write as _;

use crate::record::Record;

const OUTPUT_HEADER: &str = "===== ETL Pipeline Output =====";
const OUTPUT_RULE: &str = "-------------------------------";
const OUTPUT_FOOTER: &str = "===============================";
const SUMMARY_HEADER: &str = "===== ETL Pipeline Summary =====";
const SUMMARY_FOOTER: &str = "================================";

/// A pipeline load target.
pub trait Sink {
    /// Deliver `records`, returning how many were accepted.
    fn load(&mut self, records: &[Record]) -> usize;

    /// The display name of this sink.
    fn name(&self) -> &str;
}

/// Renders record sets as human-readable text blocks.
///
/// The sink never writes to a process stream itself. Rendered text is
/// buffered and handed back through [`output`](Self::output) so the caller
/// decides where it goes.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    buffer: String,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything loaded so far, rendered.
    pub fn output(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }

    /// Render the full record block.
    ///
    /// ```
    /// use etl_rs::{ConsoleSink, Record};
    ///
    /// let text = ConsoleSink::render(&[Record::from_iter(["A", "B"])]);
    /// assert!(text.contains("Total Records: 1"));
    /// assert!(text.contains("Record 1: A | B"));
    /// ```
    pub fn render(records: &[Record]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{OUTPUT_HEADER}");
        let _ = writeln!(out, "Total Records: {}", records.len());
        let _ = writeln!(out, "{OUTPUT_RULE}");
        for (i, record) in records.iter().enumerate() {
            let _ = writeln!(out, "Record {}: {record}", i + 1);
        }
        let _ = writeln!(out, "{OUTPUT_FOOTER}");
        out
    }

    /// Render the summary block: total count and the field count of the
    /// first record only.
    pub fn render_summary(records: &[Record]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{SUMMARY_HEADER}");
        let _ = writeln!(out, "Total Records Processed: {}", records.len());
        match records.first() {
            Some(first) => {
                let _ = writeln!(out, "Fields per Record: {}", first.field_count());
            }
            None => {
                let _ = writeln!(out, "No records to summarize.");
            }
        }
        let _ = writeln!(out, "{SUMMARY_FOOTER}");
        out
    }
}

impl Sink for ConsoleSink {
    fn load(&mut self, records: &[Record]) -> usize {
        self.buffer.push_str(&Self::render(records));
        records.len()
    }

    fn name(&self) -> &str {
        "CONSOLE"
    }
}
