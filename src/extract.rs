//! Extraction: line-oriented text source to [`RecordSet`].
//!
//! Every non-blank line becomes one [`Record`], split on
//! [`DELIMITER`](crate::record::DELIMITER). Lines that are empty after
//! trimming are skipped and produce nothing. There is no header detection;
//! the first line is data like any other.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::record::{Record, RecordSet};

/// Extract records from any buffered line source.
///
/// `origin` names the source in errors. Read failures, including invalid
/// UTF-8, are reported as [`PipelineError::SourceUnavailable`].
pub fn extract_lines<R: BufRead>(reader: R, origin: &Path) -> Result<RecordSet> {
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| PipelineError::source_unavailable(origin, e))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(Record::parse_line(&line));
    }

    if records.is_empty() {
        warn!(source = %origin.display(), "no records found in source");
    } else {
        debug!(source = %origin.display(), records = records.len(), "extracted records");
    }

    Ok(records)
}

/// Reads delimited records from files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtractor;

impl FileExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Read every record from the file at `path`.
    ///
    /// Each call reopens the file and returns a freshly allocated set.
    pub fn extract_from_file(&self, path: impl AsRef<Path>) -> Result<RecordSet> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::source_unavailable(path, e))?;
        extract_lines(BufReader::new(file), path)
    }

    /// Number of records the file at `path` yields.
    pub fn record_count(&self, path: impl AsRef<Path>) -> Result<usize> {
        Ok(self.extract_from_file(path)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use std::io::Write;

    fn extract_str(input: &str) -> RecordSet {
        extract_lines(Cursor::new(input), Path::new("<memory>")).unwrap()
    }

    #[test]
    fn test_one_record_per_line() {
        let records = extract_str("John,Doe,30,Engineer\nJane,Smith,25,Designer\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::from_iter(["John", "Doe", "30", "Engineer"]));
        assert_eq!(records[1], Record::from_iter(["Jane", "Smith", "25", "Designer"]));
    }

    #[test]
    fn test_blank_and_whitespace_lines_skipped() {
        let records = extract_str("a,b\n\n  \nc\n");
        assert_eq!(
            records,
            vec![Record::from_iter(["a", "b"]), Record::from_iter(["c"])]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(extract_str("").is_empty());
        assert!(extract_str("\n\n\t\n").is_empty());
    }

    #[test]
    fn test_first_line_is_data() {
        let records = extract_str("name,age\nbob,7");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field(0), Some("name"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = extract_str("a,b\r\nc,d\r\n");
        assert_eq!(records[0], Record::from_iter(["a", "b"]));
        assert_eq!(records[1], Record::from_iter(["c", "d"]));
    }

    #[test]
    fn test_fields_not_trimmed() {
        let records = extract_str("  x , y  \n");
        assert_eq!(records[0].field(0), Some("  x "));
    }

    #[test]
    fn test_invalid_utf8_is_source_unavailable() {
        let bytes: &[u8] = &[b'a', b',', 0xff, 0xfe, b'\n'];
        let err = extract_lines(Cursor::new(bytes), Path::new("bad.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnavailable { .. }));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk went away"))
        }
    }

    #[test]
    fn test_read_error_is_source_unavailable() {
        let err = extract_lines(BufReader::new(FailingReader), Path::new("flaky.csv"))
            .unwrap_err();
        match err {
            PipelineError::SourceUnavailable { path, source } => {
                assert_eq!(path, Path::new("flaky.csv"));
                assert_eq!(source.to_string(), "disk went away");
            }
        }
    }

    #[test]
    fn test_extract_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a,b\n\nc\n").unwrap();

        let extractor = FileExtractor::new();
        let records = extractor.extract_from_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(extractor.record_count(file.path()).unwrap(), 2);
    }

    #[test]
    fn test_repeated_extraction_is_equal_and_independent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x,y\nz\n").unwrap();

        let extractor = FileExtractor::new();
        let mut first = extractor.extract_from_file(file.path()).unwrap();
        let second = extractor.extract_from_file(file.path()).unwrap();
        assert_eq!(first, second);

        first.clear();
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("non-existent-file.csv");

        let err = FileExtractor::new().extract_from_file(&missing).unwrap_err();
        match err {
            PipelineError::SourceUnavailable { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
        }
        assert!(FileExtractor::new().record_count(&missing).is_err());
    }
}
