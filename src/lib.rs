//! # etl-rs
//!
//! A four-stage batch pipeline for comma-delimited text records.
//!
//! ## Overview
//!
//! A run reads a text source and moves its records through:
//! - **Extract**: one record per non-blank line, fields split on `,`
//! - **Transform**: every field trimmed and uppercased
//! - **Filter**: records with too few fields dropped
//! - **Load**: records rendered by a [`ConsoleSink`] and inserted into a
//!   [`RecordStore`] with sequential ids
//!
//! Each phase completes before the next starts. Only extraction can fail,
//! and a failed extraction stops the run before any sink is touched.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use std::path::Path;
//! use etl_rs::{Classification, Pipeline, RecordStore};
//!
//! let input = "John,Doe,30,Engineer\nJane,Smith,25,Designer\n";
//! let mut store = RecordStore::new();
//!
//! let report = Pipeline::default()
//!     .run_reader(Cursor::new(input), Path::new("people.csv"), &mut store)
//!     .unwrap();
//!
//! assert_eq!(report.loaded, 2);
//! assert_eq!(report.classification, Classification::BelowLowerBound);
//! assert_eq!(store.get(1).unwrap().field(0), Some("JOHN"));
//! ```

pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod store;
pub mod transform;

pub use error::{PipelineError, Result};
pub use extract::{FileExtractor, extract_lines};
pub use pipeline::{Classification, Phase, PhaseInfo, Pipeline, PipelineConfig, PipelineReport};
pub use record::{DELIMITER, Record, RecordSet, StoredRecord};
pub use sink::{ConsoleSink, Sink};
pub use store::RecordStore;
pub use transform::{aggregate_count, filter_by_field_count, transform};
