//! Pipeline orchestration.
//!
//! A run moves through a fixed sequence of phases:
//!
//! ```text
//! EXTRACTING -> TRANSFORMING -> FILTERING -> LOADING_CONSOLE -> LOADING_STORE -> DONE
//!      |
//!      +-> FAILED
//! ```
//!
//! Extraction is the only phase that can fail. On failure the run stops
//! before any sink sees a record. On success the caller gets a
//! [`PipelineReport`] describing counts per phase, the rendered console
//! block, and a [`Classification`] of the number of records stored.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::extract::{FileExtractor, extract_lines};
use crate::record::{Record, RecordSet};
use crate::sink::{ConsoleSink, Sink};
use crate::store::RecordStore;
use crate::transform::{aggregate_count, filter_by_field_count, transform};

/// Phase of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Extracting,
    Transforming,
    Filtering,
    LoadingConsole,
    LoadingStore,
    Done,
    Failed,
}

impl Phase {
    /// Is `next` a legal successor of this phase?
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Extracting, Phase::Transforming)
                | (Phase::Extracting, Phase::Failed)
                | (Phase::Transforming, Phase::Filtering)
                | (Phase::Filtering, Phase::LoadingConsole)
                | (Phase::LoadingConsole, Phase::LoadingStore)
                | (Phase::LoadingStore, Phase::Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Extracting => "EXTRACTING",
            Phase::Transforming => "TRANSFORMING",
            Phase::Filtering => "FILTERING",
            Phase::LoadingConsole => "LOADING_CONSOLE",
            Phase::LoadingStore => "LOADING_STORE",
            Phase::Done => "DONE",
            Phase::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status of a completed run, derived from the number of records stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    ExceedsUpperBound,
    BelowLowerBound,
    Empty,
    Nominal,
}

impl Classification {
    /// Classify `count` against the configured bounds.
    ///
    /// Upper bound is checked first, then the empty case, then the lower
    /// bound. Both bounds are exclusive.
    pub fn from_count(count: usize, config: &PipelineConfig) -> Self {
        if count > config.upper_bound {
            Classification::ExceedsUpperBound
        } else if count == 0 {
            Classification::Empty
        } else if count < config.lower_bound {
            Classification::BelowLowerBound
        } else {
            Classification::Nominal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::ExceedsUpperBound => "exceeds-upper-bound",
            Classification::BelowLowerBound => "below-lower-bound",
            Classification::Empty => "empty",
            Classification::Nominal => "nominal",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Records with fewer fields are dropped. Zero or negative keeps all.
    pub min_fields: i64,
    /// Stored counts below this (and above zero) classify as below bound.
    pub lower_bound: usize,
    /// Stored counts above this classify as exceeding the bound.
    pub upper_bound: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_fields: 1,
            lower_bound: 10,
            upper_bound: 100,
        }
    }
}

/// Record counts observed for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub phase: Phase,
    pub input_count: usize,
    pub output_count: usize,
}

impl PhaseInfo {
    pub fn new(phase: Phase, input_count: usize, output_count: usize) -> Self {
        Self {
            phase,
            input_count,
            output_count,
        }
    }
}

/// Structured result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub extracted: usize,
    pub transformed: usize,
    pub filtered: usize,
    /// Records inserted into the store by this run.
    pub loaded: usize,
    /// Store size after the run, including earlier runs' records.
    pub store_count: usize,
    pub classification: Classification,
    /// The console sink's rendered block.
    pub console_output: String,
    /// Summary block for the delivered records.
    pub summary_output: String,
    pub phases: Vec<PhaseInfo>,
}

/// Sequences extract, transform, filter and the two load sinks.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    phase: Phase,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    /// # Panics
    ///
    /// Panics if `config.lower_bound > config.upper_bound`.
    pub fn new(config: PipelineConfig) -> Self {
        assert!(
            config.lower_bound <= config.upper_bound,
            "lower bound {} exceeds upper bound {}",
            config.lower_bound,
            config.upper_bound
        );
        Self {
            config,
            phase: Phase::Extracting,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current phase, or the terminal phase of the last run.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the pipeline over the file at `path`, loading into `store`.
    pub fn run(
        &mut self,
        path: impl AsRef<Path>,
        store: &mut RecordStore,
    ) -> Result<PipelineReport> {
        let path = path.as_ref();
        info!(source = %path.display(), "starting pipeline");
        self.begin();
        let extracted = FileExtractor::new().extract_from_file(path);
        self.finish_extraction(extracted, store)
    }

    /// Run the pipeline over an already opened line source.
    ///
    /// `origin` names the source in errors and logs.
    pub fn run_reader<R: BufRead>(
        &mut self,
        reader: R,
        origin: &Path,
        store: &mut RecordStore,
    ) -> Result<PipelineReport> {
        info!(source = %origin.display(), "starting pipeline");
        self.begin();
        let extracted = extract_lines(reader, origin);
        self.finish_extraction(extracted, store)
    }

    fn begin(&mut self) {
        self.phase = Phase::Extracting;
    }

    fn finish_extraction(
        &mut self,
        extracted: Result<RecordSet>,
        store: &mut RecordStore,
    ) -> Result<PipelineReport> {
        match extracted {
            Ok(records) => Ok(self.process(records, store)),
            Err(e) => {
                warn!(error = %e, "extraction failed, aborting pipeline");
                self.advance(Phase::Failed);
                Err(e)
            }
        }
    }

    fn process(&mut self, raw: RecordSet, store: &mut RecordStore) -> PipelineReport {
        let mut phases = Vec::with_capacity(5);
        let extracted = aggregate_count(&raw);
        phases.push(PhaseInfo::new(Phase::Extracting, 0, extracted));

        self.advance(Phase::Transforming);
        let transformed = transform(&raw);
        phases.push(PhaseInfo::new(Phase::Transforming, extracted, transformed.len()));

        self.advance(Phase::Filtering);
        let filtered = filter_by_field_count(&transformed, self.config.min_fields);
        phases.push(PhaseInfo::new(Phase::Filtering, transformed.len(), filtered.len()));

        self.advance(Phase::LoadingConsole);
        let mut console = ConsoleSink::new();
        let shown = load_into(&mut console, &filtered);
        phases.push(PhaseInfo::new(Phase::LoadingConsole, filtered.len(), shown));

        self.advance(Phase::LoadingStore);
        let loaded = load_into(store, &filtered);
        phases.push(PhaseInfo::new(Phase::LoadingStore, filtered.len(), loaded));

        let classification = Classification::from_count(loaded, &self.config);
        self.advance(Phase::Done);
        info!(
            extracted,
            transformed = transformed.len(),
            filtered = filtered.len(),
            loaded,
            store_count = store.count(),
            %classification,
            "pipeline completed"
        );

        PipelineReport {
            extracted,
            transformed: transformed.len(),
            filtered: filtered.len(),
            loaded,
            store_count: store.count(),
            classification,
            console_output: console.into_output(),
            summary_output: ConsoleSink::render_summary(&filtered),
            phases,
        }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal phase transition {} -> {}",
            self.phase,
            next
        );
        info!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
    }
}

fn load_into(sink: &mut dyn Sink, records: &[Record]) -> usize {
    let count = sink.load(records);
    info!(sink = sink.name(), records = count, "loaded records");
    count
}
