//! CLI tool to run the ETL pipeline against a comma-delimited input file.
//!
//! Usage:
//!   etl-run <input.csv>
//!   etl-run <input.csv> --min-fields 3 --summary

use clap::Parser;
use etl_rs::logging::init_logging;
use etl_rs::{Classification, Pipeline, PipelineConfig, PipelineReport, RecordStore};
use std::io::{self, Write};
use std::process;

/// Run the extract, transform and load pipeline over a delimited text file.
#[derive(Parser)]
#[command(name = "etl-run")]
struct Cli {
    /// Input data file (one record per line, comma-separated fields)
    input: String,

    /// Drop records with fewer fields than this (0 or negative keeps all)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    min_fields: i64,

    /// Loaded counts below this are reported as low
    #[arg(long, default_value_t = 10)]
    lower_bound: usize,

    /// Loaded counts above this are reported as high
    #[arg(long, default_value_t = 100)]
    upper_bound: usize,

    /// Also print the summary block
    #[arg(short, long)]
    summary: bool,

    /// Log phase details on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.lower_bound > cli.upper_bound {
        eprintln!(
            "Error: --lower-bound ({}) must not exceed --upper-bound ({})",
            cli.lower_bound, cli.upper_bound
        );
        process::exit(1);
    }

    let config = PipelineConfig {
        min_fields: cli.min_fields,
        lower_bound: cli.lower_bound,
        upper_bound: cli.upper_bound,
    };
    let mut pipeline = Pipeline::new(config);
    let mut store = RecordStore::new();

    match pipeline.run(&cli.input, &mut store) {
        Ok(report) => {
            let text = render_report(&cli, pipeline.config(), &report);
            if let Err(e) = io::stdout().write_all(text.as_bytes()) {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn render_report(cli: &Cli, config: &PipelineConfig, report: &PipelineReport) -> String {
    let mut out = String::new();
    out.push_str("Starting ETL Pipeline...\n");
    out.push_str(&format!("Input file: {}\n\n", cli.input));

    out.push_str("Phase 1: EXTRACT\n");
    out.push_str(&format!("Extracted {} records\n\n", report.extracted));

    out.push_str("Phase 2: TRANSFORM\n");
    out.push_str(&format!(
        "Transformed and filtered {} records\n\n",
        report.filtered
    ));

    out.push_str("Phase 3: LOAD (Console)\n");
    out.push_str(&report.console_output);
    out.push('\n');

    out.push_str("Phase 4: LOAD (Local DB)\n");
    out.push_str(&format!(
        "Loaded {} records to local database\n",
        report.loaded
    ));
    out.push_str(&format!(
        "Database now contains {} records\n\n",
        report.store_count
    ));

    if cli.summary {
        out.push_str(&report.summary_output);
        out.push('\n');
    }

    let status = match report.classification {
        Classification::ExceedsUpperBound => format!(
            "Warning: Loaded record count exceeds {}!",
            config.upper_bound
        ),
        Classification::BelowLowerBound => format!(
            "Warning: Loaded record count is below {}!",
            config.lower_bound
        ),
        Classification::Empty => {
            "Warning: No records were loaded into the database!".to_string()
        }
        Classification::Nominal => {
            "Loaded record count is within the expected range.".to_string()
        }
    };
    out.push_str(&format!("{status} [{}]\n", report.classification));
    out.push_str("ETL Pipeline completed successfully!\n");
    out
}
