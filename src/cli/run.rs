//! Run command - the full pipeline: load, score every pair, write the raw
//! table, select a threshold and write the selected table.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::warn;

use crate::cli::report::{print_selection, SelectionSummary};
use crate::cli::{InputArgs, OutputFormat, SelectionArgs, DEFAULT_OUTPUT_DIR};
use crate::matching::scoring::score_pairs;
use crate::matching::threshold::{select, SelectionConfig};
use crate::output::table::{raw_table_path, selected_table_path, write_pairs_file};
use crate::parsing::records::parse_records_file;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the raw and selected tables (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Execute the run command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be
/// read, or an output table cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: RunArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = SelectionConfig::from(&args.selection);
    // Fail on a bad band before spending time on scoring
    crate::utils::validation::validate_selection_config(&config)?;

    let delimiter = args.input.delimiter_byte()?;
    let records = parse_records_file(&args.input.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.input.display()))?;

    if verbose {
        eprintln!("Loaded {} developer records", records.len());
    }
    if records.len() < 2 {
        warn!(
            "Only {} record(s) in {}; there are no pairs to compare",
            records.len(),
            args.input.input.display()
        );
    }

    let scores = score_pairs(&records)?;
    let raw_path = raw_table_path(&args.output_dir);
    write_pairs_file(&raw_path, &scores)?;

    let result = select(&scores, &config)?;
    let selected_path =
        selected_table_path(&args.output_dir, result.threshold, &chrono::Local::now());
    write_pairs_file(&selected_path, result.selected_pairs.iter().copied())?;

    let summary = SelectionSummary::new(
        &args.input.input,
        Some(records.len()),
        scores.len(),
        &config,
        &result,
        Some(&raw_path),
        &selected_path,
    );
    print_selection(&summary, format, verbose)
}
