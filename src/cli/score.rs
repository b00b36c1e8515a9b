//! Score command - write the raw pair scores table without selecting a threshold.
//!
//! Useful when several target bands will be tried later with `select`, since
//! scoring is the expensive part of a run.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::report::print_scoring;
use crate::cli::{InputArgs, OutputFormat, DEFAULT_OUTPUT_DIR};
use crate::matching::scoring::score_pairs;
use crate::output::table::{raw_table_path, write_pairs_file};
use crate::parsing::records::parse_records_file;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the raw table (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the input cannot be read or the table cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let delimiter = args.input.delimiter_byte()?;
    let records = parse_records_file(&args.input.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.input.display()))?;

    if verbose {
        eprintln!("Loaded {} developer records", records.len());
    }

    let scores = score_pairs(&records)?;
    let raw_path = raw_table_path(&args.output_dir);
    write_pairs_file(&raw_path, &scores)?;

    print_scoring(
        &args.input.input,
        records.len(),
        scores.len(),
        &raw_path,
        format,
    )
}
