//! Select command - repeat the threshold search on a raw table from an
//! earlier `run` or `score`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::report::{print_selection, SelectionSummary};
use crate::cli::{OutputFormat, SelectionArgs};
use crate::matching::threshold::{select, SelectionConfig};
use crate::output::table::{selected_table_path, write_pairs_file};
use crate::parsing::pairs::parse_pairs_file;

#[derive(Args)]
pub struct SelectArgs {
    /// Raw pair table (devs_similarity_raw.csv)
    #[arg(required = true)]
    pub raw_table: PathBuf,

    /// Directory for the selected table; defaults to the raw table's directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Execute the select command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the raw table cannot be
/// read, or the selected table cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: SelectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = SelectionConfig::from(&args.selection);
    crate::utils::validation::validate_selection_config(&config)?;

    let scores = parse_pairs_file(&args.raw_table)
        .with_context(|| format!("Failed to read {}", args.raw_table.display()))?;

    if verbose {
        eprintln!("Loaded {} scored pairs", scores.len());
    }

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.raw_table
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    });

    let result = select(&scores, &config)?;
    let selected_path = selected_table_path(&output_dir, result.threshold, &chrono::Local::now());
    write_pairs_file(&selected_path, result.selected_pairs.iter().copied())?;

    let summary = SelectionSummary::new(
        &args.raw_table,
        None,
        scores.len(),
        &config,
        &result,
        None,
        &selected_path,
    );
    print_selection(&summary, format, verbose)
}
