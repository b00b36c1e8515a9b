//! Command-line interface for dev-dedup.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **run**: Score every pair of developers and select an adaptive threshold
//! - **score**: Only write the raw pair scores table
//! - **select**: Re-run threshold selection on a raw table from an earlier run
//!
//! ## Usage
//!
//! ```text
//! # Full pipeline with the default 500..=1000 target band
//! dev-dedup run devs.csv
//!
//! # Smaller band, custom output directory, per-threshold counts
//! dev-dedup -v run devs.csv --min-pairs 50 --max-pairs 100 -o results
//!
//! # Try another band without rescoring
//! dev-dedup select results/devs_similarity_raw.csv --min-pairs 10 --max-pairs 20
//!
//! # JSON summary for scripting
//! dev-dedup --format json run devs.csv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::matching::threshold::{
    SelectionConfig, DEFAULT_FLOOR, DEFAULT_MAX_PAIRS, DEFAULT_MIN_PAIRS, DEFAULT_START,
    DEFAULT_STEP,
};

pub mod report;
pub mod run;
pub mod score;
pub mod select;

/// Default directory for output tables
pub const DEFAULT_OUTPUT_DIR: &str = "dedup-output";

#[derive(Parser)]
#[command(name = "dev-dedup")]
#[command(version)]
#[command(about = "Find likely-duplicate developer identities in a name/email table")]
#[command(
    long_about = "dev-dedup compares every pair of (name, email) records and flags pairs that probably belong to the same developer.\n\nEach pair gets four signals: name similarity, email local-part similarity, first/last name similarity, and whether one record's initial and last name appear in the other's email. A pair matches when at least two signals agree at a threshold, and the threshold is chosen so the number of matches lands in a target band."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (per-threshold match counts)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Summary output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score all pairs and select an adaptive threshold
    Run(run::RunArgs),

    /// Score all pairs and write the raw table only
    Score(score::ScoreArgs),

    /// Select a threshold from a previously written raw table
    Select(select::SelectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Input table options shared by commands that read developer records
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Developer table (header row, then name and email columns)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Field delimiter of the input table
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,
}

impl InputArgs {
    /// The delimiter as a byte, as the CSV reader expects
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter is not a single ASCII character.
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| anyhow::anyhow!("Delimiter must be ASCII, got '{}'", self.delimiter))
    }
}

/// Threshold search options shared by `run` and `select`
#[derive(clap::Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Smallest acceptable number of matched pairs
    #[arg(long, default_value_t = DEFAULT_MIN_PAIRS)]
    pub min_pairs: usize,

    /// Largest acceptable number of matched pairs
    #[arg(long, default_value_t = DEFAULT_MAX_PAIRS)]
    pub max_pairs: usize,

    /// Distance between adjacent thresholds
    #[arg(long, default_value_t = DEFAULT_STEP)]
    pub step: f64,

    /// First (strictest) threshold to try
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: f64,

    /// Last (most permissive) threshold to try
    #[arg(long, default_value_t = DEFAULT_FLOOR)]
    pub floor: f64,
}

impl From<&SelectionArgs> for SelectionConfig {
    fn from(args: &SelectionArgs) -> Self {
        Self {
            min_pairs: args.min_pairs,
            max_pairs: args.max_pairs,
            step: args.step,
            start: args.start,
            floor: args.floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_selection_args_defaults() {
        let cli = Cli::parse_from(["dev-dedup", "run", "devs.csv"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(
            SelectionConfig::from(&args.selection),
            SelectionConfig::default()
        );
        assert_eq!(args.input.delimiter_byte().unwrap(), b',');
        assert_eq!(args.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let cli = Cli::parse_from(["dev-dedup", "score", "devs.csv", "--delimiter", "§"]);
        let Commands::Score(args) = cli.command else {
            panic!("expected score command");
        };
        assert!(args.input.delimiter_byte().is_err());
    }
}
