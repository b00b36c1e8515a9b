//! Summaries printed to stdout after a command finishes.

use std::path::Path;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::matching::threshold::{ScanStep, SelectionConfig, ThresholdResult};

/// What a `run` or `select` invocation produced
#[derive(Debug, Serialize)]
pub struct SelectionSummary {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    pub pairs: usize,
    pub min_pairs: usize,
    pub max_pairs: usize,
    pub threshold: f64,
    pub selected: usize,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_table: Option<String>,
    pub selected_table: String,
    pub scan: Vec<ScanStep>,
}

impl SelectionSummary {
    #[must_use]
    pub fn new(
        input: &Path,
        records: Option<usize>,
        pairs: usize,
        config: &SelectionConfig,
        result: &ThresholdResult<'_>,
        raw_table: Option<&Path>,
        selected_table: &Path,
    ) -> Self {
        Self {
            input: input.display().to_string(),
            records,
            pairs,
            min_pairs: config.min_pairs,
            max_pairs: config.max_pairs,
            threshold: result.threshold,
            selected: result.count(),
            fallback: result.fallback,
            raw_table: raw_table.map(|p| p.display().to_string()),
            selected_table: selected_table.display().to_string(),
            scan: result.scan.clone(),
        }
    }
}

/// Print a selection summary in the requested format
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_selection(
    summary: &SelectionSummary,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_selection_text(summary, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Tsv => print_selection_tsv(summary),
    }
    Ok(())
}

fn print_selection_text(summary: &SelectionSummary, verbose: bool) {
    println!("Duplicate Identity Pairs");
    println!("{}", "=".repeat(60));

    println!("\nInput:           {}", summary.input);
    if let Some(records) = summary.records {
        println!("Records:         {records}");
    }
    println!("Pairs scored:    {}", summary.pairs);
    println!(
        "Target band:     {}..={} pairs",
        summary.min_pairs, summary.max_pairs
    );

    if verbose {
        println!("\nThreshold scan:");
        for step in &summary.scan {
            println!("  {:.3}  {:>8} pairs", step.threshold, step.count);
        }
    }

    println!();
    if summary.fallback {
        println!("No threshold gave a count inside the band; using the closest count instead.");
    }
    println!("Threshold:       {:.3}", summary.threshold);
    println!("Selected pairs:  {}", summary.selected);

    println!();
    if let Some(raw) = &summary.raw_table {
        println!("Raw table:       {raw}");
    }
    println!("Selected table:  {}", summary.selected_table);
}

fn print_selection_tsv(summary: &SelectionSummary) {
    println!(
        "input\trecords\tpairs\tmin_pairs\tmax_pairs\tthreshold\tselected\tfallback\traw_table\tselected_table"
    );
    println!(
        "{}\t{}\t{}\t{}\t{}\t{:.3}\t{}\t{}\t{}\t{}",
        summary.input,
        summary
            .records
            .map_or_else(|| "-".to_string(), |r| r.to_string()),
        summary.pairs,
        summary.min_pairs,
        summary.max_pairs,
        summary.threshold,
        summary.selected,
        summary.fallback,
        summary.raw_table.as_deref().unwrap_or("-"),
        summary.selected_table,
    );
}

/// Print the result of the `score` command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_scoring(
    input: &Path,
    records: usize,
    pairs: usize,
    raw_table: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Pairwise Scores");
            println!("{}", "=".repeat(60));
            println!("\nInput:           {}", input.display());
            println!("Records:         {records}");
            println!("Pairs scored:    {pairs}");
            println!("Raw table:       {}", raw_table.display());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": input.display().to_string(),
                "records": records,
                "pairs": pairs,
                "raw_table": raw_table.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("input\trecords\tpairs\traw_table");
            println!(
                "{}\t{}\t{}\t{}",
                input.display(),
                records,
                pairs,
                raw_table.display()
            );
        }
    }
    Ok(())
}
