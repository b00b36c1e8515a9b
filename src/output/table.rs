use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use thiserror::Error;
use tracing::debug;

use crate::core::pair::{PairScore, PAIR_COLUMNS};

/// File name of the unfiltered scores table
pub const RAW_TABLE_NAME: &str = "devs_similarity_raw.csv";

/// Timestamp layout embedded in selected-table file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Path of the raw scores table inside `dir`
#[must_use]
pub fn raw_table_path(dir: &Path) -> PathBuf {
    dir.join(RAW_TABLE_NAME)
}

/// Path of the selected table inside `dir`, named after the threshold
/// (3 decimals) and the generation time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dev_dedup::output::table::selected_table_path;
/// use std::path::Path;
///
/// let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
/// let path = selected_table_path(Path::new("out"), 0.87, &at);
/// assert_eq!(path, Path::new("out/bird_pairs_t=0.870_20250309_140507.csv"));
/// ```
#[must_use]
pub fn selected_table_path<Tz>(dir: &Path, threshold: f64, generated_at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!(
        "bird_pairs_t={threshold:.3}_{}.csv",
        generated_at.format(TIMESTAMP_FORMAT)
    ))
}

/// Write a pair table to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `OutputError::Io` if the directory or file cannot be created, or
/// `OutputError::Csv` if writing a row fails.
pub fn write_pairs_file<'a, I>(path: &Path, rows: I) -> Result<usize, OutputError>
where
    I: IntoIterator<Item = &'a PairScore>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = std::fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let written = write_pairs(file, rows).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} pairs to {}", written, path.display());
    Ok(written)
}

/// Write a pair table (header plus one row per pair) to any writer.
///
/// Scores use the shortest representation that round-trips, with at least
/// one decimal (`1.0`, `0.8571428571428571`); `c4` is written as
/// `True`/`False`.
///
/// # Errors
///
/// Returns `csv::Error` if a row cannot be written or flushed.
pub fn write_pairs<'a, W, I>(writer: W, rows: I) -> Result<usize, csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a PairScore>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    writer.write_record(PAIR_COLUMNS)?;

    let mut written = 0;
    for row in rows {
        let c1 = format_score(row.c1);
        let c2 = format_score(row.c2);
        let c3 = format_score(row.c3);
        writer.write_record([
            row.name_1.as_str(),
            row.email_1.as_str(),
            row.name_2.as_str(),
            row.email_2.as_str(),
            c1.as_str(),
            c2.as_str(),
            c3.as_str(),
            format_flag(row.c4),
        ])?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

fn format_score(value: f64) -> String {
    format!("{value:?}")
}

fn format_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
