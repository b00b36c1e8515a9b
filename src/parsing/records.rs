use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::record::DeveloperRecord;
use crate::utils::validation::{check_record_limit, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed ({max})", max = MAX_RECORDS)]
    TooManyRecords(usize),
}

/// Parse a developer table from a file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, `ParseError::Csv` if
/// the content is not valid delimited text, or `ParseError::TooManyRecords` if
/// the limit is exceeded.
pub fn parse_records_file(path: &Path, delimiter: u8) -> Result<Vec<DeveloperRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    let records = parse_records_reader(file, delimiter)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a developer table from text
///
/// # Errors
///
/// See [`parse_records_reader`].
pub fn parse_records_text(text: &str, delimiter: u8) -> Result<Vec<DeveloperRecord>, ParseError> {
    parse_records_reader(text.as_bytes(), delimiter)
}

/// Parse a developer table: header row, then `name, email` rows.
///
/// Rows shorter than two columns are kept with empty strings for the missing
/// fields. Empty lines are skipped.
///
/// # Errors
///
/// Returns `ParseError::Csv` if the content is not valid delimited text
/// (including invalid UTF-8), or `ParseError::TooManyRecords` if the limit is
/// exceeded.
pub fn parse_records_reader<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<DeveloperRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;

        if row.len() < 2 {
            // Header is line 1
            warn!(
                "Row {} has {} column(s); missing fields treated as empty",
                i + 2,
                row.len()
            );
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len() + 1));
        }

        records.push(DeveloperRecord::new(
            row.get(0).unwrap_or_default(),
            row.get(1).unwrap_or_default(),
        ));
    }

    Ok(records)
}
