use std::io::Read;
use std::path::Path;

use crate::core::pair::{PairScore, PAIR_COLUMNS};
use crate::parsing::records::ParseError;

/// Parse a raw pair table written by an earlier run
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, or any error from
/// [`parse_pairs_reader`].
pub fn parse_pairs_file(path: &Path) -> Result<Vec<PairScore>, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_pairs_reader(file)
}

/// Parse a raw pair table with columns `name_1,email_1,name_2,email_2,c1,c2,c3,c4`.
///
/// Scores must be numbers in `[0, 1]`; `c4` accepts `True`/`False` in any
/// case as well as `1`/`0`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header does not name the
/// expected columns, a row has the wrong number of fields, or a cell cannot
/// be parsed, and `ParseError::Csv` for malformed delimited text.
pub fn parse_pairs_reader<R: Read>(reader: R) -> Result<Vec<PairScore>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    if headers.iter().ne(PAIR_COLUMNS.iter().copied()) {
        return Err(ParseError::InvalidFormat(format!(
            "Expected header '{}', found '{}'",
            PAIR_COLUMNS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut pairs = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Line numbers in errors are 1-based and count the header
        let line_num = i + 2;

        if row.len() != PAIR_COLUMNS.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                row.len(),
                PAIR_COLUMNS.len()
            )));
        }

        pairs.push(PairScore {
            name_1: row[0].to_string(),
            email_1: row[1].to_string(),
            name_2: row[2].to_string(),
            email_2: row[3].to_string(),
            c1: parse_score(&row[4], "c1", line_num)?,
            c2: parse_score(&row[5], "c2", line_num)?,
            c3: parse_score(&row[6], "c3", line_num)?,
            c4: parse_flag(&row[7], line_num)?,
        });
    }

    Ok(pairs)
}

fn parse_score(cell: &str, column: &str, line_num: usize) -> Result<f64, ParseError> {
    let value: f64 = cell.trim().parse().map_err(|_| {
        ParseError::InvalidFormat(format!("Invalid {column} on line {line_num}: '{cell}'"))
    })?;

    if !(0.0..=1.0).contains(&value) {
        return Err(ParseError::InvalidFormat(format!(
            "{column} on line {line_num} is outside [0, 1]: {value}"
        )));
    }
    Ok(value)
}

fn parse_flag(cell: &str, line_num: usize) -> Result<bool, ParseError> {
    match cell.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::InvalidFormat(format!("Invalid c4 on line {line_num}: '{cell}'"))),
    }
}
