//! Readers for the tabular files the tool consumes.
//!
//! This module provides parsers for:
//!
//! - **Developer tables**: the input list of `(display name, email)` rows
//! - **Raw pair tables**: a scores table written by an earlier run, so the
//!   threshold search can be repeated without rescoring
//!
//! ## Example
//!
//! ```rust,no_run
//! use dev_dedup::parsing::records::parse_records_file;
//! use std::path::Path;
//!
//! let records = parse_records_file(Path::new("devs.csv"), b',').unwrap();
//! println!("{} developers", records.len());
//! ```
//!
//! ## Developer table layout
//!
//! | Column | Content      | Required |
//! |--------|--------------|----------|
//! | 0      | Display name | No (empty if missing) |
//! | 1      | Email        | No (empty if missing) |
//!
//! The first row is always a header and is discarded. Extra columns are ignored.

pub mod pairs;
pub mod records;

pub use records::ParseError;
