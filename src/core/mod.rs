//! Core data types for developer identity deduplication.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`DeveloperRecord`]: One raw `(display name, email)` row from the input
//! - [`NormalizedIdentity`]: Comparison keys derived from a record
//! - [`PairScore`]: The four similarity signals computed for one pair of records
//!
//! ## Normalization
//!
//! Display names are compared after folding away the differences that do not
//! distinguish people:
//!
//! | Raw name        | Normalized     |
//! |-----------------|----------------|
//! | `Seán O'Brien`  | `sean obrien`  |
//! | `  JOHN   Smith`| `john smith`   |
//! | `Straße, Max`   | `strasse max`  |
//!
//! [`DeveloperRecord`]: record::DeveloperRecord
//! [`NormalizedIdentity`]: identity::NormalizedIdentity
//! [`PairScore`]: pair::PairScore

pub mod identity;
pub mod pair;
pub mod record;
