//! Pairwise scoring and adaptive threshold selection.
//!
//! This module provides the core matching functionality:
//!
//! - [`ratio`]: Normalized edit similarity between two strings
//! - [`score_pairs`]: Similarity signals for every unordered pair of records
//! - [`select`]: Adaptive threshold search over the scored table
//!
//! ## Signals
//!
//! Each pair of records gets four signals, computed from their normalized
//! identities:
//!
//! - **c1**: edit similarity of the full names
//! - **c2**: edit similarity of the email local parts
//! - **c3**: mean of the first-name and last-name edit similarities
//! - **c4**: one record's first initial and last name both occur in the other's
//!   email local part
//!
//! ## Voting
//!
//! At threshold `t`, `c1`, `c2` and `c3` each vote when they reach `t`, and
//! `c4` votes when set. A pair with at least two votes is a match. Lowering
//! `t` can only add matches, so the selector looks for the strictest `t` whose
//! match count lands in a target band.
//!
//! ## Example
//!
//! ```rust
//! use dev_dedup::core::record::DeveloperRecord;
//! use dev_dedup::matching::{score_pairs, select, SelectionConfig};
//!
//! let records = vec![
//!     DeveloperRecord::new("John Smith", "jsmith@example.com"),
//!     DeveloperRecord::new("J. Smith", "jsmith2@example.com"),
//!     DeveloperRecord::new("Ada Lovelace", "ada@example.com"),
//! ];
//!
//! let scores = score_pairs(&records).unwrap();
//! assert_eq!(scores.len(), 3);
//!
//! let config = SelectionConfig { min_pairs: 1, max_pairs: 1, ..SelectionConfig::default() };
//! let result = select(&scores, &config).unwrap();
//! assert_eq!(result.count(), 1);
//! assert_eq!(result.selected_pairs[0].name_2, "J. Smith");
//! ```
//!
//! [`ratio`]: similarity::ratio
//! [`score_pairs`]: scoring::score_pairs
//! [`select`]: threshold::select

pub mod scoring;
pub mod similarity;
pub mod threshold;

pub use scoring::{score_pairs, ScoreError};
pub use threshold::{select, SelectionConfig, ThresholdResult};
