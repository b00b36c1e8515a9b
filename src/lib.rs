//! # dev-dedup
//!
//! A library for finding likely-duplicate developer identities in a table of
//! `(display name, email)` records.
//!
//! The same person often shows up under several identities: `Seán O'Brien
//! <sobrien@corp.com>`, `Sean OBrien <sean.obrien@gmail.com>`, `S. O'Brien
//! <sobrien2@users.noreply.example>`. `dev-dedup` compares every pair of
//! records and flags the pairs that probably belong to the same human.
//!
//! ## Features
//!
//! - **Normalization**: punctuation, diacritics, case and whitespace are folded
//!   away before comparison
//! - **Four signals per pair**: full-name similarity, email local-part
//!   similarity, first/last-name similarity, and initial+last-name containment
//! - **Adaptive threshold**: the strictest threshold whose match count lands in
//!   a target band is chosen, with a closest-count fallback
//!
//! ## Example
//!
//! ```rust
//! use dev_dedup::{score_pairs, select, DeveloperRecord, SelectionConfig};
//!
//! let records = vec![
//!     DeveloperRecord::new("Jane Doe", "jane.doe@example.com"),
//!     DeveloperRecord::new("Jane Doe", "jane.doe@example.com"),
//!     DeveloperRecord::new("Bob Stone", "bob@example.com"),
//! ];
//!
//! let scores = score_pairs(&records).unwrap();
//! let config = SelectionConfig { min_pairs: 1, max_pairs: 1, ..SelectionConfig::default() };
//! let result = select(&scores, &config).unwrap();
//!
//! for pair in &result.selected_pairs {
//!     println!("{} <{}> ~ {} <{}>", pair.name_1, pair.email_1, pair.name_2, pair.email_2);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Records, normalized identities and pair scores
//! - [`matching`]: Edit similarity, pairwise scoring and threshold selection
//! - [`parsing`]: Readers for developer tables and raw pair tables
//! - [`output`]: Writers for pair tables
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::identity::{normalize, NormalizedIdentity};
pub use core::pair::PairScore;
pub use core::record::DeveloperRecord;
pub use matching::scoring::score_pairs;
pub use matching::similarity::ratio;
pub use matching::threshold::{select, SelectionConfig, ThresholdResult};
