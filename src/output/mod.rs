//! Writers for the pair tables produced by a run.
//!
//! Two tables are written, both with the columns
//! `name_1,email_1,name_2,email_2,c1,c2,c3,c4`:
//!
//! - `devs_similarity_raw.csv`: every scored pair, written before selection
//! - `bird_pairs_t=<threshold>_<YYYYMMDD_HHMMSS>.csv`: the pairs matched at
//!   the chosen threshold

pub mod table;

pub use table::{raw_table_path, selected_table_path, write_pairs_file, OutputError};
