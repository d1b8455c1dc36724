//! Sampling dates: reading the metadata table, merging dates onto
//! root-to-tip records, and writing the result.

mod merge;
mod output;
mod table;

pub use self::merge::{count_missing_dates, merge_dates};
pub use self::output::{RTT_CSV_HEADER, write_rtt_csv, write_rtt_table};
pub use self::table::{DATE_COLUMN_CANDIDATES, DateTable, NAME_COLUMN_CANDIDATES, detect_columns};
