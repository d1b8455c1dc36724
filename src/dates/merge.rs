//! Left join of sampling dates onto root-to-tip records.

use crate::dates::table::DateTable;
use crate::error::RttError;
use crate::reconcile::RootToTipRecord;
use std::collections::HashMap;

/// Attaches dates from `table` to `records` by tip name.
///
/// Every record is kept, in order. Names are trimmed on both sides and
/// matched exactly; the first table row of a name wins. Dates that are not
/// numbers (e.g. empty or ISO dates) become `None`. The number of records
/// left without a date is logged as a warning.
///
/// # Errors
/// [RttError::Config] if the name or date column cannot be resolved,
/// see [detect_columns](crate::dates::detect_columns).
///
/// # Example
/// ```
/// use rtt_reconcile::dates::{DateTable, merge_dates};
/// use rtt_reconcile::reconcile::RootToTipRecord;
///
/// let table = DateTable::from_tsv_str("strain\tdate_decimal\nX\t2021.5\nY\t2021.9\n", 0).unwrap();
/// let records = ["X", "Y", "Z"]
///     .iter()
///     .map(|&name| RootToTipRecord { name: name.to_string(), root_to_tip: 0.1, date: None })
///     .collect();
///
/// let merged = merge_dates(records, &table, None, None).unwrap();
/// let dates: Vec<Option<f64>> = merged.iter().map(|r| r.date).collect();
/// assert_eq!(dates, vec![Some(2021.5), Some(2021.9), None]);
/// ```
pub fn merge_dates(
    records: Vec<RootToTipRecord>,
    table: &DateTable,
    name_column: Option<&str>,
    date_column: Option<&str>,
) -> Result<Vec<RootToTipRecord>, RttError> {
    let (name_index, date_index) = table.detect_columns(name_column, date_column)?;

    let mut dates: HashMap<&str, Option<f64>> = HashMap::with_capacity(table.num_rows());
    for (name, date) in table
        .column_values(name_index)
        .zip(table.column_values(date_index))
    {
        dates.entry(name.trim()).or_insert_with(|| parse_date(date));
    }

    let merged: Vec<RootToTipRecord> = records
        .into_iter()
        .map(|record| {
            let name = record.name.trim().to_string();
            let date = dates.get(name.as_str()).copied().flatten();
            RootToTipRecord { name, date, ..record }
        })
        .collect();

    let missing = count_missing_dates(&merged);
    if missing > 0 {
        log::warn!("{} of {} tips have no date in the table", missing, merged.len());
    }

    Ok(merged)
}

/// Returns the number of records without a date.
pub fn count_missing_dates(records: &[RootToTipRecord]) -> usize {
    records.iter().filter(|r| r.date.is_none()).count()
}

/// Parses a decimal date, `None` if the value is not a number.
fn parse_date(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
