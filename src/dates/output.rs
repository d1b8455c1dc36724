//! CSV output of the merged root-to-tip table.

use crate::error::RttError;
use crate::reconcile::RootToTipRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the output table
pub const RTT_CSV_HEADER: [&str; 3] = ["name", "root_to_tip", "date"];

/// Writes `records` as a comma-separated table with header `name,root_to_tip,date`.
///
/// Missing dates are written as empty fields.
///
/// # Errors
/// [RttError::Io] if the file cannot be created, [RttError::Csv] if writing fails.
pub fn write_rtt_csv<P: AsRef<Path>>(records: &[RootToTipRecord], path: P) -> Result<(), RttError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| RttError::io(path, err))?;
    write_rtt_table(records, file)
}

/// Writes `records` as CSV to any writer; see [write_rtt_csv].
///
/// # Example
/// ```
/// use rtt_reconcile::dates::write_rtt_table;
/// use rtt_reconcile::reconcile::RootToTipRecord;
///
/// let records = vec![
///     RootToTipRecord { name: "X".to_string(), root_to_tip: 1.0, date: Some(2021.5) },
///     RootToTipRecord { name: "Y, Z".to_string(), root_to_tip: 0.25, date: None },
/// ];
/// let mut out = Vec::new();
/// write_rtt_table(&records, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "name,root_to_tip,date\nX,1.0,2021.5\n\"Y, Z\",0.25,\n"
/// );
/// ```
pub fn write_rtt_table<W: Write>(records: &[RootToTipRecord], writer: W) -> Result<(), RttError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(RTT_CSV_HEADER)?;

    for record in records {
        let date = record.date.map(format_float).unwrap_or_default();
        writer.write_record([
            record.name.as_str(),
            format_float(record.root_to_tip).as_str(),
            date.as_str(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Formats a float in its shortest round-trip form, keeping a `.0` on
/// integral values and writing exponents signed with at least two digits
/// (`5e-05`, `1e+16`).
fn format_float(value: f64) -> String {
    let shortest = format!("{:?}", value);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => shortest,
    }
}
