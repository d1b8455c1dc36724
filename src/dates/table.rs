//! Tab-separated metadata table and column detection.

use crate::error::RttError;
use csv::StringRecord;
use std::fs;
use std::path::Path;

/// Name columns tried in order when none is given
pub const NAME_COLUMN_CANDIDATES: [&str; 5] = ["name", "strain", "seqName", "taxon", "Virus name"];

/// Date columns tried in order when none is given
pub const DATE_COLUMN_CANDIDATES: [&str; 5] = [
    "date_decimal",
    "decimal_date",
    "decimal-year",
    "decimal-date",
    "date",
];

/// A tab-separated table held in memory as strings.
///
/// Column names are trimmed. Rows may be shorter or longer than the header;
/// missing fields read as empty.
#[derive(Debug, Clone, Default)]
pub struct DateTable {
    columns: Vec<String>,
    rows: Vec<StringRecord>,
}

impl DateTable {
    /// Reads a tab-separated file, skipping `skiprows` leading lines before the header.
    ///
    /// # Errors
    /// [RttError::Io] if the file cannot be read, [RttError::Csv] if it is
    /// not a well-formed delimited table.
    pub fn from_path<P: AsRef<Path>>(path: P, skiprows: usize) -> Result<Self, RttError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| RttError::io(path, err))?;
        let table = Self::from_tsv_str(&text, skiprows)?;

        log::debug!(
            "Read {} rows with columns {:?} from {}",
            table.num_rows(),
            table.columns,
            path.display()
        );
        Ok(table)
    }

    /// Parses tab-separated text, skipping `skiprows` leading lines before the header.
    ///
    /// # Example
    /// ```
    /// use rtt_reconcile::dates::DateTable;
    ///
    /// let table = DateTable::from_tsv_str("# exported\n strain \tdate\nX\t2021.5\n", 1).unwrap();
    /// assert_eq!(table.columns(), ["strain", "date"]);
    /// assert_eq!(table.num_rows(), 1);
    /// ```
    pub fn from_tsv_str(text: &str, skiprows: usize) -> Result<Self, RttError> {
        let offset: usize = text
            .split_inclusive('\n')
            .take(skiprows)
            .map(str::len)
            .sum();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(text[offset..].as_bytes());

        let columns = reader
            .headers()?
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(DateTable { columns, rows })
    }

    /// Returns the trimmed column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of data rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the values of a column, empty where a row is too short.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row.get(index).unwrap_or(""))
    }

    /// Resolves the name and date columns, see [detect_columns].
    pub fn detect_columns(
        &self,
        name_column: Option<&str>,
        date_column: Option<&str>,
    ) -> Result<(usize, usize), RttError> {
        detect_columns(&self.columns, name_column, date_column)
    }
}

/// Resolves the positions of the name and date columns.
///
/// Explicit column names are trimmed and must exist; otherwise the first
/// present name of [NAME_COLUMN_CANDIDATES] and [DATE_COLUMN_CANDIDATES] is used.
///
/// # Errors
/// [RttError::Config] listing the available columns if a column cannot be resolved.
///
/// # Example
/// ```
/// use rtt_reconcile::dates::detect_columns;
///
/// let columns = vec!["date".to_string(), "strain".to_string(), "name".to_string()];
/// assert_eq!(detect_columns(&columns, None, None).unwrap(), (2, 0));
/// assert_eq!(detect_columns(&columns, Some(" strain "), None).unwrap(), (1, 0));
/// assert!(detect_columns(&columns, None, Some("collection_date")).is_err());
/// ```
pub fn detect_columns(
    columns: &[String],
    name_column: Option<&str>,
    date_column: Option<&str>,
) -> Result<(usize, usize), RttError> {
    let find = |wanted: &str| columns.iter().position(|c| c == wanted);

    let resolve = |explicit: Option<&str>, candidates: &[&str], flag: &str| match explicit {
        Some(wanted) => find(wanted.trim()).ok_or_else(|| {
            RttError::Config(format!(
                "Column '{}' given by {} not found in {:?}",
                wanted.trim(),
                flag,
                columns
            ))
        }),
        None => candidates
            .iter()
            .find_map(|&candidate| find(candidate))
            .ok_or_else(|| {
                RttError::Config(format!(
                    "Could not infer columns from {:?}; use --name-column / --date-column.",
                    columns
                ))
            }),
    };

    let name = resolve(name_column, &NAME_COLUMN_CANDIDATES, "--name-column")?;
    let date = resolve(date_column, &DATE_COLUMN_CANDIDATES, "--date-column")?;
    log::debug!("Using name column '{}' and date column '{}'", columns[name], columns[date]);

    Ok((name, date))
}
