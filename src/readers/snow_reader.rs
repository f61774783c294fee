use chrono::NaiveDate;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, SnowmanError};
use crate::utils::constants::{DAILY_DATE_COLUMNS, MISSING_VALUE_TOKENS, MONTHLY_KEY_COLUMNS};
use crate::utils::dates::{parse_date, parse_month};

/// One source row reduced to its key date and the mean of its numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedRow {
    pub date: NaiveDate,
    pub average: f64,
}

/// Result of reading one snowfall CSV file.
#[derive(Debug, Clone, Default)]
pub struct SnowTable {
    pub rows: Vec<AveragedRow>,
    pub numeric_columns: Vec<String>,
    /// Rows with no numeric value in any measurement column.
    pub skipped_rows: usize,
}

/// Reads snowfall CSV exports where each row holds a date key followed by
/// readings from one or more observation points.
pub struct SnowReader {
    encoding: &'static Encoding,
}

impl SnowReader {
    pub fn new() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }

    /// Decode input with a WHATWG encoding label such as `shift_jis`.
    pub fn with_encoding(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SnowmanError::Encoding(label.to_string()))?;
        Ok(Self { encoding })
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Read a daily file keyed by a `Date` column.
    pub fn read_daily(&self, path: &Path) -> Result<SnowTable> {
        debug!("Reading daily snow depth from {}", path.display());
        let text = self.decode_file(path)?;
        self.parse_table(&text, DAILY_DATE_COLUMNS, parse_date)
    }

    /// Read a monthly file keyed by a `month` column, normalised to day 1.
    pub fn read_monthly(&self, path: &Path) -> Result<SnowTable> {
        debug!("Reading monthly snowfall from {}", path.display());
        let text = self.decode_file(path)?;
        self.parse_table(&text, MONTHLY_KEY_COLUMNS, parse_month)
    }

    fn decode_file(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        // BOM, when present, overrides the configured encoding
        let (text, used, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            return Err(SnowmanError::InvalidFormat(format!(
                "{} is not valid {} text",
                path.display(),
                used.name()
            )));
        }
        Ok(text.into_owned())
    }

    fn parse_table(
        &self,
        text: &str,
        key_columns: &[&str],
        parse_key: fn(&str) -> Result<NaiveDate>,
    ) -> Result<SnowTable> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(SnowmanError::InvalidFormat("CSV has no header row".to_string()));
        }
        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Ok(SnowTable::default());
        }

        let key_index = Self::find_key_column(&headers, key_columns);
        let numeric_indices = Self::find_numeric_columns(&headers, &records, key_index);
        if numeric_indices.is_empty() {
            return Err(SnowmanError::InvalidFormat(format!(
                "no numeric measurement columns besides '{}'",
                &headers[key_index]
            )));
        }

        let mut table = SnowTable {
            numeric_columns: numeric_indices
                .iter()
                .map(|&i| headers[i].to_string())
                .collect(),
            ..SnowTable::default()
        };

        for (line, record) in records.iter().enumerate() {
            let date = parse_key(record.get(key_index).unwrap_or_default())?;

            let values: Vec<f64> = numeric_indices
                .iter()
                .filter_map(|&i| record.get(i))
                .filter_map(reading)
                .collect();

            match mean(&values) {
                Some(average) => table.rows.push(AveragedRow { date, average }),
                None => {
                    warn!("Row {} ({}) has no readings, skipping", line + 2, date);
                    table.skipped_rows += 1;
                }
            }
        }

        Ok(table)
    }

    /// Header matching one of `candidates` (case-insensitive), else the first column.
    fn find_key_column(headers: &csv::StringRecord, candidates: &[&str]) -> usize {
        headers
            .iter()
            .position(|h| candidates.iter().any(|c| h.eq_ignore_ascii_case(c)))
            .unwrap_or(0)
    }

    /// Columns whose non-missing cells all parse as numbers, with at least one value.
    fn find_numeric_columns(
        headers: &csv::StringRecord,
        records: &[csv::StringRecord],
        key_index: usize,
    ) -> Vec<usize> {
        (0..headers.len())
            .filter(|&i| i != key_index)
            .filter(|&i| {
                let cells: Vec<&str> = records
                    .iter()
                    .filter_map(|r| r.get(i))
                    .filter(|cell| !is_missing(cell))
                    .collect();
                !cells.is_empty() && cells.iter().all(|cell| cell.parse::<f64>().is_ok())
            })
            .collect()
    }
}

impl Default for SnowReader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_missing(cell: &str) -> bool {
    MISSING_VALUE_TOKENS.contains(&cell)
}

/// A finite reading, or `None` for a missing or unusable cell.
fn reading(cell: &str) -> Option<f64> {
    if is_missing(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_daily_rows_average_all_numeric_columns() -> Result<()> {
        let file = write_csv(
            "Date,Station A,Station B,Station C\n\
             2024-01-10,50,30,10\n\
             2024-01-11,0,0,0\n",
        );

        let table = SnowReader::new().read_daily(file.path())?;

        assert_eq!(table.numeric_columns, vec!["Station A", "Station B", "Station C"]);
        assert_eq!(
            table.rows,
            vec![
                AveragedRow { date: ymd(2024, 1, 10), average: 30.0 },
                AveragedRow { date: ymd(2024, 1, 11), average: 0.0 },
            ]
        );
        assert_eq!(table.skipped_rows, 0);
        Ok(())
    }

    #[test]
    fn test_non_numeric_columns_are_ignored() -> Result<()> {
        let file = write_csv(
            "Region,Date,Depth,Quality\n\
             長野県,2024-01-10,40,good\n\
             長野県,2024-01-11,20,suspect\n",
        );

        let table = SnowReader::new().read_daily(file.path())?;

        assert_eq!(table.numeric_columns, vec!["Depth"]);
        assert_eq!(table.rows[0].average, 40.0);
        assert_eq!(table.rows[1].average, 20.0);
        Ok(())
    }

    #[test]
    fn test_empty_cells_are_skipped_like_missing_values() -> Result<()> {
        let file = write_csv(
            "Date,A,B\n\
             2024-01-10,10,\n\
             2024-01-11,,\n\
             2024-01-12,4,6\n",
        );

        let table = SnowReader::new().read_daily(file.path())?;

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].average, 10.0);
        assert_eq!(table.rows[1].average, 5.0);
        assert_eq!(table.skipped_rows, 1);
        Ok(())
    }

    #[test]
    fn test_missing_tokens_keep_column_numeric() -> Result<()> {
        let file = write_csv(
            "Date,S1,S2\n\
             2024-01-10,50,30\n\
             2024-01-11,20,NA\n\
             2024-01-12,-,N/A\n\
             2024-01-13,8,null\n",
        );

        let table = SnowReader::new().read_daily(file.path())?;

        assert_eq!(table.numeric_columns, vec!["S1", "S2"]);
        assert_eq!(
            table.rows,
            vec![
                AveragedRow { date: ymd(2024, 1, 10), average: 40.0 },
                AveragedRow { date: ymd(2024, 1, 11), average: 20.0 },
                AveragedRow { date: ymd(2024, 1, 13), average: 8.0 },
            ]
        );
        assert_eq!(table.skipped_rows, 1);
        Ok(())
    }

    #[test]
    fn test_nan_and_infinite_cells_are_not_averaged() -> Result<()> {
        let file = write_csv(
            "Date,S1,S2,S3\n\
             2024-01-10,50,NaN,nan\n\
             2024-01-11,10,inf,30\n",
        );

        let table = SnowReader::new().read_daily(file.path())?;

        assert_eq!(table.rows[0].average, 50.0);
        assert_eq!(table.rows[1].average, 20.0);
        assert!(table.rows.iter().all(|r| r.average.is_finite()));
        Ok(())
    }

    #[test]
    fn test_short_rows_are_padded_with_missing_cells() -> Result<()> {
        let file = write_csv(
            "Date,S1,S2\n\
             2024-01-10,50,30\n\
             2024-01-11,20\n",
        );

        let table = SnowReader::new().read_daily(file.path())?;

        assert_eq!(table.numeric_columns, vec!["S1", "S2"]);
        assert_eq!(table.rows[0].average, 40.0);
        assert_eq!(table.rows[1].average, 20.0);
        Ok(())
    }

    #[test]
    fn test_monthly_keys_are_first_of_month() -> Result<()> {
        let file = write_csv(
            "month,X,Y\n\
             2024-01,12,8\n\
             2024-02-15,3,1\n",
        );

        let table = SnowReader::new().read_monthly(file.path())?;

        assert_eq!(table.rows[0].date, ymd(2024, 1, 1));
        assert_eq!(table.rows[0].average, 10.0);
        assert_eq!(table.rows[1].date, ymd(2024, 2, 1));
        assert_eq!(table.rows[1].average, 2.0);
        Ok(())
    }

    #[test]
    fn test_bad_date_fails_whole_file() {
        let file = write_csv("Date,A\n2024-01-10,1\nyesterday,2\n");

        let result = SnowReader::new().read_daily(file.path());
        assert!(matches!(result, Err(SnowmanError::InvalidDate(ref d)) if d == "yesterday"));
    }

    #[test]
    fn test_no_numeric_columns_is_an_error() {
        let file = write_csv("Date,Note\n2024-01-10,heavy\n");

        let result = SnowReader::new().read_daily(file.path());
        assert!(matches!(result, Err(SnowmanError::InvalidFormat(_))));
    }

    #[test]
    fn test_header_only_file_is_empty() -> Result<()> {
        let file = write_csv("Date,A,B\n");

        let table = SnowReader::new().read_daily(file.path())?;
        assert!(table.rows.is_empty());
        Ok(())
    }

    #[test]
    fn test_shift_jis_input() -> Result<()> {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("日付,札幌,旭川\n2024年1月10日,80,100\n");
        let mut file = NamedTempFile::new()?;
        file.write_all(&encoded)?;

        let reader = SnowReader::with_encoding("shift_jis")?;
        let table = reader.read_daily(file.path())?;

        assert_eq!(reader.encoding_name(), "Shift_JIS");
        assert_eq!(table.numeric_columns, vec!["札幌", "旭川"]);
        assert_eq!(table.rows[0].date, ymd(2024, 1, 10));
        assert_eq!(table.rows[0].average, 90.0);
        Ok(())
    }

    #[test]
    fn test_unknown_encoding_label() {
        assert!(matches!(
            SnowReader::with_encoding("klingon"),
            Err(SnowmanError::Encoding(_))
        ));
    }
}
