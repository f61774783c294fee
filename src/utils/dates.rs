use chrono::{Datelike, NaiveDate};

use crate::error::{Result, SnowmanError};
use crate::utils::constants::{DATE_FORMATS, ISO_DATE_FORMAT};

/// Parse a strict `YYYY-MM-DD` date, as accepted by the HTTP API.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
        .map_err(|_| SnowmanError::InvalidDate(s.to_string()))
}

/// Parse a date cell from a source file.
///
/// A trailing time component (`2024-01-10 00:00:00`, `2024-01-10T09:00`) is ignored.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let date_part = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .ok_or_else(|| SnowmanError::InvalidDate(s.to_string()))
}

/// Parse a month cell (`2024-01`, `2024/1`, `2024年1月` or any full date),
/// normalised to the first day of the month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    if let Ok(date) = parse_date(s) {
        return Ok(first_of_month(date));
    }

    let trimmed = s.trim();
    [
        format!("{}-01", trimmed),
        format!("{}/01", trimmed),
        format!("{}01日", trimmed),
    ]
    .iter()
    .find_map(|candidate| parse_date(candidate).ok())
    .ok_or_else(|| SnowmanError::InvalidDate(s.to_string()))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Half-open `[Jan 1 of year, Jan 1 of year + 1)` range.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(SnowmanError::InvalidDate(format!("year {}", year))),
    }
}
