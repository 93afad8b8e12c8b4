//! Day-code generation for probing the archive.
//!
//! The archive addresses speeches by a `YYMMDD` day code. A crawl walks
//! every day from the first archived speech up to today (dense mode), or
//! only the first day of every month (sparse mode) when iterating on the
//! pipeline and a full crawl would take too long.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Date of the first speech in the archive.
pub fn archive_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1997, 1, 6).unwrap()
}

/// Sampling granularity of the date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// Every calendar day.
    #[default]
    Dense,
    /// The first calendar day of every month.
    Sparse,
}

/// Format a date as an archive day code (`YYMMDD`).
pub fn day_code(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Convert a `YYMMDD` day code into an ISO `YYYY-MM-DD` date string.
pub fn day_code_to_iso(code: &str) -> Result<String, Box<dyn Error>> {
    let date = NaiveDate::parse_from_str(code, "%y%m%d")
        .map_err(|e| format!("invalid day code {code:?}: {e}"))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Produce the ascending day codes between `start` and `end`, inclusive.
///
/// In [`DateMode::Sparse`] the sequence starts at the first of `start`'s
/// month, whatever day of the month `start` is.
pub fn day_codes(start: NaiveDate, end: NaiveDate, mode: DateMode) -> Vec<String> {
    let mut codes = Vec::new();
    let (mut day, step_monthly) = match mode {
        DateMode::Dense => (start, false),
        DateMode::Sparse => (start.with_day(1).unwrap_or(start), true),
    };

    while day <= end {
        codes.push(day_code(day));
        let next = if step_monthly {
            day.checked_add_months(Months::new(1))
        } else {
            day.checked_add_days(Days::new(1))
        };
        match next {
            Some(next) => day = next,
            None => break,
        }
    }

    tracing::debug!(count = codes.len(), ?mode, %start, %end, "Generated day codes");
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dense_range() {
        let codes = day_codes(ymd(1997, 1, 6), ymd(1997, 1, 10), DateMode::Dense);
        assert_eq!(codes, vec!["970106", "970107", "970108", "970109", "970110"]);
    }

    #[test]
    fn test_sparse_range_starts_on_first_of_month() {
        let codes = day_codes(ymd(1997, 1, 6), ymd(1997, 3, 1), DateMode::Sparse);
        assert_eq!(codes, vec!["970101", "970201", "970301"]);
    }

    #[test]
    fn test_sparse_range_crosses_year_and_century() {
        let codes = day_codes(ymd(1999, 11, 20), ymd(2000, 2, 15), DateMode::Sparse);
        assert_eq!(codes, vec!["991101", "991201", "000101", "000201"]);
    }

    #[test]
    fn test_dense_range_over_leap_day() {
        let codes = day_codes(ymd(2000, 2, 28), ymd(2000, 3, 1), DateMode::Dense);
        assert_eq!(codes, vec!["000228", "000229", "000301"]);
    }

    #[test]
    fn test_empty_when_end_precedes_start() {
        assert!(day_codes(ymd(1997, 1, 6), ymd(1997, 1, 5), DateMode::Dense).is_empty());
        // The first of the start month still precedes the end.
        assert_eq!(
            day_codes(ymd(1997, 1, 6), ymd(1997, 1, 5), DateMode::Sparse),
            vec!["970101"]
        );
    }

    #[test]
    fn test_day_code_to_iso() {
        assert_eq!(day_code_to_iso("970106").unwrap(), "1997-01-06");
        assert_eq!(day_code_to_iso("230315").unwrap(), "2023-03-15");
        assert!(day_code_to_iso("971332").is_err());
        assert!(day_code_to_iso("abc").is_err());
    }

    #[test]
    fn test_archive_start() {
        assert_eq!(day_code(archive_start()), "970106");
    }
}
