//! Acquisition-date parsing.
//!
//! Scene identifiers encode their acquisition date at fixed positions; the
//! mosaic model works in UTC epoch milliseconds throughout. All parsers here
//! resolve to midnight UTC of the encoded calendar day.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Error, Result};

/// Parse a `YYYYDDD` string (4-digit year + 3-digit day of year) to epoch
/// milliseconds.
///
/// This is the date block of a Landsat scene id, e.g. `"2015182"` → 1 July
/// 2015.
pub fn parse_year_doy(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y%j").map_err(|e| Error::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(epoch_millis(date))
}

/// Parse a `YYYYMMDD` string to epoch milliseconds.
///
/// This is the leading date block of a Sentinel-2 scene id.
pub fn parse_year_month_day(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y%m%d").map_err(|e| Error::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(epoch_millis(date))
}

/// Parse an ISO `YYYY-MM-DD` request date to epoch milliseconds.
pub fn parse_iso_date(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| Error::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(epoch_millis(date))
}

/// Midnight UTC of `date`, as milliseconds since the Unix epoch.
fn epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}
