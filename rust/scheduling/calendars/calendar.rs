use chrono::prelude::*;
use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::error::RepeatError;

/// Create a `NaiveDateTime` with default null time.
///
/// Panics if date values are invalid.
pub fn ndt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("`year`, `month` `day` are invalid.")
        .and_time(NaiveTime::default())
}

/// Return an end of month date for given month and year.
pub fn get_eom(year: i32, month: u32) -> Option<NaiveDateTime> {
    get_roll_by_day(year, month, 31).map(|d| d.and_time(NaiveTime::default()))
}

/// Move a date to the last day of its month, keeping its time of day.
pub fn snap_eom(date: &NaiveDateTime) -> Result<NaiveDateTime, RepeatError> {
    get_roll_by_day(date.year(), date.month(), 31)
        .map(|d| d.and_time(date.time()))
        .ok_or(RepeatError::DateOutOfRange)
}

/// Add a signed number of calendar days to a date.
pub fn add_days(date: &NaiveDateTime, days: i64) -> Result<NaiveDateTime, RepeatError> {
    let n = Days::new(days.unsigned_abs());
    let new_date = if days < 0 {
        date.checked_sub_days(n)
    } else {
        date.checked_add_days(n)
    };
    new_date.ok_or(RepeatError::DateOutOfRange)
}

/// Add a signed number of calendar months to a date.
///
/// A day of month that does not exist in the target month is clamped to that month's last day,
/// so 31st January plus one month is the 28th (or 29th) of February. The clamped day is what the
/// next call starts from.
///
/// # Examples
/// ```rust
/// # use repeatlib::scheduling::{ndt, add_months};
/// assert_eq!(ndt(2024, 2, 29), add_months(&ndt(2024, 1, 31), 1).unwrap());
/// assert_eq!(ndt(2022, 11, 30), add_months(&ndt(2023, 5, 31), -6).unwrap());
/// ```
pub fn add_months(date: &NaiveDateTime, months: i32) -> Result<NaiveDateTime, RepeatError> {
    // convert months to a set of years and remainder months
    let mut yr_roll = months / 12;
    let rem_months = months - yr_roll * 12;

    // determine the new month
    let mut new_month = date.month() as i32 + rem_months;
    if new_month <= 0 {
        yr_roll -= 1;
        new_month = new_month.rem_euclid(12);
    } else if new_month >= 13 {
        yr_roll += 1;
        new_month = new_month.rem_euclid(12);
    }
    if new_month == 0 {
        new_month = 12;
    }

    let year = date
        .year()
        .checked_add(yr_roll)
        .ok_or(RepeatError::DateOutOfRange)?;
    get_roll_by_day(year, new_month as u32, date.day())
        .map(|d| d.and_time(date.time()))
        .ok_or(RepeatError::DateOutOfRange)
}

/// Return the date with the given day in the month, or the month's last day if shorter.
fn get_roll_by_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => Some(date),
        None if day > 28 => get_roll_by_day(year, month, day - 1),
        None => None,
    }
}

/// The textual layout of a date string, so that derived dates can be written back the same way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsoShape {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDTHH:MM:SS`
    DateTimeT,
    /// `YYYY-MM-DD HH:MM:SS`
    DateTimeSpace,
}

/// Parse an ISO-8601 date or datetime string, returning the value and its layout.
///
/// # Examples
/// ```rust
/// # use repeatlib::scheduling::{ndt, parse_iso, IsoShape};
/// assert_eq!((ndt(2025, 1, 31), IsoShape::Date), parse_iso("2025-01-31").unwrap());
/// ```
pub fn parse_iso(value: &str) -> Result<(NaiveDateTime, IsoShape), RepeatError> {
    let s = value.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok((d.and_time(NaiveTime::default()), IsoShape::Date));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok((dt, IsoShape::DateTimeT));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok((dt, IsoShape::DateTimeSpace));
    }
    Err(RepeatError::DateParse(value.to_string()))
}

/// Format a date in the given layout.
pub fn format_iso(date: &NaiveDateTime, shape: IsoShape) -> String {
    match shape {
        IsoShape::Date => date.format("%Y-%m-%d").to_string(),
        IsoShape::DateTimeT => date.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        IsoShape::DateTimeSpace => date.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
    }
}
