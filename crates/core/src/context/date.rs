use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use super::params::{PARAM_DAY, PARAM_MONTH, PARAM_YEAR};
use super::{ContextError, RequestParams, Result};

/// The year, month and day a view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Number of days in `month` (1-12) of `year` in the proleptic Gregorian calendar.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Integer parameter values; anything else is treated as not supplied.
fn parse_numeric(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Requested month, or today's month when absent.
pub fn resolve_month(requested: Option<&str>, today: NaiveDate) -> Result<u32> {
    match parse_numeric(requested) {
        Some(month @ 1..=12) => Ok(month as u32),
        Some(month) => Err(ContextError::OutOfRange {
            field: "month",
            value: month,
        }),
        None => Ok(today.month()),
    }
}

/// Requested year, or today's year when absent.
///
/// Years `0..=100` are expanded to 1970-2069 first. The first
/// day of `(year, month)` at local midnight in `tz` must then be a
/// representable instant strictly after the Unix epoch.
pub fn resolve_year(requested: Option<&str>, month: u32, tz: Tz, today: NaiveDate) -> Result<i32> {
    let (Some(raw), Some(year)) = (requested, parse_numeric(requested)) else {
        return Ok(today.year());
    };

    i32::try_from(expand_short_year(year))
        .ok()
        .filter(|year| month_start_timestamp(*year, month, tz).is_some_and(|ts| ts > 0))
        .ok_or_else(|| ContextError::invalid("year", raw.trim()))
}

/// Maps `0..=69` to 2000-2069 and `70..=100` to 1970-2000; other years pass through.
fn expand_short_year(year: i64) -> i64 {
    match year {
        0..=69 => year + 2000,
        70..=100 => year + 1900,
        _ => year,
    }
}

fn month_start_timestamp(year: i32, month: u32, tz: Tz) -> Option<i64> {
    let midnight = NaiveDate::from_ymd_opt(year, month, 1)?.and_time(NaiveTime::MIN);

    // Midnight can fall in a DST gap; the first valid instant after it is used then.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|instant| instant.timestamp())
}

/// Requested day wrapped into the month, or a default when absent.
///
/// Out-of-range values wrap: `((day - 1) mod L) + 1`. Without a requested
/// day, today's day is used when viewing the current month, else 1.
pub fn resolve_day(requested: Option<&str>, year: i32, month: u32, today: NaiveDate) -> u32 {
    match parse_numeric(requested) {
        Some(day) => {
            let length = i128::from(days_in_month(year, month));
            // Widened so `day - 1` cannot overflow; the result lies in 1..=length.
            ((i128::from(day) - 1).rem_euclid(length) + 1) as u32
        }
        None if year == today.year() && month == today.month() => today.day(),
        None => 1,
    }
}

/// Resolves month, then year, then day from the request parameters.
pub fn resolve_date(params: &RequestParams, tz: Tz, today: NaiveDate) -> Result<ViewDate> {
    let month = resolve_month(params.first(PARAM_MONTH), today)?;
    let year = resolve_year(params.first(PARAM_YEAR), month, tz, today)?;
    let day = resolve_day(params.first(PARAM_DAY), year, month, today);

    Ok(ViewDate { year, month, day })
}
