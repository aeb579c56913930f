//! Calendar validation and date ranges.
//!
//! This module provides the `DateRange` spanned by a listening history and
//! the calendar rules used to validate dates typed in by the user.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::QueryError;

/// Days per month in a common year, January first.
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First date (inclusive)
    pub start: NaiveDate,
    /// Last date (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range. Bounds are swapped if given backwards.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Check whether `date` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, bounds included.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%-m/%-d/%Y"),
            self.end.format("%-m/%-d/%Y")
        )
    }
}

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`, or `None` for a bad month.
#[must_use]
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    let days = *DAYS_IN_MONTH.get(index)?;
    Some(if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    })
}

/// Validate a month/day/year triple and turn it into a date.
///
/// # Errors
///
/// Returns [`QueryError::InvalidDate`] for a negative year, a month outside
/// 1-12, or a day the month does not have.
pub fn validate_date(month: u32, day: u32, year: i32) -> Result<NaiveDate, QueryError> {
    let invalid = || QueryError::InvalidDate { month, day, year };
    if year < 0 || day < 1 {
        return Err(invalid());
    }
    let max_day = days_in_month(month, year).ok_or_else(invalid)?;
    if day > max_day {
        return Err(invalid());
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Split a `M/D/Y` string into its numeric parts.
///
/// Only the shape is checked here; calendar rules are applied by
/// [`validate_date`] when the date is used in a query.
///
/// # Errors
///
/// Returns a message if the string is not three `/`-separated numbers.
pub fn parse_month_day_year(input: &str) -> Result<(u32, u32, i32), String> {
    let parts: Vec<&str> = input.trim().split('/').map(str::trim).collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(format!("'{input}' should look like M/D/YYYY"));
    };
    let bad = |what: &str| format!("'{input}' has an invalid {what}");
    Ok((
        month.parse().map_err(|_| bad("month"))?,
        day.parse().map_err(|_| bad("day"))?,
        year.parse().map_err(|_| bad("year"))?,
    ))
}
