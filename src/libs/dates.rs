//! Date expression parsing for the `log` and `see` commands.
//!
//! A single command-line token selects the days to work on:
//!
//! | Expression       | Result                                             |
//! |------------------|----------------------------------------------------|
//! | `week`           | Monday..Friday of the current week                 |
//! | `week-1`         | Monday..Friday of last week                        |
//! | `today`          | the current local date                             |
//! | `today+1`        | tomorrow (calendar days, not business days)        |
//! | `2024/03/05`     | that exact date                                    |
//! | `2024-03-05`     | same as above                                      |
//!
//! Relative expressions match by prefix. An offset that does not parse as
//! an integer counts as zero, so `weekly` behaves like `week`. Explicit dates
//! must be zero-padded (`2024/3/5` is rejected), and an offset that leaves
//! the calendar range is rejected too.

use crate::libs::error::{Result, TimesheetError};
use chrono::{Datelike, Duration, Local, NaiveDate};

const WEEK: &str = "week";
const TODAY: &str = "today";
const WORKDAYS_PER_WEEK: i64 = 5;
const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Hours logged per day when the hours argument is omitted.
pub const DEFAULT_HOURS: u32 = 8;

/// Ordered, non-empty list of dates selected by one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpec(Vec<NaiveDate>);

impl DateSpec {
    /// Parses an expression relative to the local clock.
    pub fn parse(expr: &str) -> Result<Self> {
        Self::parse_from(expr, Local::now().date_naive())
    }

    /// Parses an expression relative to `today`.
    ///
    /// An offset that moves the date out of the supported calendar range is
    /// an [`TimesheetError::InvalidDateFormat`] like any other bad input.
    pub fn parse_from(expr: &str, today: NaiveDate) -> Result<Self> {
        let invalid = || TimesheetError::InvalidDateFormat(expr.to_string());

        if let Some(modifier) = expr.strip_prefix(WEEK) {
            let monday = Duration::try_weeks(parse_offset(modifier))
                .and_then(|shift| {
                    today
                        .checked_sub_signed(Duration::days(today.weekday().num_days_from_monday() as i64))?
                        .checked_add_signed(shift)
                })
                .ok_or_else(invalid)?;
            let days = (0..WORKDAYS_PER_WEEK)
                .map(|i| monday.checked_add_signed(Duration::days(i)))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?;
            return Ok(Self(days));
        }

        if let Some(modifier) = expr.strip_prefix(TODAY) {
            let day = Duration::try_days(parse_offset(modifier))
                .and_then(|shift| today.checked_add_signed(shift))
                .ok_or_else(invalid)?;
            return Ok(Self(vec![day]));
        }

        DATE_FORMATS
            .iter()
            .find_map(|format| parse_padded(expr, format))
            .map(|date| Self(vec![date]))
            .ok_or_else(invalid)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for DateSpec {
    type Item = NaiveDate;
    type IntoIter = std::vec::IntoIter<NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Parses the optional hours argument, defaulting to [`DEFAULT_HOURS`].
pub fn parse_hours(arg: Option<&str>) -> Result<u32> {
    match arg {
        None => Ok(DEFAULT_HOURS),
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| TimesheetError::InvalidHoursFormat(value.to_string())),
    }
}

// chrono accepts "2024/3/5" for "%Y/%m/%d"; only the zero-padded form is valid.
fn parse_padded(expr: &str, format: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(expr, format).ok()?;
    (date.format(format).to_string() == expr).then_some(date)
}

// "+2", "-1" and "3" are valid; anything else, including "", is 0.
fn parse_offset(modifier: &str) -> i64 {
    modifier.parse::<i64>().unwrap_or(0)
}
