//! Date-only value type for form fields.
//!
//! [`Date`] stores year, month and day verbatim. The all-zero value is the
//! "absent" date: it renders as an empty string, and an empty string parses
//! back to it. Any other value renders as `YYYY-MM-DD` with zero-padded month
//! and day.
//!
//! Parsing is structural only. `"2024-13-99"` is accepted; calendar
//! validity is left to validation rules.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Why a date string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The text did not split into exactly three `-`-separated parts.
    #[error("invalid date format")]
    InvalidFormat,

    /// One of the parts is not a 32-bit integer.
    #[error("invalid date component '{part}': {source}")]
    InvalidComponent {
        /// The offending part.
        part: String,
        /// The integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// A calendar date without time of day.
///
/// # Examples
///
/// ```
/// use formx_forms::date::Date;
///
/// let d: Date = "2020-5-1".parse().unwrap();
/// assert_eq!(d, Date::new(2020, 5, 1));
/// assert_eq!(d.to_string(), "2020-05-01");
///
/// assert!(Date::default().is_zero());
/// assert_eq!(Date::default().to_string(), "");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
    /// The year. Zero marks the absent date.
    pub year: i32,
    /// The month, nominally 1-12.
    pub month: i32,
    /// The day of month, nominally 1-31.
    pub day: i32,
}

impl Date {
    /// Creates a date from its components. No calendar check is made.
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Extracts the calendar date of a timestamp in its own time zone.
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_calendar_time<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self {
            year: t.year(),
            month: t.month() as i32,
            day: t.day() as i32,
        }
    }

    /// Returns `true` for the absent date.
    ///
    /// Only the year is consulted, matching the text form: a zero year
    /// renders as an empty string regardless of month and day.
    pub const fn is_zero(&self) -> bool {
        self.year == 0
    }

    /// Returns the text form: empty for the absent date, else `YYYY-MM-DD`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Reconstructs midnight UTC for this date.
    ///
    /// Out-of-range components roll over: month 13 is January of the next
    /// year, day 0 is the last day of the previous month. The absent date
    /// yields a meaningless timestamp; check [`is_zero`](Self::is_zero) first.
    /// Returns `None` only if the result falls outside chrono's range.
    pub fn to_calendar_time(&self) -> Option<DateTime<Utc>> {
        let base = NaiveDate::from_ymd_opt(self.year, 1, 1)?;
        let month_offset = i64::from(self.month) - 1;
        let months = Months::new(u32::try_from(month_offset.unsigned_abs()).ok()?);
        let first_of_month = if month_offset >= 0 {
            base.checked_add_months(months)?
        } else {
            base.checked_sub_months(months)?
        };
        let date = first_of_month
            .checked_add_signed(TimeDelta::try_days(i64::from(self.day) - 1)?)?;
        Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
    }

    /// Parses the text form in place.
    ///
    /// An empty string resets to the absent date. Otherwise the text must be
    /// three `-`-separated integers. On failure `self` is left unchanged.
    pub fn parse_text(&mut self, s: &str) -> Result<(), DateParseError> {
        *self = s.parse()?;
        Ok(())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return Ok(());
        }
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }

        let parts: Vec<&str> = s.split('-').collect();
        let &[year, month, day] = parts.as_slice() else {
            return Err(DateParseError::InvalidFormat);
        };

        let component = |part: &str| {
            part.parse::<i32>()
                .map_err(|source| DateParseError::InvalidComponent {
                    part: part.to_string(),
                    source,
                })
        };

        Ok(Self {
            year: component(year)?,
            month: component(month)?,
            day: component(day)?,
        })
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Date {
    fn from(t: DateTime<Tz>) -> Self {
        Self::from_calendar_time(&t)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
