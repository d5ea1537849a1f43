//! Calendar-day helpers
//!
//! All engine computations work on the caller's local calendar day. Dates are
//! `chrono::NaiveDate`; nothing here converts through UTC, which would shift
//! day boundaries near midnight. The only clock access in the crate is
//! `today()` - every calculator takes its reference date explicitly.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::EngineError;

/// Current date on the caller's local calendar.
pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

/// Parse an ISO `yyyy-MM-dd` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, EngineError> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
    value: value.to_string(),
  })
}

/// Format a date as ISO `yyyy-MM-dd`.
pub fn format_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
  (to - from).num_days()
}

/// Whether `date` falls within the last `n` days ending at `reference`,
/// inclusive of the reference day itself.
pub fn is_within_days(date: NaiveDate, reference: NaiveDate, n: i64) -> bool {
  let age = days_between(date, reference);
  age >= 0 && age < n
}

/// A 7-day week window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeekWindow {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl WeekWindow {
  pub fn contains(&self, date: NaiveDate) -> bool {
    date >= self.start && date <= self.end
  }

  /// Iterate the seven days of the window.
  pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
    let start = self.start;
    (0..7).map(move |i| start + Duration::days(i))
  }
}

/// The week window containing `date` under the given start-of-week
/// convention (Sunday by default in `EngineConfig`).
pub fn week_bounds(date: NaiveDate, week_starts_on: Weekday) -> WeekWindow {
  let offset = (date.weekday().num_days_from_sunday() + 7
    - week_starts_on.num_days_from_sunday())
    % 7;
  let start = date - Duration::days(offset as i64);
  WeekWindow {
    start,
    end: start + Duration::days(6),
  }
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
  a == b
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
  a.year() == b.year() && a.month() == b.month()
}
