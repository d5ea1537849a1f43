use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
  pub habit_id: String,
  pub name: String,
  pub active: bool,
  /// Weekday abbreviations this habit applies to ("Mon", "Tue", ...).
  /// Empty means every day.
  #[serde(default)]
  pub days_active: Vec<String>,
  pub target_minutes: Option<u32>,
}

impl Habit {
  /// Whether the habit is expected on the given weekday.
  pub fn applies_on(&self, weekday: Weekday) -> bool {
    if self.days_active.is_empty() {
      return true;
    }
    let abbrev = weekday_abbrev(weekday);
    self
      .days_active
      .iter()
      .any(|d| d.eq_ignore_ascii_case(abbrev))
  }

  /// Whether the habit is expected on the given date.
  pub fn applies_on_date(&self, date: NaiveDate) -> bool {
    self.applies_on(date.weekday())
  }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
  match weekday {
    Weekday::Mon => "Mon",
    Weekday::Tue => "Tue",
    Weekday::Wed => "Wed",
    Weekday::Thu => "Thu",
    Weekday::Fri => "Fri",
    Weekday::Sat => "Sat",
    Weekday::Sun => "Sun",
  }
}

/// Composite-keyed by `(habit_id, date)`; at most one record per habit per
/// day. A later record for the same key replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompletion {
  pub habit_id: String,
  pub date: NaiveDate,
  pub completed: bool,
}

/// Collapse completion records for one habit into a date-keyed map,
/// last write wins.
pub fn completion_map(completions: &[HabitCompletion], habit_id: &str) -> BTreeMap<NaiveDate, bool> {
  let mut map = BTreeMap::new();
  for c in completions.iter().filter(|c| c.habit_id == habit_id) {
    map.insert(c.date, c.completed);
  }
  map
}
