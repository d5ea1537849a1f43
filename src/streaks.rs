//! Streak computation
//!
//! Two variants of the same shape: walk backward from the reference date and
//! count consecutive qualifying days, stopping at the first disqualifying
//! one. Habit streaks skip days outside the habit's `days_active` set
//! without breaking.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{completion_map, DailyLog, Habit, HabitCompletion};

/// Current and longest streak for one metric.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StreakSummary {
  pub current: u32,
  pub longest: u32,
}

/// Consecutive days with a daily log, ending at `on`.
pub fn logging_streak(logs: &[DailyLog], on: NaiveDate) -> u32 {
  let dates: BTreeSet<NaiveDate> = logs.iter().map(|l| l.date).collect();

  let mut streak = 0;
  let mut day = on;
  while dates.contains(&day) {
    streak += 1;
    day -= Duration::days(1);
  }
  streak
}

/// Longest run of consecutive logged days anywhere in history.
/// Single pass over the distinct sorted dates.
pub fn longest_logging_streak(logs: &[DailyLog]) -> u32 {
  let dates: BTreeSet<NaiveDate> = logs.iter().map(|l| l.date).collect();
  longest_run(&dates)
}

fn longest_run(dates: &BTreeSet<NaiveDate>) -> u32 {
  let mut longest = 0;
  let mut run = 0;
  let mut prev: Option<NaiveDate> = None;

  for &date in dates {
    run = match prev {
      Some(p) if date - p == Duration::days(1) => run + 1,
      _ => 1,
    };
    longest = longest.max(run);
    prev = Some(date);
  }
  longest
}

/// Current streak for one habit, ending at `on`.
///
/// A day only counts as required if it is in the habit's `days_active` set;
/// the streak breaks on the first required day without a completed record.
/// Completions on off days still extend the streak.
pub fn habit_streak(habit: &Habit, completions: &[HabitCompletion], on: NaiveDate) -> u32 {
  let completed = completion_map(completions, &habit.habit_id);
  let Some(floor) = completed.keys().next().copied() else {
    return 0;
  };

  let mut streak = 0;
  let mut day = on;
  loop {
    if completed.get(&day) == Some(&true) {
      streak += 1;
    } else if habit.applies_on_date(day) {
      break;
    }
    // The floor bounds the walk for habits whose required days never
    // occur (e.g. a malformed days_active set).
    if day < floor {
      break;
    }
    day -= Duration::days(1);
  }
  streak
}

/// Longest historical streak for one habit, honoring `days_active` gaps.
pub fn longest_habit_streak(habit: &Habit, completions: &[HabitCompletion]) -> u32 {
  let completed = completion_map(completions, &habit.habit_id);
  let (Some(first), Some(last)) = (
    completed.keys().next().copied(),
    completed.keys().next_back().copied(),
  ) else {
    return 0;
  };

  let mut longest = 0;
  let mut run = 0;
  let mut day = first;
  while day <= last {
    if completed.get(&day) == Some(&true) {
      run += 1;
      longest = longest.max(run);
    } else if habit.applies_on_date(day) {
      run = 0;
    }
    day += Duration::days(1);
  }
  longest
}
