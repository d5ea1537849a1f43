//! Derived summaries
//!
//! Builders for the persisted weekly and monthly rollups. The engine
//! computes them from raw records and hands them back to the caller for
//! storage; the only stored input it ever reads is the previous summary,
//! supplied explicitly for the trend delta.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{
  DailyLog, Goal, GoalStatus, Habit, HabitCompletion, MonthlyReview, Task, WeeklySnapshot,
};
use crate::score::WeeklyScore;
use crate::timeutil::{is_same_month, week_bounds, WeekWindow};

/// Build the snapshot for one week window.
pub fn build_weekly_snapshot(
  window: WeekWindow,
  tasks: &[Task],
  goals: &[Goal],
  habits: &[Habit],
  completions: &[HabitCompletion],
  logs: &[DailyLog],
  previous: Option<&WeeklySnapshot>,
  config: &EngineConfig,
) -> WeeklySnapshot {
  let score = WeeklyScore::compute(window, tasks, goals, habits, completions, logs, config);

  let planned: Vec<&Task> = tasks
    .iter()
    .filter(|t| window.contains(t.planned_date))
    .collect();
  let tasks_completed = planned.iter().filter(|t| t.is_completed()).count() as u32;

  let days_logged: BTreeSet<NaiveDate> = logs
    .iter()
    .map(|l| l.date)
    .filter(|d| window.contains(*d))
    .collect();

  WeeklySnapshot {
    week_start: window.start,
    week_end: window.end,
    score,
    tasks_planned: planned.len() as u32,
    tasks_completed,
    days_logged: days_logged.len() as u32,
    delta_from_previous: previous.map(|p| score.total as i32 - p.score.total as i32),
  }
}

/// Build the review for one calendar month. Weeks are attributed to the
/// month their window starts in. A month outside 1-12 is rejected.
pub fn build_monthly_review(
  year: i32,
  month: u32,
  tasks: &[Task],
  goals: &[Goal],
  habits: &[Habit],
  completions: &[HabitCompletion],
  logs: &[DailyLog],
  previous: Option<&MonthlyReview>,
  config: &EngineConfig,
) -> Result<MonthlyReview, EngineError> {
  let anchor = first_of_month(year, month)?;

  let mut week_totals: Vec<(NaiveDate, u8)> = Vec::new();
  let mut window = week_bounds(anchor, config.week_starts_on);
  if !is_same_month(window.start, anchor) {
    window = week_bounds(window.start + Duration::days(7), config.week_starts_on);
  }
  while is_same_month(window.start, anchor) {
    let score = WeeklyScore::compute(window, tasks, goals, habits, completions, logs, config);
    week_totals.push((window.start, score.total));
    window = week_bounds(window.start + Duration::days(7), config.week_starts_on);
  }

  let average_week_score = if week_totals.is_empty() {
    None
  } else {
    Some(week_totals.iter().map(|(_, s)| *s as f64).sum::<f64>() / week_totals.len() as f64)
  };

  // Ties keep the earlier week
  let best = week_totals
    .iter()
    .fold(None::<(NaiveDate, u8)>, |best, &(start, score)| match best {
      Some((_, s)) if s >= score => best,
      _ => Some((start, score)),
    });

  let goals_completed = goals
    .iter()
    .filter(|g| g.status == GoalStatus::Completed && is_same_month(g.deadline, anchor))
    .count() as u32;

  let tasks_completed = tasks
    .iter()
    .filter(|t| {
      t.is_completed()
        && t
          .completed_date
          .map(|d| is_same_month(d, anchor))
          .unwrap_or(false)
    })
    .count() as u32;

  let days_logged: BTreeSet<NaiveDate> = logs
    .iter()
    .map(|l| l.date)
    .filter(|d| is_same_month(*d, anchor))
    .collect();

  let delta_from_previous = match (average_week_score, previous.and_then(|p| p.average_week_score))
  {
    (Some(current), Some(prev)) => Some(current - prev),
    _ => None,
  };

  Ok(MonthlyReview {
    year,
    month,
    average_week_score,
    best_week_start: best.map(|(start, _)| start),
    best_week_score: best.map(|(_, score)| score),
    goals_completed,
    tasks_completed,
    days_logged: days_logged.len() as u32,
    delta_from_previous,
  })
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, EngineError> {
  NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidConfig {
    reason: format!("no such calendar month: {}-{:02}", year, month),
  })
}
