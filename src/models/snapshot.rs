use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::score::WeeklyScore;

/// Derived weekly summary handed back to the caller for storage. The engine
/// produces these and only reads one back when computing trend-over-time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySnapshot {
  pub week_start: NaiveDate,
  pub week_end: NaiveDate,
  pub score: WeeklyScore,
  pub tasks_planned: u32,
  pub tasks_completed: u32,
  pub days_logged: u32,
  /// Total-score delta against the previous snapshot, when supplied.
  pub delta_from_previous: Option<i32>,
}

/// Derived monthly summary, same lifecycle as `WeeklySnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReview {
  pub year: i32,
  pub month: u32,
  /// Mean of the weekly totals for weeks starting in this month; None when
  /// the month has no scored weeks.
  pub average_week_score: Option<f64>,
  pub best_week_start: Option<NaiveDate>,
  pub best_week_score: Option<u8>,
  pub goals_completed: u32,
  pub tasks_completed: u32,
  pub days_logged: u32,
  pub delta_from_previous: Option<f64>,
}
