//! Goal progress and pace
//!
//! Pure derivation from a single `Goal` snapshot and a reference date. All
//! divisions are guarded; degenerate goals resolve to explicit defaults
//! rather than NaN or Infinity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{Goal, GoalType};
use crate::timeutil::days_between;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
  Ahead,
  OnTrack,
  Behind,
}

impl PaceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Ahead => "ahead",
      Self::OnTrack => "on_track",
      Self::Behind => "behind",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
  /// Percent complete, clamped to [0, 100]. Unrounded; display rounding is
  /// left to the caller, and pace deltas consume the full-precision value.
  pub progress_percent: f64,

  /// Percent that would be complete at `on` if progress were linear over the
  /// goal's span, clamped to [0, 100].
  pub expected_percent: f64,

  /// Whole days until the deadline, clamped to 0.
  pub days_remaining: i64,

  pub status_indicator: PaceStatus,
}

impl GoalProgress {
  /// Compute progress for one goal as of the given date.
  pub fn compute(goal: &Goal, on: NaiveDate, config: &EngineConfig) -> Self {
    let progress_percent = progress_percent(goal);

    // All goal kinds currently share the linear pace curve; the match stays
    // exhaustive so a new kind fails here instead of inheriting a default.
    let expected_percent = match goal.goal_type {
      GoalType::Monthly | GoalType::WeeklyChunk | GoalType::Milestone => {
        expected_percent(goal.start_date, goal.deadline, on)
      }
    };

    let days_remaining = days_between(on, goal.deadline).max(0);

    let status_indicator = if progress_percent >= expected_percent + config.pace_margin_pct {
      PaceStatus::Ahead
    } else if progress_percent <= expected_percent - config.pace_margin_pct {
      PaceStatus::Behind
    } else {
      PaceStatus::OnTrack
    };

    Self {
      progress_percent,
      expected_percent,
      days_remaining,
      status_indicator,
    }
  }
}

/// Percent of the value span covered, clamped to [0, 100].
///
/// Zero-span goals (target == start) are defined as 100 once the current
/// value reaches the target and 0 otherwise.
fn progress_percent(goal: &Goal) -> f64 {
  let span = goal.target_value - goal.starting_value;
  if span == 0.0 {
    return if goal.current_value >= goal.target_value {
      100.0
    } else {
      0.0
    };
  }
  let pct = 100.0 * (goal.current_value - goal.starting_value) / span;
  pct.clamp(0.0, 100.0)
}

/// Linear expected pace over the goal span. Zero-length goals count as one
/// day so elapsed time still divides cleanly.
fn expected_percent(start: NaiveDate, deadline: NaiveDate, on: NaiveDate) -> f64 {
  let total_days = days_between(start, deadline).max(1);
  let elapsed_days = days_between(start, on).clamp(0, total_days);
  100.0 * elapsed_days as f64 / total_days as f64
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{GoalStatus, Priority};
  use crate::timeutil::parse_date;

  fn goal(starting: f64, current: f64, target: f64, start: &str, deadline: &str) -> Goal {
    Goal {
      goal_id: "g1".to_string(),
      title: "Bench press".to_string(),
      goal_type: GoalType::Monthly,
      parent_goal_id: None,
      starting_value: starting,
      current_value: current,
      target_value: target,
      unit: "lbs".to_string(),
      start_date: parse_date(start).unwrap(),
      deadline: parse_date(deadline).unwrap(),
      status: GoalStatus::Active,
      priority: Priority::Medium,
    }
  }

  #[test]
  fn test_scenario_ahead_of_pace() {
    // From the reference scenario: 1340 -> 1450 of 1500, Jan 1 to Jun 1,
    // checked on Apr 1.
    let g = goal(1340.0, 1450.0, 1500.0, "2025-01-01", "2025-06-01");
    let on = parse_date("2025-04-01").unwrap();

    let p = GoalProgress::compute(&g, on, &EngineConfig::default());

    assert!(
      (p.progress_percent - 68.75).abs() < 1e-9,
      "progress should be 68.75, got {}",
      p.progress_percent
    );

    // 151 total days, 90 elapsed -> ~59.6% expected
    assert!(
      (p.expected_percent - 59.6).abs() < 0.1,
      "expected pace should be ~59.6, got {}",
      p.expected_percent
    );

    assert_eq!(p.days_remaining, 61);
    assert_eq!(p.status_indicator, PaceStatus::Ahead);
  }

  #[test]
  fn test_progress_clamps_above_and_below() {
    let overshot = goal(0.0, 250.0, 100.0, "2025-01-01", "2025-02-01");
    let p = GoalProgress::compute(&overshot, parse_date("2025-01-15").unwrap(), &EngineConfig::default());
    assert_eq!(p.progress_percent, 100.0);

    let regressed = goal(100.0, 40.0, 200.0, "2025-01-01", "2025-02-01");
    let p = GoalProgress::compute(&regressed, parse_date("2025-01-15").unwrap(), &EngineConfig::default());
    assert_eq!(p.progress_percent, 0.0);
  }

  #[test]
  fn test_zero_span_goal() {
    let on = parse_date("2025-01-15").unwrap();

    let met = goal(50.0, 50.0, 50.0, "2025-01-01", "2025-02-01");
    let p = GoalProgress::compute(&met, on, &EngineConfig::default());
    assert_eq!(p.progress_percent, 100.0);

    let unmet = goal(50.0, 20.0, 50.0, "2025-01-01", "2025-02-01");
    let p = GoalProgress::compute(&unmet, on, &EngineConfig::default());
    assert_eq!(p.progress_percent, 0.0);
  }

  #[test]
  fn test_zero_length_goal_does_not_divide_by_zero() {
    let g = goal(0.0, 5.0, 10.0, "2025-01-01", "2025-01-01");
    let p = GoalProgress::compute(&g, parse_date("2025-01-01").unwrap(), &EngineConfig::default());
    assert!(p.expected_percent.is_finite());
    assert!(p.progress_percent.is_finite());
  }

  #[test]
  fn test_days_remaining_clamped_after_deadline() {
    let g = goal(0.0, 5.0, 10.0, "2025-01-01", "2025-02-01");
    let p = GoalProgress::compute(&g, parse_date("2025-03-01").unwrap(), &EngineConfig::default());
    assert_eq!(p.days_remaining, 0);
    // Past the deadline the expected pace is pinned at 100
    assert_eq!(p.expected_percent, 100.0);
  }

  #[test]
  fn test_on_track_inside_margin() {
    // Halfway through the span with exactly half the value covered
    let g = goal(0.0, 50.0, 100.0, "2025-01-01", "2025-01-21");
    let p = GoalProgress::compute(&g, parse_date("2025-01-11").unwrap(), &EngineConfig::default());
    assert_eq!(p.status_indicator, PaceStatus::OnTrack);
  }

  #[test]
  fn test_behind_pace() {
    let g = goal(0.0, 10.0, 100.0, "2025-01-01", "2025-01-21");
    let p = GoalProgress::compute(&g, parse_date("2025-01-18").unwrap(), &EngineConfig::default());
    assert_eq!(p.status_indicator, PaceStatus::Behind);
  }

  #[test]
  fn test_before_start_date_expects_zero() {
    let g = goal(0.0, 0.0, 100.0, "2025-02-01", "2025-03-01");
    let p = GoalProgress::compute(&g, parse_date("2025-01-15").unwrap(), &EngineConfig::default());
    assert_eq!(p.expected_percent, 0.0);
    assert_eq!(p.status_indicator, PaceStatus::OnTrack);
  }
}
