//! Composite weekly score
//!
//! One 0-100 figure blending four category sub-scores by configured weights.
//! Every divisor case with no eligible items scores 0 for that category,
//! never NaN.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{DailyLog, Goal, Habit, HabitCompletion, Task};
use crate::progress::GoalProgress;
use crate::timeutil::WeekWindow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeeklyScore {
  /// Weighted blend of the four sub-scores, rounded and clamped to [0, 100].
  pub total: u8,

  /// Completed / planned tasks this week, as a 0-100 rate.
  pub task_rate: f64,

  /// Completed habit-days over `active_habits * 7`. The denominator
  /// deliberately ignores days_active restrictions; per-habit streaks are
  /// where those apply.
  pub habit_rate: f64,

  /// Days of the window with a daily log, as a 0-100 rate.
  pub logging_rate: f64,

  /// Mean progress-vs-expected delta across active goals, remapped so
  /// 50 = exactly on pace.
  pub goal_pace: f64,
}

impl WeeklyScore {
  /// Score one week window. Input collections may be pre-filtered to the
  /// window or the full history; filtering here is idempotent.
  pub fn compute(
    window: WeekWindow,
    tasks: &[Task],
    goals: &[Goal],
    habits: &[Habit],
    completions: &[HabitCompletion],
    logs: &[DailyLog],
    config: &EngineConfig,
  ) -> Self {
    let task_rate = task_rate(window, tasks);
    let habit_rate = habit_rate(window, habits, completions);
    let logging_rate = logging_rate(window, logs);
    let goal_pace = goal_pace(window, goals, config);

    let weights = &config.score_weights;
    let blended = task_rate * weights.tasks
      + habit_rate * weights.habits
      + logging_rate * weights.logging
      + goal_pace * weights.goal_pace;
    let total = blended.round().clamp(0.0, 100.0) as u8;

    Self {
      total,
      task_rate,
      habit_rate,
      logging_rate,
      goal_pace,
    }
  }
}

fn task_rate(window: WeekWindow, tasks: &[Task]) -> f64 {
  let planned: Vec<&Task> = tasks
    .iter()
    .filter(|t| window.contains(t.planned_date))
    .collect();
  if planned.is_empty() {
    return 0.0;
  }
  let completed = planned.iter().filter(|t| t.is_completed()).count();
  100.0 * completed as f64 / planned.len() as f64
}

fn habit_rate(window: WeekWindow, habits: &[Habit], completions: &[HabitCompletion]) -> f64 {
  let active: BTreeSet<&str> = habits
    .iter()
    .filter(|h| h.active)
    .map(|h| h.habit_id.as_str())
    .collect();
  if active.is_empty() {
    return 0.0;
  }

  // Last write wins per (habit, date) key
  let mut latest: BTreeMap<(&str, NaiveDate), bool> = BTreeMap::new();
  for c in completions {
    if active.contains(c.habit_id.as_str()) && window.contains(c.date) {
      latest.insert((c.habit_id.as_str(), c.date), c.completed);
    }
  }
  let completed_days = latest.values().filter(|done| **done).count();

  let rate = 100.0 * completed_days as f64 / (active.len() * 7) as f64;
  rate.clamp(0.0, 100.0)
}

fn logging_rate(window: WeekWindow, logs: &[DailyLog]) -> f64 {
  let days_logged: BTreeSet<NaiveDate> = logs
    .iter()
    .map(|l| l.date)
    .filter(|d| window.contains(*d))
    .collect();
  100.0 * days_logged.len() as f64 / 7.0
}

fn goal_pace(window: WeekWindow, goals: &[Goal], config: &EngineConfig) -> f64 {
  let deltas: Vec<f64> = goals
    .iter()
    .filter(|g| g.is_active())
    .map(|g| {
      let p = GoalProgress::compute(g, window.end, config);
      p.progress_percent - p.expected_percent
    })
    .collect();
  if deltas.is_empty() {
    return 0.0;
  }
  let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
  (50.0 + mean).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{GoalStatus, GoalType, Priority, TaskStatus};
  use crate::timeutil::{parse_date, week_bounds};
  use chrono::Weekday;

  fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
  }

  // Sunday-start week Mar 30 - Apr 5, 2025
  fn window() -> WeekWindow {
    week_bounds(date("2025-04-02"), Weekday::Sun)
  }

  fn task(id: &str, planned: &str, status: TaskStatus) -> Task {
    Task {
      task_id: id.to_string(),
      goal_id: None,
      planned_date: date(planned),
      completed_date: (status == TaskStatus::Completed).then(|| date(planned)),
      status,
    }
  }

  fn habit(id: &str, active: bool) -> Habit {
    Habit {
      habit_id: id.to_string(),
      name: id.to_string(),
      active,
      days_active: Vec::new(),
      target_minutes: None,
    }
  }

  fn done(habit_id: &str, s: &str) -> HabitCompletion {
    HabitCompletion {
      habit_id: habit_id.to_string(),
      date: date(s),
      completed: true,
    }
  }

  #[test]
  fn test_empty_week_scores_zero() {
    let score = WeeklyScore::compute(
      window(),
      &[],
      &[],
      &[],
      &[],
      &[],
      &EngineConfig::default(),
    );
    assert_eq!(score.total, 0);
    assert_eq!(score.task_rate, 0.0);
    assert_eq!(score.habit_rate, 0.0);
    assert_eq!(score.logging_rate, 0.0);
    assert_eq!(score.goal_pace, 0.0);
  }

  #[test]
  fn test_task_rate_counts_only_window_tasks() {
    let tasks = vec![
      task("t1", "2025-03-31", TaskStatus::Completed),
      task("t2", "2025-04-01", TaskStatus::Planned),
      task("t3", "2025-04-02", TaskStatus::Skipped),
      task("t4", "2025-04-03", TaskStatus::Completed),
      // Outside the window, must not count
      task("t5", "2025-04-10", TaskStatus::Completed),
    ];

    let score = WeeklyScore::compute(
      window(),
      &tasks,
      &[],
      &[],
      &[],
      &[],
      &EngineConfig::default(),
    );
    assert!(
      (score.task_rate - 50.0).abs() < 1e-9,
      "2 of 4 planned tasks completed, got {}",
      score.task_rate
    );
  }

  #[test]
  fn test_habit_rate_uses_active_count_times_seven() {
    let habits = vec![habit("h1", true), habit("h2", true), habit("h3", false)];
    // h1 done all 7 days, h2 done none; inactive h3 completions ignored
    let mut completions: Vec<HabitCompletion> = window()
      .days()
      .map(|d| HabitCompletion {
        habit_id: "h1".to_string(),
        date: d,
        completed: true,
      })
      .collect();
    completions.push(done("h3", "2025-04-01"));

    let score = WeeklyScore::compute(
      window(),
      &[],
      &[],
      &habits,
      &completions,
      &[],
      &EngineConfig::default(),
    );
    // 7 completed days / (2 active * 7) = 50%
    assert!(
      (score.habit_rate - 50.0).abs() < 1e-9,
      "expected 50, got {}",
      score.habit_rate
    );
  }

  #[test]
  fn test_habit_rate_duplicate_completion_is_replacement() {
    let habits = vec![habit("h1", true)];
    let d = "2025-04-01";
    let completions = vec![
      done("h1", d),
      HabitCompletion {
        habit_id: "h1".to_string(),
        date: date(d),
        completed: false,
      },
    ];

    let score = WeeklyScore::compute(
      window(),
      &[],
      &[],
      &habits,
      &completions,
      &[],
      &EngineConfig::default(),
    );
    assert_eq!(score.habit_rate, 0.0);
  }

  #[test]
  fn test_logging_rate_counts_distinct_days() {
    let logs = vec![
      DailyLog::empty(date("2025-03-30")),
      DailyLog::empty(date("2025-03-30")), // duplicate day
      DailyLog::empty(date("2025-04-01")),
      DailyLog::empty(date("2025-04-03")),
      DailyLog::empty(date("2025-04-06")), // next week
    ];

    let score = WeeklyScore::compute(
      window(),
      &[],
      &[],
      &[],
      &[],
      &logs,
      &EngineConfig::default(),
    );
    let expected = 100.0 * 3.0 / 7.0;
    assert!(
      (score.logging_rate - expected).abs() < 1e-9,
      "expected {}, got {}",
      expected,
      score.logging_rate
    );
  }

  #[test]
  fn test_goal_pace_fifty_when_on_pace() {
    // Half the span elapsed at window end, half the value covered
    let goal = Goal {
      goal_id: "g1".to_string(),
      title: "Pages".to_string(),
      goal_type: GoalType::Monthly,
      parent_goal_id: None,
      starting_value: 0.0,
      current_value: 50.0,
      target_value: 100.0,
      unit: "pages".to_string(),
      start_date: date("2025-03-26"),
      deadline: date("2025-04-15"),
      status: GoalStatus::Active,
      priority: Priority::High,
    };

    let score = WeeklyScore::compute(
      window(),
      &[],
      &[goal],
      &[],
      &[],
      &[],
      &EngineConfig::default(),
    );
    assert!(
      (score.goal_pace - 50.0).abs() < 1e-9,
      "expected 50, got {}",
      score.goal_pace
    );
  }

  #[test]
  fn test_goal_pace_ignores_completed_goals() {
    let goal = Goal {
      goal_id: "g1".to_string(),
      title: "Done".to_string(),
      goal_type: GoalType::Milestone,
      parent_goal_id: None,
      starting_value: 0.0,
      current_value: 100.0,
      target_value: 100.0,
      unit: "pct".to_string(),
      start_date: date("2025-03-01"),
      deadline: date("2025-04-01"),
      status: GoalStatus::Completed,
      priority: Priority::Low,
    };

    let score = WeeklyScore::compute(
      window(),
      &[],
      &[goal],
      &[],
      &[],
      &[],
      &EngineConfig::default(),
    );
    assert_eq!(score.goal_pace, 0.0);
  }

  #[test]
  fn test_total_is_weighted_blend() {
    // Full marks on logging only, equal quarter weights -> 25
    let logs: Vec<DailyLog> = window().days().map(DailyLog::empty).collect();

    let score = WeeklyScore::compute(
      window(),
      &[],
      &[],
      &[],
      &[],
      &logs,
      &EngineConfig::default(),
    );
    assert_eq!(score.logging_rate, 100.0);
    assert_eq!(score.total, 25);
  }

  #[test]
  fn test_total_never_exceeds_bounds() {
    let tasks = vec![task("t1", "2025-04-01", TaskStatus::Completed)];
    let habits = vec![habit("h1", true)];
    let completions: Vec<HabitCompletion> = window()
      .days()
      .map(|d| HabitCompletion {
        habit_id: "h1".to_string(),
        date: d,
        completed: true,
      })
      .collect();
    let logs: Vec<DailyLog> = window().days().map(DailyLog::empty).collect();

    let score = WeeklyScore::compute(
      window(),
      &tasks,
      &[],
      &habits,
      &completions,
      &logs,
      &EngineConfig::default(),
    );
    assert!(score.total <= 100);
    // Three full categories and an empty goal slate: 75
    assert_eq!(score.total, 75);
  }
}
