//! Coach context package
//!
//! The complete pre-computed context the surrounding app hands to its AI
//! coach. The coach interprets these derived numbers rather than doing math
//! itself; assembling (not transporting) the package is the engine's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::insights::{analyze, AnalysisReport};
use crate::models::{DailyLog, Goal, Habit, HabitCompletion, Task, WeeklySnapshot};
use crate::progress::GoalProgress;
use crate::records::PersonalRecords;
use crate::streaks::{
  habit_streak, logging_streak, longest_habit_streak, longest_logging_streak, StreakSummary,
};
use crate::summary::build_weekly_snapshot;
use crate::timeutil::week_bounds;

/// One active goal with its derived progress, for the coach to reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressSummary {
  pub goal_id: String,
  pub title: String,
  pub unit: String,
  pub current_value: f64,
  pub target_value: f64,
  pub progress: GoalProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStreakSummary {
  pub habit_id: String,
  pub name: String,
  pub streak: StreakSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakContext {
  pub logging: StreakSummary,
  pub habits: Vec<HabitStreakSummary>,
}

/// The complete context package for the coach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachContext {
  pub generated_on: NaiveDate,

  /// This week's snapshot, with the delta against the previous week.
  pub week: WeeklySnapshot,

  /// Active goals with derived progress and pace.
  pub goals: Vec<GoalProgressSummary>,

  /// Current and longest streaks, logging plus per active habit.
  pub streaks: StreakContext,

  pub records: PersonalRecords,

  pub analysis: AnalysisReport,

  /// The thresholds behind the derived values, so the coach can explain them.
  pub config: EngineConfig,
}

impl CoachContext {
  /// Assemble the full package from a record snapshot as of `on`.
  pub fn build(
    tasks: &[Task],
    goals: &[Goal],
    habits: &[Habit],
    completions: &[HabitCompletion],
    logs: &[DailyLog],
    on: NaiveDate,
    config: &EngineConfig,
  ) -> Self {
    let this_week = week_bounds(on, config.week_starts_on);
    let last_week = week_bounds(this_week.start - chrono::Duration::days(7), config.week_starts_on);

    let previous =
      build_weekly_snapshot(last_week, tasks, goals, habits, completions, logs, None, config);
    let week = build_weekly_snapshot(
      this_week,
      tasks,
      goals,
      habits,
      completions,
      logs,
      Some(&previous),
      config,
    );

    let goal_summaries: Vec<GoalProgressSummary> = goals
      .iter()
      .filter(|g| g.is_active())
      .map(|g| GoalProgressSummary {
        goal_id: g.goal_id.clone(),
        title: g.title.clone(),
        unit: g.unit.clone(),
        current_value: g.current_value,
        target_value: g.target_value,
        progress: GoalProgress::compute(g, on, config),
      })
      .collect();

    let habit_streaks: Vec<HabitStreakSummary> = habits
      .iter()
      .filter(|h| h.active)
      .map(|h| HabitStreakSummary {
        habit_id: h.habit_id.clone(),
        name: h.name.clone(),
        streak: StreakSummary {
          current: habit_streak(h, completions, on),
          longest: longest_habit_streak(h, completions),
        },
      })
      .collect();

    let streaks = StreakContext {
      logging: StreakSummary {
        current: logging_streak(logs, on),
        longest: longest_logging_streak(logs),
      },
      habits: habit_streaks,
    };

    let records = PersonalRecords::compute(tasks, goals, habits, completions, logs, on, config);
    let analysis = analyze(tasks, goals, habits, completions, logs, on, config);

    Self {
      generated_on: on,
      week,
      goals: goal_summaries,
      streaks,
      records,
      analysis,
      config: config.clone(),
    }
  }

  /// Serialize for the coach prompt.
  pub fn to_json(&self) -> String {
    serde_json::to_string_pretty(self).unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{GoalStatus, GoalType, Priority, TaskStatus};
  use crate::timeutil::parse_date;

  fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
  }

  fn sample_goal() -> Goal {
    Goal {
      goal_id: "g1".to_string(),
      title: "Deadlift".to_string(),
      goal_type: GoalType::Monthly,
      parent_goal_id: None,
      starting_value: 100.0,
      current_value: 120.0,
      target_value: 140.0,
      unit: "kg".to_string(),
      start_date: date("2025-03-01"),
      deadline: date("2025-05-01"),
      status: GoalStatus::Active,
      priority: Priority::High,
    }
  }

  #[test]
  fn test_build_on_empty_history() {
    let ctx = CoachContext::build(
      &[],
      &[],
      &[],
      &[],
      &[],
      date("2025-04-01"),
      &EngineConfig::default(),
    );

    assert_eq!(ctx.week.score.total, 0);
    assert!(ctx.goals.is_empty());
    assert_eq!(ctx.streaks.logging.current, 0);
    assert!(ctx.records.best_week.is_none());
    assert!(ctx.analysis.key_insight.is_none());
  }

  #[test]
  fn test_build_includes_only_active_goals_and_habits() {
    let mut abandoned = sample_goal();
    abandoned.goal_id = "g2".to_string();
    abandoned.status = GoalStatus::Abandoned;

    let habits = vec![
      Habit {
        habit_id: "h1".to_string(),
        name: "Read".to_string(),
        active: true,
        days_active: Vec::new(),
        target_minutes: None,
      },
      Habit {
        habit_id: "h2".to_string(),
        name: "Retired".to_string(),
        active: false,
        days_active: Vec::new(),
        target_minutes: None,
      },
    ];

    let ctx = CoachContext::build(
      &[],
      &[sample_goal(), abandoned],
      &habits,
      &[],
      &[],
      date("2025-04-01"),
      &EngineConfig::default(),
    );

    assert_eq!(ctx.goals.len(), 1);
    assert_eq!(ctx.goals[0].goal_id, "g1");
    assert_eq!(ctx.streaks.habits.len(), 1);
    assert_eq!(ctx.streaks.habits[0].habit_id, "h1");
  }

  #[test]
  fn test_to_json_is_valid_and_complete() {
    let tasks = vec![Task {
      task_id: "t1".to_string(),
      goal_id: Some("g1".to_string()),
      planned_date: date("2025-04-01"),
      completed_date: Some(date("2025-04-01")),
      status: TaskStatus::Completed,
    }];
    let logs = vec![DailyLog::empty(date("2025-04-01"))];

    let ctx = CoachContext::build(
      &tasks,
      &[sample_goal()],
      &[],
      &[],
      &logs,
      date("2025-04-01"),
      &EngineConfig::default(),
    );

    let json = ctx.to_json();
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["generated_on"], "2025-04-01");
    assert!(value["week"]["score"]["total"].is_number());
    assert!(value["goals"].as_array().unwrap().len() == 1);
    // 50% done at roughly half the span: inside the on-track band
    assert_eq!(value["goals"][0]["progress"]["status_indicator"], "on_track");
    assert!(value["config"]["pace_margin_pct"].is_number());
  }
}
