//! Personal records
//!
//! Scans the full history for maxima. Every field is None when the
//! underlying history is empty for that metric - no sentinel values that
//! could be mistaken for a genuine zero score.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{DailyLog, Goal, Habit, HabitCompletion, Task};
use crate::score::WeeklyScore;
use crate::streaks::{longest_habit_streak, longest_logging_streak};
use crate::timeutil::week_bounds;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestWeek {
  pub week_start: NaiveDate,
  pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestHabitStreak {
  pub habit_id: String,
  pub name: String,
  pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestDay {
  pub date: NaiveDate,
  pub tasks_completed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestHabitWeek {
  pub week_start: NaiveDate,
  pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalRecords {
  pub best_week: Option<BestWeek>,
  pub longest_logging_streak: Option<u32>,
  pub longest_habit_streak: Option<BestHabitStreak>,
  pub most_productive_day: Option<BestDay>,
  pub best_habit_week: Option<BestHabitWeek>,
}

impl PersonalRecords {
  /// Aggregate records over the full history up to `on`.
  pub fn compute(
    tasks: &[Task],
    goals: &[Goal],
    habits: &[Habit],
    completions: &[HabitCompletion],
    logs: &[DailyLog],
    on: NaiveDate,
    config: &EngineConfig,
  ) -> Self {
    let mut records = Self::default();

    // Weekly maxima: walk week windows from the earliest record to `on`.
    // Ties keep the earlier week.
    if let Some(earliest) = earliest_date(tasks, completions, logs) {
      let has_completions = completions.iter().any(|c| c.completed);
      let mut window = week_bounds(earliest, config.week_starts_on);
      let last = week_bounds(on, config.week_starts_on);

      while window.start <= last.start {
        let score = WeeklyScore::compute(window, tasks, goals, habits, completions, logs, config);

        let best_so_far = records.best_week.as_ref().map(|b| b.score).unwrap_or(0);
        if records.best_week.is_none() || score.total > best_so_far {
          records.best_week = Some(BestWeek {
            week_start: window.start,
            score: score.total,
          });
        }

        if has_completions {
          let best_rate = records
            .best_habit_week
            .as_ref()
            .map(|b| b.completion_rate)
            .unwrap_or(-1.0);
          if score.habit_rate > best_rate {
            records.best_habit_week = Some(BestHabitWeek {
              week_start: window.start,
              completion_rate: score.habit_rate,
            });
          }
        }

        window = week_bounds(window.start + Duration::days(7), config.week_starts_on);
      }
    }

    if !logs.is_empty() {
      records.longest_logging_streak = Some(longest_logging_streak(logs));
    }

    for habit in habits {
      let days = longest_habit_streak(habit, completions);
      if days == 0 {
        continue;
      }
      let best = records.longest_habit_streak.as_ref().map(|b| b.days).unwrap_or(0);
      if days > best {
        records.longest_habit_streak = Some(BestHabitStreak {
          habit_id: habit.habit_id.clone(),
          name: habit.name.clone(),
          days,
        });
      }
    }

    records.most_productive_day = most_productive_day(tasks);

    records
  }
}

fn earliest_date(
  tasks: &[Task],
  completions: &[HabitCompletion],
  logs: &[DailyLog],
) -> Option<NaiveDate> {
  let task_min = tasks.iter().map(|t| t.planned_date).min();
  let completion_min = completions.iter().map(|c| c.date).min();
  let log_min = logs.iter().map(|l| l.date).min();
  [task_min, completion_min, log_min].into_iter().flatten().min()
}

/// Day with the most completed tasks; ties keep the earliest date.
fn most_productive_day(tasks: &[Task]) -> Option<BestDay> {
  let mut by_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
  for task in tasks.iter().filter(|t| t.is_completed()) {
    if let Some(day) = task.completed_date {
      *by_day.entry(day).or_insert(0) += 1;
    }
  }

  by_day
    .into_iter()
    .fold(None, |best: Option<BestDay>, (date, count)| match best {
      Some(b) if b.tasks_completed >= count => Some(b),
      _ => Some(BestDay {
        date,
        tasks_completed: count,
      }),
    })
}
