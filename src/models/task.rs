use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  Planned,
  Completed,
  Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub task_id: String,
  /// Weak reference; tasks can exist without a goal.
  pub goal_id: Option<String>,
  pub planned_date: NaiveDate,
  pub completed_date: Option<NaiveDate>,
  pub status: TaskStatus,
}

impl Task {
  pub fn is_completed(&self) -> bool {
    self.status == TaskStatus::Completed
  }
}
