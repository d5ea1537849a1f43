use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Goal kind. A closed enum so the progress calculator matches exhaustively
/// and a new kind is a compile-time decision, not a silently ignored tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
  /// Month-scale goal with its own deadline
  Monthly,
  /// Week-sized slice of a monthly goal
  WeeklyChunk,
  /// One-off target with a deadline
  Milestone,
}

impl std::fmt::Display for GoalType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Monthly => write!(f, "monthly"),
      Self::WeeklyChunk => write!(f, "weekly_chunk"),
      Self::Milestone => write!(f, "milestone"),
    }
  }
}

impl std::str::FromStr for GoalType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "monthly" => Ok(Self::Monthly),
      "weekly_chunk" => Ok(Self::WeeklyChunk),
      "milestone" => Ok(Self::Milestone),
      _ => Err(format!("Unknown goal type: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
  Active,
  Completed,
  Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
  pub goal_id: String,
  pub title: String,
  pub goal_type: GoalType,
  /// Weak reference to a monthly goal, used only for display grouping.
  pub parent_goal_id: Option<String>,
  pub starting_value: f64,
  pub current_value: f64,
  pub target_value: f64,
  pub unit: String,
  pub start_date: NaiveDate,
  pub deadline: NaiveDate,
  pub status: GoalStatus,
  pub priority: Priority,
}

impl Goal {
  pub fn is_active(&self) -> bool {
    self.status == GoalStatus::Active
  }
}
