//! Deterministic productivity metrics engine
//!
//! Pure derivations over goal, task, habit, and daily-log snapshots: goal
//! pace, streaks, the composite weekly score, pattern/correlation insights,
//! and personal records. Callers own fetching and storage; every function
//! here is a synchronous, stateless transformation of its inputs, safe to
//! call concurrently against a consistent snapshot.

pub mod coach;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod progress;
pub mod records;
pub mod score;
pub mod streaks;
pub mod summary;
pub mod timeutil;

pub use coach::CoachContext;
pub use config::{EngineConfig, ScoreWeights};
pub use error::EngineError;
pub use insights::{analyze, AnalysisReport, Confidence, OverallHealth};
pub use models::{
  DailyLog, Goal, GoalStatus, GoalType, Habit, HabitCompletion, MonthlyReview, Priority, Task,
  TaskStatus, WeeklySnapshot,
};
pub use progress::{GoalProgress, PaceStatus};
pub use records::PersonalRecords;
pub use score::WeeklyScore;
pub use streaks::{habit_streak, logging_streak, longest_habit_streak, longest_logging_streak};
pub use summary::{build_monthly_review, build_weekly_snapshot};
pub use timeutil::{today, week_bounds, WeekWindow};
