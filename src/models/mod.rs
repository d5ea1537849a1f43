pub mod goal;
pub mod habit;
pub mod log;
pub mod snapshot;
pub mod task;

pub use goal::{Goal, GoalStatus, GoalType, Priority};
pub use habit::{completion_map, Habit, HabitCompletion};
pub use log::DailyLog;
pub use snapshot::{MonthlyReview, WeeklySnapshot};
pub use task::{Task, TaskStatus};
