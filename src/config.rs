//! Engine configuration
//!
//! Every tunable the calculators use lives here as a named value rather than
//! a literal buried in logic, so callers can override and tests can pin them.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Weights for the four weekly-score categories. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
  pub tasks: f64,
  pub habits: f64,
  pub logging: f64,
  pub goal_pace: f64,
}

impl Default for ScoreWeights {
  fn default() -> Self {
    Self {
      tasks: 0.25,
      habits: 0.25,
      logging: 0.25,
      goal_pace: 0.25,
    }
  }
}

impl ScoreWeights {
  pub fn sum(&self) -> f64 {
    self.tasks + self.habits + self.logging + self.goal_pace
  }

  /// Reject weight sets that do not sum to 1.0 (within float tolerance).
  pub fn validate(&self) -> Result<(), EngineError> {
    if (self.sum() - 1.0).abs() > 1e-6 {
      return Err(EngineError::InvalidConfig {
        reason: format!("score weights sum to {}, expected 1.0", self.sum()),
      });
    }
    if [self.tasks, self.habits, self.logging, self.goal_pace]
      .iter()
      .any(|w| *w < 0.0)
    {
      return Err(EngineError::InvalidConfig {
        reason: "score weights must be non-negative".to_string(),
      });
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
  /// Percentage-point band around expected pace inside which a goal is
  /// considered on track.
  pub pace_margin_pct: f64,

  /// Category weights for the composite weekly score.
  pub score_weights: ScoreWeights,

  /// Minimum paired non-null observations before a correlation is reported.
  pub min_correlation_samples: usize,

  /// Minimum samples per group before a pattern rule produces an insight.
  pub min_rule_samples: usize,

  /// Samples per group at which a pattern insight is rated high confidence.
  pub high_confidence_samples: usize,

  /// Weekly-score delta below which the trend counts as flat.
  pub trend_flat_band: f64,

  /// Logging streak length considered strong when bucketing overall health.
  pub strong_streak_days: u32,

  /// Logging streak length below which health degrades a bucket.
  pub min_streak_days: u32,

  /// Start-of-week convention for week windows.
  pub week_starts_on: Weekday,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      pace_margin_pct: 5.0,
      score_weights: ScoreWeights::default(),
      min_correlation_samples: 5,
      min_rule_samples: 5,
      high_confidence_samples: 10,
      trend_flat_band: 3.0,
      strong_streak_days: 7,
      min_streak_days: 3,
      week_starts_on: Weekday::Sun,
    }
  }
}

impl EngineConfig {
  pub fn validate(&self) -> Result<(), EngineError> {
    self.score_weights.validate()?;
    if self.pace_margin_pct < 0.0 {
      return Err(EngineError::InvalidConfig {
        reason: "pace margin must be non-negative".to_string(),
      });
    }
    if self.high_confidence_samples < self.min_rule_samples {
      return Err(EngineError::InvalidConfig {
        reason: "high-confidence sample floor below the rule sample floor".to_string(),
      });
    }
    Ok(())
  }
}
