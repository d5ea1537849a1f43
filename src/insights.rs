//! Pattern and correlation analysis
//!
//! Exploratory layer over the full history. Candidate factor pairs are
//! declarative descriptors processed by one generic Pearson routine, and the
//! rule-based patterns are a fixed table of group-comparison heuristics.
//! Findings below the evidence floors are omitted, never reported with
//! inflated confidence.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{DailyLog, Goal, Habit, HabitCompletion, Task};
use crate::score::WeeklyScore;
use crate::streaks::logging_streak;
use crate::timeutil::week_bounds;

/// Completion-rate gap (percentage points) a sick day must show before the
/// sick-day rule fires.
pub const SICK_DELTA_PCT: f64 = 15.0;
/// Gap threshold for the low-energy and short-sleep rules.
pub const FACTOR_DELTA_PCT: f64 = 10.0;
/// Energy at or below this counts as a low-energy day; at or above
/// `HIGH_ENERGY_MIN` as high. Days in between stay out of the comparison.
pub const LOW_ENERGY_MAX: f64 = 2.0;
pub const HIGH_ENERGY_MIN: f64 = 4.0;
/// Sleep below this counts as short; at or above `ADEQUATE_SLEEP_HOURS` as
/// adequate.
pub const SHORT_SLEEP_HOURS: f64 = 6.5;
pub const ADEQUATE_SLEEP_HOURS: f64 = 7.0;
/// |r| at or above this counts as a strong correlation for the key insight.
pub const STRONG_CORRELATION: f64 = 0.5;
/// |r| below this reads as no meaningful relationship.
pub const WEAK_CORRELATION: f64 = 0.25;

// ---------------------------------------------------------------------------
/// Per-day joined facts
// ---------------------------------------------------------------------------

/// One calendar day's log fields joined with its task outcomes. Built once
/// and shared by the correlation and pattern passes.
#[derive(Debug, Clone)]
pub struct DayFacts {
  pub date: NaiveDate,
  pub energy_level: Option<f64>,
  pub hours_slept: Option<f64>,
  pub work_hours: Option<f64>,
  pub overall_rating: Option<f64>,
  pub sick: bool,
  pub tasks_planned: u32,
  pub tasks_completed: u32,
}

impl DayFacts {
  fn empty(date: NaiveDate) -> Self {
    Self {
      date,
      energy_level: None,
      hours_slept: None,
      work_hours: None,
      overall_rating: None,
      sick: false,
      tasks_planned: 0,
      tasks_completed: 0,
    }
  }

  /// Task completion rate for the day, None when nothing was planned.
  /// A day with zero planned tasks is "no observation", not 0%.
  pub fn completion_rate(&self) -> Option<f64> {
    if self.tasks_planned == 0 {
      return None;
    }
    Some(100.0 * self.tasks_completed as f64 / self.tasks_planned as f64)
  }
}

/// Join logs and tasks into per-day facts, keyed by date. Duplicate logs for
/// one day collapse to the latest record.
pub fn build_day_facts(logs: &[DailyLog], tasks: &[Task]) -> BTreeMap<NaiveDate, DayFacts> {
  let mut facts: BTreeMap<NaiveDate, DayFacts> = BTreeMap::new();

  for log in logs {
    let f = facts
      .entry(log.date)
      .or_insert_with(|| DayFacts::empty(log.date));
    f.energy_level = log.energy_level.map(f64::from);
    f.hours_slept = log.hours_slept;
    f.work_hours = log.work_hours;
    f.overall_rating = log.overall_rating.map(f64::from);
    f.sick = log.sick;
  }

  for task in tasks {
    let f = facts
      .entry(task.planned_date)
      .or_insert_with(|| DayFacts::empty(task.planned_date));
    f.tasks_planned += 1;
    if task.is_completed() {
      f.tasks_completed += 1;
    }
  }

  facts
}

// ---------------------------------------------------------------------------
/// Correlation descriptors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
  HoursSlept,
  EnergyLevel,
  WorkHours,
  OverallRating,
  TaskCompletionRate,
}

impl Factor {
  pub fn label(&self) -> &'static str {
    match self {
      Self::HoursSlept => "hours slept",
      Self::EnergyLevel => "energy level",
      Self::WorkHours => "work hours",
      Self::OverallRating => "overall rating",
      Self::TaskCompletionRate => "task completion rate",
    }
  }

  fn extract(&self, facts: &DayFacts) -> Option<f64> {
    match self {
      Self::HoursSlept => facts.hours_slept,
      Self::EnergyLevel => facts.energy_level,
      Self::WorkHours => facts.work_hours,
      Self::OverallRating => facts.overall_rating,
      Self::TaskCompletionRate => facts.completion_rate(),
    }
  }
}

/// One candidate factor pair. `lag_days` shifts the second factor forward,
/// so sleep can be compared against the next day's output.
#[derive(Debug, Clone)]
pub struct CorrelationSpec {
  pub factor_a: Factor,
  pub factor_b: Factor,
  pub lag_days: i64,
  pub min_samples: usize,
  pub label: &'static str,
}

/// The configured factor pairs the analyzer examines.
pub fn default_correlation_specs(config: &EngineConfig) -> Vec<CorrelationSpec> {
  let floor = config.min_correlation_samples;
  vec![
    CorrelationSpec {
      factor_a: Factor::HoursSlept,
      factor_b: Factor::TaskCompletionRate,
      lag_days: 1,
      min_samples: floor,
      label: "sleep vs next-day completion",
    },
    CorrelationSpec {
      factor_a: Factor::EnergyLevel,
      factor_b: Factor::OverallRating,
      lag_days: 0,
      min_samples: floor,
      label: "energy vs day rating",
    },
    CorrelationSpec {
      factor_a: Factor::EnergyLevel,
      factor_b: Factor::TaskCompletionRate,
      lag_days: 0,
      min_samples: floor,
      label: "energy vs completion",
    },
    CorrelationSpec {
      factor_a: Factor::WorkHours,
      factor_b: Factor::OverallRating,
      lag_days: 0,
      min_samples: floor,
      label: "work hours vs day rating",
    },
    CorrelationSpec {
      factor_a: Factor::HoursSlept,
      factor_b: Factor::EnergyLevel,
      lag_days: 1,
      min_samples: floor,
      label: "sleep vs next-day energy",
    },
  ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationFinding {
  pub factor_a: String,
  pub factor_b: String,
  /// Pearson coefficient in [-1, 1].
  pub correlation: f64,
  pub samples: usize,
  pub recommendation: String,
}

/// Run one spec against the day facts. Returns None when the pair has too
/// few paired observations or a factor with zero variance.
fn correlate(
  spec: &CorrelationSpec,
  facts: &BTreeMap<NaiveDate, DayFacts>,
) -> Option<CorrelationFinding> {
  let mut xs = Vec::new();
  let mut ys = Vec::new();

  for (date, day) in facts {
    let Some(a) = spec.factor_a.extract(day) else {
      continue;
    };
    let Some(other) = facts.get(&(*date + Duration::days(spec.lag_days))) else {
      continue;
    };
    if let Some(b) = spec.factor_b.extract(other) {
      xs.push(a);
      ys.push(b);
    }
  }

  if xs.len() < spec.min_samples {
    return None;
  }

  let r = pearson(&xs, &ys)?;
  Some(CorrelationFinding {
    factor_a: spec.factor_a.label().to_string(),
    factor_b: spec.factor_b.label().to_string(),
    correlation: r,
    samples: xs.len(),
    recommendation: correlation_recommendation(spec, r),
  })
}

fn correlation_recommendation(spec: &CorrelationSpec, r: f64) -> String {
  if r.abs() < WEAK_CORRELATION {
    return format!(
      "No meaningful relationship between {} and {} so far",
      spec.factor_a.label(),
      spec.factor_b.label()
    );
  }
  let strength = if r.abs() >= STRONG_CORRELATION {
    "strongly"
  } else {
    "moderately"
  };
  let direction = if r > 0.0 { "tracks with" } else { "runs against" };
  format!(
    "Your {} {} {} your {} (r={:.2})",
    spec.factor_a.label(),
    strength,
    direction,
    spec.factor_b.label(),
    r
  )
}

/// Standard Pearson coefficient. None for degenerate samples (fewer than two
/// points or zero variance in either series), which would make the
/// coefficient undefined.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
  let n = xs.len();
  if n != ys.len() || n < 2 {
    return None;
  }

  let mean_x = xs.iter().sum::<f64>() / n as f64;
  let mean_y = ys.iter().sum::<f64>() / n as f64;

  let mut cov = 0.0;
  let mut var_x = 0.0;
  let mut var_y = 0.0;
  for i in 0..n {
    let dx = xs[i] - mean_x;
    let dy = ys[i] - mean_y;
    cov += dx * dy;
    var_x += dx * dx;
    var_y += dy * dy;
  }

  if var_x == 0.0 || var_y == 0.0 {
    return None;
  }
  Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
/// Rule-based patterns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
  Low,
  Medium,
  High,
}

impl Confidence {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternInsight {
  pub insight: String,
  pub confidence: Confidence,
  pub recommendation: String,
  /// Completion-rate gap behind the insight, kept for ranking.
  pub delta_pct: f64,
}

/// One group-comparison heuristic: partition days into an affected group
/// (true) and a baseline (false), then compare mean completion rates.
struct PatternRule {
  subject: &'static str,
  partition: fn(&DayFacts) -> Option<bool>,
  min_delta_pct: f64,
  recommendation: &'static str,
}

fn pattern_rules() -> Vec<PatternRule> {
  vec![
    PatternRule {
      subject: "sick days",
      partition: |f| Some(f.sick),
      min_delta_pct: SICK_DELTA_PCT,
      recommendation: "Plan lighter days when you are sick instead of carrying a full task list",
    },
    PatternRule {
      subject: "low-energy days",
      partition: |f| {
        let energy = f.energy_level?;
        if energy <= LOW_ENERGY_MAX {
          Some(true)
        } else if energy >= HIGH_ENERGY_MIN {
          Some(false)
        } else {
          None
        }
      },
      min_delta_pct: FACTOR_DELTA_PCT,
      recommendation: "Schedule demanding tasks on high-energy days and keep low-energy days light",
    },
    PatternRule {
      subject: "short-sleep days",
      partition: |f| {
        let slept = f.hours_slept?;
        if slept < SHORT_SLEEP_HOURS {
          Some(true)
        } else if slept >= ADEQUATE_SLEEP_HOURS {
          Some(false)
        } else {
          None
        }
      },
      min_delta_pct: FACTOR_DELTA_PCT,
      recommendation: "Protect your sleep; short nights show up in the next day's output",
    },
  ]
}

/// Evaluate one rule. Each heuristic independently produces zero or one
/// insight; both groups must clear the sample floor.
fn evaluate_rule(
  rule: &PatternRule,
  facts: &BTreeMap<NaiveDate, DayFacts>,
  config: &EngineConfig,
) -> Option<PatternInsight> {
  let mut affected = Vec::new();
  let mut baseline = Vec::new();

  for day in facts.values() {
    let Some(rate) = day.completion_rate() else {
      continue;
    };
    match (rule.partition)(day) {
      Some(true) => affected.push(rate),
      Some(false) => baseline.push(rate),
      None => {}
    }
  }

  let group_floor = affected.len().min(baseline.len());
  if group_floor < config.min_rule_samples {
    return None;
  }

  let mean_affected = affected.iter().sum::<f64>() / affected.len() as f64;
  let mean_baseline = baseline.iter().sum::<f64>() / baseline.len() as f64;
  let delta = mean_baseline - mean_affected;
  if delta.abs() < rule.min_delta_pct {
    return None;
  }

  let direction = if delta > 0.0 { "drops" } else { "rises" };
  let confidence = if group_floor >= config.high_confidence_samples {
    Confidence::High
  } else {
    Confidence::Medium
  };

  Some(PatternInsight {
    insight: format!(
      "Task completion {} by {:.0} points on {} ({:.0}% vs {:.0}%)",
      direction,
      delta.abs(),
      rule.subject,
      mean_affected,
      mean_baseline
    ),
    confidence,
    recommendation: rule.recommendation.to_string(),
    delta_pct: delta,
  })
}

// ---------------------------------------------------------------------------
/// Overall health and the assembled report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTrend {
  Improving,
  Flat,
  Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallHealth {
  Thriving,
  Steady,
  Wobbly,
  Struggling,
}

/// Trend between the two most recent weekly scores. Flat when the delta is
/// inside the configured band, or when there is no previous week to compare.
pub fn score_trend(previous: Option<u8>, current: u8, config: &EngineConfig) -> ScoreTrend {
  let Some(previous) = previous else {
    return ScoreTrend::Flat;
  };
  let delta = current as f64 - previous as f64;
  if delta > config.trend_flat_band {
    ScoreTrend::Improving
  } else if delta < -config.trend_flat_band {
    ScoreTrend::Declining
  } else {
    ScoreTrend::Flat
  }
}

/// Bucket the week trend and current logging streak into one of four bands.
pub fn overall_health(trend: ScoreTrend, current_streak: u32, config: &EngineConfig) -> OverallHealth {
  match trend {
    ScoreTrend::Improving if current_streak >= config.strong_streak_days => {
      OverallHealth::Thriving
    }
    ScoreTrend::Improving => OverallHealth::Steady,
    ScoreTrend::Flat if current_streak >= config.strong_streak_days => OverallHealth::Steady,
    ScoreTrend::Declining if current_streak < config.min_streak_days => {
      OverallHealth::Struggling
    }
    _ => OverallHealth::Wobbly,
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
  pub correlations: Vec<CorrelationFinding>,
  pub patterns: Vec<PatternInsight>,
  pub score_trend: ScoreTrend,
  pub overall_health: OverallHealth,
  /// The single strongest finding, when any finding cleared its floor.
  pub key_insight: Option<String>,
}

/// Run the full exploratory analysis over the history as of `on`.
pub fn analyze(
  tasks: &[Task],
  goals: &[Goal],
  habits: &[Habit],
  completions: &[HabitCompletion],
  logs: &[DailyLog],
  on: NaiveDate,
  config: &EngineConfig,
) -> AnalysisReport {
  let facts = build_day_facts(logs, tasks);

  let correlations: Vec<CorrelationFinding> = default_correlation_specs(config)
    .iter()
    .filter_map(|spec| correlate(spec, &facts))
    .collect();

  let patterns: Vec<PatternInsight> = pattern_rules()
    .iter()
    .filter_map(|rule| evaluate_rule(rule, &facts, config))
    .collect();

  let this_week = week_bounds(on, config.week_starts_on);
  let last_week = week_bounds(on - Duration::days(7), config.week_starts_on);
  let current =
    WeeklyScore::compute(this_week, tasks, goals, habits, completions, logs, config);
  let previous =
    WeeklyScore::compute(last_week, tasks, goals, habits, completions, logs, config);

  // A week with no records at all carries no trend signal
  let has_previous_data = logs.iter().any(|l| last_week.contains(l.date))
    || tasks.iter().any(|t| last_week.contains(t.planned_date))
    || completions.iter().any(|c| last_week.contains(c.date));
  let trend = score_trend(
    has_previous_data.then_some(previous.total),
    current.total,
    config,
  );

  let streak = logging_streak(logs, on);
  let health = overall_health(trend, streak, config);
  let key_insight = pick_key_insight(&correlations, &patterns);

  AnalysisReport {
    correlations,
    patterns,
    score_trend: trend,
    overall_health: health,
    key_insight,
  }
}

/// Precedence: high-confidence pattern, then a strong correlation, then any
/// remaining pattern, then the strongest remaining correlation.
fn pick_key_insight(
  correlations: &[CorrelationFinding],
  patterns: &[PatternInsight],
) -> Option<String> {
  let best_pattern = patterns.iter().max_by(|a, b| {
    (a.confidence, a.delta_pct.abs())
      .partial_cmp(&(b.confidence, b.delta_pct.abs()))
      .unwrap_or(std::cmp::Ordering::Equal)
  });
  let best_correlation = correlations.iter().max_by(|a, b| {
    a.correlation
      .abs()
      .partial_cmp(&b.correlation.abs())
      .unwrap_or(std::cmp::Ordering::Equal)
  });

  if let Some(p) = best_pattern {
    if p.confidence == Confidence::High {
      return Some(p.insight.clone());
    }
  }
  if let Some(c) = best_correlation {
    if c.correlation.abs() >= STRONG_CORRELATION {
      return Some(c.recommendation.clone());
    }
  }
  if let Some(p) = best_pattern {
    return Some(p.insight.clone());
  }
  best_correlation.map(|c| c.recommendation.clone())
}
