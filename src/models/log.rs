use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One journal entry per calendar day.
///
/// Every numeric field is optional: "no entry for this day" must stay
/// distinguishable from "entered zero", so aggregates skip `None` rather
/// than coercing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
  pub date: NaiveDate,
  /// 1-5 self-rated energy
  pub energy_level: Option<u8>,
  pub hours_slept: Option<f64>,
  pub work_hours: Option<f64>,
  pub school_hours: Option<f64>,
  /// 1-5 overall day rating
  pub overall_rating: Option<u8>,
  pub sick: bool,
  pub notes: Option<String>,
  #[serde(default)]
  pub accomplishments: Vec<String>,
}

impl DailyLog {
  /// A bare entry for a date with nothing recorded yet.
  pub fn empty(date: NaiveDate) -> Self {
    Self {
      date,
      energy_level: None,
      hours_slept: None,
      work_hours: None,
      school_hours: None,
      overall_rating: None,
      sick: false,
      notes: None,
      accomplishments: Vec::new(),
    }
  }
}
