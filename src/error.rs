use thiserror::Error;

/// Boundary errors for the metrics engine.
///
/// Once input has passed the boundary (dates parsed, config validated), every
/// computation in this crate is total and returns values, never errors.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("invalid date '{value}': expected yyyy-MM-dd")]
  InvalidDate { value: String },

  #[error("invalid config: {reason}")]
  InvalidConfig { reason: String },
}
