//! Error types.
//!
//! Only malformed configuration or input is an error. A visit that finds
//! no feasible charger is reported as data (`charger = None`) in the
//! [`ChargeSchedule`](crate::models::ChargeSchedule).

use thiserror::Error;

use crate::models::VisitIndex;
use crate::validation::ValidationError;

/// Invalid [`SchedulerConfig`](crate::config::SchedulerConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A threshold lies outside (0, 1].
    #[error("threshold `{name}` must lie in (0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    /// Thresholds are not strictly increasing.
    #[error("thresholds must satisfy high < medium < low, got {high}, {medium}, {low}")]
    ThresholdsNotIncreasing { high: f64, medium: f64, low: f64 },
    /// Tolerance is negative or not finite.
    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

/// Failure of a schedule walk.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// Input validation found one or more problems.
    #[error("invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<ValidationError>),
    /// A visit was reached before any charge was propagated to it.
    #[error("visit {visit} has no arrival charge")]
    MissingCharge { visit: VisitIndex },
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}
