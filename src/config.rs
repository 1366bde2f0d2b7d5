//! Scheduler configuration.
//!
//! Every field has a default, so a partially specified configuration
//! deserializes to a usable one.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::priority::PriorityThresholds;

/// Default tolerance below which intervals and durations count as zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// Tunable constants of the heuristic scheduler.
///
/// # Example
///
/// ```
/// use u_charge::config::SchedulerConfig;
///
/// let config = SchedulerConfig::default().with_tolerance(1e-3);
/// assert!(config.validate().is_ok());
/// assert!((config.thresholds.low - 0.90).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// State-of-charge fractions separating the priority tiers.
    pub thresholds: PriorityThresholds,
    /// Intervals and reservations no longer than this are discarded.
    pub tolerance: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            thresholds: PriorityThresholds::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority thresholds.
    pub fn with_thresholds(mut self, thresholds: PriorityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the zero-length tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks that thresholds are strictly increasing within (0, 1] and
    /// that the tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PriorityThresholds { high, medium, low } = self.thresholds;
        for (name, value) in [("high", high), ("medium", medium), ("low", low)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if !(high < medium && medium < low) {
            return Err(ConfigError::ThresholdsNotIncreasing { high, medium, low });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = SchedulerConfig::default();
        assert!((c.thresholds.high - 0.40).abs() < 1e-12);
        assert!((c.thresholds.medium - 0.70).abs() < 1e-12);
        assert!((c.thresholds.low - 0.90).abs() < 1e-12);
        assert!((c.tolerance - 1e-2).abs() < 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: SchedulerConfig = serde_json::from_str(r#"{"tolerance": 0.5}"#).unwrap();
        assert!((c.tolerance - 0.5).abs() < 1e-12);
        assert_eq!(c.thresholds, PriorityThresholds::default());

        let c: SchedulerConfig =
            serde_json::from_str(r#"{"thresholds": {"high": 0.3}}"#).unwrap();
        assert!((c.thresholds.high - 0.3).abs() < 1e-12);
        assert!((c.thresholds.medium - 0.70).abs() < 1e-12);
    }

    #[test]
    fn test_json_round_trip() {
        let c = SchedulerConfig::default()
            .with_thresholds(PriorityThresholds::new(0.2, 0.5, 0.8))
            .with_tolerance(1e-3);
        let json = serde_json::to_string(&c).unwrap();
        let back: SchedulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn test_invalid_thresholds() {
        let c = SchedulerConfig::default()
            .with_thresholds(PriorityThresholds::new(0.7, 0.4, 0.9));
        assert!(matches!(
            c.validate(),
            Err(ConfigError::ThresholdsNotIncreasing { .. })
        ));

        let c = SchedulerConfig::default()
            .with_thresholds(PriorityThresholds::new(0.4, 0.7, 1.5));
        assert!(matches!(
            c.validate(),
            Err(ConfigError::ThresholdOutOfRange { name: "low", .. })
        ));
    }

    #[test]
    fn test_invalid_tolerance() {
        let c = SchedulerConfig::default().with_tolerance(-1.0);
        assert!(matches!(c.validate(), Err(ConfigError::InvalidTolerance(_))));

        let c = SchedulerConfig::default().with_tolerance(f64::NAN);
        assert!(c.validate().is_err());
    }
}
