//! Priority tiers and charger search order.
//!
//! A bus's state-of-charge fraction at arrival selects one of four tiers.
//! Each tier maps to a contiguous range of charger indices, relying on the
//! fleet's slow-then-fast charger partition.
//!
//! | Fraction | Tier | Search order |
//! |----------|------|--------------|
//! | `< high` | Urgent | fast chargers `[num_slow, total)` |
//! | `[high, medium)` | Balanced | all chargers `[0, total)` |
//! | `[medium, low)` | Maintenance | slow chargers `[0, num_slow)` |
//! | `>= low` | Idle | none |
//!
//! Boundary values belong to the higher tier: a fraction of exactly `high`
//! is Balanced, exactly `low` is Idle.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::models::ChargerIndex;

/// State-of-charge fractions separating the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityThresholds {
    /// Below this, the bus is urgent.
    pub high: f64,
    /// Below this (and at or above `high`), the bus is balanced.
    pub medium: f64,
    /// Below this (and at or above `medium`), the bus gets maintenance
    /// charging. Also the charge ceiling for every reservation.
    pub low: f64,
}

impl PriorityThresholds {
    /// Creates thresholds. Expected: `0 < high < medium < low <= 1`.
    pub fn new(high: f64, medium: f64, low: f64) -> Self {
        Self { high, medium, low }
    }
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            high: 0.40,
            medium: 0.70,
            low: 0.90,
        }
    }
}

/// Search priority of a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    /// Nearly depleted: try fast chargers only.
    Urgent,
    /// Try every charger, slow first.
    Balanced,
    /// Top up on slow chargers only.
    Maintenance,
    /// Charged enough: skip this visit.
    Idle,
}

/// Maps a state-of-charge fraction to a tier and a charger search order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriorityClassifier {
    thresholds: PriorityThresholds,
}

impl PriorityClassifier {
    /// Creates a classifier with the given thresholds.
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> &PriorityThresholds {
        &self.thresholds
    }

    /// Classifies a charge fraction (`charge / capacity`).
    ///
    /// Total: every value, including NaN, maps to a tier. NaN compares
    /// false everywhere and falls through to `Idle`.
    pub fn classify(&self, fraction: f64) -> PriorityTier {
        let t = &self.thresholds;
        if fraction < t.high {
            PriorityTier::Urgent
        } else if fraction < t.medium {
            PriorityTier::Balanced
        } else if fraction < t.low {
            PriorityTier::Maintenance
        } else {
            PriorityTier::Idle
        }
    }

    /// Charger indices to probe, in order, for a tier.
    pub fn order_for(
        tier: PriorityTier,
        num_slow: usize,
        num_chargers: usize,
    ) -> Range<ChargerIndex> {
        match tier {
            PriorityTier::Urgent => num_slow..num_chargers,
            PriorityTier::Balanced => 0..num_chargers,
            PriorityTier::Maintenance => 0..num_slow,
            PriorityTier::Idle => 0..0,
        }
    }

    /// Charger indices to probe, in order, for a charge fraction.
    pub fn search_order(
        &self,
        fraction: f64,
        num_slow: usize,
        num_chargers: usize,
    ) -> Range<ChargerIndex> {
        Self::order_for(self.classify(fraction), num_slow, num_chargers)
    }
}
