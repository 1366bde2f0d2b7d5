//! Charger model.
//!
//! Chargers are the depot resources visits are assigned to. Each belongs
//! to one of two classes with a distinct charge rate (energy per time unit).

use serde::{Deserialize, Serialize};

/// Index of a charger in [`Fleet::chargers`](super::Fleet).
pub type ChargerIndex = usize;

/// A physical charging point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charger {
    /// Position in the fleet's charger list.
    pub index: ChargerIndex,
    /// Charger classification.
    pub class: ChargerClass,
    /// Energy delivered per time unit.
    pub rate: f64,
}

/// Charger classification.
///
/// Slow chargers occupy the low indices of a fleet, fast chargers the
/// high ones; the priority tiers rely on that partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargerClass {
    /// Overnight / maintenance charger.
    Slow,
    /// Opportunity charger.
    Fast,
}

impl Charger {
    /// Creates a new charger.
    pub fn new(index: ChargerIndex, class: ChargerClass, rate: f64) -> Self {
        Self { index, class, rate }
    }

    /// Creates a slow charger.
    pub fn slow(index: ChargerIndex, rate: f64) -> Self {
        Self::new(index, ChargerClass::Slow, rate)
    }

    /// Creates a fast charger.
    pub fn fast(index: ChargerIndex, rate: f64) -> Self {
        Self::new(index, ChargerClass::Fast, rate)
    }

    /// Whether this is a fast charger.
    #[inline]
    pub fn is_fast(&self) -> bool {
        self.class == ChargerClass::Fast
    }

    /// Energy delivered over `duration` time units.
    #[inline]
    pub fn energy_for(&self, duration: f64) -> f64 {
        self.rate * duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charger_classes() {
        let s = Charger::slow(0, 50.0);
        assert_eq!(s.class, ChargerClass::Slow);
        assert!(!s.is_fast());

        let f = Charger::fast(1, 300.0);
        assert_eq!(f.class, ChargerClass::Fast);
        assert!(f.is_fast());
    }

    #[test]
    fn test_energy_for() {
        let c = Charger::slow(0, 50.0);
        assert!((c.energy_for(1.5) - 75.0).abs() < 1e-10);
    }
}
