//! Fleet model: buses, chargers and the planning horizon.

use serde::{Deserialize, Serialize};

use super::{BusIndex, Charger, ChargerClass, ChargerIndex, TimeWindow};

/// A bus with its battery capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    /// Position in the fleet's bus list.
    pub id: BusIndex,
    /// Battery capacity (energy units).
    pub capacity: f64,
}

/// Fleet-level constants consumed by the scheduler.
///
/// # Charger Partition
/// Chargers are stored slow-first: indices `[0, num_slow)` are slow and
/// `[num_slow, num_chargers)` are fast. Adding slow chargers after fast
/// ones breaks the partition and is rejected by
/// [`validate_input`](crate::validation::validate_input).
///
/// # Example
///
/// ```
/// use u_charge::models::Fleet;
///
/// let fleet = Fleet::new(0.0, 24.0)
///     .with_bus(200.0)
///     .with_bus(200.0)
///     .with_slow_chargers(2, 40.0)
///     .with_fast_chargers(1, 150.0);
///
/// assert_eq!(fleet.num_slow(), 2);
/// assert_eq!(fleet.num_chargers(), 3);
/// assert!(fleet.charger(2).unwrap().is_fast());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    /// Planning horizon `[BOD, EOD)`.
    pub horizon: TimeWindow,
    /// Buses, indexed by [`BusIndex`].
    pub buses: Vec<Bus>,
    /// Chargers, slow first.
    pub chargers: Vec<Charger>,
}

impl Fleet {
    /// Creates an empty fleet over the horizon `[begin, end)`.
    pub fn new(begin: f64, end: f64) -> Self {
        Self {
            horizon: TimeWindow::new(begin, end),
            buses: Vec::new(),
            chargers: Vec::new(),
        }
    }

    /// Adds a bus with the given capacity.
    pub fn with_bus(mut self, capacity: f64) -> Self {
        let id = self.buses.len();
        self.buses.push(Bus { id, capacity });
        self
    }

    /// Adds `count` slow chargers.
    pub fn with_slow_chargers(self, count: usize, rate: f64) -> Self {
        self.with_chargers(ChargerClass::Slow, count, rate)
    }

    /// Adds `count` fast chargers.
    pub fn with_fast_chargers(self, count: usize, rate: f64) -> Self {
        self.with_chargers(ChargerClass::Fast, count, rate)
    }

    fn with_chargers(mut self, class: ChargerClass, count: usize, rate: f64) -> Self {
        for _ in 0..count {
            let index = self.chargers.len();
            self.chargers.push(Charger::new(index, class, rate));
        }
        self
    }

    /// Number of slow chargers.
    pub fn num_slow(&self) -> usize {
        self.chargers
            .iter()
            .filter(|c| c.class == ChargerClass::Slow)
            .count()
    }

    /// Total number of chargers.
    #[inline]
    pub fn num_chargers(&self) -> usize {
        self.chargers.len()
    }

    /// Number of buses.
    #[inline]
    pub fn num_buses(&self) -> usize {
        self.buses.len()
    }

    /// Returns a charger by index.
    pub fn charger(&self, index: ChargerIndex) -> Option<&Charger> {
        self.chargers.get(index)
    }

    /// Returns a bus's capacity.
    pub fn capacity(&self, bus: BusIndex) -> Option<f64> {
        self.buses.get(bus).map(|b| b.capacity)
    }

    /// Whether the slow-then-fast charger partition holds.
    pub fn is_partitioned(&self) -> bool {
        let num_slow = self.num_slow();
        self.chargers
            .iter()
            .all(|c| (c.index < num_slow) == (c.class == ChargerClass::Slow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_builder() {
        let fleet = Fleet::new(4.0, 28.0)
            .with_bus(300.0)
            .with_bus(250.0)
            .with_slow_chargers(3, 40.0)
            .with_fast_chargers(2, 200.0);

        assert_eq!(fleet.num_buses(), 2);
        assert_eq!(fleet.num_slow(), 3);
        assert_eq!(fleet.num_chargers(), 5);
        assert_eq!(fleet.capacity(1), Some(250.0));
        assert_eq!(fleet.capacity(2), None);
        assert!((fleet.horizon.duration() - 24.0).abs() < 1e-10);

        for (i, c) in fleet.chargers.iter().enumerate() {
            assert_eq!(c.index, i);
        }
        assert!(!fleet.charger(2).unwrap().is_fast());
        assert!(fleet.charger(3).unwrap().is_fast());
        assert!(fleet.is_partitioned());
    }

    #[test]
    fn test_broken_partition() {
        let fleet = Fleet::new(0.0, 24.0)
            .with_fast_chargers(1, 200.0)
            .with_slow_chargers(1, 40.0);
        assert!(!fleet.is_partitioned());
    }
}
