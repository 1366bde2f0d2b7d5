//! Synthetic fleet and visit generation.
//!
//! Produces valid, arrival-sorted instances for tests and benchmarks. Each
//! bus alternates depot visits and routes from a random offset until the
//! horizon ends; route discharge is proportional to route length.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Fleet, Visit};

/// Parameters of a synthetic instance. Ranges are `(min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetGenerator {
    /// Number of buses.
    pub num_buses: usize,
    /// Number of slow chargers.
    pub num_slow: usize,
    /// Number of fast chargers.
    pub num_fast: usize,
    /// Slow charger rate.
    pub slow_rate: f64,
    /// Fast charger rate.
    pub fast_rate: f64,
    /// Battery capacity of every bus.
    pub capacity: f64,
    /// Horizon `(BOD, EOD)`.
    pub horizon: (f64, f64),
    /// Depot dwell time range.
    pub dwell: (f64, f64),
    /// Route duration range.
    pub route: (f64, f64),
    /// Energy consumed per route time unit.
    pub consumption: f64,
    /// Initial charge fraction range at chain start.
    pub initial_charge: (f64, f64),
}

impl Default for FleetGenerator {
    fn default() -> Self {
        Self {
            num_buses: 10,
            num_slow: 4,
            num_fast: 2,
            slow_rate: 40.0,
            fast_rate: 150.0,
            capacity: 300.0,
            horizon: (0.0, 24.0),
            dwell: (0.25, 3.0),
            route: (1.0, 4.0),
            consumption: 35.0,
            initial_charge: (0.5, 1.0),
        }
    }
}

impl FleetGenerator {
    /// Creates the default generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of buses.
    pub fn with_buses(mut self, num_buses: usize) -> Self {
        self.num_buses = num_buses;
        self
    }

    /// Sets the charger counts.
    pub fn with_chargers(mut self, num_slow: usize, num_fast: usize) -> Self {
        self.num_slow = num_slow;
        self.num_fast = num_fast;
        self
    }

    /// Builds the fleet described by this generator.
    pub fn fleet(&self) -> Fleet {
        let (begin, end) = self.horizon;
        (0..self.num_buses)
            .fold(Fleet::new(begin, end), |f, _| f.with_bus(self.capacity))
            .with_slow_chargers(self.num_slow, self.slow_rate)
            .with_fast_chargers(self.num_fast, self.fast_rate)
    }

    /// Generates a fleet and its arrival-sorted, chained visits.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> (Fleet, Vec<Visit>) {
        let (begin, end) = self.horizon;

        // (bus, sequence within bus, visit)
        let mut raw: Vec<(usize, usize, Visit)> = Vec::new();
        for bus in 0..self.num_buses {
            let mut t = begin + sample(rng, (0.0, 2.0));
            let mut seq = 0;
            loop {
                let deadline = t + sample(rng, self.dwell);
                if deadline >= end {
                    break;
                }
                let route = sample(rng, self.route);
                let mut visit =
                    Visit::new(0, bus, t, deadline).with_discharge(self.consumption * route);
                if seq == 0 {
                    visit = visit.chain_start(sample(rng, self.initial_charge));
                }
                raw.push((bus, seq, visit));
                seq += 1;
                t = deadline + route;
            }
        }

        raw.sort_by(|a, b| {
            a.2.arrival
                .total_cmp(&b.2.arrival)
                .then(a.0.cmp(&b.0))
                .then(a.1.cmp(&b.1))
        });

        // Position of (bus, seq) after sorting
        let mut position = vec![Vec::new(); self.num_buses];
        for (i, (bus, seq, _)) in raw.iter().enumerate() {
            let slots: &mut Vec<usize> = &mut position[*bus];
            if slots.len() <= *seq {
                slots.resize(*seq + 1, 0);
            }
            slots[*seq] = i;
        }

        let visits = raw
            .into_iter()
            .enumerate()
            .map(|(i, (bus, seq, mut visit))| {
                visit.id = i;
                visit.next_visit = position[bus].get(seq + 1).copied();
                visit
            })
            .collect();

        (self.fleet(), visits)
    }
}

fn sample<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_input_is_valid() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (fleet, visits) = FleetGenerator::new().generate(&mut rng);
            assert!(!visits.is_empty());
            assert!(validate_input(&fleet, &visits).is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn test_one_chain_per_bus() {
        let mut rng = StdRng::seed_from_u64(7);
        let gen = FleetGenerator::new().with_buses(5);
        let (fleet, visits) = gen.generate(&mut rng);
        assert_eq!(fleet.num_buses(), 5);
        let starts = visits.iter().filter(|v| v.is_chain_start).count();
        assert_eq!(starts, 5);

        // Following a chain stays on one bus and moves forward in time
        for start in visits.iter().filter(|v| v.is_chain_start) {
            let mut current = start;
            while let Some(next) = current.next_visit {
                let n = &visits[next];
                assert_eq!(n.bus, start.bus);
                assert!(n.arrival > current.deadline);
                current = n;
            }
        }
    }

    #[test]
    fn test_same_seed_same_instance() {
        let gen = FleetGenerator::new();
        let a = gen.generate(&mut StdRng::seed_from_u64(42));
        let b = gen.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fleet_shape() {
        let fleet = FleetGenerator::new().with_chargers(3, 1).fleet();
        assert_eq!(fleet.num_slow(), 3);
        assert_eq!(fleet.num_chargers(), 4);
        assert!(fleet.is_partitioned());
    }
}
