//! Charge schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Service Rate | Charged visits / visits eligible for charging |
//! | Energy Delivered | Sum of rate × duration over reservations |
//! | Min Charge Fraction | Lowest arrival charge / capacity |
//! | Utilization | Reserved time / horizon, per charger |
//!
//! Chain-start visits are never charged and are not counted as eligible.

use std::collections::BTreeMap;

use crate::models::{ChargeSchedule, ChargerIndex, Fleet, Visit};

/// Charge schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ChargeKpi {
    /// Number of visits in the schedule.
    pub total_visits: usize,
    /// Visits that received a charger.
    pub charged_visits: usize,
    /// Non-seed visits left without a charger.
    pub unassigned_visits: usize,
    /// Charged / eligible visits (1.0 when none are eligible).
    pub service_rate: f64,
    /// Total energy delivered across all reservations.
    pub energy_delivered: f64,
    /// Total reserved charging time.
    pub total_charging_time: f64,
    /// Lowest charge-at-arrival as a fraction of capacity.
    pub min_charge_fraction: f64,
    /// Per-charger utilization (0.0..1.0).
    pub utilization_by_charger: BTreeMap<ChargerIndex, f64>,
    /// Mean utilization over all chargers.
    pub avg_utilization: f64,
}

impl ChargeKpi {
    /// Computes KPIs from a schedule, its fleet and its input visits.
    pub fn calculate(schedule: &ChargeSchedule, fleet: &Fleet, visits: &[Visit]) -> Self {
        let total_visits = schedule.len();
        let charged_visits = schedule.charged_count();
        let seeds = visits.iter().filter(|v| v.is_chain_start).count();
        let eligible = total_visits.saturating_sub(seeds);
        let unassigned_visits = eligible.saturating_sub(charged_visits);

        let service_rate = if eligible == 0 {
            1.0
        } else {
            charged_visits as f64 / eligible as f64
        };

        let horizon = fleet.horizon.duration();
        let mut busy: BTreeMap<ChargerIndex, f64> =
            (0..fleet.num_chargers()).map(|k| (k, 0.0)).collect();
        let mut energy_delivered = 0.0;
        for r in schedule.reservations() {
            *busy.entry(r.charger).or_insert(0.0) += r.duration();
            if let Some(charger) = fleet.charger(r.charger) {
                energy_delivered += charger.energy_for(r.duration());
            }
        }

        let utilization_by_charger: BTreeMap<ChargerIndex, f64> = busy
            .into_iter()
            .map(|(k, t)| (k, if horizon > 0.0 { t / horizon } else { 0.0 }))
            .collect();
        let avg_utilization = if utilization_by_charger.is_empty() {
            0.0
        } else {
            utilization_by_charger.values().sum::<f64>() / utilization_by_charger.len() as f64
        };

        let min_charge_fraction = schedule
            .visits
            .iter()
            .filter_map(|v| {
                fleet
                    .capacity(v.bus)
                    .filter(|&c| c > 0.0)
                    .map(|c| v.charge_at_arrival / c)
            })
            .fold(f64::INFINITY, f64::min);
        let min_charge_fraction = if min_charge_fraction.is_finite() {
            min_charge_fraction
        } else {
            1.0
        };

        Self {
            total_visits,
            charged_visits,
            unassigned_visits,
            service_rate,
            energy_delivered,
            total_charging_time: schedule.total_charging_time(),
            min_charge_fraction,
            utilization_by_charger,
            avg_utilization,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_service_rate: f64, min_charge_fraction: f64) -> bool {
        self.service_rate >= min_service_rate && self.min_charge_fraction >= min_charge_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ScheduleWalker;

    fn fleet() -> Fleet {
        Fleet::new(0.0, 20.0)
            .with_bus(100.0)
            .with_slow_chargers(1, 10.0)
            .with_fast_chargers(1, 50.0)
    }

    fn visits() -> Vec<Visit> {
        vec![
            Visit::new(0, 0, 1.0, 2.0).with_discharge(70.0).with_next(1).chain_start(0.9),
            Visit::new(1, 0, 3.0, 4.0).with_discharge(20.0).with_next(2),
            Visit::new(2, 0, 8.0, 9.0).with_discharge(5.0),
        ]
    }

    #[test]
    fn test_kpi_calculation() {
        let fleet = fleet();
        let visits = visits();
        let schedule = ScheduleWalker::new(&fleet).run(&visits).unwrap();
        let kpi = ChargeKpi::calculate(&schedule, &fleet, &visits);

        // Visit 1 on fast charger [3, 4); visit 2 (50%) on slow charger [8, 9)
        assert_eq!(kpi.total_visits, 3);
        assert_eq!(kpi.charged_visits, 2);
        assert_eq!(kpi.unassigned_visits, 0);
        assert!((kpi.service_rate - 1.0).abs() < 1e-10);
        assert!((kpi.energy_delivered - 60.0).abs() < 1e-10);
        assert!((kpi.total_charging_time - 2.0).abs() < 1e-10);
        assert!((kpi.min_charge_fraction - 0.2).abs() < 1e-10);
        assert!((kpi.utilization_by_charger[&0] - 0.05).abs() < 1e-10);
        assert!((kpi.utilization_by_charger[&1] - 0.05).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.05).abs() < 1e-10);

        assert!(kpi.meets_thresholds(1.0, 0.2));
        assert!(!kpi.meets_thresholds(1.0, 0.3));
    }

    #[test]
    fn test_kpi_empty() {
        let fleet = fleet();
        let schedule = ChargeSchedule::new(fleet.num_chargers());
        let kpi = ChargeKpi::calculate(&schedule, &fleet, &[]);
        assert_eq!(kpi.total_visits, 0);
        assert!((kpi.service_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.energy_delivered, 0.0);
        assert!((kpi.min_charge_fraction - 1.0).abs() < 1e-10);
        assert_eq!(kpi.avg_utilization, 0.0);
    }
}
