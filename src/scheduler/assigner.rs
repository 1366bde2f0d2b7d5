//! Greedy first-fit charger assignment for a single visit.
//!
//! # Algorithm
//!
//! 1. Classify the bus's charge fraction into a tier; the tier fixes the
//!    charger search order.
//! 2. For each charger in order, for each free interval (ascending), find
//!    a slot and estimate the resulting charge.
//! 3. Accept the first slot whose (possibly shortened) duration exceeds
//!    the tolerance and reserve it on that charger's timeline.
//!
//! The first fit is taken as-is; alternative chargers are never compared.
//!
//! # Complexity
//! O(c * i) per visit where c=chargers in the search order, i=free
//! intervals per charger.

use tracing::{debug, trace};

use crate::config::SchedulerConfig;
use crate::models::{ChargerIndex, Fleet, Reservation, Visit};
use crate::priority::{PriorityClassifier, PriorityTier};

use super::charge::{ChargeEstimate, ChargeEstimator};
use super::slot::{Slot, SlotFinder};
use super::timeline::ChargerTimeline;

/// Result of assigning one visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignOutcome {
    /// A charger was reserved.
    Charged {
        /// The reservation made.
        reservation: Reservation,
        /// Charge on arrival at the bus's next visit.
        charge_after_route: f64,
        /// Tier the visit was searched under.
        tier: PriorityTier,
    },
    /// No charging at this visit.
    Unassigned {
        /// Charge at arrival, unchanged. The route's discharge is still due.
        charge: f64,
        /// Tier the visit was searched under.
        tier: PriorityTier,
    },
}

impl AssignOutcome {
    /// The reservation, if one was made.
    pub fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::Charged { reservation, .. } => Some(reservation),
            Self::Unassigned { .. } => None,
        }
    }

    /// The assigned charger, if any.
    pub fn charger(&self) -> Option<ChargerIndex> {
        self.reservation().map(|r| r.charger)
    }

    /// The tier the visit was classified into.
    pub fn tier(&self) -> PriorityTier {
        match self {
            Self::Charged { tier, .. } | Self::Unassigned { tier, .. } => *tier,
        }
    }

    /// Charge on arrival at the next visit after a route consuming
    /// `discharge`, clamped at zero.
    pub fn charge_after_route(&self, discharge: f64) -> f64 {
        match self {
            Self::Charged {
                charge_after_route, ..
            } => *charge_after_route,
            Self::Unassigned { charge, .. } => (charge - discharge).max(0.0),
        }
    }
}

/// Assigns visits to chargers, owning the per-charger timelines.
#[derive(Debug, Clone)]
pub struct ChargerAssigner<'a> {
    fleet: &'a Fleet,
    classifier: PriorityClassifier,
    finder: SlotFinder,
    estimator: ChargeEstimator,
    timelines: Vec<ChargerTimeline>,
    tolerance: f64,
}

impl<'a> ChargerAssigner<'a> {
    /// Creates an assigner over an explicit timeline store, one timeline
    /// per charger of `fleet` in charger order.
    pub fn new(fleet: &'a Fleet, config: &SchedulerConfig, timelines: Vec<ChargerTimeline>) -> Self {
        Self {
            fleet,
            classifier: PriorityClassifier::new(config.thresholds),
            finder: SlotFinder::new(config.tolerance),
            estimator: ChargeEstimator::new(config.thresholds.low),
            timelines,
            tolerance: config.tolerance,
        }
    }

    /// Creates an assigner with fresh, fully free timelines.
    pub fn for_fleet(fleet: &'a Fleet, config: &SchedulerConfig) -> Self {
        let timelines = ChargerTimeline::for_fleet(fleet, config.tolerance);
        Self::new(fleet, config, timelines)
    }

    /// Current timelines, indexed by charger.
    pub fn timelines(&self) -> &[ChargerTimeline] {
        &self.timelines
    }

    /// Consumes the assigner, returning its timelines.
    pub fn into_timelines(self) -> Vec<ChargerTimeline> {
        self.timelines
    }

    /// Assigns `visit`, arriving with `charge`, to the first feasible
    /// charger and reserves the slot.
    ///
    /// Visits of unknown buses are left unassigned.
    pub fn assign(&mut self, visit: &Visit, charge: f64) -> AssignOutcome {
        let Some(capacity) = self.fleet.capacity(visit.bus) else {
            return AssignOutcome::Unassigned {
                charge,
                tier: PriorityTier::Idle,
            };
        };
        let tier = self.classifier.classify(charge / capacity);

        let Some((charger, slot, estimate)) = self.search(visit, tier, charge, capacity) else {
            debug!(visit = visit.id, ?tier, charge, "no charger assigned");
            return AssignOutcome::Unassigned { charge, tier };
        };

        self.timelines[charger].reserve(slot.interval, estimate.start, estimate.end);
        let reservation = Reservation::new(visit.id, charger, estimate.start, estimate.end);
        debug!(
            visit = visit.id,
            charger,
            ?tier,
            start = reservation.start,
            end = reservation.end,
            truncated = estimate.truncated,
            "reserved charger"
        );

        AssignOutcome::Charged {
            reservation,
            charge_after_route: estimate.charge_after_route,
            tier,
        }
    }

    fn search(
        &self,
        visit: &Visit,
        tier: PriorityTier,
        charge: f64,
        capacity: f64,
    ) -> Option<(ChargerIndex, Slot, ChargeEstimate)> {
        let order = PriorityClassifier::order_for(
            tier,
            self.fleet.num_slow(),
            self.fleet.num_chargers(),
        );
        let window = visit.window();

        for k in order {
            let (Some(charger), Some(timeline)) = (self.fleet.charger(k), self.timelines.get(k))
            else {
                continue;
            };
            for slot in self.finder.candidates(window, timeline.intervals()) {
                let estimate = self.estimator.estimate(
                    charge,
                    capacity,
                    slot.start,
                    slot.end,
                    charger.rate,
                    visit.discharge,
                );
                if estimate.duration() > self.tolerance {
                    return Some((k, slot, estimate));
                }
                trace!(visit = visit.id, charger = k, "estimated slot below tolerance");
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    // Slow chargers 0, 1 (rate 10); fast charger 2 (rate 50)
    fn fleet() -> Fleet {
        Fleet::new(0.0, 24.0)
            .with_bus(100.0)
            .with_slow_chargers(2, 10.0)
            .with_fast_chargers(1, 50.0)
    }

    fn visit(arrival: f64, deadline: f64, discharge: f64) -> Visit {
        Visit::new(0, 0, arrival, deadline).with_discharge(discharge)
    }

    #[test]
    fn test_urgent_uses_fast_charger() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());

        // 20% → urgent → charger 2. 20 + 50 * 1 - 10 = 60 < 90
        let out = assigner.assign(&visit(2.0, 3.0, 10.0), 20.0);
        assert_eq!(out.tier(), PriorityTier::Urgent);
        assert_eq!(out.charger(), Some(2));
        assert!((out.charge_after_route(10.0) - 60.0).abs() < 1e-10);
        assert_eq!(
            assigner.timelines()[2].intervals(),
            &[TimeWindow::new(0.0, 2.0), TimeWindow::new(3.0, 24.0)]
        );
        // Slow chargers untouched
        assert!((assigner.timelines()[0].free_time() - 24.0).abs() < 1e-10);
    }

    #[test]
    fn test_balanced_prefers_slow() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());

        let out = assigner.assign(&visit(2.0, 4.0, 5.0), 50.0);
        assert_eq!(out.tier(), PriorityTier::Balanced);
        assert_eq!(out.charger(), Some(0));
        // 50 + 10 * 2 - 5 = 65
        assert!((out.charge_after_route(5.0) - 65.0).abs() < 1e-10);
    }

    #[test]
    fn test_maintenance_slow_only() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());

        // Block both slow chargers over the window
        for k in 0..2 {
            let free = assigner.timelines()[k].intervals()[0];
            assigner.timelines[k].reserve(free, 1.0, 10.0);
        }
        let out = assigner.assign(&visit(2.0, 4.0, 5.0), 80.0);
        assert_eq!(out.tier(), PriorityTier::Maintenance);
        assert_eq!(out.charger(), None);
        // Fast charger still free but not in the maintenance order
        assert!((assigner.timelines()[2].free_time() - 24.0).abs() < 1e-10);
    }

    #[test]
    fn test_idle_not_charged() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());

        let out = assigner.assign(&visit(2.0, 4.0, 30.0), 92.0);
        assert_eq!(out.tier(), PriorityTier::Idle);
        assert!(out.reservation().is_none());
        assert!((out.charge_after_route(30.0) - 62.0).abs() < 1e-10);
        assert!(assigner.timelines().iter().all(|t| t.reserved_time() == 0.0));
    }

    #[test]
    fn test_second_visit_moves_to_next_charger() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());

        let first = assigner.assign(&visit(2.0, 4.0, 5.0), 50.0);
        let second = assigner.assign(&Visit::new(1, 0, 2.5, 3.5).with_discharge(5.0), 50.0);
        assert_eq!(first.charger(), Some(0));
        assert_eq!(second.charger(), Some(1));
    }

    #[test]
    fn test_truncated_reservation_frees_tail() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());

        // 30% urgent on the fast charger: 30 + 50 * 4 - 0 >= 90 → stop after 1.2
        let out = assigner.assign(&visit(2.0, 6.0, 0.0), 30.0);
        let r = out.reservation().copied().unwrap();
        assert_eq!(r.charger, 2);
        assert!((r.end - 3.2).abs() < 1e-10);
        assert!((out.charge_after_route(0.0) - 90.0).abs() < 1e-10);
        let intervals = assigner.timelines()[2].intervals();
        assert_eq!(intervals.len(), 2);
        assert!((intervals[1].start - 3.2).abs() < 1e-10);
    }

    #[test]
    fn test_fully_booked_leaves_charge_unchanged() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());
        for k in 0..3 {
            assigner.timelines[k].reserve(TimeWindow::new(0.0, 24.0), 0.0, 24.0);
        }

        let out = assigner.assign(&visit(2.0, 4.0, 5.0), 50.0);
        assert_eq!(
            out,
            AssignOutcome::Unassigned {
                charge: 50.0,
                tier: PriorityTier::Balanced
            }
        );
        assert!((out.charge_after_route(5.0) - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_bus_unassigned() {
        let fleet = fleet();
        let mut assigner = ChargerAssigner::for_fleet(&fleet, &SchedulerConfig::default());
        let out = assigner.assign(&Visit::new(0, 7, 2.0, 4.0), 10.0);
        assert_eq!(out.charger(), None);
        assert_eq!(out.tier(), PriorityTier::Idle);
    }
}
