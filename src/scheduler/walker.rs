//! Arrival-ordered walk over all visits.
//!
//! # Algorithm
//!
//! Visits are processed once each, in index (= arrival) order:
//!
//! 1. **Chain seed.** The first visit of a bus arrives with
//!    `initial_charge × capacity` and is not charged. Its successor
//!    receives that charge minus the route's discharge.
//! 2. **Assign.** Every other visit is handed to the
//!    [`ChargerAssigner`] with the charge propagated from its predecessor;
//!    its successor receives the resulting charge.
//!
//! Charge is clamped at zero whenever it is propagated.
//!
//! # Determinism
//! No randomness and no hash-ordered state: identical input yields an
//! identical schedule.

use tracing::{info, instrument, warn};

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::models::{ChargeSchedule, Fleet, Visit, VisitCharge};
use crate::validation::validate_input;

use super::assigner::{AssignOutcome, ChargerAssigner};
use super::timeline::ChargerTimeline;

/// Walks a fleet's visits and builds the charge schedule.
///
/// # Example
///
/// ```
/// use u_charge::models::{Fleet, Visit};
/// use u_charge::scheduler::ScheduleWalker;
///
/// let fleet = Fleet::new(0.0, 24.0)
///     .with_bus(100.0)
///     .with_slow_chargers(1, 10.0)
///     .with_fast_chargers(1, 50.0);
/// let visits = vec![
///     Visit::new(0, 0, 1.0, 2.0).with_discharge(70.0).with_next(1).chain_start(0.9),
///     Visit::new(1, 0, 6.0, 7.0).with_discharge(10.0),
/// ];
///
/// let schedule = ScheduleWalker::new(&fleet).run(&visits).unwrap();
/// // 90 - 70 = 20 on arrival → urgent → fast charger 1
/// assert_eq!(schedule.chargers(), vec![None, Some(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleWalker<'a> {
    fleet: &'a Fleet,
    config: SchedulerConfig,
}

impl<'a> ScheduleWalker<'a> {
    /// Creates a walker with the default configuration.
    pub fn new(fleet: &'a Fleet) -> Self {
        Self {
            fleet,
            config: SchedulerConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules all visits.
    ///
    /// # Errors
    /// Returns an error if the configuration or the input fails
    /// validation. Infeasible visits are not errors; they appear with
    /// `charger = None`.
    pub fn run(&self, visits: &[Visit]) -> Result<ChargeSchedule, ScheduleError> {
        self.walk(visits).map(|(schedule, _)| schedule)
    }

    /// Schedules all visits and also returns the final charger timelines.
    #[instrument(skip_all, fields(visits = visits.len(), chargers = self.fleet.num_chargers()))]
    pub fn walk(
        &self,
        visits: &[Visit],
    ) -> Result<(ChargeSchedule, Vec<ChargerTimeline>), ScheduleError> {
        self.config.validate()?;
        if let Err(errors) = validate_input(self.fleet, visits) {
            warn!(problems = errors.len(), "input rejected");
            return Err(errors.into());
        }

        let mut assigner = ChargerAssigner::for_fleet(self.fleet, &self.config);
        let mut arrival_charge: Vec<Option<f64>> = vec![None; visits.len()];
        let mut schedule = ChargeSchedule::new(self.fleet.num_chargers());

        for visit in visits {
            let capacity = self.fleet.capacity(visit.bus).unwrap_or(0.0);

            let (charge, outcome) = if visit.is_chain_start {
                let fraction = visit.initial_charge.unwrap_or(0.0);
                (fraction * capacity, None)
            } else {
                let charge = arrival_charge[visit.id]
                    .ok_or(ScheduleError::MissingCharge { visit: visit.id })?;
                (charge, Some(assigner.assign(visit, charge)))
            };

            let next_charge = match &outcome {
                Some(outcome) => outcome.charge_after_route(visit.discharge),
                None => (charge - visit.discharge).max(0.0),
            };
            if let Some(next) = visit.next_visit {
                arrival_charge[next] = Some(next_charge);
            }

            let reservation = outcome.as_ref().and_then(AssignOutcome::reservation);
            schedule.push(VisitCharge {
                visit: visit.id,
                bus: visit.bus,
                charger: reservation.map(|r| r.charger),
                start: reservation.map_or(visit.arrival, |r| r.start),
                end: reservation.map_or(visit.arrival, |r| r.end),
                charge_at_arrival: charge,
            });
        }

        info!(
            charged = schedule.charged_count(),
            unassigned = schedule.len() - schedule.charged_count(),
            charging_time = schedule.total_charging_time(),
            "walk finished"
        );
        Ok((schedule, assigner.into_timelines()))
    }
}
