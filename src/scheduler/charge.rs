//! State-of-charge estimate for a candidate reservation.
//!
//! # Model
//! Charging is linear in time at the charger's rate. The charge carried to
//! the next visit is `eta + r·(end − start) − l`, where `l` is the
//! discharge of the following route. If that would reach the ceiling
//! `low × capacity`, the reservation is cut short so charging stops at the
//! ceiling.

/// Outcome of charging over a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeEstimate {
    /// Charge on arrival at the next visit, never negative.
    pub charge_after_route: f64,
    /// Reservation start.
    pub start: f64,
    /// Reservation end, possibly earlier than requested.
    pub end: f64,
    /// Whether the reservation was shortened to respect the ceiling.
    pub truncated: bool,
}

impl ChargeEstimate {
    /// Reserved duration.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Computes charge outcomes against a ceiling fraction of capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeEstimator {
    ceiling: f64,
}

impl ChargeEstimator {
    /// Creates an estimator capping charge at `ceiling × capacity`.
    pub fn new(ceiling: f64) -> Self {
        Self { ceiling }
    }

    /// The ceiling fraction.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Estimates the charge after charging over `[start, end)` at `rate`
    /// and then driving a route consuming `discharge`.
    ///
    /// Never fails. `rate` is expected to be positive.
    pub fn estimate(
        &self,
        charge: f64,
        capacity: f64,
        start: f64,
        end: f64,
        rate: f64,
        discharge: f64,
    ) -> ChargeEstimate {
        let target = self.ceiling * capacity;
        let full = charge + rate * (end - start) - discharge;

        let (mut charge_after_route, mut start, mut end, truncated) = if full >= target {
            let shortened_end = (target - charge) / rate + start;
            (target - discharge, start, shortened_end, true)
        } else {
            (full, start, end, false)
        };

        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        charge_after_route = charge_after_route.max(0.0);

        ChargeEstimate {
            charge_after_route,
            start,
            end,
            truncated,
        }
    }
}
