//! Visit model.
//!
//! A visit is one bus resting at the depot between two routes. The visits
//! of one bus form a singly linked chain through `next_visit`, stored as
//! indices into the flat, arrival-sorted visit slice.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// Index of a visit in the arrival-sorted visit slice.
pub type VisitIndex = usize;

/// Index of a bus in [`Fleet::buses`](super::Fleet).
pub type BusIndex = usize;

/// One bus's presence window at the depot.
///
/// # Time Representation
/// `arrival` and `deadline` share the horizon's time unit. The deadline is
/// the required departure time of the route that follows the visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Sequence index, equal to the visit's position in the input slice.
    pub id: VisitIndex,
    /// Owning bus.
    pub bus: BusIndex,
    /// This bus's next visit. `None` = last visit of the horizon.
    pub next_visit: Option<VisitIndex>,
    /// Arrival at the depot.
    pub arrival: f64,
    /// Required departure time.
    pub deadline: f64,
    /// Energy consumed by the route following this visit.
    pub discharge: f64,
    /// First visit of its bus; seeded from `initial_charge`.
    pub is_chain_start: bool,
    /// Initial state of charge as a fraction of capacity.
    /// Only meaningful when `is_chain_start` is set.
    pub initial_charge: Option<f64>,
}

impl Visit {
    /// Creates a visit with no successor, no discharge and no seed.
    pub fn new(id: VisitIndex, bus: BusIndex, arrival: f64, deadline: f64) -> Self {
        Self {
            id,
            bus,
            next_visit: None,
            arrival,
            deadline,
            discharge: 0.0,
            is_chain_start: false,
            initial_charge: None,
        }
    }

    /// Sets the discharge of the following route.
    pub fn with_discharge(mut self, discharge: f64) -> Self {
        self.discharge = discharge;
        self
    }

    /// Links this visit to the bus's next visit.
    pub fn with_next(mut self, next: VisitIndex) -> Self {
        self.next_visit = Some(next);
        self
    }

    /// Marks this visit as the start of its bus's chain.
    pub fn chain_start(mut self, fraction: f64) -> Self {
        self.is_chain_start = true;
        self.initial_charge = Some(fraction);
        self
    }

    /// The feasible charging window `[arrival, deadline)`.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.arrival, self.deadline)
    }

    /// Length of the stay at the depot.
    #[inline]
    pub fn dwell(&self) -> f64 {
        self.deadline - self.arrival
    }
}
