//! Depot charging domain models.
//!
//! Provides the core data types for describing a fleet, its depot visits
//! and the resulting charge schedule.
//!
//! # Domain Mappings
//!
//! | u-charge | Scheduling | Depot |
//! |----------|-----------|-------|
//! | Visit | Job with release/due window | Bus resting between routes |
//! | Charger | Parallel machine | Slow or fast charging point |
//! | Reservation | Operation on a machine | Plug-in window |
//! | ChargeSchedule | Schedule | Charging plan |

mod charger;
mod fleet;
mod interval;
mod schedule;
mod visit;

pub use charger::{Charger, ChargerClass, ChargerIndex};
pub use fleet::{Bus, Fleet};
pub use interval::TimeWindow;
pub use schedule::{ChargeSchedule, Reservation, VisitCharge};
pub use visit::{BusIndex, Visit, VisitIndex};
