//! Heuristic charge scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `ScheduleWalker` processes visits in arrival order. For each visit that
//! is not a chain start, `ChargerAssigner` picks a priority tier from the
//! bus's charge fraction, probes chargers in the tier's order with
//! `SlotFinder`, sizes the reservation with `ChargeEstimator` and carves
//! it out of the charger's `ChargerTimeline`. It is greedy first-fit, not
//! optimal, and never backtracks.
//!
//! # KPI
//!
//! `ChargeKpi` computes service rate, delivered energy, minimum charge and
//! charger utilization.
//!
//! # Concurrency
//! Single threaded. A bus's charge at one visit depends on the previous
//! one, and every reservation mutates state read by later visits.

mod assigner;
mod charge;
mod kpi;
mod slot;
mod timeline;
mod walker;

pub use assigner::{AssignOutcome, ChargerAssigner};
pub use charge::{ChargeEstimate, ChargeEstimator};
pub use kpi::ChargeKpi;
pub use slot::{OverlapCase, Slot, SlotFinder};
pub use timeline::ChargerTimeline;
pub use walker::ScheduleWalker;
