//! Depot charging scheduler for electric bus fleets.
//!
//! Assigns each bus visit (a rest interval at the depot between routes) to
//! a charger and a charging window, keeping batteries within safe
//! state-of-charge bounds without an external optimizer.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Visit`, `Fleet`, `Charger`, `TimeWindow`,
//!   `Reservation`, `ChargeSchedule`
//! - **`priority`**: Charge-fraction tiers and charger search order
//! - **`scheduler`**: Charger timelines, slot search, charge estimation,
//!   greedy assignment, the arrival-ordered walk, KPIs
//! - **`validation`**: Input integrity checks (chains, ordering, fleet shape)
//! - **`config`**: Thresholds and tolerance
//! - **`generator`**: Seeded synthetic instances
//!
//! # Example
//!
//! ```
//! use u_charge::models::{Fleet, Visit};
//! use u_charge::scheduler::{ChargeKpi, ScheduleWalker};
//!
//! let fleet = Fleet::new(0.0, 24.0)
//!     .with_bus(200.0)
//!     .with_slow_chargers(1, 20.0)
//!     .with_fast_chargers(1, 100.0);
//! let visits = vec![
//!     Visit::new(0, 0, 5.0, 6.0).with_discharge(150.0).with_next(1).chain_start(1.0),
//!     Visit::new(1, 0, 9.0, 10.0).with_discharge(40.0),
//! ];
//!
//! let schedule = ScheduleWalker::new(&fleet).run(&visits).unwrap();
//! let kpi = ChargeKpi::calculate(&schedule, &fleet, &visits);
//! assert_eq!(kpi.charged_visits, 1);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod priority;
pub mod scheduler;
pub mod validation;
