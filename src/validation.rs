//! Input validation for charging problems.
//!
//! Checks structural integrity of the fleet and its visits before
//! scheduling. Detects:
//! - Degenerate horizon, capacities and charge rates
//! - Broken slow-then-fast charger partition
//! - Visits out of arrival order or with inverted windows
//! - Malformed bus chains (bad successors, orphans, double predecessors)
//! - Chain starts without a usable initial charge
//!
//! All problems are collected; validation does not stop at the first one.

use thiserror::Error;

use crate::models::{Fleet, Visit};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The horizon is empty or not finite.
    InvalidHorizon,
    /// A bus has a non-positive capacity.
    InvalidCapacity,
    /// A charger has a non-positive rate or a wrong index.
    InvalidCharger,
    /// A slow charger follows a fast one.
    ChargerOrder,
    /// A visit's id differs from its position.
    IndexMismatch,
    /// Arrivals are not non-decreasing.
    UnsortedArrivals,
    /// Deadline before arrival, or non-finite times.
    InvalidWindow,
    /// Negative or non-finite discharge.
    InvalidDischarge,
    /// A visit references a bus that doesn't exist.
    UnknownBus,
    /// A successor is out of range, not later, or on another bus.
    InvalidSuccessor,
    /// A visit is the successor of more than one visit.
    DuplicatePredecessor,
    /// A chain start lacks an initial charge fraction in [0, 1].
    InvalidInitialCharge,
    /// A non-start visit that no visit leads to.
    OrphanVisit,
    /// A chain start that another visit leads to.
    SeededSuccessor,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a fleet and its visits.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(fleet: &Fleet, visits: &[Visit]) -> ValidationResult {
    let mut errors = Vec::new();

    validate_fleet(fleet, &mut errors);

    let mut predecessor: Vec<Option<usize>> = vec![None; visits.len()];
    for (position, visit) in visits.iter().enumerate() {
        if visit.id != position {
            errors.push(ValidationError::new(
                ValidationErrorKind::IndexMismatch,
                format!("Visit at position {} has id {}", position, visit.id),
            ));
        }

        if position > 0 && visit.arrival < visits[position - 1].arrival {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnsortedArrivals,
                format!("Visit {} arrives before visit {}", position, position - 1),
            ));
        }

        if !visit.arrival.is_finite()
            || !visit.deadline.is_finite()
            || visit.deadline < visit.arrival
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindow,
                format!(
                    "Visit {} has window [{}, {})",
                    position, visit.arrival, visit.deadline
                ),
            ));
        }

        if !(visit.discharge >= 0.0 && visit.discharge.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDischarge,
                format!("Visit {} has discharge {}", position, visit.discharge),
            ));
        }

        if visit.bus >= fleet.num_buses() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownBus,
                format!("Visit {} references unknown bus {}", position, visit.bus),
            ));
        }

        if visit.is_chain_start
            && !visit
                .initial_charge
                .is_some_and(|alpha| (0.0..=1.0).contains(&alpha))
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInitialCharge,
                format!(
                    "Chain start {} has initial charge {:?}",
                    position, visit.initial_charge
                ),
            ));
        }

        let Some(next) = visit.next_visit else {
            continue;
        };
        if next <= position || next >= visits.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSuccessor,
                format!("Visit {} has successor {} out of order", position, next),
            ));
            continue;
        }
        if visits[next].bus != visit.bus {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSuccessor,
                format!(
                    "Visit {} (bus {}) links to visit {} (bus {})",
                    position, visit.bus, next, visits[next].bus
                ),
            ));
        }
        if let Some(other) = predecessor[next].replace(position) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePredecessor,
                format!("Visit {} follows both {} and {}", next, other, position),
            ));
        }
    }

    for (position, visit) in visits.iter().enumerate() {
        match (visit.is_chain_start, predecessor[position]) {
            (false, None) => errors.push(ValidationError::new(
                ValidationErrorKind::OrphanVisit,
                format!("Visit {} is neither a chain start nor a successor", position),
            )),
            (true, Some(prev)) => errors.push(ValidationError::new(
                ValidationErrorKind::SeededSuccessor,
                format!("Chain start {} is the successor of visit {}", position, prev),
            )),
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_fleet(fleet: &Fleet, errors: &mut Vec<ValidationError>) {
    let horizon = fleet.horizon;
    if !(horizon.start.is_finite() && horizon.end.is_finite() && horizon.duration() > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHorizon,
            format!("Horizon [{}, {}) is empty", horizon.start, horizon.end),
        ));
    }

    for bus in &fleet.buses {
        if !(bus.capacity > 0.0 && bus.capacity.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Bus {} has capacity {}", bus.id, bus.capacity),
            ));
        }
    }

    for (position, charger) in fleet.chargers.iter().enumerate() {
        if charger.index != position || !(charger.rate > 0.0 && charger.rate.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCharger,
                format!(
                    "Charger at position {} has index {} and rate {}",
                    position, charger.index, charger.rate
                ),
            ));
        }
    }

    if !fleet.is_partitioned() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ChargerOrder,
            "Slow chargers must precede fast chargers",
        ));
    }
}
