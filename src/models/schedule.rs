//! Charge schedule (solution) model.
//!
//! A charge schedule records, for every visit, the assigned charger (if
//! any), the charging window and the state of charge at arrival. It is
//! the output handed to downstream consumers (plotting, MILP warm start,
//! export).
//!
//! # Array Views
//!
//! | View | Symbol | Meaning |
//! |------|--------|---------|
//! | `start_times` | u | charge start |
//! | `end_times` | c | charge end |
//! | `chargers` | v | assigned charger or `None` |
//! | `charges` | eta | charge at arrival |
//! | `durations` | p | c − u |
//! | `assignment_matrix` | w | one-hot visit × charger |
//! | `duration_matrix` | g | p placed at the assigned charger |

use serde::{Deserialize, Serialize};

use super::{BusIndex, ChargerIndex, VisitIndex};

/// A visit-charger-time reservation.
///
/// Irrevocable once made: the heuristic never backtracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reserved visit.
    pub visit: VisitIndex,
    /// Reserved charger.
    pub charger: ChargerIndex,
    /// Charge start.
    pub start: f64,
    /// Charge end.
    pub end: f64,
}

impl Reservation {
    /// Creates a new reservation.
    pub fn new(visit: VisitIndex, charger: ChargerIndex, start: f64, end: f64) -> Self {
        Self {
            visit,
            charger,
            start,
            end,
        }
    }

    /// Reserved duration.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Scheduling result for one visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitCharge {
    /// Visit index.
    pub visit: VisitIndex,
    /// Owning bus (denormalized for query convenience).
    pub bus: BusIndex,
    /// Assigned charger. `None` = not charged at this visit.
    pub charger: Option<ChargerIndex>,
    /// Charge start. Equals `arrival` when unassigned.
    pub start: f64,
    /// Charge end. Equals `arrival` when unassigned.
    pub end: f64,
    /// State of charge at arrival.
    pub charge_at_arrival: f64,
}

impl VisitCharge {
    /// Charging duration (0 when unassigned).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether a charger was assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.charger.is_some()
    }

    /// The reservation backing this entry, if any.
    pub fn reservation(&self) -> Option<Reservation> {
        self.charger
            .map(|k| Reservation::new(self.visit, k, self.start, self.end))
    }
}

/// A complete charge schedule, one entry per visit in visit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeSchedule {
    /// Per-visit results, indexed by [`VisitIndex`].
    pub visits: Vec<VisitCharge>,
    /// Number of chargers the matrices are sized for.
    pub num_chargers: usize,
}

impl ChargeSchedule {
    /// Creates an empty schedule for `num_chargers` chargers.
    pub fn new(num_chargers: usize) -> Self {
        Self {
            visits: Vec::new(),
            num_chargers,
        }
    }

    /// Appends a visit result.
    pub fn push(&mut self, entry: VisitCharge) {
        self.visits.push(entry);
    }

    /// Number of visits.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether the schedule has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Result for a visit.
    pub fn get(&self, visit: VisitIndex) -> Option<&VisitCharge> {
        self.visits.get(visit)
    }

    /// Charge start per visit (u).
    pub fn start_times(&self) -> Vec<f64> {
        self.visits.iter().map(|v| v.start).collect()
    }

    /// Charge end per visit (c).
    pub fn end_times(&self) -> Vec<f64> {
        self.visits.iter().map(|v| v.end).collect()
    }

    /// Assigned charger per visit (v).
    pub fn chargers(&self) -> Vec<Option<ChargerIndex>> {
        self.visits.iter().map(|v| v.charger).collect()
    }

    /// Charge at arrival per visit (eta).
    pub fn charges(&self) -> Vec<f64> {
        self.visits.iter().map(|v| v.charge_at_arrival).collect()
    }

    /// Charging duration per visit (p = c − u).
    pub fn durations(&self) -> Vec<f64> {
        self.visits.iter().map(VisitCharge::duration).collect()
    }

    /// One-hot assignment matrix (w): `w[i][v[i]] = 1` when assigned.
    pub fn assignment_matrix(&self) -> Vec<Vec<u8>> {
        self.visits
            .iter()
            .map(|v| {
                let mut row = vec![0; self.num_chargers];
                if let Some(k) = v.charger {
                    row[k] = 1;
                }
                row
            })
            .collect()
    }

    /// Duration linearization matrix (g): `g[i][v[i]] = p[i]` when assigned.
    pub fn duration_matrix(&self) -> Vec<Vec<f64>> {
        self.visits
            .iter()
            .map(|v| {
                let mut row = vec![0.0; self.num_chargers];
                if let Some(k) = v.charger {
                    row[k] = v.duration();
                }
                row
            })
            .collect()
    }

    /// All reservations in visit order.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.visits
            .iter()
            .filter_map(VisitCharge::reservation)
            .collect()
    }

    /// Reservations on one charger, in visit order.
    pub fn reservations_for_charger(&self, charger: ChargerIndex) -> Vec<Reservation> {
        self.reservations()
            .into_iter()
            .filter(|r| r.charger == charger)
            .collect()
    }

    /// Visits left without a charger.
    pub fn unassigned_visits(&self) -> Vec<VisitIndex> {
        self.visits
            .iter()
            .filter(|v| !v.is_assigned())
            .map(|v| v.visit)
            .collect()
    }

    /// Number of visits with a charger.
    pub fn charged_count(&self) -> usize {
        self.visits.iter().filter(|v| v.is_assigned()).count()
    }

    /// Sum of all charging durations.
    pub fn total_charging_time(&self) -> f64 {
        self.visits.iter().map(VisitCharge::duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(visit: usize, charger: Option<usize>, start: f64, end: f64, eta: f64) -> VisitCharge {
        VisitCharge {
            visit,
            bus: 0,
            charger,
            start,
            end,
            charge_at_arrival: eta,
        }
    }

    fn sample_schedule() -> ChargeSchedule {
        let mut s = ChargeSchedule::new(3);
        s.push(entry(0, None, 1.0, 1.0, 95.0));
        s.push(entry(1, Some(2), 3.0, 4.5, 30.0));
        s.push(entry(2, Some(0), 5.0, 9.0, 60.0));
        s.push(entry(3, Some(2), 6.0, 7.0, 20.0));
        s
    }

    #[test]
    fn test_array_views() {
        let s = sample_schedule();
        assert_eq!(s.start_times(), vec![1.0, 3.0, 5.0, 6.0]);
        assert_eq!(s.end_times(), vec![1.0, 4.5, 9.0, 7.0]);
        assert_eq!(s.chargers(), vec![None, Some(2), Some(0), Some(2)]);
        assert_eq!(s.charges(), vec![95.0, 30.0, 60.0, 20.0]);
        assert_eq!(s.durations(), vec![0.0, 1.5, 4.0, 1.0]);
    }

    #[test]
    fn test_assignment_matrix() {
        let s = sample_schedule();
        let w = s.assignment_matrix();
        assert_eq!(w[0], vec![0, 0, 0]);
        assert_eq!(w[1], vec![0, 0, 1]);
        assert_eq!(w[2], vec![1, 0, 0]);
        // Each row has at most one set entry
        assert!(w.iter().all(|row| row.iter().map(|&x| x as u32).sum::<u32>() <= 1));
    }

    #[test]
    fn test_duration_matrix() {
        let s = sample_schedule();
        let g = s.duration_matrix();
        assert_eq!(g[0], vec![0.0, 0.0, 0.0]);
        assert!((g[1][2] - 1.5).abs() < 1e-10);
        assert!((g[2][0] - 4.0).abs() < 1e-10);
        assert_eq!(g[2][1], 0.0);
    }

    #[test]
    fn test_reservations() {
        let s = sample_schedule();
        assert_eq!(s.reservations().len(), 3);
        let on_two = s.reservations_for_charger(2);
        assert_eq!(on_two.len(), 2);
        assert_eq!(on_two[0], Reservation::new(1, 2, 3.0, 4.5));
        assert!(s.reservations_for_charger(1).is_empty());
    }

    #[test]
    fn test_counts() {
        let s = sample_schedule();
        assert_eq!(s.len(), 4);
        assert_eq!(s.charged_count(), 3);
        assert_eq!(s.unassigned_visits(), vec![0]);
        assert!((s.total_charging_time() - 6.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_schedule() {
        let s = ChargeSchedule::new(2);
        assert!(s.is_empty());
        assert!(s.assignment_matrix().is_empty());
        assert_eq!(s.total_charging_time(), 0.0);
    }
}
