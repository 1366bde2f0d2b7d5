//! Free-time intervals of one charger.
//!
//! A timeline starts as the whole horizon and shrinks as reservations are
//! carved out of it. It is the only state shared between visits: one
//! visit's reservation affects later visits solely through it.

use crate::models::{Fleet, TimeWindow};

/// Sorted, disjoint free intervals `[start, end)` of a single charger.
///
/// # Invariants
/// - Intervals are sorted by `start` and pairwise disjoint.
/// - Every interval is longer than the tolerance.
/// - Free time plus reserved time equals the horizon length.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargerTimeline {
    horizon: TimeWindow,
    intervals: Vec<TimeWindow>,
    tolerance: f64,
}

impl ChargerTimeline {
    /// Creates a timeline with one free interval spanning the horizon.
    pub fn new(horizon: TimeWindow, tolerance: f64) -> Self {
        let intervals = if horizon.duration() > tolerance {
            vec![horizon]
        } else {
            Vec::new()
        };
        Self {
            horizon,
            intervals,
            tolerance,
        }
    }

    /// One fresh timeline per charger of `fleet`, in charger order.
    pub fn for_fleet(fleet: &Fleet, tolerance: f64) -> Vec<Self> {
        fleet
            .chargers
            .iter()
            .map(|_| Self::new(fleet.horizon, tolerance))
            .collect()
    }

    /// Free intervals, ascending by start.
    pub fn intervals(&self) -> &[TimeWindow] {
        &self.intervals
    }

    /// The horizon this timeline covers.
    pub fn horizon(&self) -> TimeWindow {
        self.horizon
    }

    /// Total free time.
    pub fn free_time(&self) -> f64 {
        self.intervals.iter().map(TimeWindow::duration).sum()
    }

    /// Total time no longer free (reserved or discarded as too short).
    pub fn reserved_time(&self) -> f64 {
        self.horizon.duration() - self.free_time()
    }

    /// Whether the charger has no free time left.
    pub fn is_full(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Carves `[start, end)` out of the free interval `existing`.
    ///
    /// The left remainder `[existing.start, start)` and right remainder
    /// `[end, existing.end)` are kept only if longer than the tolerance.
    ///
    /// # Panics
    /// Panics if `existing` is not one of this timeline's free intervals.
    /// Callers obtain `existing` from [`intervals`](Self::intervals), so
    /// this signals a logic error rather than a recoverable condition.
    pub fn reserve(&mut self, existing: TimeWindow, start: f64, end: f64) {
        let position = self
            .intervals
            .iter()
            .position(|w| *w == existing)
            .unwrap_or_else(|| panic!("interval {existing:?} is not free on this charger"));
        self.intervals.remove(position);

        let left = TimeWindow::new(existing.start, start);
        let right = TimeWindow::new(end, existing.end);
        for remainder in [left, right] {
            if remainder.duration() > self.tolerance {
                self.intervals.push(remainder);
            }
        }
        self.intervals.sort_by(|a, b| a.start.total_cmp(&b.start));
    }
}
