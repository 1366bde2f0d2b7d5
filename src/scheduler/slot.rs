//! Slot search within a charger's free intervals.
//!
//! A visit window `[a, t)` is matched against a free interval `[b, e)`
//! under four strict overlap geometries, checked in order:
//!
//! | Case | Condition | Slot |
//! |------|-----------|------|
//! | Interior | `b < a < t < e` | `[a, t)` |
//! | ClipStart | `a < b < t < e` | `[b, t)` |
//! | ClipEnd | `b < a < e < t` | `[a, e)` |
//! | ClipBoth | `a < b < e < t` | `[b, e)` |
//!
//! Any other geometry is skipped, including windows sharing an edge with
//! the free interval (`a == b`, `t == e`, ...). Those could host a slot,
//! but the heuristic deliberately does not use them.

use tracing::trace;

use crate::models::TimeWindow;

/// Overlap geometry between a visit window and a free interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapCase {
    /// Window strictly inside the free interval.
    Interior,
    /// Free interval starts inside the window and outlasts it.
    ClipStart,
    /// Window starts inside the free interval, which ends first.
    ClipEnd,
    /// Free interval strictly inside the window.
    ClipBoth,
}

impl OverlapCase {
    /// Classifies `window` against `free`; `None` for uncovered geometries.
    pub fn classify(window: TimeWindow, free: TimeWindow) -> Option<Self> {
        let (a, t) = (window.start, window.end);
        let (b, e) = (free.start, free.end);
        if b < a && a < t && t < e {
            Some(Self::Interior)
        } else if a < b && b < t && t < e {
            Some(Self::ClipStart)
        } else if b < a && a < e && e < t {
            Some(Self::ClipEnd)
        } else if a < b && b < e && e < t {
            Some(Self::ClipBoth)
        } else {
            None
        }
    }

    /// The `(start, end)` this case reserves.
    pub fn slot_bounds(self, window: TimeWindow, free: TimeWindow) -> (f64, f64) {
        match self {
            Self::Interior => (window.start, window.end),
            Self::ClipStart => (free.start, window.end),
            Self::ClipEnd => (window.start, free.end),
            Self::ClipBoth => (free.start, free.end),
        }
    }
}

/// A concrete sub-interval of a free interval chosen for a reservation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// The free interval the slot lies in.
    pub interval: TimeWindow,
    /// Slot start.
    pub start: f64,
    /// Slot end.
    pub end: f64,
    /// Geometry that produced the slot.
    pub case: OverlapCase,
}

impl Slot {
    /// Slot length.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Finds feasible slots for a visit window in a list of free intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotFinder {
    tolerance: f64,
}

impl SlotFinder {
    /// Creates a finder rejecting slots no longer than `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// All valid slots, in the ascending order of `intervals`.
    pub fn candidates<'a>(
        &self,
        window: TimeWindow,
        intervals: &'a [TimeWindow],
    ) -> impl Iterator<Item = Slot> + 'a {
        let tolerance = self.tolerance;
        intervals.iter().filter_map(move |&free| {
            let case = OverlapCase::classify(window, free)?;
            let (start, end) = case.slot_bounds(window, free);
            if end - start <= tolerance {
                trace!(?case, start, end, "slot below tolerance");
                return None;
            }
            Some(Slot {
                interval: free,
                start,
                end,
                case,
            })
        })
    }

    /// The first valid slot, if any.
    pub fn find(&self, window: TimeWindow, intervals: &[TimeWindow]) -> Option<Slot> {
        self.candidates(window, intervals).next()
    }
}
