//! Entry orderings
//!
//! A facet result is sorted exactly once, at the end of a merge; the wire
//! format records which ordering was applied so the receiving side can
//! interpret entry positions without re-sorting.

use crate::entry::{CountEntry, StatsEntry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Total orders over facet entries.
///
/// Each mode carries a fixed one-byte wire tag; the tag mapping is
/// versioned and must never be renumbered. Bucket times are unique within
/// a result, so the time modes need no tie-break; the count and total
/// modes break ties by ascending bucket time so that sorting the same
/// entry set twice always yields the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Bucket time, oldest first
    TimeAsc,
    /// Bucket time, newest first
    TimeDesc,
    /// Document count, smallest first
    CountAsc,
    /// Document count, largest first
    CountDesc,
    /// Value sum, smallest first
    TotalAsc,
    /// Value sum, largest first
    TotalDesc,
}

impl SortOrder {
    /// Wire tag for this ordering
    pub fn tag(self) -> u8 {
        match self {
            SortOrder::TimeAsc => 0,
            SortOrder::TimeDesc => 1,
            SortOrder::CountAsc => 2,
            SortOrder::CountDesc => 3,
            SortOrder::TotalAsc => 4,
            SortOrder::TotalDesc => 5,
        }
    }

    /// Look up an ordering by its wire tag
    pub fn from_tag(tag: u8) -> Option<SortOrder> {
        match tag {
            0 => Some(SortOrder::TimeAsc),
            1 => Some(SortOrder::TimeDesc),
            2 => Some(SortOrder::CountAsc),
            3 => Some(SortOrder::CountDesc),
            4 => Some(SortOrder::TotalAsc),
            5 => Some(SortOrder::TotalDesc),
            _ => None,
        }
    }

    /// Compare two stats entries under this ordering
    pub fn cmp_stats(self, a: &StatsEntry, b: &StatsEntry) -> Ordering {
        match self {
            SortOrder::TimeAsc => a.time.cmp(&b.time),
            SortOrder::TimeDesc => b.time.cmp(&a.time),
            SortOrder::CountAsc => a.count.cmp(&b.count).then_with(|| a.time.cmp(&b.time)),
            SortOrder::CountDesc => b.count.cmp(&a.count).then_with(|| a.time.cmp(&b.time)),
            SortOrder::TotalAsc => a
                .total
                .partial_cmp(&b.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.time.cmp(&b.time)),
            SortOrder::TotalDesc => b
                .total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.time.cmp(&b.time)),
        }
    }

    /// Compare two count-only entries under this ordering.
    ///
    /// Count entries carry no value sum, so the total modes order by
    /// document count.
    pub fn cmp_counts(self, a: &CountEntry, b: &CountEntry) -> Ordering {
        match self {
            SortOrder::TimeAsc => a.time.cmp(&b.time),
            SortOrder::TimeDesc => b.time.cmp(&a.time),
            SortOrder::CountAsc | SortOrder::TotalAsc => {
                a.count.cmp(&b.count).then_with(|| a.time.cmp(&b.time))
            }
            SortOrder::CountDesc | SortOrder::TotalDesc => {
                b.count.cmp(&a.count).then_with(|| a.time.cmp(&b.time))
            }
        }
    }
}
