//! Facet result types
//!
//! A facet result is produced once per shard per query (a partial result),
//! consumed exactly once by the coordinator's merge, and the merged result
//! is consumed by exactly one of the wire codec or the renderer.

use crate::entry::{CountEntry, StatsEntry};
use crate::ordering::SortOrder;
use serde::{Deserialize, Serialize};

/// A named histogram facet with full value statistics per bucket.
///
/// Entry order is significant only after a merge/sort step; partial,
/// pre-merge results may hold entries in any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsHistogram {
    /// Identifies this aggregation within a response
    pub name: String,
    /// Ordering applied to the entries
    pub order: SortOrder,
    /// Bucket entries, unique by time
    pub entries: Vec<StatsEntry>,
}

impl StatsHistogram {
    /// Create a facet result
    pub fn new(name: impl Into<String>, order: SortOrder, entries: Vec<StatsEntry>) -> Self {
        Self {
            name: name.into(),
            order,
            entries,
        }
    }

    /// Sort entries in place with this facet's ordering
    pub fn sort(&mut self) {
        let order = self.order;
        self.entries.sort_by(|a, b| order.cmp_stats(a, b));
    }
}

/// A named count-only histogram facet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountHistogram {
    /// Identifies this aggregation within a response
    pub name: String,
    /// Ordering applied to the entries
    pub order: SortOrder,
    /// Bucket entries, unique by time
    pub entries: Vec<CountEntry>,
}

impl CountHistogram {
    /// Create a facet result
    pub fn new(name: impl Into<String>, order: SortOrder, entries: Vec<CountEntry>) -> Self {
        Self {
            name: name.into(),
            order,
            entries,
        }
    }

    /// Sort entries in place with this facet's ordering
    pub fn sort(&mut self) {
        let order = self.order;
        self.entries.sort_by(|a, b| order.cmp_counts(a, b));
    }
}

/// A histogram facet in either of its two variants.
///
/// The variants share one reduce/encode/render contract; behavior is
/// selected by match on the tag rather than by dispatch through a trait
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistogramFacet {
    /// Count-only buckets
    Count(CountHistogram),
    /// Buckets with full value statistics
    Stats(StatsHistogram),
}

impl HistogramFacet {
    /// Aggregation name
    pub fn name(&self) -> &str {
        match self {
            HistogramFacet::Count(f) => &f.name,
            HistogramFacet::Stats(f) => &f.name,
        }
    }

    /// Ordering applied to the entries
    pub fn order(&self) -> SortOrder {
        match self {
            HistogramFacet::Count(f) => f.order,
            HistogramFacet::Stats(f) => f.order,
        }
    }

    /// Number of bucket entries
    pub fn len(&self) -> usize {
        match self {
            HistogramFacet::Count(f) => f.entries.len(),
            HistogramFacet::Stats(f) => f.entries.len(),
        }
    }

    /// Check if the facet holds no buckets
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
