//! Facet merge engine
//!
//! Combines the partial histogram facets computed independently by each
//! shard into one deduplicated, ordered result.

use crate::config::PoolConfig;
use crate::pool::AccumulatorPool;
use std::collections::hash_map::Entry;
use tracing::debug;
use tsfacet_core::{
    CountEntry, CountHistogram, HistogramFacet, SortOrder, StatsEntry, StatsHistogram,
};

/// Merge engine for per-shard histogram facets.
///
/// One merger is shared by all in-flight queries on a coordinator. Each
/// `reduce` call runs synchronously on the calling task and borrows a
/// scratch accumulator for its duration, so concurrent merges never share
/// state beyond the pool's free list.
pub struct FacetMerger {
    stats_scratch: AccumulatorPool<StatsEntry>,
    count_scratch: AccumulatorPool<i64>,
}

impl FacetMerger {
    /// Create a merger with default pool limits
    pub fn new() -> Self {
        Self::with_config(&PoolConfig::default())
    }

    /// Create a merger with explicit pool limits
    pub fn with_config(config: &PoolConfig) -> Self {
        Self {
            stats_scratch: AccumulatorPool::new(config),
            count_scratch: AccumulatorPool::new(config),
        }
    }

    /// Combine per-shard partial facets into one result.
    ///
    /// All partials must be the same variant and, by construction, share
    /// the same aggregation name; both are caller contracts. Partials are
    /// consumed: entries donated by the first partial that mentions a
    /// bucket are combined in place.
    ///
    /// # Panics
    ///
    /// Panics if `partials` is empty or mixes facet variants.
    pub fn reduce(
        &self,
        name: impl Into<String>,
        order: SortOrder,
        partials: Vec<HistogramFacet>,
    ) -> HistogramFacet {
        assert!(!partials.is_empty(), "reduce requires at least one partial facet");

        if matches!(partials[0], HistogramFacet::Stats(_)) {
            let partials = partials
                .into_iter()
                .map(|p| match p {
                    HistogramFacet::Stats(f) => f,
                    HistogramFacet::Count(_) => panic!("cannot reduce mixed facet variants"),
                })
                .collect();
            HistogramFacet::Stats(self.reduce_stats(name, order, partials))
        } else {
            let partials = partials
                .into_iter()
                .map(|p| match p {
                    HistogramFacet::Count(f) => f,
                    HistogramFacet::Stats(_) => panic!("cannot reduce mixed facet variants"),
                })
                .collect();
            HistogramFacet::Count(self.reduce_counts(name, order, partials))
        }
    }

    /// Combine stats-variant partials into one result
    pub fn reduce_stats(
        &self,
        name: impl Into<String>,
        order: SortOrder,
        mut partials: Vec<StatsHistogram>,
    ) -> StatsHistogram {
        assert!(!partials.is_empty(), "reduce requires at least one partial facet");

        // A lone partial already holds the final entry set; merge
        // degenerates to a sort
        if partials.len() == 1 {
            let mut facet = partials.pop().unwrap();
            facet.order = order;
            facet.sort();
            return facet;
        }

        let num_partials = partials.len();
        let mut accumulator = self.stats_scratch.acquire();
        for partial in partials {
            for entry in partial.entries {
                match accumulator.entry(entry.time) {
                    Entry::Occupied(mut bucket) => bucket.get_mut().merge(&entry),
                    Entry::Vacant(slot) => {
                        slot.insert(entry);
                    }
                }
            }
        }

        // Drain yields exactly the populated buckets; spare capacity in the
        // accumulator never shows up as zero-valued entries
        let mut entries: Vec<StatsEntry> = accumulator.drain().map(|(_, entry)| entry).collect();
        entries.sort_by(|a, b| order.cmp_stats(a, b));
        self.stats_scratch.release(accumulator);

        debug!(
            partials = num_partials,
            buckets = entries.len(),
            "reduced stats histogram facet"
        );
        StatsHistogram::new(name, order, entries)
    }

    /// Combine count-variant partials into one result
    pub fn reduce_counts(
        &self,
        name: impl Into<String>,
        order: SortOrder,
        mut partials: Vec<CountHistogram>,
    ) -> CountHistogram {
        assert!(!partials.is_empty(), "reduce requires at least one partial facet");

        if partials.len() == 1 {
            let mut facet = partials.pop().unwrap();
            facet.order = order;
            facet.sort();
            return facet;
        }

        let num_partials = partials.len();
        let mut accumulator = self.count_scratch.acquire();
        for partial in partials {
            for entry in partial.entries {
                *accumulator.entry(entry.time).or_insert(0) += entry.count;
            }
        }

        let mut entries: Vec<CountEntry> = accumulator
            .drain()
            .map(|(time, count)| CountEntry::new(time, count))
            .collect();
        entries.sort_by(|a, b| order.cmp_counts(a, b));
        self.count_scratch.release(accumulator);

        debug!(
            partials = num_partials,
            buckets = entries.len(),
            "reduced count histogram facet"
        );
        CountHistogram::new(name, order, entries)
    }
}

impl Default for FacetMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn stats_partial(name: &str, entries: Vec<StatsEntry>) -> HistogramFacet {
        HistogramFacet::Stats(StatsHistogram::new(name, SortOrder::TimeAsc, entries))
    }

    fn entry(time: i64, count: i64, min: f64, max: f64, total_count: i64, total: f64) -> StatsEntry {
        StatsEntry::new(time, count, min, max, total_count, total)
    }

    #[test]
    fn test_single_partial_is_sorted_not_recombined() {
        let merger = FacetMerger::new();
        let partial = stats_partial(
            "latency",
            vec![
                entry(300, 1, 3.0, 3.0, 1, 3.0),
                entry(100, 2, 1.0, 2.0, 2, 3.0),
                entry(200, 1, 5.0, 5.0, 1, 5.0),
            ],
        );

        let merged = merger.reduce("latency", SortOrder::TimeAsc, vec![partial]);
        let facet = match merged {
            HistogramFacet::Stats(f) => f,
            _ => panic!("expected stats facet"),
        };

        let times: Vec<i64> = facet.entries.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![100, 200, 300]);
        // Values pass through untouched
        assert_eq!(facet.entries[0], entry(100, 2, 1.0, 2.0, 2, 3.0));
        assert_eq!(facet.entries[1], entry(200, 1, 5.0, 5.0, 1, 5.0));
        assert_eq!(facet.entries[2], entry(300, 1, 3.0, 3.0, 1, 3.0));
    }

    #[test]
    fn test_overlapping_buckets_combine() {
        let merger = FacetMerger::new();
        let p1 = stats_partial("latency", vec![entry(100, 2, 1.0, 5.0, 2, 6.0)]);
        let p2 = stats_partial("latency", vec![entry(100, 3, -1.0, 2.0, 3, 0.0)]);

        let merged = merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2]);
        let facet = match merged {
            HistogramFacet::Stats(f) => f,
            _ => panic!("expected stats facet"),
        };

        assert_eq!(facet.entries.len(), 1);
        assert_eq!(facet.entries[0], entry(100, 5, -1.0, 5.0, 5, 6.0));
    }

    #[test]
    fn test_disjoint_buckets_union() {
        let merger = FacetMerger::new();
        let p1 = stats_partial("latency", vec![entry(200, 1, 2.0, 2.0, 1, 2.0)]);
        let p2 = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);
        let p3 = stats_partial("latency", vec![entry(300, 1, 3.0, 3.0, 1, 3.0)]);

        let merged = merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2, p3]);
        let facet = match merged {
            HistogramFacet::Stats(f) => f,
            _ => panic!("expected stats facet"),
        };

        assert_eq!(facet.entries.len(), 3);
        assert_eq!(facet.entries[0], entry(100, 1, 1.0, 1.0, 1, 1.0));
        assert_eq!(facet.entries[1], entry(200, 1, 2.0, 2.0, 1, 2.0));
        assert_eq!(facet.entries[2], entry(300, 1, 3.0, 3.0, 1, 3.0));
    }

    #[test]
    fn test_reduce_is_order_insensitive() {
        let partials = || {
            vec![
                stats_partial(
                    "latency",
                    vec![entry(100, 2, 1.0, 5.0, 2, 6.0), entry(200, 1, 4.0, 4.0, 1, 4.0)],
                ),
                stats_partial("latency", vec![entry(100, 3, -1.0, 2.0, 3, 0.0)]),
                stats_partial("latency", vec![entry(300, 2, 0.0, 9.0, 1, 9.0)]),
            ]
        };

        let merger = FacetMerger::new();
        let forward = merger.reduce("latency", SortOrder::TimeAsc, partials());
        let mut reversed_input = partials();
        reversed_input.reverse();
        let backward = merger.reduce("latency", SortOrder::TimeAsc, reversed_input);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_merged_len_equals_distinct_bucket_times() {
        let merger = FacetMerger::with_config(&PoolConfig::new().with_initial_capacity(1024));
        let p1 = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);
        let p2 = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);

        // The scratch map has far more capacity than populated buckets;
        // only the live bucket may appear in the output
        let merged = merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_zero_contribution_bucket_keeps_real_bounds() {
        let merger = FacetMerger::new();
        let p1 = stats_partial("latency", vec![StatsEntry::empty(100)]);
        let p2 = stats_partial("latency", vec![entry(100, 2, -8.0, -3.0, 2, -11.0)]);

        let merged = merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2]);
        let facet = match merged {
            HistogramFacet::Stats(f) => f,
            _ => panic!("expected stats facet"),
        };

        assert!((facet.entries[0].min - (-8.0)).abs() < f64::EPSILON);
        assert!((facet.entries[0].max - (-3.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_count_variant_reduce() {
        let merger = FacetMerger::new();
        let p1 = HistogramFacet::Count(CountHistogram::new(
            "requests",
            SortOrder::CountDesc,
            vec![CountEntry::new(100, 2), CountEntry::new(200, 9)],
        ));
        let p2 = HistogramFacet::Count(CountHistogram::new(
            "requests",
            SortOrder::CountDesc,
            vec![CountEntry::new(100, 3)],
        ));

        let merged = merger.reduce("requests", SortOrder::CountDesc, vec![p1, p2]);
        let facet = match merged {
            HistogramFacet::Count(f) => f,
            _ => panic!("expected count facet"),
        };

        assert_eq!(facet.entries, vec![CountEntry::new(200, 9), CountEntry::new(100, 5)]);
    }

    #[test]
    fn test_scratch_accumulators_are_reused() {
        let merger = FacetMerger::new();
        assert_eq!(merger.stats_scratch.idle(), 0);

        let p1 = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);
        let p2 = stats_partial("latency", vec![entry(200, 1, 2.0, 2.0, 1, 2.0)]);
        merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2]);
        assert_eq!(merger.stats_scratch.idle(), 1);

        let p1 = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);
        let p2 = stats_partial("latency", vec![entry(200, 1, 2.0, 2.0, 1, 2.0)]);
        merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2]);
        assert_eq!(merger.stats_scratch.idle(), 1);
    }

    #[test]
    fn test_single_partial_path_skips_the_pool() {
        let merger = FacetMerger::new();
        let partial = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);
        merger.reduce("latency", SortOrder::TimeAsc, vec![partial]);
        assert_eq!(merger.stats_scratch.idle(), 0);
    }

    #[test]
    fn test_concurrent_merges() {
        let merger = Arc::new(FacetMerger::new());
        let mut handles = Vec::new();

        for shard_value in 0..4i64 {
            let merger = Arc::clone(&merger);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    let v = shard_value as f64;
                    let p1 = stats_partial("latency", vec![entry(100, 1, v, v, 1, v)]);
                    let p2 = stats_partial("latency", vec![entry(100, 1, v, v, 1, v)]);
                    let merged = merger.reduce("latency", SortOrder::TimeAsc, vec![p1, p2]);
                    let facet = match merged {
                        HistogramFacet::Stats(f) => f,
                        _ => panic!("expected stats facet"),
                    };
                    assert_eq!(facet.entries.len(), 1);
                    assert_eq!(facet.entries[0].count, 2);
                    assert!((facet.entries[0].total - 2.0 * v).abs() < f64::EPSILON);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    #[should_panic(expected = "at least one partial")]
    fn test_empty_partials_panics() {
        FacetMerger::new().reduce("latency", SortOrder::TimeAsc, Vec::new());
    }

    #[test]
    #[should_panic(expected = "mixed facet variants")]
    fn test_mixed_variants_panic() {
        let merger = FacetMerger::new();
        let stats = stats_partial("latency", vec![entry(100, 1, 1.0, 1.0, 1, 1.0)]);
        let counts = HistogramFacet::Count(CountHistogram::new(
            "latency",
            SortOrder::TimeAsc,
            vec![CountEntry::new(100, 1)],
        ));
        merger.reduce("latency", SortOrder::TimeAsc, vec![stats, counts]);
    }
}
