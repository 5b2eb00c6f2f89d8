//! TsFacet Merge - Coordinator-side merge engine for histogram facets
//!
//! Combines per-shard partial facet results into one canonical,
//! deduplicated, ordered result:
//! - Single-partial fast path (merge degenerates to a sort)
//! - Keyed in-place accumulation for the multi-partial path
//! - Pooled scratch accumulators to avoid per-request allocation churn

pub mod config;
pub mod engine;
pub mod pool;

pub use config::PoolConfig;
pub use engine::FacetMerger;
pub use pool::AccumulatorPool;
