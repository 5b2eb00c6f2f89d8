//! Reusable keyed-accumulator pool
//!
//! A high query-rate coordinator runs many merges per second; reusing the
//! scratch maps avoids per-request allocation churn. Reuse is purely a
//! performance measure: the merge engine behaves identically with a pool
//! that always allocates fresh.

use crate::config::PoolConfig;
use fxhash::{FxBuildHasher, FxHashMap};
use parking_lot::Mutex;

/// Free-list of reusable `time -> V` accumulator maps.
///
/// Safe to share across concurrently executing merges: the free list is
/// mutex-guarded, and an acquired map is owned exclusively by one merge
/// until it is released.
pub struct AccumulatorPool<V> {
    free: Mutex<Vec<FxHashMap<i64, V>>>,
    max_idle: usize,
    initial_capacity: usize,
}

impl<V> AccumulatorPool<V> {
    /// Create a pool with the given limits
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_idle: config.max_idle,
            initial_capacity: config.initial_capacity,
        }
    }

    /// Borrow an empty accumulator, allocating if the free list is empty
    pub fn acquire(&self) -> FxHashMap<i64, V> {
        self.free.lock().pop().unwrap_or_else(|| {
            FxHashMap::with_capacity_and_hasher(self.initial_capacity, FxBuildHasher::default())
        })
    }

    /// Clear an accumulator and return it to the free list.
    ///
    /// The map is dropped instead if the free list already holds
    /// `max_idle` accumulators.
    pub fn release(&self, mut map: FxHashMap<i64, V>) {
        map.clear();
        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push(map);
        }
    }

    /// Number of idle accumulators currently pooled
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl<V> Default for AccumulatorPool<V> {
    fn default() -> Self {
        Self::new(&PoolConfig::default())
    }
}
