//! Merge engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for the merge engine's scratch accumulator pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum idle accumulators kept per pool; excess releases are dropped.
    /// Default: 8
    pub max_idle: usize,

    /// Bucket capacity of a freshly allocated accumulator.
    /// Default: 64
    pub initial_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: 8,
            initial_capacity: 64,
        }
    }
}

impl PoolConfig {
    /// Creates a new PoolConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the idle limit.
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Builder method to set the initial accumulator capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Creates a configuration that never retains idle accumulators, so
    /// every merge allocates fresh. Useful for deterministic tests.
    pub fn always_fresh() -> Self {
        Self {
            max_idle: 0,
            initial_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_idle, 8);
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PoolConfig::new().with_max_idle(2).with_initial_capacity(16);
        assert_eq!(config.max_idle, 2);
        assert_eq!(config.initial_capacity, 16);
    }

    #[test]
    fn test_always_fresh() {
        let config = PoolConfig::always_fresh();
        assert_eq!(config.max_idle, 0);
    }
}
