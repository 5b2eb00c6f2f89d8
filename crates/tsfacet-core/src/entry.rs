//! Bucket entry types
//!
//! A histogram facet is a set of time buckets. The stats variant carries the
//! full numeric summary of a value field per bucket; the count variant
//! carries only document counts.

use serde::{Deserialize, Serialize};

/// A single bucket of a histogram facet with full value statistics.
///
/// The bucket key `time` is an opaque, already-rounded i64; it is unique
/// within a single facet result. `total_count` counts the documents that
/// contributed a numeric value and is always `<= count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    /// Bucket key
    pub time: i64,
    /// Documents in this bucket
    pub count: i64,
    /// Documents that contributed a numeric value
    pub total_count: i64,
    /// Sum of contributed values
    pub total: f64,
    /// Minimum contributed value
    pub min: f64,
    /// Maximum contributed value
    pub max: f64,
}

impl StatsEntry {
    /// Create an entry with all statistics populated
    pub fn new(time: i64, count: i64, min: f64, max: f64, total_count: i64, total: f64) -> Self {
        Self {
            time,
            count,
            total_count,
            total,
            min,
            max,
        }
    }

    /// Create an entry that has observed no documents yet.
    ///
    /// The bounds start at the infinity sentinels so that merging this
    /// bucket with one that holds real values, negative values included,
    /// never corrupts the combined bound.
    pub fn empty(time: i64) -> Self {
        Self {
            time,
            count: 0,
            total_count: 0,
            total: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Mean of the contributed values, computed on read.
    ///
    /// Standard IEEE-754 division: a bucket with `total_count == 0` yields
    /// a non-finite value, not an error.
    pub fn mean(&self) -> f64 {
        self.total / self.total_count as f64
    }

    /// Combine another bucket with the same time key into this one
    pub fn merge(&mut self, other: &StatsEntry) {
        self.count += other.count;
        self.total_count += other.total_count;
        self.total += other.total;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }
}

/// A single bucket of a count-only histogram facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    /// Bucket key
    pub time: i64,
    /// Documents in this bucket
    pub count: i64,
}

impl CountEntry {
    /// Create a count-only entry
    pub fn new(time: i64, count: i64) -> Self {
        Self { time, count }
    }

    /// Combine another bucket with the same time key into this one
    pub fn merge(&mut self, other: &CountEntry) {
        self.count += other.count;
    }
}
