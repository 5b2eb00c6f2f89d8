//! TsFacet Core - Core types for the histogram facet engine
//!
//! This crate provides the fundamental data types used throughout the facet
//! pipeline:
//! - `StatsEntry` / `CountEntry`: one time bucket's statistics
//! - `StatsHistogram` / `CountHistogram`: a named, ordered facet result
//! - `HistogramFacet`: tagged variant over the two facet kinds
//! - `SortOrder`: total orders over entries, each with a fixed wire tag

pub mod entry;
pub mod facet;
pub mod ordering;

pub use entry::{CountEntry, StatsEntry};
pub use facet::{CountHistogram, HistogramFacet, StatsHistogram};
pub use ordering::SortOrder;
