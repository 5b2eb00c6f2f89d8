//! TsFacet Render - Structured document rendering for merged facets
//!
//! Produces the externally visible JSON document for an already-merged
//! facet result: a keyed object under the facet name holding the
//! aggregation-kind discriminant and the entry array, with a fixed field
//! order and the per-bucket mean computed fresh at render time.

pub mod document;

pub use document::{FacetDocument, FACET_TYPE};
