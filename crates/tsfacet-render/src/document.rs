//! Facet document serialization
//!
//! Field order is part of the output contract, so the document is built
//! from plain structs whose serde field order matches the contract instead
//! of going through a sorted JSON map. Entries are emitted in the order
//! already present on the facet; the caller passes an already-merged,
//! already-sorted result and the renderer never re-sorts.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tsfacet_core::{CountHistogram, HistogramFacet, StatsHistogram};

/// Aggregation-kind discriminant emitted as `_type`
pub const FACET_TYPE: &str = "histogram";

/// Serializable view over a merged facet.
///
/// Serializes to `{"<name>": {"_type": "histogram", "entries": [...]}}`.
/// Stats entries carry `time`, `count`, `min`, `max`, `total`,
/// `total_count` and `mean`, in that order; count entries carry `time`
/// and `count`. A mean with no contributing values is non-finite and
/// serializes as JSON `null`.
pub struct FacetDocument<'a> {
    facet: &'a HistogramFacet,
}

impl<'a> FacetDocument<'a> {
    /// Create a document view over a merged facet
    pub fn new(facet: &'a HistogramFacet) -> Self {
        Self { facet }
    }

    /// Render the document as a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for FacetDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self.facet {
            HistogramFacet::Stats(facet) => {
                map.serialize_entry(&facet.name, &stats_body(facet))?;
            }
            HistogramFacet::Count(facet) => {
                map.serialize_entry(&facet.name, &count_body(facet))?;
            }
        }
        map.end()
    }
}

#[derive(Serialize)]
struct FacetBody<E> {
    #[serde(rename = "_type")]
    kind: &'static str,
    entries: Vec<E>,
}

#[derive(Serialize)]
struct StatsEntryDoc {
    time: i64,
    count: i64,
    min: f64,
    max: f64,
    total: f64,
    total_count: i64,
    mean: f64,
}

#[derive(Serialize)]
struct CountEntryDoc {
    time: i64,
    count: i64,
}

fn stats_body(facet: &StatsHistogram) -> FacetBody<StatsEntryDoc> {
    FacetBody {
        kind: FACET_TYPE,
        entries: facet
            .entries
            .iter()
            .map(|entry| StatsEntryDoc {
                time: entry.time,
                count: entry.count,
                min: entry.min,
                max: entry.max,
                total: entry.total,
                total_count: entry.total_count,
                mean: entry.mean(),
            })
            .collect(),
    }
}

fn count_body(facet: &CountHistogram) -> FacetBody<CountEntryDoc> {
    FacetBody {
        kind: FACET_TYPE,
        entries: facet
            .entries
            .iter()
            .map(|entry| CountEntryDoc {
                time: entry.time,
                count: entry.count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsfacet_core::{CountEntry, SortOrder, StatsEntry};

    #[test]
    fn test_stats_document_field_order() {
        let facet = HistogramFacet::Stats(StatsHistogram::new(
            "response_time",
            SortOrder::TimeAsc,
            vec![StatsEntry::new(100, 5, -1.0, 5.0, 5, 6.0)],
        ));

        let json = FacetDocument::new(&facet).to_json().unwrap();
        assert_eq!(
            json,
            "{\"response_time\":{\"_type\":\"histogram\",\"entries\":[\
             {\"time\":100,\"count\":5,\"min\":-1.0,\"max\":5.0,\
             \"total\":6.0,\"total_count\":5,\"mean\":1.2}]}}"
        );
    }

    #[test]
    fn test_count_document() {
        let facet = HistogramFacet::Count(CountHistogram::new(
            "requests",
            SortOrder::CountDesc,
            vec![CountEntry::new(200, 9), CountEntry::new(100, 5)],
        ));

        let json = FacetDocument::new(&facet).to_json().unwrap();
        assert_eq!(
            json,
            "{\"requests\":{\"_type\":\"histogram\",\"entries\":[\
             {\"time\":200,\"count\":9},{\"time\":100,\"count\":5}]}}"
        );
    }

    #[test]
    fn test_entries_render_in_given_order() {
        // Deliberately unsorted: the renderer must not re-sort
        let facet = HistogramFacet::Stats(StatsHistogram::new(
            "response_time",
            SortOrder::TimeAsc,
            vec![
                StatsEntry::new(300, 1, 1.0, 1.0, 1, 1.0),
                StatsEntry::new(100, 1, 1.0, 1.0, 1, 1.0),
            ],
        ));

        let json = FacetDocument::new(&facet).to_json().unwrap();
        let pos_300 = json.find("\"time\":300").unwrap();
        let pos_100 = json.find("\"time\":100").unwrap();
        assert!(pos_300 < pos_100);
    }

    #[test]
    fn test_non_finite_mean_renders_as_null() {
        let facet = HistogramFacet::Stats(StatsHistogram::new(
            "response_time",
            SortOrder::TimeAsc,
            vec![StatsEntry::empty(100)],
        ));

        let json = FacetDocument::new(&facet).to_json().unwrap();
        assert!(json.contains("\"mean\":null"));
    }
}
