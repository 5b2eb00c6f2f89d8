//! Binary encode/decode of histogram facet results
//!
//! Stats-variant layout, fixed field order, no padding:
//!
//! ```text
//! string   name           varint byte length + UTF-8 bytes
//! u8       order tag
//! varint   entry count
//! per entry:
//!     i64     time        fixed 8 bytes, little-endian
//!     varint  count
//!     f64     min         exact bit pattern, little-endian
//!     f64     max
//!     varint  total_count
//!     f64     total
//! ```
//!
//! The count-only variant shares the header and writes `time` + `count`
//! per entry. Decoding reconstructs entries in exactly the written order;
//! a truncated stream or an unknown order tag fails without producing a
//! partial result.

use crate::error::{Result, WireError};
use crate::io::{WireReader, WireWriter};
use tsfacet_core::{
    CountEntry, CountHistogram, HistogramFacet, SortOrder, StatsEntry, StatsHistogram,
};

/// Stream type identifier the dispatch registry maps to [`decode_stats`]
pub const STATS_STREAM_TYPE: &str = "histogram_stats";

/// Stream type identifier the dispatch registry maps to [`decode_counts`]
pub const COUNT_STREAM_TYPE: &str = "histogram_count";

/// Entry count is remote input; grow past this instead of preallocating
const MAX_PREALLOCATED_ENTRIES: usize = 1024;

/// Stream type identifier for a facet's variant
pub fn stream_type(facet: &HistogramFacet) -> &'static str {
    match facet {
        HistogramFacet::Count(_) => COUNT_STREAM_TYPE,
        HistogramFacet::Stats(_) => STATS_STREAM_TYPE,
    }
}

/// Encode a facet in its variant's wire layout
pub fn encode(facet: &HistogramFacet) -> Vec<u8> {
    match facet {
        HistogramFacet::Count(f) => encode_counts(f),
        HistogramFacet::Stats(f) => encode_stats(f),
    }
}

/// Encode a stats facet
pub fn encode_stats(facet: &StatsHistogram) -> Vec<u8> {
    let mut writer = WireWriter::with_capacity(16 + facet.name.len() + facet.entries.len() * 40);
    writer.write_str(&facet.name);
    writer.write_u8(facet.order.tag());
    writer.write_varint(facet.entries.len() as u64);
    for entry in &facet.entries {
        writer.write_i64(entry.time);
        writer.write_varint(entry.count as u64);
        writer.write_f64(entry.min);
        writer.write_f64(entry.max);
        writer.write_varint(entry.total_count as u64);
        writer.write_f64(entry.total);
    }
    writer.into_bytes()
}

/// Encode a count-only facet
pub fn encode_counts(facet: &CountHistogram) -> Vec<u8> {
    let mut writer = WireWriter::with_capacity(16 + facet.name.len() + facet.entries.len() * 10);
    writer.write_str(&facet.name);
    writer.write_u8(facet.order.tag());
    writer.write_varint(facet.entries.len() as u64);
    for entry in &facet.entries {
        writer.write_i64(entry.time);
        writer.write_varint(entry.count as u64);
    }
    writer.into_bytes()
}

/// Decode a stats facet from a byte buffer
pub fn decode_stats(bytes: &[u8]) -> Result<StatsHistogram> {
    read_stats(&mut WireReader::new(bytes))
}

/// Decode a count-only facet from a byte buffer
pub fn decode_counts(bytes: &[u8]) -> Result<CountHistogram> {
    read_counts(&mut WireReader::new(bytes))
}

/// Read a stats facet from a reader positioned at its first byte
pub fn read_stats(reader: &mut WireReader<'_>) -> Result<StatsHistogram> {
    let name = reader.read_str()?;
    let order = read_order(reader)?;
    let len = reader.read_varint()? as usize;
    let mut entries = Vec::with_capacity(len.min(MAX_PREALLOCATED_ENTRIES));
    for _ in 0..len {
        let time = reader.read_i64()?;
        let count = reader.read_varint()? as i64;
        let min = reader.read_f64()?;
        let max = reader.read_f64()?;
        let total_count = reader.read_varint()? as i64;
        let total = reader.read_f64()?;
        entries.push(StatsEntry::new(time, count, min, max, total_count, total));
    }
    Ok(StatsHistogram::new(name, order, entries))
}

/// Read a count-only facet from a reader positioned at its first byte
pub fn read_counts(reader: &mut WireReader<'_>) -> Result<CountHistogram> {
    let name = reader.read_str()?;
    let order = read_order(reader)?;
    let len = reader.read_varint()? as usize;
    let mut entries = Vec::with_capacity(len.min(MAX_PREALLOCATED_ENTRIES));
    for _ in 0..len {
        let time = reader.read_i64()?;
        let count = reader.read_varint()? as i64;
        entries.push(CountEntry::new(time, count));
    }
    Ok(CountHistogram::new(name, order, entries))
}

fn read_order(reader: &mut WireReader<'_>) -> Result<SortOrder> {
    let tag = reader.read_u8()?;
    SortOrder::from_tag(tag).ok_or(WireError::UnknownSortOrderTag(tag))
}
