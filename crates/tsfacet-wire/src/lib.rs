//! TsFacet Wire - Binary wire format for histogram facet results
//!
//! Encodes a named, ordered facet result for transport between nodes:
//! - Length-prefixed UTF-8 name and one-byte sort order tag
//! - Varint entry count, then fixed-layout entries
//! - Little-endian fixed-width bucket times and float statistics,
//!   LEB128 varints for counts

pub mod codec;
pub mod error;
pub mod io;

pub use codec::{
    decode_counts, decode_stats, encode, encode_counts, encode_stats, read_counts, read_stats,
    stream_type, COUNT_STREAM_TYPE, STATS_STREAM_TYPE,
};
pub use error::{Result, WireError};
pub use io::{WireReader, WireWriter};
