//! Wire format error types

use thiserror::Error;

/// Wire format errors
#[derive(Debug, Error)]
pub enum WireError {
    #[error("Buffer underflow: unexpected end of stream")]
    BufferUnderflow,

    #[error("Varint overflow: unterminated or too-long varint")]
    VarintOverflow,

    #[error("Invalid UTF-8 in facet name")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown sort order tag: {0}")]
    UnknownSortOrderTag(u8),
}

/// Result type for wire operations
pub type Result<T> = std::result::Result<T, WireError>;
