//! Error types for mapwire
//!
//! Provides a unified error type for all operations.
//!
//! Encoding a map operation is infallible by construction: opcode and arity
//! decisions are closed-enumeration lookups, so the builders return plain
//! values. The variants below surface on the structural decode path only
//! (payload inspection and verification).

use thiserror::Error;

/// Result type alias using MapwireError
pub type Result<T> = std::result::Result<T, MapwireError>;

/// Unified error type for mapwire operations
#[derive(Debug, Error)]
pub enum MapwireError {
    // -------------------------------------------------------------------------
    // Unpack Errors
    // -------------------------------------------------------------------------
    #[error("Truncated payload: needed {needed} more bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    #[error("Unknown value marker: 0x{0:02x}")]
    UnknownMarker(u8),

    #[error("Unexpected value marker: expected 0x{expected:02x}, found 0x{found:02x}")]
    UnexpectedMarker { expected: u8, found: u8 },

    #[error("Invalid UTF-8 in string value: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    // -------------------------------------------------------------------------
    // Opcode Table Errors
    // -------------------------------------------------------------------------
    #[error("Unknown map opcode: {0}")]
    UnknownOpcode(i16),
}
