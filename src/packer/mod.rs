//! Packer Module
//!
//! Byte-buffer layer implementing the store's value-serialization format.
//! Every operation payload starts with a raw big-endian opcode tag; the
//! argument list, when present, is one marker-tagged container whose count
//! prefix matches the number of packed values.
//!
//! ## Payload Format
//! ```text
//! ┌────────────┬──────────────────────────────────────────────┐
//! │ Opcode (2) │ Argument list (optional)                     │
//! │  i16 BE    │ [0x06][count: u32][value]...                 │
//! └────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! ## Value Encoding
//! ```text
//! nil    [0x00]
//! bool   [0x01][flag: u8]
//! int    [0x02][value: i64 BE]
//! float  [0x03][bits: f64 BE]
//! str    [0x04][len: u32 BE][utf-8 bytes]
//! blob   [0x05][len: u32 BE][bytes]
//! list   [0x06][count: u32 BE][value]...
//! map    [0x07][count: u32 BE][key value]...
//! ```

mod pack;
mod unpack;

pub use pack::Packer;
pub use unpack::{unpack_payload, Unpacker};

// =============================================================================
// Shared Markers (used by packer and unpacker)
// =============================================================================

pub(crate) const MARKER_NIL: u8 = 0x00;
pub(crate) const MARKER_BOOL: u8 = 0x01;
pub(crate) const MARKER_INT: u8 = 0x02;
pub(crate) const MARKER_FLOAT: u8 = 0x03;
pub(crate) const MARKER_STR: u8 = 0x04;
pub(crate) const MARKER_BLOB: u8 = 0x05;
pub(crate) const MARKER_LIST: u8 = 0x06;
pub(crate) const MARKER_MAP: u8 = 0x07;

/// Opcode prefix size: one big-endian i16, no marker
pub const OPCODE_SIZE: usize = 2;
