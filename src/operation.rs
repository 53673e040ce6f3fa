//! Operation descriptor
//!
//! The unit handed to the surrounding request batcher: which class of
//! operation this is, which bin it targets, and the encoded payload. A
//! descriptor is immutable once built and owned by the caller, who embeds
//! it into a larger per-record operate command.

use bytes::Bytes;

/// Operation class
///
/// Decides how the enclosing operate command treats the operation; it is
/// not part of this payload's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Mutates the stored map (writes, removes, clear, set-policy)
    MapModify,

    /// Selects and returns data, never mutates (gets, size)
    MapRead,
}

/// A fully encoded map operation against one bin
#[derive(Debug, Clone, PartialEq)]
pub struct MapOperation {
    /// Operation class tag
    pub op_type: OperationType,

    /// Target bin name
    pub bin: String,

    /// Encoded payload: opcode tag plus argument list
    pub payload: Bytes,
}

impl MapOperation {
    /// Wrap encoded payload bytes into a descriptor
    pub(crate) fn new(op_type: OperationType, bin: &str, payload: Bytes) -> Self {
        Self {
            op_type,
            bin: bin.to_string(),
            payload,
        }
    }

    /// True for operations that mutate the stored map
    pub fn is_modify(&self) -> bool {
        self.op_type == OperationType::MapModify
    }

    /// True for read-only selections
    pub fn is_read(&self) -> bool {
        self.op_type == OperationType::MapRead
    }

    /// Consume the descriptor, handing the payload to the outer command
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}
