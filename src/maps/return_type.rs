//! Return type selectors
//!
//! Which representation of matched items a read or remove operation yields.
//! Orthogonal to the opcode; encoded as the leading integer argument of
//! every selecting operation.

/// Map return type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MapReturnType {
    /// Do not return a result
    None = 0,

    /// Key index order
    ///
    /// 0 = first key, N = Nth key, -1 = last key
    Index = 1,

    /// Reverse key order
    ///
    /// 0 = last key, -1 = first key
    ReverseIndex = 2,

    /// Value order
    ///
    /// 0 = smallest value, N = Nth smallest value, -1 = largest value
    Rank = 3,

    /// Reverse value order
    ///
    /// 0 = largest value, -1 = smallest value
    ReverseRank = 4,

    /// Count of items selected
    Count = 5,

    /// Key for a single-key read; key list for a range read
    Key = 6,

    /// Value for a single-key read; value list for a range read
    Value = 7,

    /// Key/value items
    KeyValue = 8,
}
