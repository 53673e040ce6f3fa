//! Map opcodes
//!
//! The closed numeric table of server-side map operations. These values are
//! a wire contract with the store and must never be renumbered.

use crate::error::MapwireError;

/// Server-side map operation code
///
/// Modify opcodes mutate the stored map; read opcodes select and return
/// data without mutating. Gaps in the numbering are reserved by the server
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum MapOpcode {
    // Policy
    SetType = 64,

    // Writes
    Add = 65,
    AddItems = 66,
    Put = 67,
    PutItems = 68,
    Replace = 69,
    ReplaceItems = 70,
    Increment = 73,
    Decrement = 74,
    Clear = 75,

    // Removes
    RemoveByKey = 76,
    RemoveByIndex = 77,
    RemoveByRank = 79,
    RemoveByKeyList = 81,
    RemoveByValue = 82,
    RemoveByValueList = 83,
    RemoveByKeyInterval = 84,
    RemoveByIndexRange = 85,
    RemoveByValueInterval = 86,
    RemoveByRankRange = 87,

    // Reads
    Size = 96,
    GetByKey = 97,
    GetByIndex = 98,
    GetByRank = 100,
    GetByValue = 102,
    GetByKeyInterval = 103,
    GetByIndexRange = 104,
    GetByValueInterval = 105,
    GetByRankRange = 106,
}

impl MapOpcode {
    /// Numeric wire tag
    pub fn code(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for MapOpcode {
    type Error = MapwireError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Ok(match code {
            64 => MapOpcode::SetType,
            65 => MapOpcode::Add,
            66 => MapOpcode::AddItems,
            67 => MapOpcode::Put,
            68 => MapOpcode::PutItems,
            69 => MapOpcode::Replace,
            70 => MapOpcode::ReplaceItems,
            73 => MapOpcode::Increment,
            74 => MapOpcode::Decrement,
            75 => MapOpcode::Clear,
            76 => MapOpcode::RemoveByKey,
            77 => MapOpcode::RemoveByIndex,
            79 => MapOpcode::RemoveByRank,
            81 => MapOpcode::RemoveByKeyList,
            82 => MapOpcode::RemoveByValue,
            83 => MapOpcode::RemoveByValueList,
            84 => MapOpcode::RemoveByKeyInterval,
            85 => MapOpcode::RemoveByIndexRange,
            86 => MapOpcode::RemoveByValueInterval,
            87 => MapOpcode::RemoveByRankRange,
            96 => MapOpcode::Size,
            97 => MapOpcode::GetByKey,
            98 => MapOpcode::GetByIndex,
            100 => MapOpcode::GetByRank,
            102 => MapOpcode::GetByValue,
            103 => MapOpcode::GetByKeyInterval,
            104 => MapOpcode::GetByIndexRange,
            105 => MapOpcode::GetByValueInterval,
            106 => MapOpcode::GetByRankRange,
            other => return Err(MapwireError::UnknownOpcode(other)),
        })
    }
}
