//! Map Operations Module
//!
//! Builders for server-side map operations. Each builder produces a
//! [`MapOperation`](crate::MapOperation) carrying an opcode-tagged payload:
//!
//! ```text
//! ┌──────────────┬─────────────────┬──────────┬─────┬──────────┐
//! │ Opcode (2)   │ List hdr (opt)  │  Arg 0   │ ... │  Arg N-1 │
//! └──────────────┴─────────────────┴──────────┴─────┴──────────┘
//! ```
//!
//! Operations that take no arguments (clear, size) encode the opcode alone.
//! For all others the list header's count matches the packed arguments
//! exactly; optional trailing arguments change the count rather than leaving
//! empty slots, with one exception: an absent interval begin packs an
//! explicit nil so the end bound keeps its position.
//!
//! ## Index and rank addressing
//!
//! Selection by position accepts negative values, resolved by the server:
//!
//! - Index 0: first item in the map
//! - Index 4: fifth item in the map
//! - Index -1: last item in the map
//! - Index -3: third-to-last item in the map
//!
//! - Rank 0: item with the lowest value
//! - Rank 4: fifth-lowest ranked item
//! - Rank -1: item with the highest value
//! - Rank -3: third-highest ranked item

mod opcode;
mod ops;
mod policy;
mod return_type;

pub use opcode::MapOpcode;
pub use ops::{
    clear, decrement, get_by_index, get_by_index_range, get_by_index_range_count, get_by_key,
    get_by_key_range, get_by_rank, get_by_rank_range, get_by_rank_range_count, get_by_value,
    get_by_value_range, increment, put, put_items, remove_by_index, remove_by_index_range,
    remove_by_index_range_count, remove_by_key, remove_by_key_list, remove_by_key_range,
    remove_by_rank, remove_by_rank_range, remove_by_rank_range_count, remove_by_value,
    remove_by_value_list, remove_by_value_range, set_policy, size,
};
pub use policy::{MapOrder, MapPolicy, MapWriteMode};
pub use return_type::MapReturnType;
