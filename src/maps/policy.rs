//! Map policy
//!
//! Map storage order, write modes, and the resolved per-operation policy.
//! A policy is built once and reused across any number of operation builds;
//! the write mode is never re-resolved per call.

use super::opcode::MapOpcode;

/// Map storage order, attached at map-creation time via a policy
///
/// Persists with the stored map until explicitly changed. Discriminants are
/// the wire attribute values (2 is reserved by the server protocol).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MapOrder {
    /// Map is not ordered. This is the default.
    Unordered = 0,

    /// Order map by key.
    KeyOrdered = 1,

    /// Order map by key, then value.
    KeyValueOrdered = 3,
}

/// Unique-key map write mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapWriteMode {
    /// If the key already exists, the item is overwritten.
    /// If the key does not exist, a new item is created.
    Update,

    /// If the key already exists, the item is overwritten.
    /// If the key does not exist, the write fails.
    UpdateOnly,

    /// If the key already exists, the write fails.
    /// If the key does not exist, a new item is created.
    CreateOnly,
}

impl MapWriteMode {
    /// Resolve to the (single-item, multi-item) opcode pair
    pub fn resolve(self) -> (MapOpcode, MapOpcode) {
        match self {
            MapWriteMode::Update => (MapOpcode::Put, MapOpcode::PutItems),
            MapWriteMode::UpdateOnly => (MapOpcode::Replace, MapOpcode::ReplaceItems),
            MapWriteMode::CreateOnly => (MapOpcode::Add, MapOpcode::AddItems),
        }
    }
}

/// Policy directives when creating a map and writing map items
///
/// Immutable triple of the order attribute and the write-mode opcode pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPolicy {
    order: MapOrder,
    item_op: MapOpcode,
    items_op: MapOpcode,
}

impl MapPolicy {
    /// Create a policy with the given creation order and write mode
    pub fn new(order: MapOrder, write_mode: MapWriteMode) -> Self {
        let (item_op, items_op) = write_mode.resolve();
        Self {
            order,
            item_op,
            items_op,
        }
    }

    /// The map order attribute
    pub fn order(&self) -> MapOrder {
        self.order
    }

    /// Opcode for single-item writes under this policy
    pub(crate) fn item_op(&self) -> MapOpcode {
        self.item_op
    }

    /// Opcode for multi-item writes under this policy
    pub(crate) fn items_op(&self) -> MapOpcode {
        self.items_op
    }
}

impl Default for MapPolicy {
    /// Unordered map with update (upsert) writes
    fn default() -> Self {
        Self::new(MapOrder::Unordered, MapWriteMode::Update)
    }
}
