//! Map operation builders
//!
//! One builder per server-side map operation. Each builder resolves the
//! opcode for the call, packs the opcode-specific argument list, and wraps
//! the bytes into a [`MapOperation`] descriptor for the surrounding operate
//! command. Builders are pure functions of their inputs: one scratch buffer
//! per call, no shared state, no failure path.

use crate::operation::{MapOperation, OperationType};
use crate::packer::Packer;
use crate::value::Value;

use super::opcode::MapOpcode;
use super::policy::MapPolicy;
use super::return_type::MapReturnType;

// =============================================================================
// Shape Encoders
// =============================================================================

/// Wrap a finished packer into an operation descriptor
fn wrap(op_type: OperationType, bin: &str, packer: Packer) -> MapOperation {
    let payload = packer.into_bytes();
    tracing::trace!(
        "encoded {:?} map operation on bin '{}' ({} bytes)",
        op_type,
        bin,
        payload.len()
    );
    MapOperation::new(op_type, bin, payload)
}

/// Opcode only, no argument list (clear, size)
fn no_arg_op(op: MapOpcode, op_type: OperationType, bin: &str) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    wrap(op_type, bin, packer)
}

/// `[return_type, selector]`: one scalar selector
fn selector_op(
    op: MapOpcode,
    op_type: OperationType,
    bin: &str,
    selector: &Value,
    return_type: MapReturnType,
) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    packer.pack_list_header(2);
    packer.pack_int(return_type as i64);
    packer.pack_value(selector);
    wrap(op_type, bin, packer)
}

/// `[return_type, list]`: selectors packed as one nested sequence value
fn selector_list_op(
    op: MapOpcode,
    op_type: OperationType,
    bin: &str,
    selectors: &[Value],
    return_type: MapReturnType,
) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    packer.pack_list_header(2);
    packer.pack_int(return_type as i64);
    packer.pack_list(selectors);
    wrap(op_type, bin, packer)
}

/// `[return_type, position]`: index/rank addressing to the end of the map
fn position_op(
    op: MapOpcode,
    op_type: OperationType,
    bin: &str,
    position: i64,
    return_type: MapReturnType,
) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    packer.pack_list_header(2);
    packer.pack_int(return_type as i64);
    packer.pack_int(position);
    wrap(op_type, bin, packer)
}

/// `[return_type, position, count]`: bounded index/rank run
fn position_count_op(
    op: MapOpcode,
    op_type: OperationType,
    bin: &str,
    position: i64,
    count: i64,
    return_type: MapReturnType,
) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    packer.pack_list_header(3);
    packer.pack_int(return_type as i64);
    packer.pack_int(position);
    packer.pack_int(count);
    wrap(op_type, bin, packer)
}

/// `[key, delta, order]`: increment/decrement, which may create the entry,
/// so the order attribute is always present regardless of write mode
fn adjust_op(
    op: MapOpcode,
    policy: &MapPolicy,
    bin: &str,
    key: &Value,
    delta: &Value,
) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    packer.pack_list_header(3);
    packer.pack_value(key);
    packer.pack_value(delta);
    packer.pack_int(policy.order() as i64);
    wrap(OperationType::MapModify, bin, packer)
}

/// Bound shape for key/value interval selections
///
/// The wire distinguishes an open low end (explicit nil in the begin slot)
/// from an open high end (end slot dropped entirely), so the argument count
/// always matches the container header.
enum Interval<'a> {
    /// Begin present, end absent: `[return_type, begin]`
    From(&'a Value),

    /// Begin absent, end present: `[return_type, nil, end]`
    Below(&'a Value),

    /// Both present: `[return_type, begin, end]`
    Between(&'a Value, &'a Value),
}

impl<'a> Interval<'a> {
    /// Classify optional bounds into an encoding shape
    ///
    /// Callers must supply at least one bound. With both absent the shape
    /// degenerates to `[return_type, nil]`, an unbounded selection.
    fn classify(begin: Option<&'a Value>, end: Option<&'a Value>) -> Self {
        match (begin, end) {
            (Some(begin), Some(end)) => Interval::Between(begin, end),
            (Some(begin), None) => Interval::From(begin),
            (None, Some(end)) => Interval::Below(end),
            (None, None) => Interval::From(&Value::Nil),
        }
    }
}

/// Encode one interval shape; the nil-vs-omit asymmetry lives here
fn interval_op(
    op: MapOpcode,
    op_type: OperationType,
    bin: &str,
    interval: Interval<'_>,
    return_type: MapReturnType,
) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    match interval {
        Interval::From(begin) => {
            packer.pack_list_header(2);
            packer.pack_int(return_type as i64);
            packer.pack_value(begin);
        }
        Interval::Below(end) => {
            // An absent begin packs an explicit nil; the slot is never omitted.
            packer.pack_list_header(3);
            packer.pack_int(return_type as i64);
            packer.pack_nil();
            packer.pack_value(end);
        }
        Interval::Between(begin, end) => {
            packer.pack_list_header(3);
            packer.pack_int(return_type as i64);
            packer.pack_value(begin);
            packer.pack_value(end);
        }
    }
    wrap(op_type, bin, packer)
}

// =============================================================================
// Policy Operation
// =============================================================================

/// Create a set-order policy operation.
///
/// Server sets the map's order attributes and returns null. The attributes
/// can be changed after the map is created.
pub fn set_policy(policy: &MapPolicy, bin: &str) -> MapOperation {
    let mut packer = Packer::new();
    packer.pack_opcode(MapOpcode::SetType.code());
    packer.pack_list_header(1);
    packer.pack_int(policy.order() as i64);
    wrap(OperationType::MapModify, bin, packer)
}

// =============================================================================
// Write Operations
// =============================================================================

/// Create a map put operation.
///
/// Server writes the key/value item to the map bin and returns the map size.
/// The policy dictates the map type to create when the bin does not exist
/// and the write mode for the item.
pub fn put(policy: &MapPolicy, bin: &str, key: &Value, value: &Value) -> MapOperation {
    let op = policy.item_op();
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    if op == MapOpcode::Replace {
        // Replace cannot create a missing entry, so it never carries the
        // order attribute.
        packer.pack_list_header(2);
        packer.pack_value(key);
        packer.pack_value(value);
    } else {
        packer.pack_list_header(3);
        packer.pack_value(key);
        packer.pack_value(value);
        packer.pack_int(policy.order() as i64);
    }
    wrap(OperationType::MapModify, bin, packer)
}

/// Create a map put-items operation.
///
/// Server writes each item to the map bin and returns the map size. The
/// whole mapping packs as one nested value in caller order; keys must be
/// unique.
pub fn put_items(policy: &MapPolicy, bin: &str, items: &[(Value, Value)]) -> MapOperation {
    let op = policy.items_op();
    let mut packer = Packer::new();
    packer.pack_opcode(op.code());
    if op == MapOpcode::ReplaceItems {
        // Replace cannot create missing entries, so it never carries the
        // order attribute.
        packer.pack_list_header(1);
        packer.pack_mapping(items);
    } else {
        packer.pack_list_header(2);
        packer.pack_mapping(items);
        packer.pack_int(policy.order() as i64);
    }
    wrap(OperationType::MapModify, bin, packer)
}

/// Create a map increment operation.
///
/// Server increments the value identified by the key by `delta` and returns
/// the final result. Valid only for numbers. The entry is created under the
/// policy's order when absent.
pub fn increment(policy: &MapPolicy, bin: &str, key: &Value, delta: &Value) -> MapOperation {
    adjust_op(MapOpcode::Increment, policy, bin, key, delta)
}

/// Create a map decrement operation.
///
/// Server decrements the value identified by the key by `delta` and returns
/// the final result. Valid only for numbers.
pub fn decrement(policy: &MapPolicy, bin: &str, key: &Value, delta: &Value) -> MapOperation {
    adjust_op(MapOpcode::Decrement, policy, bin, key, delta)
}

/// Create a map clear operation.
///
/// Server removes all items in the map. Server returns null.
pub fn clear(bin: &str) -> MapOperation {
    no_arg_op(MapOpcode::Clear, OperationType::MapModify, bin)
}

// =============================================================================
// Remove Operations
// =============================================================================

/// Create a map remove operation.
///
/// Server removes the item identified by the key and returns removed data
/// specified by `return_type`.
pub fn remove_by_key(bin: &str, key: &Value, return_type: MapReturnType) -> MapOperation {
    selector_op(
        MapOpcode::RemoveByKey,
        OperationType::MapModify,
        bin,
        key,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes the items identified by the keys and returns removed data
/// specified by `return_type`.
pub fn remove_by_key_list(bin: &str, keys: &[Value], return_type: MapReturnType) -> MapOperation {
    selector_list_op(
        MapOpcode::RemoveByKeyList,
        OperationType::MapModify,
        bin,
        keys,
        return_type,
    )
}

/// Create a map remove operation over a key interval.
///
/// Server removes items with keys in `[begin, end)`. An absent `begin`
/// matches everything below `end`; an absent `end` matches everything at or
/// above `begin`; callers must supply at least one bound. Server returns
/// removed data specified by `return_type`.
pub fn remove_by_key_range(
    bin: &str,
    begin: Option<&Value>,
    end: Option<&Value>,
    return_type: MapReturnType,
) -> MapOperation {
    interval_op(
        MapOpcode::RemoveByKeyInterval,
        OperationType::MapModify,
        bin,
        Interval::classify(begin, end),
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes the items identified by the value and returns removed data
/// specified by `return_type`.
pub fn remove_by_value(bin: &str, value: &Value, return_type: MapReturnType) -> MapOperation {
    selector_op(
        MapOpcode::RemoveByValue,
        OperationType::MapModify,
        bin,
        value,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes the items identified by the values and returns removed
/// data specified by `return_type`.
pub fn remove_by_value_list(
    bin: &str,
    values: &[Value],
    return_type: MapReturnType,
) -> MapOperation {
    selector_list_op(
        MapOpcode::RemoveByValueList,
        OperationType::MapModify,
        bin,
        values,
        return_type,
    )
}

/// Create a map remove operation over a value interval.
///
/// Server removes items with values in `[begin, end)`. An absent `begin`
/// matches everything below `end`; an absent `end` matches everything at or
/// above `begin`; callers must supply at least one bound. Server returns
/// removed data specified by `return_type`.
pub fn remove_by_value_range(
    bin: &str,
    begin: Option<&Value>,
    end: Option<&Value>,
    return_type: MapReturnType,
) -> MapOperation {
    interval_op(
        MapOpcode::RemoveByValueInterval,
        OperationType::MapModify,
        bin,
        Interval::classify(begin, end),
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes the item at the index and returns removed data specified
/// by `return_type`. Negative indices count from the end.
pub fn remove_by_index(bin: &str, index: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::RemoveByIndex,
        OperationType::MapModify,
        bin,
        index,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes items starting at the index to the end of the map and
/// returns removed data specified by `return_type`.
pub fn remove_by_index_range(bin: &str, index: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::RemoveByIndexRange,
        OperationType::MapModify,
        bin,
        index,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes `count` items starting at the index and returns removed
/// data specified by `return_type`.
pub fn remove_by_index_range_count(
    bin: &str,
    index: i64,
    count: i64,
    return_type: MapReturnType,
) -> MapOperation {
    position_count_op(
        MapOpcode::RemoveByIndexRange,
        OperationType::MapModify,
        bin,
        index,
        count,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes the item with the rank and returns removed data specified
/// by `return_type`. Negative ranks count from the end.
pub fn remove_by_rank(bin: &str, rank: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::RemoveByRank,
        OperationType::MapModify,
        bin,
        rank,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes items starting at the rank to the last-ranked item and
/// returns removed data specified by `return_type`.
pub fn remove_by_rank_range(bin: &str, rank: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::RemoveByRankRange,
        OperationType::MapModify,
        bin,
        rank,
        return_type,
    )
}

/// Create a map remove operation.
///
/// Server removes `count` items starting at the rank and returns removed
/// data specified by `return_type`.
pub fn remove_by_rank_range_count(
    bin: &str,
    rank: i64,
    count: i64,
    return_type: MapReturnType,
) -> MapOperation {
    position_count_op(
        MapOpcode::RemoveByRankRange,
        OperationType::MapModify,
        bin,
        rank,
        count,
        return_type,
    )
}

// =============================================================================
// Read Operations
// =============================================================================

/// Create a map size operation.
///
/// Server returns the number of items in the map.
pub fn size(bin: &str) -> MapOperation {
    no_arg_op(MapOpcode::Size, OperationType::MapRead, bin)
}

/// Create a map get-by-key operation.
///
/// Server selects the item identified by the key and returns selected data
/// specified by `return_type`.
pub fn get_by_key(bin: &str, key: &Value, return_type: MapReturnType) -> MapOperation {
    selector_op(
        MapOpcode::GetByKey,
        OperationType::MapRead,
        bin,
        key,
        return_type,
    )
}

/// Create a map get operation over a key interval.
///
/// Server selects items with keys in `[begin, end)`. An absent `begin`
/// matches everything below `end`; an absent `end` matches everything at or
/// above `begin`; callers must supply at least one bound. Server returns
/// selected data specified by `return_type`.
pub fn get_by_key_range(
    bin: &str,
    begin: Option<&Value>,
    end: Option<&Value>,
    return_type: MapReturnType,
) -> MapOperation {
    interval_op(
        MapOpcode::GetByKeyInterval,
        OperationType::MapRead,
        bin,
        Interval::classify(begin, end),
        return_type,
    )
}

/// Create a map get-by-value operation.
///
/// Server selects the items identified by the value and returns selected
/// data specified by `return_type`.
pub fn get_by_value(bin: &str, value: &Value, return_type: MapReturnType) -> MapOperation {
    selector_op(
        MapOpcode::GetByValue,
        OperationType::MapRead,
        bin,
        value,
        return_type,
    )
}

/// Create a map get operation over a value interval.
///
/// Server selects items with values in `[begin, end)`. An absent `begin`
/// matches everything below `end`; an absent `end` matches everything at or
/// above `begin`; callers must supply at least one bound. Server returns
/// selected data specified by `return_type`.
pub fn get_by_value_range(
    bin: &str,
    begin: Option<&Value>,
    end: Option<&Value>,
    return_type: MapReturnType,
) -> MapOperation {
    interval_op(
        MapOpcode::GetByValueInterval,
        OperationType::MapRead,
        bin,
        Interval::classify(begin, end),
        return_type,
    )
}

/// Create a map get-by-index operation.
///
/// Server selects the item at the index and returns selected data specified
/// by `return_type`. Negative indices count from the end.
pub fn get_by_index(bin: &str, index: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::GetByIndex,
        OperationType::MapRead,
        bin,
        index,
        return_type,
    )
}

/// Create a map get operation.
///
/// Server selects items starting at the index to the end of the map and
/// returns selected data specified by `return_type`.
pub fn get_by_index_range(bin: &str, index: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::GetByIndexRange,
        OperationType::MapRead,
        bin,
        index,
        return_type,
    )
}

/// Create a map get operation.
///
/// Server selects `count` items starting at the index and returns selected
/// data specified by `return_type`.
pub fn get_by_index_range_count(
    bin: &str,
    index: i64,
    count: i64,
    return_type: MapReturnType,
) -> MapOperation {
    position_count_op(
        MapOpcode::GetByIndexRange,
        OperationType::MapRead,
        bin,
        index,
        count,
        return_type,
    )
}

/// Create a map get-by-rank operation.
///
/// Server selects the item with the rank and returns selected data specified
/// by `return_type`. Negative ranks count from the end.
pub fn get_by_rank(bin: &str, rank: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::GetByRank,
        OperationType::MapRead,
        bin,
        rank,
        return_type,
    )
}

/// Create a map get operation.
///
/// Server selects items starting at the rank to the last-ranked item and
/// returns selected data specified by `return_type`.
pub fn get_by_rank_range(bin: &str, rank: i64, return_type: MapReturnType) -> MapOperation {
    position_op(
        MapOpcode::GetByRankRange,
        OperationType::MapRead,
        bin,
        rank,
        return_type,
    )
}

/// Create a map get operation.
///
/// Server selects `count` items starting at the rank and returns selected
/// data specified by `return_type`.
pub fn get_by_rank_range_count(
    bin: &str,
    rank: i64,
    count: i64,
    return_type: MapReturnType,
) -> MapOperation {
    position_count_op(
        MapOpcode::GetByRankRange,
        OperationType::MapRead,
        bin,
        rank,
        count,
        return_type,
    )
}
