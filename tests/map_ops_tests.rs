//! Map Operation Tests
//!
//! Tests for the operation builders: opcode selection, argument arity, and
//! the encoded payload shapes.

use mapwire::maps::{self, MapOpcode};
use mapwire::packer::unpack_payload;
use mapwire::{MapOperation, MapOrder, MapPolicy, MapReturnType, MapWriteMode, OperationType, Value};

/// Decode a payload into its opcode and argument list
fn decode(op: &MapOperation) -> (i16, Vec<Value>) {
    unpack_payload(&op.payload).unwrap()
}

fn key(s: &str) -> Value {
    Value::Str(s.to_string())
}

// =============================================================================
// Write Operation Tests
// =============================================================================

#[test]
fn test_put_update_mode() {
    let policy = MapPolicy::new(MapOrder::KeyOrdered, MapWriteMode::Update);
    let op = maps::put(&policy, "m", &key("k1"), &Value::Int(5));

    assert_eq!(op.op_type, OperationType::MapModify);
    assert_eq!(op.bin, "m");

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Put.code());
    assert_eq!(args, vec![key("k1"), Value::Int(5), Value::Int(1)]);
}

#[test]
fn test_put_create_only_mode() {
    let policy = MapPolicy::new(MapOrder::Unordered, MapWriteMode::CreateOnly);
    let op = maps::put(&policy, "m", &key("k"), &Value::Int(1));

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Add.code());
    assert_eq!(args, vec![key("k"), Value::Int(1), Value::Int(0)]);
}

#[test]
fn test_put_update_only_drops_order() {
    // Replace cannot create the entry, so no order attribute is sent
    let policy = MapPolicy::new(MapOrder::KeyOrdered, MapWriteMode::UpdateOnly);
    let op = maps::put(&policy, "m", &key("k"), &Value::Int(1));

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Replace.code());
    assert_eq!(args, vec![key("k"), Value::Int(1)]);
}

#[test]
fn test_put_items_update_mode() {
    let policy = MapPolicy::new(MapOrder::KeyValueOrdered, MapWriteMode::Update);
    let items = vec![(key("a"), Value::Int(1)), (key("b"), Value::Int(2))];
    let op = maps::put_items(&policy, "m", &items);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::PutItems.code());
    assert_eq!(args, vec![Value::Map(items), Value::Int(3)]);
}

#[test]
fn test_put_items_replace_drops_order() {
    let policy = MapPolicy::new(MapOrder::KeyOrdered, MapWriteMode::UpdateOnly);
    let items = vec![(key("a"), Value::Int(1))];
    let op = maps::put_items(&policy, "m", &items);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::ReplaceItems.code());
    assert_eq!(args, vec![Value::Map(items)]);
}

#[test]
fn test_put_items_preserves_entry_order() {
    let policy = MapPolicy::default();
    let items = vec![
        (key("b"), Value::Int(2)),
        (key("a"), Value::Int(1)),
        (Value::Int(5), Value::Str("five".to_string())),
    ];
    let op = maps::put_items(&policy, "m", &items);

    let (_, args) = decode(&op);
    assert_eq!(args[0], Value::Map(items));
}

#[test]
fn test_increment_always_carries_order() {
    // Unlike put, increment may create the entry under any write mode
    let policy = MapPolicy::new(MapOrder::KeyOrdered, MapWriteMode::UpdateOnly);
    let op = maps::increment(&policy, "m", &key("counter"), &Value::Int(2));

    assert!(op.is_modify());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Increment.code());
    assert_eq!(args, vec![key("counter"), Value::Int(2), Value::Int(1)]);
}

#[test]
fn test_decrement() {
    let policy = MapPolicy::default();
    let op = maps::decrement(&policy, "m", &key("counter"), &Value::Float(1.5));

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Decrement.code());
    assert_eq!(args, vec![key("counter"), Value::Float(1.5), Value::Int(0)]);
}

#[test]
fn test_clear_no_args() {
    let op = maps::clear("m");

    assert!(op.is_modify());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Clear.code());
    assert!(args.is_empty());
}

// =============================================================================
// Policy Operation Tests
// =============================================================================

#[test]
fn test_set_policy() {
    let policy = MapPolicy::new(MapOrder::KeyValueOrdered, MapWriteMode::Update);
    let op = maps::set_policy(&policy, "m");

    assert!(op.is_modify());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::SetType.code());
    assert_eq!(args, vec![Value::Int(3)]);
}

// =============================================================================
// Remove Operation Tests
// =============================================================================

#[test]
fn test_remove_by_key() {
    let op = maps::remove_by_key("m", &key("k"), MapReturnType::Value);

    assert!(op.is_modify());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByKey.code());
    assert_eq!(args, vec![Value::Int(7), key("k")]);
}

#[test]
fn test_remove_by_key_list_packs_one_value() {
    let keys = vec![key("a"), key("b"), key("c")];
    let op = maps::remove_by_key_list("m", &keys, MapReturnType::Count);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByKeyList.code());
    // The whole selector list is a single nested argument
    assert_eq!(args.len(), 2);
    assert_eq!(args[0], Value::Int(5));
    assert_eq!(args[1], Value::List(keys));
}

#[test]
fn test_remove_by_value() {
    let op = maps::remove_by_value("m", &Value::Int(42), MapReturnType::Key);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByValue.code());
    assert_eq!(args, vec![Value::Int(6), Value::Int(42)]);
}

#[test]
fn test_remove_by_value_list_packs_one_value() {
    let values = vec![Value::Int(1), Value::Int(2)];
    let op = maps::remove_by_value_list("m", &values, MapReturnType::None);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByValueList.code());
    assert_eq!(args, vec![Value::Int(0), Value::List(values)]);
}

#[test]
fn test_remove_by_key_range_shapes() {
    let begin = key("a");
    let end = key("z");

    let (code, args) =
        decode(&maps::remove_by_key_range("m", Some(&begin), Some(&end), MapReturnType::Value));
    assert_eq!(code, MapOpcode::RemoveByKeyInterval.code());
    assert_eq!(args, vec![Value::Int(7), key("a"), key("z")]);

    let (_, args) = decode(&maps::remove_by_key_range("m", Some(&begin), None, MapReturnType::Value));
    assert_eq!(args, vec![Value::Int(7), key("a")]);

    let (_, args) = decode(&maps::remove_by_key_range("m", None, Some(&end), MapReturnType::Value));
    assert_eq!(args, vec![Value::Int(7), Value::Nil, key("z")]);
}

#[test]
fn test_remove_by_value_range() {
    let begin = Value::Int(10);
    let op = maps::remove_by_value_range("m", Some(&begin), None, MapReturnType::Count);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByValueInterval.code());
    assert_eq!(args, vec![Value::Int(5), Value::Int(10)]);
}

#[test]
fn test_remove_by_index() {
    let op = maps::remove_by_index("m", -1, MapReturnType::KeyValue);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByIndex.code());
    assert_eq!(args, vec![Value::Int(8), Value::Int(-1)]);
}

#[test]
fn test_remove_by_index_range() {
    let (code, args) = decode(&maps::remove_by_index_range("m", 2, MapReturnType::None));
    assert_eq!(code, MapOpcode::RemoveByIndexRange.code());
    assert_eq!(args, vec![Value::Int(0), Value::Int(2)]);

    let (code, args) =
        decode(&maps::remove_by_index_range_count("m", 2, 4, MapReturnType::None));
    assert_eq!(code, MapOpcode::RemoveByIndexRange.code());
    assert_eq!(args, vec![Value::Int(0), Value::Int(2), Value::Int(4)]);
}

#[test]
fn test_remove_by_rank() {
    let op = maps::remove_by_rank("m", 0, MapReturnType::Value);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::RemoveByRank.code());
    assert_eq!(args, vec![Value::Int(7), Value::Int(0)]);
}

#[test]
fn test_remove_by_rank_range() {
    let (code, args) = decode(&maps::remove_by_rank_range("m", -2, MapReturnType::Value));
    assert_eq!(code, MapOpcode::RemoveByRankRange.code());
    assert_eq!(args, vec![Value::Int(7), Value::Int(-2)]);

    let (code, args) =
        decode(&maps::remove_by_rank_range_count("m", 1, 3, MapReturnType::Count));
    assert_eq!(code, MapOpcode::RemoveByRankRange.code());
    assert_eq!(args, vec![Value::Int(5), Value::Int(1), Value::Int(3)]);
}

// =============================================================================
// Read Operation Tests
// =============================================================================

#[test]
fn test_size_no_args() {
    let op = maps::size("m");

    assert!(op.is_read());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::Size.code());
    assert!(args.is_empty());
}

#[test]
fn test_get_by_key() {
    let op = maps::get_by_key("m", &key("k"), MapReturnType::Value);

    assert!(op.is_read());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByKey.code());
    assert_eq!(args, vec![Value::Int(7), key("k")]);
}

#[test]
fn test_get_by_key_range_open_begin() {
    // Absent begin packs an explicit nil so the end bound keeps its slot
    let end = key("z");
    let op = maps::get_by_key_range("m", None, Some(&end), MapReturnType::Value);

    assert!(op.is_read());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByKeyInterval.code());
    assert_eq!(args, vec![Value::Int(7), Value::Nil, key("z")]);
}

#[test]
fn test_get_by_key_range_open_end() {
    // Absent end drops the argument instead of packing nil
    let begin = key("a");
    let op = maps::get_by_key_range("m", Some(&begin), None, MapReturnType::Key);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByKeyInterval.code());
    assert_eq!(args, vec![Value::Int(6), key("a")]);
}

#[test]
fn test_get_by_key_range_closed() {
    let begin = key("a");
    let end = key("z");
    let op = maps::get_by_key_range("m", Some(&begin), Some(&end), MapReturnType::Count);

    let (_, args) = decode(&op);
    assert_eq!(args, vec![Value::Int(5), key("a"), key("z")]);
}

#[test]
fn test_get_by_value() {
    let op = maps::get_by_value("m", &Value::Int(9), MapReturnType::Index);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByValue.code());
    assert_eq!(args, vec![Value::Int(1), Value::Int(9)]);
}

#[test]
fn test_get_by_value_range() {
    let begin = Value::Int(10);
    let end = Value::Int(20);
    let op = maps::get_by_value_range("m", Some(&begin), Some(&end), MapReturnType::Value);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByValueInterval.code());
    assert_eq!(args, vec![Value::Int(7), Value::Int(10), Value::Int(20)]);
}

#[test]
fn test_get_by_index() {
    let op = maps::get_by_index("m", 4, MapReturnType::Value);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByIndex.code());
    assert_eq!(args, vec![Value::Int(7), Value::Int(4)]);
}

#[test]
fn test_get_by_index_range_count_negative_index() {
    // Last three items by index, keys and values back
    let op = maps::get_by_index_range_count("m", -3, 3, MapReturnType::KeyValue);

    assert!(op.is_read());
    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByIndexRange.code());
    assert_eq!(args, vec![Value::Int(8), Value::Int(-3), Value::Int(3)]);
}

#[test]
fn test_get_by_index_range() {
    let (code, args) = decode(&maps::get_by_index_range("m", 1, MapReturnType::Rank));
    assert_eq!(code, MapOpcode::GetByIndexRange.code());
    assert_eq!(args, vec![Value::Int(3), Value::Int(1)]);
}

#[test]
fn test_get_by_rank() {
    let op = maps::get_by_rank("m", -1, MapReturnType::Key);

    let (code, args) = decode(&op);
    assert_eq!(code, MapOpcode::GetByRank.code());
    assert_eq!(args, vec![Value::Int(6), Value::Int(-1)]);
}

#[test]
fn test_get_by_rank_range() {
    let (code, args) = decode(&maps::get_by_rank_range("m", 5, MapReturnType::Value));
    assert_eq!(code, MapOpcode::GetByRankRange.code());
    assert_eq!(args, vec![Value::Int(7), Value::Int(5)]);

    let (code, args) =
        decode(&maps::get_by_rank_range_count("m", 0, 2, MapReturnType::ReverseRank));
    assert_eq!(code, MapOpcode::GetByRankRange.code());
    assert_eq!(args, vec![Value::Int(4), Value::Int(0), Value::Int(2)]);
}

// =============================================================================
// Operation Class Tests
// =============================================================================

#[test]
fn test_operation_class_tags() {
    let policy = MapPolicy::default();

    assert!(maps::put(&policy, "m", &key("k"), &Value::Int(1)).is_modify());
    assert!(maps::set_policy(&policy, "m").is_modify());
    assert!(maps::clear("m").is_modify());
    assert!(maps::remove_by_key("m", &key("k"), MapReturnType::None).is_modify());
    assert!(maps::remove_by_rank("m", 0, MapReturnType::None).is_modify());

    assert!(maps::size("m").is_read());
    assert!(maps::get_by_key("m", &key("k"), MapReturnType::Value).is_read());
    assert!(maps::get_by_rank("m", 0, MapReturnType::Count).is_read());
}

#[test]
fn test_bin_name_carried_through() {
    let op = maps::size("profile_scores");
    assert_eq!(op.bin, "profile_scores");
}

// =============================================================================
// Opcode Table Tests
// =============================================================================

#[test]
fn test_opcode_values() {
    assert_eq!(MapOpcode::SetType.code(), 64);
    assert_eq!(MapOpcode::Put.code(), 67);
    assert_eq!(MapOpcode::ReplaceItems.code(), 70);
    assert_eq!(MapOpcode::Clear.code(), 75);
    assert_eq!(MapOpcode::RemoveByRankRange.code(), 87);
    assert_eq!(MapOpcode::Size.code(), 96);
    assert_eq!(MapOpcode::GetByKeyInterval.code(), 103);
    assert_eq!(MapOpcode::GetByRankRange.code(), 106);
}

#[test]
fn test_opcode_try_from_roundtrip() {
    let codes = [
        64, 65, 66, 67, 68, 69, 70, 73, 74, 75, 76, 77, 79, 81, 82, 83, 84, 85, 86, 87, 96, 97,
        98, 100, 102, 103, 104, 105, 106,
    ];

    for code in codes {
        let opcode = MapOpcode::try_from(code).unwrap();
        assert_eq!(opcode.code(), code);
    }
}

#[test]
fn test_unknown_opcode_rejected() {
    // Gaps in the table and out-of-range codes
    for code in [0, 63, 71, 78, 80, 99, 107, -1] {
        let result = MapOpcode::try_from(code);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown map opcode"));
    }
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_put() {
    let policy = MapPolicy::new(MapOrder::KeyOrdered, MapWriteMode::Update);
    let op = maps::put(&policy, "m", &key("k1"), &Value::Int(5));
    let bytes = &op.payload;

    // Expected: [0x00 0x43][0x06][count 3][str "k1"][int 5][int 1]
    assert_eq!(&bytes[0..2], &[0x00, 0x43]); // opcode 67
    assert_eq!(bytes[2], 0x06); // argument list marker
    assert_eq!(&bytes[3..7], &[0x00, 0x00, 0x00, 0x03]); // 3 arguments
    assert_eq!(bytes[7], 0x04); // key marker: str
    assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x00, 0x02]); // key length
    assert_eq!(&bytes[12..14], b"k1");
    assert_eq!(bytes[14], 0x02); // value marker: int
    assert_eq!(&bytes[15..23], &[0, 0, 0, 0, 0, 0, 0, 5]);
    assert_eq!(bytes[23], 0x02); // order marker: int
    assert_eq!(&bytes[24..32], &[0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(bytes.len(), 32);
}

#[test]
fn test_wire_format_clear() {
    let op = maps::clear("m");
    assert_eq!(&op.payload[..], &[0x00, 0x4B]); // opcode 75, nothing else
}

#[test]
fn test_wire_format_open_begin_nil_slot() {
    let end = key("z");
    let op = maps::get_by_key_range("m", None, Some(&end), MapReturnType::Value);
    let bytes = &op.payload;

    // [0x00 0x67][0x06][count 3][int 7][nil][str "z"]
    assert_eq!(&bytes[0..2], &[0x00, 0x67]); // opcode 103
    assert_eq!(&bytes[3..7], &[0x00, 0x00, 0x00, 0x03]);
    assert_eq!(bytes[7], 0x02); // return type marker
    assert_eq!(&bytes[8..16], &[0, 0, 0, 0, 0, 0, 0, 7]);
    assert_eq!(bytes[16], 0x00); // nil in the begin slot
    assert_eq!(bytes[17], 0x04); // end bound marker
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_builders_are_idempotent() {
    let policy = MapPolicy::new(MapOrder::KeyOrdered, MapWriteMode::Update);
    let items = vec![(key("a"), Value::Int(1)), (key("b"), Value::Int(2))];

    let first = maps::put_items(&policy, "m", &items);
    let second = maps::put_items(&policy, "m", &items);
    assert_eq!(first, second);
    assert_eq!(first.payload, second.payload);

    let first = maps::get_by_rank_range_count("m", -4, 4, MapReturnType::KeyValue);
    let second = maps::get_by_rank_range_count("m", -4, 4, MapReturnType::KeyValue);
    assert_eq!(first.payload, second.payload);
}
