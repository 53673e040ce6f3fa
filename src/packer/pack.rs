//! Packer
//!
//! Appends an opcode tag and marker-tagged values into a scratch buffer,
//! then freezes the result into an immutable payload. One packer per
//! operation build; nothing is shared between calls.

use bytes::{BufMut, Bytes, BytesMut};

use crate::value::Value;

use super::{
    MARKER_BLOB, MARKER_BOOL, MARKER_FLOAT, MARKER_INT, MARKER_LIST, MARKER_MAP, MARKER_NIL,
    MARKER_STR,
};

/// Starting scratch capacity; most payloads are a few dozen bytes
const INITIAL_CAPACITY: usize = 64;

/// Byte-buffer writer for operation payloads
#[derive(Debug)]
pub struct Packer {
    buf: BytesMut,
}

impl Packer {
    /// Create an empty packer
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Write the leading opcode tag (raw big-endian i16, no marker)
    pub fn pack_opcode(&mut self, opcode: i16) {
        self.buf.put_i16(opcode);
    }

    /// Write a container header announcing `count` packed arguments
    pub fn pack_list_header(&mut self, count: usize) {
        self.buf.put_u8(MARKER_LIST);
        self.buf.put_u32(count as u32);
    }

    /// Write a map container header announcing `count` key/value entries
    pub fn pack_map_header(&mut self, count: usize) {
        self.buf.put_u8(MARKER_MAP);
        self.buf.put_u32(count as u32);
    }

    /// Write the explicit null marker
    pub fn pack_nil(&mut self) {
        self.buf.put_u8(MARKER_NIL);
    }

    /// Write a boolean value
    pub fn pack_bool(&mut self, v: bool) {
        self.buf.put_u8(MARKER_BOOL);
        self.buf.put_u8(v as u8);
    }

    /// Write a signed integer value
    pub fn pack_int(&mut self, v: i64) {
        self.buf.put_u8(MARKER_INT);
        self.buf.put_i64(v);
    }

    /// Write a float value
    pub fn pack_float(&mut self, v: f64) {
        self.buf.put_u8(MARKER_FLOAT);
        self.buf.put_f64(v);
    }

    /// Write a UTF-8 string value
    pub fn pack_str(&mut self, v: &str) {
        self.buf.put_u8(MARKER_STR);
        self.buf.put_u32(v.len() as u32);
        self.buf.put_slice(v.as_bytes());
    }

    /// Write a raw byte blob value
    pub fn pack_blob(&mut self, v: &[u8]) {
        self.buf.put_u8(MARKER_BLOB);
        self.buf.put_u32(v.len() as u32);
        self.buf.put_slice(v);
    }

    /// Write any value, dispatching on its variant
    pub fn pack_value(&mut self, value: &Value) {
        match value {
            Value::Nil => self.pack_nil(),
            Value::Bool(v) => self.pack_bool(*v),
            Value::Int(v) => self.pack_int(*v),
            Value::Float(v) => self.pack_float(*v),
            Value::Str(v) => self.pack_str(v),
            Value::Blob(v) => self.pack_blob(v),
            Value::List(items) => self.pack_list(items),
            Value::Map(entries) => self.pack_mapping(entries),
        }
    }

    /// Write a sequence as one nested list value
    pub fn pack_list(&mut self, items: &[Value]) {
        self.pack_list_header(items.len());
        for item in items {
            self.pack_value(item);
        }
    }

    /// Write entries as one nested map value (caller order preserved)
    pub fn pack_mapping(&mut self, entries: &[(Value, Value)]) {
        self.pack_map_header(entries.len());
        for (key, value) in entries {
            self.pack_value(key);
            self.pack_value(value);
        }
    }

    /// Current encoded size in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been packed yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freeze the scratch buffer into the immutable payload
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for Packer {
    fn default() -> Self {
        Self::new()
    }
}
