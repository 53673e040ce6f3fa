//! Unpacker
//!
//! Structural decoder for packed payloads. The CLI inspector and the test
//! suite use it to verify emitted argument lists; the operation builders
//! themselves never read payloads back.

use crate::error::{MapwireError, Result};
use crate::value::Value;

use super::{
    MARKER_BLOB, MARKER_BOOL, MARKER_FLOAT, MARKER_INT, MARKER_LIST, MARKER_MAP, MARKER_NIL,
    MARKER_STR, OPCODE_SIZE,
};

/// Reads packed values back out of a payload slice
pub struct Unpacker<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Unpacker<'a> {
    /// Create an unpacker over a payload
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes left to decode
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when the whole payload has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the leading big-endian opcode tag
    pub fn read_opcode(&mut self) -> Result<i16> {
        let bytes = self.take(OPCODE_SIZE)?;
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Decode the next value, dispatching on its marker
    pub fn unpack_value(&mut self) -> Result<Value> {
        let marker = self.take_u8()?;
        match marker {
            MARKER_NIL => Ok(Value::Nil),
            MARKER_BOOL => Ok(Value::Bool(self.take_u8()? != 0)),
            MARKER_INT => Ok(Value::Int(self.take_i64()?)),
            MARKER_FLOAT => Ok(Value::Float(f64::from_bits(self.take_u64()?))),
            MARKER_STR => {
                let len = self.take_u32()? as usize;
                let bytes = self.take(len)?.to_vec();
                Ok(Value::Str(String::from_utf8(bytes)?))
            }
            MARKER_BLOB => {
                let len = self.take_u32()? as usize;
                Ok(Value::Blob(self.take(len)?.to_vec()))
            }
            MARKER_LIST => {
                let count = self.container_count()?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.unpack_value()?);
                }
                Ok(Value::List(items))
            }
            MARKER_MAP => {
                let count = self.container_count()?;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.unpack_value()?;
                    let value = self.unpack_value()?;
                    entries.push((key, value));
                }
                Ok(Value::Map(entries))
            }
            other => Err(MapwireError::UnknownMarker(other)),
        }
    }

    /// Decode a list header plus its elements (the argument-list shape)
    pub fn unpack_list(&mut self) -> Result<Vec<Value>> {
        let marker = self.take_u8()?;
        if marker != MARKER_LIST {
            return Err(MapwireError::UnexpectedMarker {
                expected: MARKER_LIST,
                found: marker,
            });
        }
        let count = self.container_count()?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.unpack_value()?);
        }
        Ok(items)
    }

    // =========================================================================
    // Internal byte readers
    // =========================================================================

    /// Read a container count and sanity-check it against the bytes left
    /// (every element needs at least one marker byte)
    fn container_count(&mut self) -> Result<usize> {
        let count = self.take_u32()? as usize;
        if count > self.remaining() {
            return Err(MapwireError::Truncated {
                needed: count,
                remaining: self.remaining(),
            });
        }
        Ok(count)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(MapwireError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take_u64(&mut self) -> Result<u64> {
        // take() guarantees the length, so the conversion cannot fail
        let bytes = self.take(8)?;
        Ok(u64::from_be_bytes(bytes.try_into().unwrap()))
    }

    fn take_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        Ok(i64::from_be_bytes(bytes.try_into().unwrap()))
    }
}

/// Split a payload into its opcode and argument list
///
/// Returns an empty argument list for opcodes that carry none (clear, size).
pub fn unpack_payload(payload: &[u8]) -> Result<(i16, Vec<Value>)> {
    let mut unpacker = Unpacker::new(payload);
    let opcode = unpacker.read_opcode()?;
    let args = if unpacker.is_empty() {
        Vec::new()
    } else {
        unpacker.unpack_list()?
    };
    Ok((opcode, args))
}
