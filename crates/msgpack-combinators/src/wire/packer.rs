use msgpack_buffers::Writer;

use super::constants::*;
use crate::error::CodecError;

/// Output sink for MessagePack values.
///
/// Integers always take the smallest encoding that holds them, so equal
/// values produce equal bytes regardless of the Rust type they came from.
#[derive(Debug, Clone, Default)]
pub struct Packer {
    writer: Writer,
}

fn header_len(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::LengthOverflow { len })
}

impl Packer {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    /// Takes the bytes written so far, leaving the packer empty.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.writer.flush()
    }

    /// Returns the bytes written so far and starts a fresh output.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    pub fn pack_nil(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn pack_bool(&mut self, value: bool) {
        self.writer.u8(if value { TRUE } else { FALSE });
    }

    pub fn pack_short(&mut self, value: i16) {
        self.pack_long(value.into());
    }

    pub fn pack_int(&mut self, value: i32) {
        self.pack_long(value.into());
    }

    pub fn pack_long(&mut self, value: i64) {
        if value >= 0 {
            self.pack_unsigned(value as u64);
        } else if value >= NEGATIVE_FIXINT_MIN {
            self.writer.i8(value as i8);
        } else if value >= i64::from(i8::MIN) {
            self.writer.u8(INT8);
            self.writer.i8(value as i8);
        } else if value >= i64::from(i16::MIN) {
            self.writer.ensure_capacity(3);
            self.writer.u8(INT16);
            self.writer.i16(value as i16);
        } else if value >= i64::from(i32::MIN) {
            self.writer.ensure_capacity(5);
            self.writer.u8(INT32);
            self.writer.i32(value as i32);
        } else {
            self.writer.ensure_capacity(9);
            self.writer.u8(INT64);
            self.writer.i64(value);
        }
    }

    fn pack_unsigned(&mut self, value: u64) {
        if value <= POSITIVE_FIXINT_MAX as u64 {
            self.writer.u8(value as u8);
        } else if value <= u64::from(u8::MAX) {
            self.writer.u8(UINT8);
            self.writer.u8(value as u8);
        } else if value <= u64::from(u16::MAX) {
            self.writer.u8u16(UINT16, value as u16);
        } else if value <= u64::from(u32::MAX) {
            self.writer.u8u32(UINT32, value as u32);
        } else {
            self.writer.u8u64(UINT64, value);
        }
    }

    /// Packs any integer the wire format can hold, `i64::MIN..=u64::MAX`.
    pub fn pack_big_int(&mut self, value: i128) -> Result<(), CodecError> {
        if let Ok(v) = i64::try_from(value) {
            self.pack_long(v);
        } else if let Ok(v) = u64::try_from(value) {
            self.pack_unsigned(v);
        } else {
            return Err(CodecError::IntegerOverflow {
                value,
                target: "a MessagePack integer",
            });
        }
        Ok(())
    }

    pub fn pack_float(&mut self, value: f32) {
        self.writer.u8f32(FLOAT32, value);
    }

    pub fn pack_double(&mut self, value: f64) {
        self.writer.u8f64(FLOAT64, value);
    }

    pub fn pack_string(&mut self, value: &str) -> Result<(), CodecError> {
        let len = value.len();
        let n = header_len(len)?;
        if len <= FIXSTR_MAX {
            self.writer.u8(FIXSTR | len as u8);
        } else if len <= u8::MAX as usize {
            self.writer.u8(STR8);
            self.writer.u8(len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(STR16, len as u16);
        } else {
            self.writer.u8u32(STR32, n);
        }
        self.writer.utf8(value);
        Ok(())
    }

    pub fn pack_binary_header(&mut self, len: usize) -> Result<(), CodecError> {
        let n = header_len(len)?;
        if len <= u8::MAX as usize {
            self.writer.u8(BIN8);
            self.writer.u8(len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(BIN16, len as u16);
        } else {
            self.writer.u8u32(BIN32, n);
        }
        Ok(())
    }

    /// Writes raw bytes with no header, following [`Packer::pack_binary_header`].
    pub fn write_payload(&mut self, payload: &[u8]) {
        self.writer.buf(payload);
    }

    pub fn pack_binary(&mut self, value: &[u8]) -> Result<(), CodecError> {
        self.pack_binary_header(value.len())?;
        self.write_payload(value);
        Ok(())
    }

    pub fn pack_array_header(&mut self, len: usize) -> Result<(), CodecError> {
        let n = header_len(len)?;
        if len <= FIXARRAY_MAX {
            self.writer.u8(FIXARRAY | len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(ARRAY16, len as u16);
        } else {
            self.writer.u8u32(ARRAY32, n);
        }
        Ok(())
    }

    pub fn pack_map_header(&mut self, len: usize) -> Result<(), CodecError> {
        let n = header_len(len)?;
        if len <= FIXMAP_MAX {
            self.writer.u8(FIXMAP | len as u8);
        } else if len <= u16::MAX as usize {
            self.writer.u8u16(MAP16, len as u16);
        } else {
            self.writer.u8u32(MAP32, n);
        }
        Ok(())
    }
}
