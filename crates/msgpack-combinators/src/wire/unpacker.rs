use msgpack_buffers::Reader;

use super::constants::*;
use super::WireTag;
use crate::error::CodecError;

/// Read cursor over an immutable MessagePack buffer.
///
/// Every `unpack_*` call consumes exactly one tagged value, or nothing at all
/// when it fails on the marker byte. Truncated input is reported as
/// [`CodecError::UnexpectedEnd`], never as a panic.
#[derive(Debug, Clone)]
pub struct Unpacker<'a> {
    reader: Reader<'a>,
}

impl<'a> Unpacker<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.reader.x
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.reader.size()
    }

    pub fn has_next(&self) -> bool {
        self.remaining() > 0
    }

    /// Returns the next marker byte without consuming it.
    pub fn peek_marker(&self) -> Result<u8, CodecError> {
        Ok(self.reader.peek()?)
    }

    /// Returns the type of the next value without consuming it.
    pub fn next_tag(&self) -> Result<WireTag, CodecError> {
        let byte = self.peek_marker()?;
        WireTag::from_marker(byte).ok_or(CodecError::ReservedMarker {
            byte,
            offset: self.position(),
        })
    }

    /// Consumes the marker byte if it belongs to `expected`.
    fn take_marker(&mut self, expected: WireTag) -> Result<u8, CodecError> {
        let found = self.next_tag()?;
        if found != expected {
            return Err(CodecError::TypeMismatch {
                expected,
                found,
                offset: self.position(),
            });
        }
        Ok(self.reader.u8()?)
    }

    /// Fails with `MalformedLength` when fewer than `declared * unit` bytes remain.
    fn check_length(&self, declared: usize, unit: usize, offset: usize) -> Result<(), CodecError> {
        let remaining = self.remaining();
        if declared.saturating_mul(unit) > remaining {
            return Err(CodecError::MalformedLength {
                declared,
                remaining,
                offset,
            });
        }
        Ok(())
    }

    /// Restores the cursor to `start` when `result` is an error.
    fn rewind<T>(&mut self, start: usize, result: Result<T, CodecError>) -> Result<T, CodecError> {
        if result.is_err() {
            self.reader.x = start;
        }
        result
    }

    pub fn unpack_nil(&mut self) -> Result<(), CodecError> {
        self.take_marker(WireTag::Nil)?;
        Ok(())
    }

    pub fn unpack_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.take_marker(WireTag::Bool)? == TRUE)
    }

    /// Reads any integer encoding. The result covers `i64::MIN..=u64::MAX`.
    fn unpack_integer(&mut self) -> Result<i128, CodecError> {
        let start = self.position();
        let result = self.read_integer();
        self.rewind(start, result)
    }

    fn read_integer(&mut self) -> Result<i128, CodecError> {
        let byte = self.take_marker(WireTag::Integer)?;
        let value = match byte {
            0x00..=0x7f => byte as i128,
            0xe0..=0xff => byte as i8 as i128,
            UINT8 => self.reader.u8()?.into(),
            UINT16 => self.reader.u16()?.into(),
            UINT32 => self.reader.u32()?.into(),
            UINT64 => self.reader.u64()?.into(),
            INT8 => self.reader.i8()?.into(),
            INT16 => self.reader.i16()?.into(),
            INT32 => self.reader.i32()?.into(),
            _ => self.reader.i64()?.into(),
        };
        Ok(value)
    }

    /// Reads an integer and narrows it; on overflow nothing is consumed.
    fn narrow_integer<T>(
        &mut self,
        narrow: impl FnOnce(i128) -> Option<T>,
        target: &'static str,
    ) -> Result<T, CodecError> {
        let start = self.position();
        let result = self.read_integer().and_then(|value| {
            narrow(value).ok_or(CodecError::IntegerOverflow { value, target })
        });
        self.rewind(start, result)
    }

    pub fn unpack_int(&mut self) -> Result<i32, CodecError> {
        self.narrow_integer(|value| i32::try_from(value).ok(), "i32")
    }

    pub fn unpack_long(&mut self) -> Result<i64, CodecError> {
        self.narrow_integer(|value| i64::try_from(value).ok(), "i64")
    }

    /// Reads any integer, including unsigned 64-bit values above `i64::MAX`.
    pub fn unpack_big_int(&mut self) -> Result<i128, CodecError> {
        self.unpack_integer()
    }

    /// Reads a float32 or float64 value as `f64`.
    pub fn unpack_double(&mut self) -> Result<f64, CodecError> {
        let start = self.position();
        let result = self.read_double();
        self.rewind(start, result)
    }

    fn read_double(&mut self) -> Result<f64, CodecError> {
        if self.take_marker(WireTag::Float)? == FLOAT32 {
            Ok(self.reader.f32()?.into())
        } else {
            Ok(self.reader.f64()?)
        }
    }

    /// Reads a float32 or float64 value as `f32`; float64 values are narrowed.
    pub fn unpack_float(&mut self) -> Result<f32, CodecError> {
        self.unpack_double().map(|v| v as f32)
    }

    fn read_string_header(&mut self) -> Result<usize, CodecError> {
        let offset = self.position();
        let byte = self.take_marker(WireTag::String)?;
        let len = match byte {
            STR8 => self.reader.u8()? as usize,
            STR16 => self.reader.u16()? as usize,
            STR32 => self.reader.u32()? as usize,
            _ => (byte & 0x1f) as usize,
        };
        self.check_length(len, 1, offset)?;
        Ok(len)
    }

    pub fn unpack_string(&mut self) -> Result<String, CodecError> {
        let start = self.position();
        let result = self
            .read_string_header()
            .and_then(|len| Ok(self.reader.utf8(len)?.to_owned()));
        self.rewind(start, result)
    }

    /// Reads a binary header and returns the payload length.
    ///
    /// The payload itself is read with [`Unpacker::read_payload`].
    pub fn unpack_binary_header(&mut self) -> Result<usize, CodecError> {
        let start = self.position();
        let result = self.read_binary_header();
        self.rewind(start, result)
    }

    fn read_binary_header(&mut self) -> Result<usize, CodecError> {
        let offset = self.position();
        let byte = self.take_marker(WireTag::Binary)?;
        let len = match byte {
            BIN8 => self.reader.u8()? as usize,
            BIN16 => self.reader.u16()? as usize,
            _ => self.reader.u32()? as usize,
        };
        self.check_length(len, 1, offset)?;
        Ok(len)
    }

    pub fn read_payload(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        Ok(self.reader.buf(len)?)
    }

    pub fn unpack_binary(&mut self) -> Result<Vec<u8>, CodecError> {
        let start = self.position();
        let result = self
            .read_binary_header()
            .and_then(|len| self.read_payload(len).map(<[u8]>::to_vec));
        self.rewind(start, result)
    }

    pub fn unpack_array_header(&mut self) -> Result<usize, CodecError> {
        let start = self.position();
        let result = self.read_array_header();
        self.rewind(start, result)
    }

    fn read_array_header(&mut self) -> Result<usize, CodecError> {
        let offset = self.position();
        let byte = self.take_marker(WireTag::Array)?;
        let count = match byte {
            ARRAY16 => self.reader.u16()? as usize,
            ARRAY32 => self.reader.u32()? as usize,
            _ => (byte & 0x0f) as usize,
        };
        self.check_length(count, 1, offset)?;
        Ok(count)
    }

    pub fn unpack_map_header(&mut self) -> Result<usize, CodecError> {
        let start = self.position();
        let result = self.read_map_header();
        self.rewind(start, result)
    }

    fn read_map_header(&mut self) -> Result<usize, CodecError> {
        let offset = self.position();
        let byte = self.take_marker(WireTag::Map)?;
        let count = match byte {
            MAP16 => self.reader.u16()? as usize,
            MAP32 => self.reader.u32()? as usize,
            _ => (byte & 0x0f) as usize,
        };
        self.check_length(count, 2, offset)?;
        Ok(count)
    }

    /// Skips exactly one complete value of any type, extensions included.
    pub fn skip_value(&mut self) -> Result<(), CodecError> {
        let mut pending: usize = 1;
        while pending > 0 {
            pending -= 1;
            let offset = self.position();
            let byte = self.peek_marker()?;
            let tag = WireTag::from_marker(byte)
                .ok_or(CodecError::ReservedMarker { byte, offset })?;
            match tag {
                WireTag::Nil => self.unpack_nil()?,
                WireTag::Bool => {
                    self.unpack_bool()?;
                }
                WireTag::Integer => {
                    self.unpack_integer()?;
                }
                WireTag::Float => {
                    self.unpack_double()?;
                }
                WireTag::String => {
                    let len = self.read_string_header()?;
                    self.reader.skip(len)?;
                }
                WireTag::Binary => {
                    let len = self.unpack_binary_header()?;
                    self.reader.skip(len)?;
                }
                WireTag::Extension => self.skip_extension()?,
                WireTag::Array => {
                    pending = pending.saturating_add(self.unpack_array_header()?);
                }
                WireTag::Map => {
                    let count = self.unpack_map_header()?;
                    pending = pending.saturating_add(count.saturating_mul(2));
                }
            }
        }
        Ok(())
    }

    fn skip_extension(&mut self) -> Result<(), CodecError> {
        let offset = self.position();
        let byte = self.reader.u8()?;
        let len = match byte {
            FIXEXT1 => 1,
            FIXEXT2 => 2,
            FIXEXT4 => 4,
            FIXEXT8 => 8,
            FIXEXT16 => 16,
            EXT8 => self.reader.u8()? as usize,
            EXT16 => self.reader.u16()? as usize,
            _ => self.reader.u32()? as usize,
        };
        // One type byte precedes the payload.
        self.check_length(len.saturating_add(1), 1, offset)?;
        self.reader.skip(len + 1)?;
        Ok(())
    }
}
