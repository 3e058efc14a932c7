use std::fmt;

use super::constants::*;

/// The value type announced by a marker byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireTag {
    Nil,
    Bool,
    Integer,
    Float,
    String,
    Binary,
    Array,
    Map,
    Extension,
}

impl WireTag {
    /// Classifies a marker byte. Returns `None` for the reserved byte `0xc1`.
    pub fn from_marker(byte: u8) -> Option<WireTag> {
        let tag = match byte {
            0x00..=0x7f | 0xe0..=0xff => WireTag::Integer,
            0x80..=0x8f => WireTag::Map,
            0x90..=0x9f => WireTag::Array,
            0xa0..=0xbf => WireTag::String,
            NIL => WireTag::Nil,
            RESERVED => return None,
            FALSE | TRUE => WireTag::Bool,
            BIN8..=BIN32 => WireTag::Binary,
            EXT8..=EXT32 | FIXEXT1..=FIXEXT16 => WireTag::Extension,
            FLOAT32 | FLOAT64 => WireTag::Float,
            UINT8..=INT64 => WireTag::Integer,
            STR8..=STR32 => WireTag::String,
            ARRAY16 | ARRAY32 => WireTag::Array,
            MAP16 | MAP32 => WireTag::Map,
        };
        Some(tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WireTag::Nil => "nil",
            WireTag::Bool => "bool",
            WireTag::Integer => "integer",
            WireTag::Float => "float",
            WireTag::String => "string",
            WireTag::Binary => "binary",
            WireTag::Array => "array",
            WireTag::Map => "map",
            WireTag::Extension => "extension",
        }
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
