//! [`DynamicValue`]: any MessagePack payload, without a schema.

use std::fmt;

use crate::error::CodecError;
use crate::trace::{TraceEvent, TraceHook};
use crate::wire::constants::FLOAT32;
use crate::wire::{Packer, Unpacker, WireTag};

/// A decoded MessagePack value of unknown shape.
///
/// Integers take the narrowest of `Int`, `Long` and `BigInt` that holds them
/// (see [`DynamicValue::integer`]). Floats keep their wire width, so decoding
/// and re-encoding reproduces the input bytes. Maps keep their entries in
/// wire order, duplicates included.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Nil,
    Bool(bool),
    Int(i32),
    Long(i64),
    BigInt(i128),
    Float(f32),
    Double(f64),
    Str(String),
    Binary(Vec<u8>),
    Array(Vec<DynamicValue>),
    Map(Vec<(DynamicValue, DynamicValue)>),
}

impl DynamicValue {
    /// Wraps an integer in the narrowest variant that holds it.
    pub fn integer(value: i128) -> Self {
        if let Ok(v) = i32::try_from(value) {
            DynamicValue::Int(v)
        } else if let Ok(v) = i64::try_from(value) {
            DynamicValue::Long(v)
        } else {
            DynamicValue::BigInt(value)
        }
    }

    /// The wire type this value encodes to.
    pub fn tag(&self) -> WireTag {
        match self {
            DynamicValue::Nil => WireTag::Nil,
            DynamicValue::Bool(_) => WireTag::Bool,
            DynamicValue::Int(_) | DynamicValue::Long(_) | DynamicValue::BigInt(_) => {
                WireTag::Integer
            }
            DynamicValue::Float(_) | DynamicValue::Double(_) => WireTag::Float,
            DynamicValue::Str(_) => WireTag::String,
            DynamicValue::Binary(_) => WireTag::Binary,
            DynamicValue::Array(_) => WireTag::Array,
            DynamicValue::Map(_) => WireTag::Map,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, DynamicValue::Nil)
    }

    /// The integer value of any integer variant.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            DynamicValue::Int(v) => Some((*v).into()),
            DynamicValue::Long(v) => Some((*v).into()),
            DynamicValue::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up the first entry of a map whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        match self {
            DynamicValue::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        DynamicValue::Bool(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        DynamicValue::Int(v)
    }
}

/// Goes through [`DynamicValue::integer`], so small values become `Int`.
impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        DynamicValue::integer(v.into())
    }
}

impl From<f32> for DynamicValue {
    fn from(v: f32) -> Self {
        DynamicValue::Float(v)
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        DynamicValue::Double(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        DynamicValue::Str(v.to_owned())
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        DynamicValue::Str(v)
    }
}

impl From<Vec<u8>> for DynamicValue {
    fn from(v: Vec<u8>) -> Self {
        DynamicValue::Binary(v)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(v: Vec<DynamicValue>) -> Self {
        DynamicValue::Array(v)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DynamicValue::Nil, Into::into)
    }
}

/// Options for the dynamic value decoder and encoder.
#[derive(Clone)]
pub struct ValueOptions {
    /// Deepest container nesting accepted. The top-level value sits at depth
    /// 0, the elements of a top-level array at depth 1, and so on.
    pub max_depth: usize,
    /// Called for every value decoded or encoded.
    pub trace: Option<TraceHook>,
}

impl Default for ValueOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            trace: None,
        }
    }
}

impl fmt::Debug for ValueOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueOptions")
            .field("max_depth", &self.max_depth)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

impl ValueOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_trace(mut self, hook: TraceHook) -> Self {
        self.trace = Some(hook);
        self
    }

    fn check_depth(&self, depth: usize) -> Result<(), CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

pub(crate) fn read_value(
    unpacker: &mut Unpacker<'_>,
    options: &ValueOptions,
    depth: usize,
) -> Result<DynamicValue, CodecError> {
    options.check_depth(depth)?;
    let offset = unpacker.position();
    let value = match unpacker.next_tag()? {
        WireTag::Nil => {
            unpacker.unpack_nil()?;
            DynamicValue::Nil
        }
        WireTag::Bool => DynamicValue::Bool(unpacker.unpack_bool()?),
        WireTag::Integer => DynamicValue::integer(unpacker.unpack_big_int()?),
        WireTag::Float => {
            if unpacker.peek_marker()? == FLOAT32 {
                DynamicValue::Float(unpacker.unpack_float()?)
            } else {
                DynamicValue::Double(unpacker.unpack_double()?)
            }
        }
        WireTag::String => DynamicValue::Str(unpacker.unpack_string()?),
        WireTag::Binary => DynamicValue::Binary(unpacker.unpack_binary()?),
        WireTag::Array => {
            let count = unpacker.unpack_array_header()?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(unpacker, options, depth + 1)?);
            }
            DynamicValue::Array(items)
        }
        WireTag::Map => {
            let count = unpacker.unpack_map_header()?;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                let key = read_value(unpacker, options, depth + 1)?;
                let value = read_value(unpacker, options, depth + 1)?;
                entries.push((key, value));
            }
            DynamicValue::Map(entries)
        }
        WireTag::Extension => return Err(CodecError::UnsupportedType(WireTag::Extension)),
    };
    if let Some(hook) = &options.trace {
        hook(TraceEvent::Decoded {
            value: &value,
            depth,
            offset,
        });
    }
    Ok(value)
}

pub(crate) fn write_value(
    value: &DynamicValue,
    packer: &mut Packer,
    options: &ValueOptions,
    depth: usize,
) -> Result<(), CodecError> {
    options.check_depth(depth)?;
    if let Some(hook) = &options.trace {
        hook(TraceEvent::Encoding { value, depth });
    }
    match value {
        DynamicValue::Nil => packer.pack_nil(),
        DynamicValue::Bool(v) => packer.pack_bool(*v),
        DynamicValue::Int(v) => packer.pack_int(*v),
        DynamicValue::Long(v) => packer.pack_long(*v),
        DynamicValue::BigInt(v) => packer.pack_big_int(*v)?,
        DynamicValue::Float(v) => packer.pack_float(*v),
        DynamicValue::Double(v) => packer.pack_double(*v),
        DynamicValue::Str(v) => packer.pack_string(v)?,
        DynamicValue::Binary(v) => packer.pack_binary(v)?,
        DynamicValue::Array(items) => {
            packer.pack_array_header(items.len())?;
            for item in items {
                write_value(item, packer, options, depth + 1)?;
            }
        }
        DynamicValue::Map(entries) => {
            packer.pack_map_header(entries.len())?;
            for (key, value) in entries {
                write_value(key, packer, options, depth + 1)?;
                write_value(value, packer, options, depth + 1)?;
            }
        }
    }
    Ok(())
}
