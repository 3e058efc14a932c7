//! Error type shared by every decoder and encoder.

use msgpack_buffers::BufferError;
use thiserror::Error;

use crate::wire::WireTag;

/// Failure of a decode or encode call.
///
/// Errors are returned to the immediate caller; a failure anywhere inside a
/// combined decoder aborts the whole top-level decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected {expected} but found {found} at offset {offset}")]
    TypeMismatch {
        expected: WireTag,
        found: WireTag,
        offset: usize,
    },
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("unsupported wire type {0}")]
    UnsupportedType(WireTag),
    #[error("declared length {declared} exceeds the {remaining} byte(s) left at offset {offset}")]
    MalformedLength {
        declared: usize,
        remaining: usize,
        offset: usize,
    },
    #[error("integer {value} does not fit in {target}")]
    IntegerOverflow { value: i128, target: &'static str },
    #[error("record expects {expected} field(s) but the array holds {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("reserved marker byte 0x{byte:02x} at offset {offset}")]
    ReservedMarker { byte: u8, offset: usize },
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("length {len} exceeds the 32-bit limit of the wire format")]
    LengthOverflow { len: usize },
}

impl From<BufferError> for CodecError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { offset, .. } => CodecError::UnexpectedEnd { offset },
            BufferError::InvalidUtf8 { offset } => CodecError::InvalidUtf8 { offset },
        }
    }
}
