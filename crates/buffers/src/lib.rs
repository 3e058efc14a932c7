//! Byte buffer primitives for msgpack-combinators.
//!
//! This crate is the lowest layer of the MessagePack stack: it knows nothing
//! about wire tags, only about big-endian integers, floats and byte runs.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking.
//!   Every read is bounds-checked and reports [`BufferError`] instead of
//!   panicking on truncated input.
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use msgpack_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! assert_eq!(reader.utf8(5).unwrap(), "hello");
//! assert!(reader.u8().is_err());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer: {needed} byte(s) needed at offset {offset}")]
    EndOfBuffer { offset: usize, needed: usize },
    /// Invalid UTF-8 sequence.
    #[error("invalid UTF-8 sequence at offset {offset}")]
    InvalidUtf8 { offset: usize },
}

impl BufferError {
    /// Offset of the cursor when the error was raised.
    pub fn offset(&self) -> usize {
        match self {
            BufferError::EndOfBuffer { offset, .. } | BufferError::InvalidUtf8 { offset } => {
                *offset
            }
        }
    }
}
